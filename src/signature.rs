//! HMAC-SHA256 webhook signatures.
//!
//! A delivery is authentic when its `x-bank-webhook-signature` header equals
//! `sha256=<hex>` where `<hex>` is the HMAC-SHA256 of the raw request body,
//! keyed with the shared webhook secret.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Builds the header value expected for `payload`.
///
/// Must be computed over the exact bytes received: re-serializing a parsed
/// body can reorder keys or change whitespace and break the signature.
pub fn sign(payload: &[u8], secret: &str) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(payload);
    Ok(format!(
        "{SIGNATURE_PREFIX}{}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks `signature` against the signature of `payload`. A missing header never verifies.
pub fn verify(payload: &[u8], signature: Option<&str>, secret: &str) -> bool {
    let Some(signature) = signature else {
        return false;
    };

    match sign(payload, secret) {
        Ok(expected) => timing_safe_eq(&expected, signature),
        Err(_) => false,
    }
}

fn timing_safe_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
