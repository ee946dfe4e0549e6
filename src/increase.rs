mod account;
mod api;
mod transfer;
mod webhook;

pub use self::account::*;
pub use self::api::*;
pub use self::transfer::*;
pub use self::webhook::*;
