pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod increase;
pub mod round_up;
pub mod signature;
