// Dogewallet - Dogecoin wallet cryptography core

pub mod address;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod network;
pub mod wallet;

pub use address::{public_key_to_address, validate_address, wif_to_address, Address};
pub use error::{Result, WalletError};
pub use network::{KeyEncoding, Network};
pub use wallet::{KeyPairInfo, Wallet};

// Initialize logging
pub fn init_logger() {
    let _ = env_logger::try_init();
}

/// Initialize logging, using `default_level` when RUST_LOG is not set
pub fn init_logger_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
