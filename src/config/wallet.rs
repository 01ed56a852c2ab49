use serde::{Serialize, Deserialize};

use crate::network::{KeyEncoding, Network};

/// Wallet defaults applied when a caller does not choose explicitly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Network for new keys and addresses
    pub network: Network,

    /// Public-key serialization for new keys
    pub key_encoding: KeyEncoding,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Main,
            key_encoding: KeyEncoding::Compressed,
        }
    }
}
