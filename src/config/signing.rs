use serde::{Serialize, Deserialize};

use crate::network::Network;

/// Signed-message configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Network used to derive the address of a recovered public key.
    /// Defaults to mainnet, which is what other Dogecoin wallets compare against.
    pub verify_network: Network,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            verify_network: Network::Main,
        }
    }
}
