//! Network parameters and key encodings
//!
//! Version bytes for Dogecoin addresses and WIF private keys, plus the
//! public-key serialization choice that is threaded through WIF, signing
//! and address derivation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// Address version byte for mainnet (encodes to a leading 'D')
pub const MAINNET_ADDRESS_VERSION: u8 = 0x1e;

/// Address version byte for testnet (encodes to a leading 'n')
pub const TESTNET_ADDRESS_VERSION: u8 = 0x71;

/// WIF version byte for mainnet
pub const MAINNET_WIF_VERSION: u8 = 0x9e;

/// WIF version byte for testnet
pub const TESTNET_WIF_VERSION: u8 = 0xf1;

/// Dogecoin network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Test,
}

impl Network {
    /// Version byte prepended to HASH160 payloads
    pub fn address_version(self) -> u8 {
        match self {
            Network::Main => MAINNET_ADDRESS_VERSION,
            Network::Test => TESTNET_ADDRESS_VERSION,
        }
    }

    /// Version byte prepended to WIF payloads
    pub fn wif_version(self) -> u8 {
        match self {
            Network::Main => MAINNET_WIF_VERSION,
            Network::Test => TESTNET_WIF_VERSION,
        }
    }

    /// Map a WIF version byte back to its network
    pub fn from_wif_version(version: u8) -> Option<Self> {
        match version {
            MAINNET_WIF_VERSION => Some(Network::Main),
            TESTNET_WIF_VERSION => Some(Network::Test),
            _ => None,
        }
    }

    /// Map an address version byte back to its network
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            MAINNET_ADDRESS_VERSION => Some(Network::Main),
            TESTNET_ADDRESS_VERSION => Some(Network::Test),
            _ => None,
        }
    }

    /// The other network
    pub fn opposite(self) -> Self {
        match self {
            Network::Main => Network::Test,
            Network::Test => Network::Main,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Main
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "mainnet"),
            Network::Test => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            other => Err(WalletError::InputFormat(format!("unknown network: {}", other))),
        }
    }
}

/// Public-key serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// 33 bytes: parity prefix + x
    Compressed,
    /// 65 bytes: 0x04 + x + y
    Uncompressed,
}

impl KeyEncoding {
    pub fn from_compressed(compressed: bool) -> Self {
        if compressed {
            KeyEncoding::Compressed
        } else {
            KeyEncoding::Uncompressed
        }
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, KeyEncoding::Compressed)
    }

    /// Serialized public key length for this encoding
    pub fn public_key_len(self) -> usize {
        match self {
            KeyEncoding::Compressed => 33,
            KeyEncoding::Uncompressed => 65,
        }
    }
}

impl Default for KeyEncoding {
    fn default() -> Self {
        KeyEncoding::Compressed
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncoding::Compressed => write!(f, "compressed"),
            KeyEncoding::Uncompressed => write!(f, "uncompressed"),
        }
    }
}
