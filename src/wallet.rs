//! Wallet facade
//!
//! String-in/string-out operations for embedding the core in a host
//! application or the command-line tool. Failures are logged here before
//! being returned to the caller.

use log::{debug, error};
use serde::Serialize;

use crate::address::{self, Address};
use crate::config::Config;
use crate::crypto::keys::{self, PrivateKey};
use crate::crypto::signer;
use crate::encoding;
use crate::error::Result;
use crate::network::{KeyEncoding, Network};

/// Everything needed to use or back up a freshly created key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPairInfo {
    /// WIF-encoded private key
    pub private_key: String,

    /// Hex-encoded public key
    pub public_key: String,

    /// Address for the key's network
    pub address: String,

    pub network: Network,

    pub encoding: KeyEncoding,
}

fn log_failure<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("{} failed: {}", operation, e);
    }
    result
}

/// Wallet operations with configured defaults
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    config: Config,
}

impl Wallet {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn key_pair_info(private_key: &PrivateKey, encoding: KeyEncoding, network: Network) -> KeyPairInfo {
        let public_key = keys::derive_public_key(private_key, encoding);
        let address = address::address_from_pubkey(&public_key, network);

        KeyPairInfo {
            private_key: keys::private_key_to_wif(private_key, encoding, network),
            public_key: public_key.to_hex(),
            address: address.into_string(),
            network,
            encoding,
        }
    }

    /// Generate a new key pair
    pub fn generate_keypair(&self, encoding: KeyEncoding, network: Network) -> Result<KeyPairInfo> {
        let result = keys::generate_private_key().map(|private_key| {
            debug!("Generated {} key pair for {}", encoding, network);
            Self::key_pair_info(&private_key, encoding, network)
        });
        log_failure("Key generation", result)
    }

    /// Generate a new key pair with the configured network and encoding
    pub fn generate_default_keypair(&self) -> Result<KeyPairInfo> {
        self.generate_keypair(self.config.wallet.key_encoding, self.config.wallet.network)
    }

    /// Import a WIF key; network and encoding come from the WIF itself
    pub fn import_from_wif(&self, wif: &str) -> Result<KeyPairInfo> {
        let result = keys::wif_to_private_key(wif)
            .map(|decoded| Self::key_pair_info(&decoded.private_key, decoded.encoding, decoded.network));
        log_failure("WIF import", result)
    }

    /// Export a hex private key as WIF
    pub fn export_to_wif(&self, private_key_hex: &str, encoding: KeyEncoding, network: Network) -> Result<String> {
        let result = PrivateKey::from_hex(private_key_hex)
            .map(|private_key| keys::private_key_to_wif(&private_key, encoding, network));
        log_failure("WIF export", result)
    }

    /// Address for a hex public key
    pub fn address_from_public_key(&self, public_key_hex: &str, network: Network) -> Result<Address> {
        let result = encoding::hex_to_bytes(public_key_hex)
            .and_then(|bytes| address::public_key_to_address(&bytes, network));
        log_failure("Address derivation", result)
    }

    /// Address for a WIF private key
    pub fn address_from_wif(&self, wif: &str) -> Result<Address> {
        log_failure("Address derivation from WIF", address::wif_to_address(wif))
    }

    /// Sign with a hex private key
    pub fn sign_message(&self, message: &str, private_key_hex: &str, encoding: KeyEncoding) -> Result<String> {
        let result = PrivateKey::from_hex(private_key_hex)
            .and_then(|private_key| signer::sign_message(message, &private_key, encoding));
        log_failure("Message signing", result)
    }

    /// Sign with a WIF private key, using the WIF's compression flag
    pub fn sign_message_wif(&self, message: &str, wif: &str) -> Result<String> {
        let result = keys::wif_to_private_key(wif)
            .and_then(|decoded| signer::sign_message(message, &decoded.private_key, decoded.encoding));
        log_failure("Message signing", result)
    }

    /// Verify a Base64 signature against an address on the configured
    /// verification network
    pub fn verify_message(&self, message: &str, signature_base64: &str, address: &str) -> bool {
        signer::verify_message_with_network(
            message,
            signature_base64,
            address,
            self.config.signing.verify_network,
        )
    }

    pub fn validate_address(&self, address: &str, network: Network) -> bool {
        address::validate_address(address, network)
    }

    pub fn bytes_to_hex(&self, bytes: &[u8]) -> String {
        encoding::bytes_to_hex(bytes)
    }

    pub fn hex_to_bytes(&self, hex: &str) -> Result<Vec<u8>> {
        log_failure("Hex decoding", encoding::hex_to_bytes(hex))
    }
}
