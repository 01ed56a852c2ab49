//! Dogecoin pay-to-pubkey-hash addresses
//!
//! An address is the Base58Check encoding of `version || HASH160(pubkey)`.

use std::fmt;

use crate::crypto::hash::hash160;
use crate::crypto::keys::{derive_public_key, wif_to_private_key, PublicKey};
use crate::encoding::base58::{base58check_decode, base58check_encode};
use crate::error::{Result, WalletError};
use crate::network::Network;

/// Version byte plus a 20-byte public-key hash
pub const ADDRESS_PAYLOAD_LEN: usize = 21;

/// Base58Check-encoded Dogecoin address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Parse and validate an address for the given network
    pub fn parse(s: &str, network: Network) -> Result<Self> {
        let payload = base58check_decode(s)?;
        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(WalletError::InputFormat(format!(
                "address payload must be {} bytes, got {}",
                ADDRESS_PAYLOAD_LEN,
                payload.len()
            )));
        }
        if payload[0] != network.address_version() {
            return Err(WalletError::InputFormat(format!(
                "address version 0x{:02x} does not match {}",
                payload[0], network
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derive the address for serialized public-key bytes (33 or 65 bytes)
pub fn public_key_to_address(public_key: &[u8], network: Network) -> Result<Address> {
    if public_key.len() != 33 && public_key.len() != 65 {
        return Err(WalletError::InputFormat(format!(
            "public key must be 33 or 65 bytes, got {}",
            public_key.len()
        )));
    }

    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
    payload.push(network.address_version());
    payload.extend_from_slice(&hash160(public_key));

    Ok(Address(base58check_encode(&payload)))
}

/// Address of a parsed public key, using its own serialization
pub fn address_from_pubkey(public_key: &PublicKey, network: Network) -> Address {
    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
    payload.push(network.address_version());
    payload.extend_from_slice(&hash160(&public_key.to_bytes()));
    Address(base58check_encode(&payload))
}

/// Check that a string is a well-formed address for the network
pub fn validate_address(address: &str, network: Network) -> bool {
    Address::parse(address, network).is_ok()
}

/// Address controlled by a WIF private key, on the WIF's own network
pub fn wif_to_address(wif: &str) -> Result<Address> {
    let decoded = wif_to_private_key(wif)?;
    let public_key = derive_public_key(&decoded.private_key, decoded.encoding);
    Ok(address_from_pubkey(&public_key, decoded.network))
}
