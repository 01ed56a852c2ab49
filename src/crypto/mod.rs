// Dogewallet Cryptography Module
//
// This module provides the cryptographic primitives of the wallet:
// - Hashing (SHA-256, double SHA-256, RIPEMD-160, HASH160)
// - The shared secp256k1 context
// - Key generation, derivation and WIF handling
// - Signed-message creation and verification

pub mod context;
pub mod hash;
pub mod keys;
pub mod ripemd160;
pub mod signer;

// Re-export main components for easier access
pub use context::CryptoContext;
pub use hash::{hash160, sha256, sha256_double};
pub use keys::{
    derive_public_key, generate_private_key, private_key_to_wif, wif_to_private_key, DecodedWif,
    PrivateKey, PublicKey,
};
pub use ripemd160::ripemd160;
pub use signer::{sign_message, verify_message, verify_message_with_network, MessageSignature};
