// Dogewallet Encoding Module
//
// Text transports for keys, addresses and signatures:
// - Base58 / Base58Check (addresses, WIF)
// - Base64 (signed-message signatures)
// - Hex (raw key material)

pub mod base58;
pub mod base64;
pub mod hex;

pub use self::base58::{base58_decode, base58_encode, base58check_decode, base58check_encode};
pub use self::base64::{base64_decode, base64_encode};
pub use self::hex::{bytes_to_hex, hex_to_bytes};
