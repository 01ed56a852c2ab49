use crate::error::Result;

/// Lowercase hex
pub fn bytes_to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Strict, case-insensitive hex decode: even length, hex digits only
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}
