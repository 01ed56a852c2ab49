//! Base58 and Base58Check
//!
//! Conversion is done with a big-endian digit buffer and repeated
//! multiply-accumulate, one input symbol at a time. Leading zero bytes map to
//! leading '1' characters and back, since base 58 has no zero digit that would
//! otherwise survive the conversion.

use crate::crypto::hash::sha256_double;
use crate::error::{Result, WalletError};

/// Bitcoin/Dogecoin alphabet, without 0, O, I and l
pub const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum suffix
pub const CHECKSUM_LEN: usize = 4;

const INVALID: u8 = 0xff;

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static DECODE_TABLE: [u8; 128] = build_decode_table();

/// Encode bytes as Base58
pub fn base58_encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // log(256) / log(58) ~= 1.37
    let size = data.len() * 138 / 100 + 1;
    let mut digits = vec![0u8; size];

    for &byte in data {
        let mut carry = byte as u32;
        for digit in digits.iter_mut().rev() {
            carry += 256 * (*digit as u32);
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
    }

    let skip = digits.iter().take_while(|&&d| d == 0).count();

    let mut result = String::with_capacity(leading_zeros + size - skip);
    result.extend(std::iter::repeat('1').take(leading_zeros));
    result.extend(digits[skip..].iter().map(|&d| BASE58_ALPHABET[d as usize] as char));
    result
}

/// Decode a Base58 string; any character outside the alphabet fails
pub fn base58_decode(s: &str) -> Result<Vec<u8>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }

    let input = s.as_bytes();
    let leading_ones = input.iter().take_while(|&&c| c == b'1').count();

    // log(58) / log(256) ~= 0.733
    let size = input.len() * 733 / 1000 + 1;
    let mut bytes = vec![0u8; size];

    for (position, &c) in input.iter().enumerate() {
        let value = DECODE_TABLE.get(c as usize).copied().unwrap_or(INVALID);
        if value == INVALID {
            return Err(WalletError::InputFormat(format!(
                "invalid base58 character {:?} at position {}",
                c as char, position
            )));
        }

        let mut carry = value as u32;
        for byte in bytes.iter_mut().rev() {
            carry += 58 * (*byte as u32);
            *byte = (carry % 256) as u8;
            carry /= 256;
        }
    }

    let skip = bytes.iter().take_while(|&&b| b == 0).count();

    let mut out = Vec::with_capacity(leading_ones + size - skip);
    out.resize(leading_ones, 0);
    out.extend_from_slice(&bytes[skip..]);
    Ok(out)
}

/// First four bytes of the double SHA-256 of the payload
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = sha256_double(payload);
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(&hash[..CHECKSUM_LEN]);
    sum
}

/// Encode a payload with its 4-byte checksum appended
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    base58_encode(&data)
}

/// Decode a Base58Check string and return the payload without its checksum
pub fn base58check_decode(s: &str) -> Result<Vec<u8>> {
    let mut decoded = base58_decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(WalletError::InputFormat(format!(
            "base58check data too short: {} bytes",
            decoded.len()
        )));
    }

    let split = decoded.len() - CHECKSUM_LEN;
    let expected = checksum(&decoded[..split]);
    if decoded[split..] != expected {
        log::debug!("Base58Check checksum mismatch");
        return Err(WalletError::ChecksumMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(&decoded[split..]),
        });
    }

    decoded.truncate(split);
    Ok(decoded)
}
