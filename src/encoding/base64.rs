//! Standard Base64 (RFC 4648 alphabet, '=' padding)

use crate::error::{Result, WalletError};

const BASE64_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: char = '=';

fn symbol(index: u32) -> char {
    BASE64_ALPHABET[(index & 0x3f) as usize] as char
}

fn symbol_value(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 26),
        b'0'..=b'9' => Some((c - b'0') as u32 + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Encode bytes as padded Base64
pub fn base64_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() + 2) / 3 * 4);

    for chunk in data.chunks(3) {
        let mut triple = (chunk[0] as u32) << 16;
        if let Some(&b) = chunk.get(1) {
            triple |= (b as u32) << 8;
        }
        if let Some(&b) = chunk.get(2) {
            triple |= b as u32;
        }

        result.push(symbol(triple >> 18));
        result.push(symbol(triple >> 12));
        result.push(if chunk.len() > 1 { symbol(triple >> 6) } else { PAD });
        result.push(if chunk.len() > 2 { symbol(triple) } else { PAD });
    }

    result
}

/// Decode Base64 text. Trailing '=' is stripped; any other character outside
/// the alphabet fails.
pub fn base64_decode(s: &str) -> Result<Vec<u8>> {
    let trimmed = s.trim_end_matches(PAD);
    let mut out = Vec::with_capacity(trimmed.len() * 3 / 4);

    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for (position, c) in trimmed.bytes().enumerate() {
        let value = symbol_value(c).ok_or_else(|| {
            WalletError::InputFormat(format!(
                "invalid base64 character {:?} at position {}",
                c as char, position
            ))
        })?;

        buffer = (buffer << 6) | value;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(out)
}
