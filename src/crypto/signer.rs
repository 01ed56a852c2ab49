//! Bitcoin-style signed messages
//!
//! The message is wrapped in a fixed envelope, hashed with double SHA-256 and
//! signed with a recoverable ECDSA signature (RFC 6979 nonces). The 65-byte
//! result `header || r || s` is transported as Base64, where
//! `header = 27 + recovery_id + (4 if the signer's key is compressed)`.
//! Verification recovers the public key and compares the derived address.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::Message;
use std::fmt;

use crate::address::address_from_pubkey;
use crate::crypto::context::CryptoContext;
use crate::crypto::hash::sha256_double;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::encoding::base64::{base64_decode, base64_encode};
use crate::error::{Result, WalletError};
use crate::network::{KeyEncoding, Network};

/// Length byte 0x18 followed by the 24-character magic text
pub const MESSAGE_MAGIC: &[u8; 25] = b"\x18Bitcoin Signed Message:\n";

/// Raw signature length: header + r + s
pub const SIGNATURE_LEN: usize = 65;

/// Lowest legal header byte
pub const HEADER_BASE: u8 = 27;

/// Offset added to the header for compressed public keys
const COMPRESSED_OFFSET: u8 = 4;

/// Append a Bitcoin variable-length integer using the smallest width that fits
pub fn encode_varint(value: u64, out: &mut Vec<u8>) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Build `magic || varint(len) || message`
pub fn message_envelope(message: &str) -> Vec<u8> {
    let bytes = message.as_bytes();
    let mut envelope = Vec::with_capacity(MESSAGE_MAGIC.len() + 9 + bytes.len());
    envelope.extend_from_slice(MESSAGE_MAGIC);
    encode_varint(bytes.len() as u64, &mut envelope);
    envelope.extend_from_slice(bytes);
    envelope
}

/// Digest that is actually signed
pub fn message_hash(message: &str) -> [u8; 32] {
    sha256_double(&message_envelope(message))
}

/// 65-byte recoverable message signature
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MessageSignature([u8; SIGNATURE_LEN]);

impl MessageSignature {
    fn from_parts(recovery_id: RecoveryId, compact: &[u8; 64], encoding: KeyEncoding) -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        let offset = if encoding.is_compressed() { COMPRESSED_OFFSET } else { 0 };
        bytes[0] = HEADER_BASE + recovery_id.to_i32() as u8 + offset;
        bytes[1..].copy_from_slice(compact);
        Self(bytes)
    }

    /// Decode from Base64, requiring exactly 65 bytes and a header in [27, 35)
    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = base64_decode(s)?;
        Self::try_from(bytes.as_slice())
    }

    pub fn to_base64(&self) -> String {
        base64_encode(&self.0)
    }

    pub fn header(&self) -> u8 {
        self.0[0]
    }

    /// Recovery id in 0..=3
    pub fn recovery_id(&self) -> u8 {
        (self.header() - HEADER_BASE) & 3
    }

    /// Serialization of the signer's public key
    pub fn encoding(&self) -> KeyEncoding {
        KeyEncoding::from_compressed(self.header() - HEADER_BASE >= COMPRESSED_OFFSET)
    }

    /// r || s
    pub fn compact(&self) -> &[u8] {
        &self.0[1..]
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MessageSignature {
    type Error = WalletError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(WalletError::InputFormat(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }

        let header = bytes[0];
        if !(HEADER_BASE..HEADER_BASE + 8).contains(&header) {
            return Err(WalletError::InputFormat(format!(
                "signature header {} outside [27, 35)",
                header
            )));
        }

        let mut sig_bytes = [0u8; SIGNATURE_LEN];
        sig_bytes.copy_from_slice(bytes);
        Ok(Self(sig_bytes))
    }
}

impl fmt::Debug for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSignature({})", hex::encode(self.0))
    }
}

/// Sign a message and return the Base64 signature
pub fn sign_message(message: &str, private_key: &PrivateKey, encoding: KeyEncoding) -> Result<String> {
    Ok(sign_message_raw(CryptoContext::global(), message, private_key, encoding)?.to_base64())
}

/// Sign a message and return the raw 65-byte signature
pub fn sign_message_raw(
    ctx: &CryptoContext,
    message: &str,
    private_key: &PrivateKey,
    encoding: KeyEncoding,
) -> Result<MessageSignature> {
    let digest = Message::from_slice(&message_hash(message))
        .map_err(|e| WalletError::CryptoOperation(format!("invalid message digest: {}", e)))?;

    let signature = ctx.secp().sign_ecdsa_recoverable(&digest, private_key.as_secret());
    let (recovery_id, compact) = signature.serialize_compact();

    Ok(MessageSignature::from_parts(recovery_id, &compact, encoding))
}

/// Recover the signer's public key, serialized as the header declares
pub fn recover_public_key(
    ctx: &CryptoContext,
    message: &str,
    signature: &MessageSignature,
) -> Result<PublicKey> {
    let recovery_id = RecoveryId::from_i32(signature.recovery_id() as i32)
        .map_err(|e| WalletError::CryptoOperation(format!("invalid recovery id: {}", e)))?;
    let recoverable = RecoverableSignature::from_compact(signature.compact(), recovery_id)
        .map_err(|e| WalletError::CryptoOperation(format!("invalid signature: {}", e)))?;
    let digest = Message::from_slice(&message_hash(message))
        .map_err(|e| WalletError::CryptoOperation(format!("invalid message digest: {}", e)))?;

    let point = ctx
        .secp()
        .recover_ecdsa(&digest, &recoverable)
        .map_err(|e| WalletError::CryptoOperation(format!("public key recovery failed: {}", e)))?;

    Ok(PublicKey::new(point, signature.encoding()))
}

/// Verify a Base64 signature against a mainnet address
pub fn verify_message(message: &str, signature_base64: &str, address: &str) -> bool {
    verify_message_with_network(message, signature_base64, address, Network::Main)
}

/// Verify a Base64 signature, deriving the recovered address on `network`
pub fn verify_message_with_network(
    message: &str,
    signature_base64: &str,
    address: &str,
    network: Network,
) -> bool {
    let recovered = MessageSignature::from_base64(signature_base64)
        .and_then(|signature| recover_public_key(CryptoContext::global(), message, &signature));

    match recovered {
        Ok(public_key) => address_from_pubkey(&public_key, network) == address,
        Err(e) => {
            log::debug!("Message verification failed: {}", e);
            false
        }
    }
}
