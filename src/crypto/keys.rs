use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

use crate::crypto::context::CryptoContext;
use crate::encoding::base58::{base58check_decode, base58check_encode};
use crate::error::{Result, WalletError};
use crate::network::{KeyEncoding, Network};

/// Private key length in bytes
pub const PRIVATE_KEY_LEN: usize = 32;

/// WIF payload trailer marking a compressed public key
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Upper bound on generation attempts. A uniformly random 32-byte string is
/// outside [1, n) with probability below 2^-127, so reaching this bound
/// means the entropy source is broken.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// secp256k1 private key, always within [1, n)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey {
    secret: secp256k1::SecretKey,
}

impl PrivateKey {
    /// Create a private key from raw bytes, checking length and curve range
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(WalletError::InputFormat(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }

        let secret = secp256k1::SecretKey::from_slice(bytes)
            .map_err(|_| WalletError::InvalidKey("private key outside curve range".to_string()))?;
        Ok(Self { secret })
    }

    /// Create a private key from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    /// Export the key as bytes (handle with care!)
    pub fn secret_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.secret.secret_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.secret_bytes())
    }

    pub(crate) fn as_secret(&self) -> &secp256k1::SecretKey {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

/// secp256k1 public key together with the serialization it was derived for
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: secp256k1::PublicKey,
    encoding: KeyEncoding,
}

impl PublicKey {
    pub(crate) fn new(point: secp256k1::PublicKey, encoding: KeyEncoding) -> Self {
        Self { point, encoding }
    }

    /// Parse a 33-byte compressed or 65-byte uncompressed SEC1 encoding
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let encoding = match bytes.len() {
            33 => KeyEncoding::Compressed,
            65 => KeyEncoding::Uncompressed,
            n => {
                return Err(WalletError::InputFormat(format!(
                    "public key must be 33 or 65 bytes, got {}",
                    n
                )))
            }
        };

        let point = secp256k1::PublicKey::from_slice(bytes)
            .map_err(|e| WalletError::CryptoOperation(format!("invalid public key: {}", e)))?;
        Ok(Self { point, encoding })
    }

    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }

    /// Serialized bytes: 33 when compressed, 65 otherwise
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.encoding {
            KeyEncoding::Compressed => self.point.serialize().to_vec(),
            KeyEncoding::Uncompressed => self.point.serialize_uncompressed().to_vec(),
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Same point, different serialization
    pub fn with_encoding(&self, encoding: KeyEncoding) -> Self {
        Self {
            point: self.point,
            encoding,
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Contents of a decoded WIF string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedWif {
    pub private_key: PrivateKey,
    pub encoding: KeyEncoding,
    pub network: Network,
}

/// Generate a new random private key from the OS entropy source
pub fn generate_private_key() -> Result<PrivateKey> {
    generate_private_key_with(&mut OsRng)
}

/// Generate a private key from the given random source, retrying on the
/// (astronomically rare) out-of-range draw
pub fn generate_private_key_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<PrivateKey> {
    let mut seed = [0u8; PRIVATE_KEY_LEN];

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        rng.try_fill_bytes(&mut seed)?;
        match PrivateKey::from_slice(&seed) {
            Ok(key) => return Ok(key),
            Err(_) => log::debug!("Generated private key out of range (attempt {}), retrying", attempt),
        }
    }

    Err(WalletError::EntropySource(format!(
        "no valid private key after {} attempts",
        MAX_GENERATION_ATTEMPTS
    )))
}

/// Derive the public key for a private key, serialized per `encoding`
pub fn derive_public_key(private_key: &PrivateKey, encoding: KeyEncoding) -> PublicKey {
    derive_public_key_in(CryptoContext::global(), private_key, encoding)
}

/// Same as [`derive_public_key`] with an explicit context
pub fn derive_public_key_in(
    ctx: &CryptoContext,
    private_key: &PrivateKey,
    encoding: KeyEncoding,
) -> PublicKey {
    let point = secp256k1::PublicKey::from_secret_key(ctx.secp(), private_key.as_secret());
    PublicKey::new(point, encoding)
}

/// Encode a private key in Wallet Import Format
pub fn private_key_to_wif(private_key: &PrivateKey, encoding: KeyEncoding, network: Network) -> String {
    let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_LEN + 1);
    payload.push(network.wif_version());
    payload.extend_from_slice(&private_key.secret_bytes());
    if encoding.is_compressed() {
        payload.push(WIF_COMPRESSED_FLAG);
    }
    base58check_encode(&payload)
}

/// Decode a WIF string into its key, encoding and network
pub fn wif_to_private_key(wif: &str) -> Result<DecodedWif> {
    let payload = base58check_decode(wif)?;

    let encoding = match payload.len() {
        33 => KeyEncoding::Uncompressed,
        34 if payload[33] == WIF_COMPRESSED_FLAG => KeyEncoding::Compressed,
        34 => {
            return Err(WalletError::InvalidKey(format!(
                "invalid WIF compression flag 0x{:02x}",
                payload[33]
            )))
        }
        n => {
            return Err(WalletError::InputFormat(format!(
                "WIF payload must be 33 or 34 bytes, got {}",
                n
            )))
        }
    };

    let network = Network::from_wif_version(payload[0]).ok_or_else(|| {
        WalletError::InvalidKey(format!("unknown WIF version byte 0x{:02x}", payload[0]))
    })?;

    let private_key = PrivateKey::from_slice(&payload[1..1 + PRIVATE_KEY_LEN])?;

    Ok(DecodedWif {
        private_key,
        encoding,
        network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::base58::base58check_encode;

    /// Yields zero bytes for the first `zero_fills` requests, then a fixed pattern
    struct ScriptedRng {
        zero_fills: usize,
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            7
        }

        fn next_u64(&mut self) -> u64 {
            7
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            if self.zero_fills > 0 {
                self.zero_fills -= 1;
                dest.iter_mut().for_each(|b| *b = 0);
            } else {
                dest.iter_mut().for_each(|b| *b = 0x42);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy unavailable",
            )))
        }
    }

    fn key_one() -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKey::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_private_key_generation() {
        let a = generate_private_key().unwrap();
        let b = generate_private_key().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.secret_bytes().len(), 32);
    }

    #[test]
    fn test_generation_retries_invalid_draws() {
        let mut rng = ScriptedRng { zero_fills: 3 };
        let key = generate_private_key_with(&mut rng).unwrap();
        assert_eq!(key.secret_bytes(), [0x42; 32]);
    }

    #[test]
    fn test_generation_gives_up_after_bound() {
        let mut rng = ScriptedRng { zero_fills: usize::MAX };
        assert!(matches!(
            generate_private_key_with(&mut rng),
            Err(WalletError::EntropySource(_))
        ));
    }

    #[test]
    fn test_generation_reports_entropy_failure() {
        assert!(matches!(
            generate_private_key_with(&mut BrokenRng),
            Err(WalletError::EntropySource(_))
        ));
    }

    #[test]
    fn test_private_key_range() {
        assert!(matches!(PrivateKey::from_slice(&[0u8; 32]), Err(WalletError::InvalidKey(_))));
        assert!(matches!(PrivateKey::from_slice(&[0xff; 32]), Err(WalletError::InvalidKey(_))));
        assert!(matches!(PrivateKey::from_slice(&[1u8; 31]), Err(WalletError::InputFormat(_))));

        // n - 1 is the largest valid scalar
        let max = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140").unwrap();
        assert!(PrivateKey::from_slice(&max).is_ok());
        let order = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
        assert!(PrivateKey::from_slice(&order).is_err());
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let key = key_one();
        assert!(!format!("{:?}", key).contains("01"));
    }

    #[test]
    fn test_derive_generator_point() {
        let key = key_one();

        let compressed = derive_public_key(&key, KeyEncoding::Compressed);
        assert_eq!(
            compressed.to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );

        let uncompressed = derive_public_key(&key, KeyEncoding::Uncompressed);
        assert_eq!(
            uncompressed.to_hex(),
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_derive_with_explicit_context() {
        let ctx = CryptoContext::new();
        let key = generate_private_key().unwrap();
        assert_eq!(
            derive_public_key_in(&ctx, &key, KeyEncoding::Compressed),
            derive_public_key(&key, KeyEncoding::Compressed)
        );
    }

    #[test]
    fn test_public_key_parse() {
        let key = generate_private_key().unwrap();
        for encoding in [KeyEncoding::Compressed, KeyEncoding::Uncompressed] {
            let public = derive_public_key(&key, encoding);
            let bytes = public.to_bytes();
            assert_eq!(bytes.len(), encoding.public_key_len());
            assert_eq!(PublicKey::from_slice(&bytes).unwrap(), public);
        }
        assert!(PublicKey::from_slice(&[2u8; 32]).is_err());
    }

    #[test]
    fn test_wif_round_trip() {
        let key = generate_private_key().unwrap();
        for network in [Network::Main, Network::Test] {
            for encoding in [KeyEncoding::Compressed, KeyEncoding::Uncompressed] {
                let wif = private_key_to_wif(&key, encoding, network);
                let decoded = wif_to_private_key(&wif).unwrap();
                assert_eq!(decoded, DecodedWif { private_key: key, encoding, network });
            }
        }
    }

    #[test]
    fn test_wif_leading_characters() {
        let key = key_one();
        assert!(private_key_to_wif(&key, KeyEncoding::Uncompressed, Network::Main).starts_with('6'));
        assert!(private_key_to_wif(&key, KeyEncoding::Compressed, Network::Main).starts_with('Q'));
    }

    #[test]
    fn test_wif_rejects_unknown_version() {
        // Bitcoin mainnet WIF (version 0x80)
        let err = wif_to_private_key("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn test_wif_rejects_bad_compression_flag() {
        let mut payload = vec![0x9e];
        payload.extend_from_slice(&key_one().secret_bytes());
        payload.push(0x02);
        let err = wif_to_private_key(&base58check_encode(&payload)).unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn test_wif_rejects_bad_length_and_range() {
        let mut short = vec![0x9e];
        short.extend_from_slice(&[1u8; 31]);
        assert!(matches!(
            wif_to_private_key(&base58check_encode(&short)),
            Err(WalletError::InputFormat(_))
        ));

        let mut zero = vec![0x9e];
        zero.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            wif_to_private_key(&base58check_encode(&zero)),
            Err(WalletError::InvalidKey(_))
        ));
    }
}
