use dogewallet::crypto::{
    derive_public_key, generate_private_key, hash160, private_key_to_wif, sha256, sha256_double,
    sign_message, verify_message, wif_to_private_key, CryptoContext, PrivateKey,
};
use dogewallet::crypto::signer::{message_hash, recover_public_key, MessageSignature};
use dogewallet::encoding::{base58check_decode, base58check_encode, base64_decode, base64_encode};
use dogewallet::{public_key_to_address, validate_address, wif_to_address, KeyEncoding, Network, WalletError};

#[test]
fn test_crypto_workflow() {
    // Generate a keypair
    let private_key = generate_private_key().unwrap();
    let public_key = derive_public_key(&private_key, KeyEncoding::Compressed);

    // Derive an address
    let address = public_key_to_address(&public_key.to_bytes(), Network::Main).unwrap();
    assert!(address.as_str().starts_with('D'));
    assert!(validate_address(address.as_str(), Network::Main));

    // Sign a message
    let message = "Transfer 100 DOGE to Alice";
    let signature = sign_message(message, &private_key, KeyEncoding::Compressed).unwrap();

    // Verify the signature
    assert!(verify_message(message, &signature, address.as_str()));

    // Tamper with the message
    assert!(!verify_message("Transfer 1000 DOGE to Alice", &signature, address.as_str()));
}

#[test]
fn test_keypair_persistence_via_wif() {
    let original = generate_private_key().unwrap();

    let wif = private_key_to_wif(&original, KeyEncoding::Compressed, Network::Test);
    let restored = wif_to_private_key(&wif).unwrap();

    assert_eq!(restored.private_key, original);
    assert_eq!(restored.encoding, KeyEncoding::Compressed);
    assert_eq!(restored.network, Network::Test);

    // Both copies produce the same signature
    let sig1 = sign_message("persist", &original, KeyEncoding::Compressed).unwrap();
    let sig2 = sign_message("persist", &restored.private_key, KeyEncoding::Compressed).unwrap();
    assert_eq!(sig1, sig2);
}

#[test]
fn test_wif_address_matches_derivation() {
    let key = generate_private_key().unwrap();
    let wif = private_key_to_wif(&key, KeyEncoding::Uncompressed, Network::Test);

    let derived = public_key_to_address(
        &derive_public_key(&key, KeyEncoding::Uncompressed).to_bytes(),
        Network::Test,
    )
    .unwrap();

    let from_wif = wif_to_address(&wif).unwrap();
    assert_eq!(from_wif, derived);
    assert!(from_wif.as_str().starts_with('n'));
}

#[test]
fn test_compressed_and_uncompressed_addresses_differ() {
    let key = generate_private_key().unwrap();
    let compressed = derive_public_key(&key, KeyEncoding::Compressed).to_bytes();
    let uncompressed = derive_public_key(&key, KeyEncoding::Uncompressed).to_bytes();

    assert_ne!(hash160(&compressed), hash160(&uncompressed));
    assert_ne!(
        public_key_to_address(&compressed, Network::Main).unwrap(),
        public_key_to_address(&uncompressed, Network::Main).unwrap()
    );
}

#[test]
fn test_signature_transport_format() {
    let key = generate_private_key().unwrap();
    let signature = sign_message("format", &key, KeyEncoding::Compressed).unwrap();

    let raw = base64_decode(&signature).unwrap();
    assert_eq!(raw.len(), 65);
    assert!((27..35).contains(&raw[0]));
    assert_eq!(base64_encode(&raw), signature);

    let parsed = MessageSignature::from_base64(&signature).unwrap();
    assert_eq!(parsed.encoding(), KeyEncoding::Compressed);
    assert!(parsed.recovery_id() <= 3);
}

#[test]
fn test_recovery_matches_signer() {
    let ctx = CryptoContext::new();
    let key = generate_private_key().unwrap();
    let signature = sign_message("who signed this?", &key, KeyEncoding::Uncompressed).unwrap();
    let parsed = MessageSignature::from_base64(&signature).unwrap();

    let recovered = recover_public_key(&ctx, "who signed this?", &parsed).unwrap();
    assert_eq!(recovered, derive_public_key(&key, KeyEncoding::Uncompressed));

    // A different message recovers a different key
    let other = recover_public_key(&ctx, "someone else", &parsed);
    assert!(other.map(|pk| pk != recovered).unwrap_or(true));
}

#[test]
fn test_message_hash_is_double_sha256_of_envelope() {
    let mut envelope = Vec::new();
    envelope.push(0x18);
    envelope.extend_from_slice(b"Bitcoin Signed Message:\n");
    envelope.push(3);
    envelope.extend_from_slice(b"abc");

    assert_eq!(message_hash("abc"), sha256_double(&envelope));
    assert_eq!(sha256_double(&envelope), sha256(&sha256(&envelope)));
}

#[test]
fn test_checksum_flip_detected() {
    let key = PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001").unwrap();
    let wif = private_key_to_wif(&key, KeyEncoding::Compressed, Network::Main);
    let payload = base58check_decode(&wif).unwrap();
    assert_eq!(base58check_encode(&payload), wif);

    let mut bytes = wif.into_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] = if bytes[mid] == b'a' { b'b' } else { b'a' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert!(matches!(
        wif_to_private_key(&tampered),
        Err(WalletError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_shared_context_across_threads() {
    let key = generate_private_key().unwrap();
    let address = public_key_to_address(
        &derive_public_key(&key, KeyEncoding::Compressed).to_bytes(),
        Network::Main,
    )
    .unwrap()
    .into_string();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let address = address.clone();
            std::thread::spawn(move || {
                let message = format!("thread {}", i);
                let signature = sign_message(&message, &key, KeyEncoding::Compressed).unwrap();
                verify_message(&message, &signature, &address)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
