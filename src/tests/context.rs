use {crate::Context, rand::Rng};

#[test]
fn round_trip_single_character() {
    let key = super::sequential_key();
    let mut enc = Context::new(&key);
    let mut dec = Context::new(&key);

    let cp = 'A' as u32;
    let ciphertext = enc.encrypt_char(cp);
    assert_eq!(dec.decrypt_char(ciphertext), cp);
}

#[test]
fn round_trip_string() {
    let key = super::padded_key("secret");
    let mut enc = Context::new(&key);
    let mut dec = Context::new(&key);

    let plaintext = "Hi 안녕 😀";
    let ciphertext = enc.encrypt(plaintext.as_bytes()).unwrap();
    let decrypted = dec.decrypt(ciphertext.as_bytes()).unwrap();
    assert_eq!(decrypted, plaintext);
    assert_eq!(ciphertext.chars().count(), plaintext.chars().count());
}

#[test]
fn repeated_encrypt_is_not_idempotent() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    let plaintext = "the quick brown fox";

    let first = ctx.encrypt(plaintext.as_bytes()).unwrap();
    let second = ctx.encrypt(plaintext.as_bytes()).unwrap();
    assert_ne!(first, second);

    // The second ciphertext still decrypts correctly against a receiver
    // context that has been caught up by one dummy encrypt of equal length.
    let mut receiver = Context::new(&key);
    let _ = receiver.encrypt(plaintext.as_bytes()).unwrap();
    let decrypted_second = receiver.decrypt(second.as_bytes()).unwrap();
    assert_eq!(decrypted_second, plaintext);
}

#[test]
fn out_of_bmp_passthrough_skips_substitution() {
    let key = super::sequential_key();
    let mut ctx = Context::new(&key);
    let cp = 0x1F600u32;
    let feedback_before = *ctx.feedback_bytes();
    let out = ctx.encrypt_char(cp);

    let mut expected_bytes = cp.to_be_bytes();
    for (b, f) in expected_bytes.iter_mut().zip(feedback_before.iter()) {
        *b ^= f;
    }
    assert_eq!(out, u32::from_be_bytes(expected_bytes));
}

#[test]
fn key_determinism_produces_identical_tables() {
    let key = super::padded_key("secret");
    let a = Context::new(&key);
    let b = Context::new(&key);

    assert_eq!(a.rotor_positions(), b.rotor_positions());
    for i in 0..8 {
        assert_eq!(a.rotors().forward_rotor(i).mapping, b.rotors().forward_rotor(i).mapping);
    }
    assert_eq!(a.plugboard().mapping(), b.plugboard().mapping());
    assert_eq!(a.aes().sbox, b.aes().sbox);
    assert_eq!(a.aes().round_keys, b.aes().round_keys);
}

#[test]
fn empty_input_round_trips() {
    let key = super::key_of(0);
    let mut ctx = Context::new(&key);
    let out = ctx.encrypt(b"").unwrap();
    assert_eq!(out, "");
}

#[test]
fn ascii_single_byte_round_trips() {
    let key = super::sequential_key();
    let mut enc = Context::new(&key);
    let mut dec = Context::new(&key);
    let ciphertext = enc.encrypt(b"A").unwrap();
    assert_eq!(dec.decrypt(ciphertext.as_bytes()).unwrap(), "A");
}

#[test]
fn korean_bmp_round_trips() {
    let key = super::padded_key("secret");
    let mut enc = Context::new(&key);
    let mut dec = Context::new(&key);
    let ciphertext = enc.encrypt("안".as_bytes()).unwrap();
    assert_eq!(dec.decrypt(ciphertext.as_bytes()).unwrap(), "안");
}

#[test]
fn long_string_advances_rotors_by_exactly_its_length() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    let before = ctx.rotor_positions()[0];

    let mut rng = rand::thread_rng();
    let text: String = (0..1024).map(|_| char::from_u32(rng.gen_range(0x20..0xD000)).unwrap()).collect();
    let ciphertext = ctx.encrypt(text.as_bytes()).unwrap();

    let after = ctx.rotor_positions()[0];
    assert_eq!(after, (before + 1024) % 65536);

    let mut dec = Context::new(&key);
    assert_eq!(dec.decrypt(ciphertext.as_bytes()).unwrap(), text);
}

#[test]
fn cleanup_zeroizes_key_and_feedback() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    let _ = ctx.encrypt_char('x' as u32);
    ctx.cleanup();
    assert!(!ctx.is_initialized());
    assert_eq!(*ctx.key_bytes(), [0u8; 32]);
    assert_eq!(*ctx.feedback_bytes(), [0u8; 16]);
}

#[test]
fn methods_after_cleanup_report_not_initialized() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    ctx.cleanup();
    assert_eq!(ctx.encrypt(b"hi"), Err(crate::Error::NotInitialized));
    assert_eq!(ctx.encrypt_char('x' as u32), 'x' as u32);
}

#[test]
fn block_mode_does_not_round_trip() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    let original = [1u8; 16];
    let mut block = original;
    ctx.encrypt_block(&mut block);

    let mut ctx2 = Context::new(&key);
    ctx2.decrypt_block(&mut block);
    assert_ne!(block, original);
}

#[test]
fn encrypt_into_decrypt_into_round_trip_through_caller_buffer() {
    let key = super::padded_key("secret");
    let mut enc = Context::new(&key);
    let mut dec = Context::new(&key);

    let plaintext = "Hi 안녕 😀";
    let mut ciphertext_buf = vec![0u8; plaintext.len() * 4];
    let written = enc.encrypt_into(plaintext.as_bytes(), &mut ciphertext_buf).unwrap();
    let ciphertext = std::str::from_utf8(&ciphertext_buf[..written]).unwrap();

    let mut plaintext_buf = vec![0u8; ciphertext.len() * 4];
    let written = dec.decrypt_into(ciphertext.as_bytes(), &mut plaintext_buf).unwrap();
    assert_eq!(std::str::from_utf8(&plaintext_buf[..written]).unwrap(), plaintext);
}

#[test]
fn encrypt_into_reports_buffer_too_small() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);

    let plaintext = "hello";
    let mut out = vec![0u8; plaintext.len() - 1];
    assert_eq!(ctx.encrypt_into(plaintext.as_bytes(), &mut out), Err(crate::Error::BufferTooSmall));
}

#[test]
fn encrypt_rejects_invalid_utf8() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    assert_eq!(ctx.encrypt(&[0xC2]), Err(crate::Error::InvalidUtf8));
}

#[test]
fn decrypt_rejects_invalid_utf8() {
    let key = super::padded_key("secret");
    let mut ctx = Context::new(&key);
    assert_eq!(ctx.decrypt(&[0xE0, 0x80]), Err(crate::Error::InvalidUtf8));
}
