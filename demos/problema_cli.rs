//! Minimal end-to-end demonstration of the `problema` core.
//!
//! Usage: `problema-cli <encrypt|decrypt> <passphrase> <text>`
//!
//! This is deliberately thin: no flags, no file I/O, no banner. The
//! passphrase-to-key derivation below is ported from the reference's own toy
//! KDF so that output matches the reference byte-for-byte given the same
//! passphrase, but it is not a real key-derivation function and must not be
//! used outside this demo.

use problema::Context;

fn derive_key_from_string(passphrase: &str) -> [u8; 32] {
    let bytes = passphrase.as_bytes();
    let mut key = [0u8; 32];
    if bytes.is_empty() {
        return key;
    }
    for i in 0..32 {
        let mut b = bytes[i % bytes.len()];
        for j in 0..bytes.len() {
            b ^= bytes[(i + j) % bytes.len()];
            b = b.rotate_left(3);
        }
        key[i] = b;
    }
    key
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 || (args[1] != "encrypt" && args[1] != "decrypt") {
        eprintln!("usage: {} <encrypt|decrypt> <passphrase> <text>", args[0]);
        std::process::exit(1);
    }

    let key = derive_key_from_string(&args[2]);
    let mut ctx = Context::new(&key);
    let input = args[3].as_bytes();

    let result = if args[1] == "encrypt" { ctx.encrypt(input) } else { ctx.decrypt(input) };

    match result {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
