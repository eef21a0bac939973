mod codec;
mod context;

fn key_of(byte: u8) -> [u8; 32] {
    [byte; 32]
}

fn sequential_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    for (i, k) in key.iter_mut().enumerate() {
        *k = (i + 1) as u8;
    }
    key
}

fn padded_key(s: &str) -> [u8; 32] {
    let mut key = [0u8; 32];
    let bytes = s.as_bytes();
    key[..bytes.len()].copy_from_slice(bytes);
    key
}
