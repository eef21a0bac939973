//! A reduced, AES-flavored block permutation over 16-byte blocks.
//!
//! This borrows AES's round shape (SubBytes, ShiftRows, MixColumns,
//! AddRoundKey) but strips out the finite-field arithmetic and the
//! multi-round structure: MixColumns here is a chain of XORs rather than a
//! matrix multiplication over $GF(2^8)$, and only a single round key is ever
//! used. See [`mix_columns`] and [`inv_mix_columns`] for the consequence:
//! unlike true AES, this transform's stated inverse is not actually the
//! algebraic inverse of the forward transform.

pub const BLOCK_SIZE: usize = 16;
pub const SBOX_SIZE: usize = 256;
pub const NUM_ROUND_KEYS: usize = 15;

/// The S-box and its inverse, plus the round-key table, derived from the
/// 32-byte key.
pub struct AesState {
    pub(crate) sbox: [u8; SBOX_SIZE],
    pub(crate) inv_sbox: [u8; SBOX_SIZE],
    pub(crate) round_keys: [[u8; BLOCK_SIZE]; NUM_ROUND_KEYS],
}

impl AesState {
    pub(crate) fn from_key(key: &[u8; 32]) -> AesState {
        let mut sbox = [0u8; SBOX_SIZE];
        for (i, slot) in sbox.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Same key-driven, non-uniform Fisher-Yates as the rotor shuffler.
        for i in (1..SBOX_SIZE).rev() {
            let j = (key[i % 32] as usize * i) % (i + 1);
            sbox.swap(i, j);
        }

        let mut inv_sbox = [0u8; SBOX_SIZE];
        for (i, &s) in sbox.iter().enumerate() {
            inv_sbox[s as usize] = i as u8;
        }

        let mut round_keys = [[0u8; BLOCK_SIZE]; NUM_ROUND_KEYS];
        for (round, rk) in round_keys.iter_mut().enumerate() {
            for (i, byte) in rk.iter_mut().enumerate() {
                *byte = key[(i + round * 4) % 32];
            }
        }

        AesState { sbox, inv_sbox, round_keys }
    }

    /// The forward transform: SubBytes, ShiftRows, reduced MixColumns,
    /// AddRoundKey with round key 0.
    pub(crate) fn encrypt(&self, block: &mut [u8; BLOCK_SIZE]) {
        sub_bytes(block, &self.sbox);
        shift_rows(block);
        mix_columns(block);
        add_round_key(block, &self.round_keys[0]);
    }

    /// The stated inverse transform: AddRoundKey, InvMixColumns,
    /// InvShiftRows, InvSubBytes.
    ///
    /// Not the true algebraic inverse of [`encrypt`](Self::encrypt); see the
    /// module documentation, so `decrypt(encrypt(block)) != block` in
    /// general. Preserved from the reference rather than corrected.
    pub(crate) fn decrypt(&self, block: &mut [u8; BLOCK_SIZE]) {
        add_round_key(block, &self.round_keys[0]);
        inv_mix_columns(block);
        inv_shift_rows(block);
        inv_sub_bytes(block, &self.inv_sbox);
    }
}

/// Replace each byte with its S-box substitution.
fn sub_bytes(block: &mut [u8; BLOCK_SIZE], sbox: &[u8; SBOX_SIZE]) {
    for b in block.iter_mut() {
        *b = sbox[*b as usize];
    }
}

/// Replace each byte with its inverse S-box substitution.
fn inv_sub_bytes(block: &mut [u8; BLOCK_SIZE], inv_sbox: &[u8; SBOX_SIZE]) {
    for b in block.iter_mut() {
        *b = inv_sbox[*b as usize];
    }
}

/// Left-rotate row `i` by `i` positions, viewing the block as four rows of
/// four bytes in row-major order.
fn shift_rows(block: &mut [u8; BLOCK_SIZE]) {
    let copy = *block;
    for i in 0..4 {
        for j in 0..4 {
            block[i * 4 + j] = copy[i * 4 + (j + i) % 4];
        }
    }
}

/// Right-rotate row `i` by `i` positions, the exact mirror of
/// [`shift_rows`].
fn inv_shift_rows(block: &mut [u8; BLOCK_SIZE]) {
    let copy = *block;
    for i in 0..4 {
        for j in 0..4 {
            block[i * 4 + (j + i) % 4] = copy[i * 4 + j];
        }
    }
}

/// For each row `(a, b, c, d)`, write back `(a^b, b^c, c^d, d^a)`.
///
/// Unlike true AES MixColumns, this is a plain XOR chain: there is no
/// $GF(2^8)$ multiplication here at all, reduced in the sense that the
/// diffusion step is much weaker than the original.
fn mix_columns(block: &mut [u8; BLOCK_SIZE]) {
    let copy = *block;
    for i in 0..4 {
        let (a, b, c, d) = (copy[i * 4], copy[i * 4 + 1], copy[i * 4 + 2], copy[i * 4 + 3]);
        block[i * 4] = a ^ b;
        block[i * 4 + 1] = b ^ c;
        block[i * 4 + 2] = c ^ d;
        block[i * 4 + 3] = d ^ a;
    }
}

/// For each row `(a, b, c, d)`, write back `(d^a, a^b, b^c, c^d)`.
///
/// This is the reference's *declared* inverse of [`mix_columns`], but
/// applying it mechanically after [`mix_columns`] does not reconstruct the
/// original row in general: row `(1, 0, 0, 0)` maps forward to
/// `(1, 0, 0, 1)`, and this function maps that to `(0, 1, 0, 1)`, not back to
/// `(1, 0, 0, 0)`. Preserved exactly as specified; see `DESIGN.md`.
fn inv_mix_columns(block: &mut [u8; BLOCK_SIZE]) {
    let copy = *block;
    for i in 0..4 {
        let (a, b, c, d) = (copy[i * 4], copy[i * 4 + 1], copy[i * 4 + 2], copy[i * 4 + 3]);
        block[i * 4] = d ^ a;
        block[i * 4 + 1] = a ^ b;
        block[i * 4 + 2] = b ^ c;
        block[i * 4 + 3] = c ^ d;
    }
}

/// XOR the block with a round key.
fn add_round_key(block: &mut [u8; BLOCK_SIZE], round_key: &[u8; BLOCK_SIZE]) {
    for (b, k) in block.iter_mut().zip(round_key.iter()) {
        *b ^= k;
    }
}

#[cfg(test)]
pub(crate) fn mix_columns_for_test(block: &mut [u8; BLOCK_SIZE]) {
    mix_columns(block);
}

#[cfg(test)]
pub(crate) fn inv_mix_columns_for_test(block: &mut [u8; BLOCK_SIZE]) {
    inv_mix_columns(block);
}
