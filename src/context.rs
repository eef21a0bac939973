//! The `Context`: one Problema key schedule, the rotor bank, the plugboard,
//! the reduced-AES state, and the feedback chain, wired together into the
//! per-character and per-block pipelines.
//!
//! Building a `Context` allocates roughly 4 MiB of rotor tables up front (see
//! [`crate::rotor::RotorBank`]); every other operation is allocation-free. Because
//! that makes the type expensive to move, [`Context::new`] returns a
//! [`Box<Context>`] built in place rather than constructing on the stack and
//! moving it.

use {
    crate::{codec, reduced_aes::AesState, rotor::RotorBank, trace, Error},
    zeroize::Zeroize,
};

/// One initialized Problema cipher state.
///
/// `Context` is a single-writer state machine: every encrypt/decrypt
/// operation mutates rotor positions and/or the feedback buffer, so callers
/// who need concurrent streams must use one `Context` per stream, each built
/// from the same key via a fresh [`Context::new`] call (key scheduling is
/// deterministic, so this reproduces the same rotor/plugboard/AES tables).
pub struct Context {
    key: [u8; 32],
    rotors: RotorBank,
    plugboard: crate::plugboard::Plugboard,
    aes: AesState,
    feedback: [u8; 16],
    initialized: bool,
}

impl Context {
    /// Build a `Context` from a 32-byte key.
    ///
    /// Derives the rotor bank, plugboard, and reduced-AES state per the key
    /// schedule, zeroes the feedback buffer, and marks the context
    /// initialized. Key scheduling is a pure function of the key: two
    /// contexts built from the same key have bytewise-identical rotor
    /// tables, plugboard, S-box, and round keys.
    pub fn new(key: &[u8; 32]) -> Box<Context> {
        let key = *key;
        Box::new(Context {
            rotors: RotorBank::from_key(&key),
            plugboard: crate::plugboard::Plugboard::from_key(&key),
            aes: AesState::from_key(&key),
            feedback: [0; 16],
            key,
            initialized: true,
        })
    }

    /// Whether this context is initialized. Always `true` for a context
    /// produced by [`Context::new`]; becomes `false` after
    /// [`cleanup`](Self::cleanup).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Zeroize the key and feedback buffers and mark the context
    /// uninitialized.
    ///
    /// Called automatically on `Drop`; calling it early lets a caller pin
    /// down exactly when sensitive material is scrubbed rather than waiting
    /// on scope exit. Calling it twice is harmless. Rotor/plugboard/S-box
    /// tables are *not* zeroized; they are large, and while they are
    /// derived from the key and in principle recoverable, the reference
    /// implementation does not scrub them either; see `DESIGN.md`.
    pub fn cleanup(&mut self) {
        self.key.zeroize();
        self.feedback.zeroize();
        self.initialized = false;
    }

    /// Encrypt a single code point.
    ///
    /// Pipeline: plugboard → forward rotor cascade → rotor advance →
    /// backward rotor cascade → feedback XOR. Code points at or beyond the
    /// Basic Multilingual Plane (`>= 0x10000`) skip the plugboard and rotor
    /// stages but still participate in the feedback XOR, so that feedback
    /// stays in lockstep with a receiver decrypting the same stream.
    ///
    /// Returns `cp` unchanged if the context is not initialized, matching
    /// the reference's "return input on error" behavior for this operation.
    pub fn encrypt_char(&mut self, cp: u32) -> u32 {
        if !self.initialized {
            return cp;
        }

        let mut y = self.plugboard.apply(cp);
        y = self.rotors.forward(y);
        self.rotors.advance();
        y = self.rotors.backward(y);

        let mut bytes = y.to_be_bytes();
        for (b, f) in bytes.iter_mut().zip(self.feedback.iter()) {
            *b ^= f;
        }
        self.feedback[..4].copy_from_slice(&bytes);
        let out = u32::from_be_bytes(bytes);
        trace::trace_unicode("encrypted code point", out);
        out
    }

    /// Decrypt a single code point: the exact inverse of
    /// [`encrypt_char`](Self::encrypt_char).
    ///
    /// The feedback discipline is intentionally asymmetric with encryption:
    /// encryption updates feedback from the bytes it emits, decryption
    /// updates feedback from the bytes it *received*. Both sides see the
    /// same feedback value when processing the nth character of a matching
    /// stream, which is what makes the round trip work.
    pub fn decrypt_char(&mut self, cp: u32) -> u32 {
        if !self.initialized {
            return cp;
        }

        let in_bytes = cp.to_be_bytes();
        let mut bytes = in_bytes;
        for (b, f) in bytes.iter_mut().zip(self.feedback.iter()) {
            *b ^= f;
        }
        self.feedback[..4].copy_from_slice(&in_bytes);
        let mut y = u32::from_be_bytes(bytes);

        y = self.rotors.backward(y);
        self.rotors.advance();
        y = self.rotors.forward(y);
        y = self.plugboard.apply(y);

        trace::trace_unicode("decrypted code point", y);
        y
    }

    /// Encrypt a 16-byte block: feedback XOR, then the reduced-AES forward
    /// transform, then feedback update from the resulting ciphertext block.
    ///
    /// A no-op if the context is not initialized.
    pub fn encrypt_block(&mut self, block: &mut [u8; 16]) {
        if !self.initialized {
            return;
        }
        trace::trace_state("block before encrypt", block);
        for (b, f) in block.iter_mut().zip(self.feedback.iter()) {
            *b ^= f;
        }
        self.aes.encrypt(block);
        self.feedback = *block;
        trace::trace_state("block after encrypt", block);
    }

    /// Decrypt a 16-byte block: the reduced-AES inverse transform, then
    /// feedback XOR, with feedback updated from the *received* ciphertext
    /// block (not the decrypted output).
    ///
    /// Because the reduced-AES inverse transform is not the true algebraic
    /// inverse of the forward transform (see [`crate::reduced_aes`]),
    /// `decrypt_block(encrypt_block(block))` does not reconstruct `block` in
    /// general. This is a preserved defect of the reference design, not a
    /// bug in this port: the character pipeline never calls the block
    /// transform, so string-mode round-tripping is unaffected.
    ///
    /// A no-op if the context is not initialized.
    pub fn decrypt_block(&mut self, block: &mut [u8; 16]) {
        if !self.initialized {
            return;
        }
        trace::trace_state("block before decrypt", block);
        let received = *block;
        self.aes.decrypt(block);
        for (b, f) in block.iter_mut().zip(self.feedback.iter()) {
            *b ^= f;
        }
        self.feedback = received;
        trace::trace_state("block after decrypt", block);
    }

    /// Encrypt a UTF-8 string, returning a freshly allocated UTF-8 string.
    ///
    /// Resets the feedback buffer to zero on entry but does **not** reset
    /// rotor positions, so calling this twice on the same context with the
    /// same plaintext produces two different ciphertexts (the rotors have
    /// advanced between calls). Use a fresh [`Context::new`] per
    /// reproducible run.
    pub fn encrypt(&mut self, data: &[u8]) -> Result<String, Error> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.feedback = [0; 16];
        let code_points = codec::decode(data)?;
        let encrypted: Vec<u32> = code_points.into_iter().map(|cp| self.encrypt_char(cp)).collect();
        codec::encode(&encrypted)
    }

    /// Decrypt a UTF-8 string, returning a freshly allocated UTF-8 string.
    ///
    /// The exact inverse of [`encrypt`](Self::encrypt) when given a fresh
    /// context initialized from the same key. Also resets feedback to zero
    /// on entry without resetting rotor positions.
    pub fn decrypt(&mut self, data: &[u8]) -> Result<String, Error> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.feedback = [0; 16];
        let code_points = codec::decode(data)?;
        let decrypted: Vec<u32> = code_points.into_iter().map(|cp| self.decrypt_char(cp)).collect();
        codec::encode(&decrypted)
    }

    /// Encrypt a UTF-8 string into a caller-provided buffer, per the
    /// buffer-sizing contract in [`codec`]: sizing `out` to `4 * n` bytes,
    /// where `n` is the number of input code points, always suffices.
    ///
    /// Returns the number of bytes written. On [`Error::BufferTooSmall`] or
    /// [`Error::InvalidUtf8`], `out`'s contents are not meaningful: partial
    /// writes may have occurred but are not committed.
    pub fn encrypt_into(&mut self, data: &[u8], out: &mut [u8]) -> Result<usize, Error> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.feedback = [0; 16];
        let code_points = codec::decode(data)?;
        let encrypted: Vec<u32> = code_points.into_iter().map(|cp| self.encrypt_char(cp)).collect();
        codec::encode_into(&encrypted, out)
    }

    /// Decrypt a UTF-8 string into a caller-provided buffer. See
    /// [`encrypt_into`](Self::encrypt_into) for the buffer contract.
    pub fn decrypt_into(&mut self, data: &[u8], out: &mut [u8]) -> Result<usize, Error> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.feedback = [0; 16];
        let code_points = codec::decode(data)?;
        let decrypted: Vec<u32> = code_points.into_iter().map(|cp| self.decrypt_char(cp)).collect();
        codec::encode_into(&decrypted, out)
    }

    #[cfg(test)]
    pub(crate) fn rotor_positions(&self) -> [u32; crate::rotor::NUM_ROTORS] {
        self.rotors.positions()
    }

    #[cfg(test)]
    pub(crate) fn key_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn feedback_bytes(&self) -> &[u8; 16] {
        &self.feedback
    }

    #[cfg(test)]
    pub(crate) fn rotors(&self) -> &RotorBank {
        &self.rotors
    }

    #[cfg(test)]
    pub(crate) fn plugboard(&self) -> &crate::plugboard::Plugboard {
        &self.plugboard
    }

    #[cfg(test)]
    pub(crate) fn aes(&self) -> &AesState {
        &self.aes
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.cleanup();
    }
}
