//! A literate implementation of the Problema cipher: an Enigma-style rotor
//! cascade and plugboard over Unicode code points, chained through a reduced
//! AES-flavored block permutation via a 16-byte feedback buffer.
//!
//! Problema is a teaching cipher, not a production one. Several of its
//! design choices are preserved quirks rather than oversights: a plugboard
//! that is not guaranteed to be an involution, a block-mode inverse that is
//! not the true algebraic inverse of its forward transform, rotor start
//! positions effectively drawn from a one-byte range. Each is documented at
//! its point of occurrence and in `DESIGN.md` rather than corrected, because
//! correcting them would produce a different cipher than the one this crate
//! describes.
//!
//! Start at [`Context`]: build one from a 32-byte key with [`Context::new`],
//! then call [`Context::encrypt`]/[`Context::decrypt`] for whole strings, or
//! [`Context::encrypt_char`]/[`Context::decrypt_char`] to drive the
//! character pipeline one code point at a time.

mod codec;
mod context;
mod error;
mod key;
mod plugboard;
mod reduced_aes;
mod rotor;
pub mod trace;

#[cfg(test)]
mod tests;

pub use {
    codec::{decode, encode, encode_into},
    context::Context,
    error::Error,
    key::Key,
};
