use std::fmt;

/// Failure modes surfaced by the core.
///
/// Mirrors the reference implementation's stable integer error codes
/// (`PROBLEMA_ERROR_*`) one-for-one, except `NullInput`, which has no
/// counterpart here: the Rust API takes owned/borrowed fixed-size data
/// instead of nullable pointers, so that failure mode cannot occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key used to build a [`Context`](crate::Context) failed validation.
    ///
    /// Not reachable through [`Context::new`](crate::Context::new), since the
    /// key there is a `&[u8; 32]` and therefore always well-formed. Kept for
    /// parity with callers that construct a key from untrusted byte slices
    /// of unknown length.
    InvalidKey,
    /// A [`Context`](crate::Context) method was called before initialization
    /// completed, or after [`cleanup`](crate::Context::cleanup).
    NotInitialized,
    /// The caller-provided output buffer cannot hold the encoded result.
    BufferTooSmall,
    /// The input byte sequence is not valid UTF-8 under the codec in
    /// [`codec`](crate::codec).
    InvalidUtf8,
}

impl Error {
    /// The reference implementation's stable integer code for this error.
    pub const fn code(self) -> i32 {
        match self {
            Error::InvalidKey => -2,
            Error::NotInitialized => -3,
            Error::BufferTooSmall => -4,
            Error::InvalidUtf8 => -5,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidKey => "invalid key",
            Error::NotInitialized => "context not initialized",
            Error::BufferTooSmall => "output buffer too small",
            Error::InvalidUtf8 => "invalid UTF-8 sequence",
        })
    }
}

impl std::error::Error for Error {}
