//! UTF-8 byte sequences on one side, 32-bit Unicode code points on the other.
//!
//! The rotor cascade and plugboard operate on whole code points, not UTF-8
//! bytes, so every [`Context`](crate::Context) call transcodes at its
//! boundary. This module is the transcoder. It is deliberately permissive in
//! the same way as the reference implementation: overlong encodings and
//! surrogate halves are accepted rather than rejected, because rejecting them
//! would make some historically-valid Problema ciphertexts fail to decode.

use crate::Error;

/// Decode a UTF-8 byte sequence into code points.
///
/// Accepts the four standard UTF-8 length classes (1/2/3/4 bytes). Fails with
/// [`Error::InvalidUtf8`] on truncation, an invalid leading byte, or a
/// continuation byte whose top bits are not `10`. Does not reject overlong
/// encodings or lone surrogate halves; see the module documentation.
pub fn decode(bytes: &[u8]) -> Result<Vec<u32>, Error> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        if b0 & 0x80 == 0 {
            out.push(b0 as u32);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = *bytes.get(i + 1).ok_or(Error::InvalidUtf8)?;
            if b1 & 0xC0 != 0x80 {
                return Err(Error::InvalidUtf8);
            }
            out.push(((b0 as u32 & 0x1F) << 6) | (b1 as u32 & 0x3F));
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = *bytes.get(i + 1).ok_or(Error::InvalidUtf8)?;
            let b2 = *bytes.get(i + 2).ok_or(Error::InvalidUtf8)?;
            if b1 & 0xC0 != 0x80 || b2 & 0xC0 != 0x80 {
                return Err(Error::InvalidUtf8);
            }
            out.push(((b0 as u32 & 0x0F) << 12) | ((b1 as u32 & 0x3F) << 6) | (b2 as u32 & 0x3F));
            i += 3;
        } else if b0 & 0xF8 == 0xF0 {
            let b1 = *bytes.get(i + 1).ok_or(Error::InvalidUtf8)?;
            let b2 = *bytes.get(i + 2).ok_or(Error::InvalidUtf8)?;
            let b3 = *bytes.get(i + 3).ok_or(Error::InvalidUtf8)?;
            if b1 & 0xC0 != 0x80 || b2 & 0xC0 != 0x80 || b3 & 0xC0 != 0x80 {
                return Err(Error::InvalidUtf8);
            }
            out.push(
                ((b0 as u32 & 0x07) << 18)
                    | ((b1 as u32 & 0x3F) << 12)
                    | ((b2 as u32 & 0x3F) << 6)
                    | (b3 as u32 & 0x3F),
            );
            i += 4;
        } else {
            return Err(Error::InvalidUtf8);
        }
    }
    Ok(out)
}

/// Encode code points as UTF-8 into a caller-provided buffer.
///
/// Chooses the shortest of the four UTF-8 forms for each code point. Returns
/// the number of bytes written. Fails with [`Error::InvalidUtf8`] if any code
/// point exceeds `0x10FFFF`, or with [`Error::BufferTooSmall`] if `out` cannot
/// hold the result. Per the buffer-sizing contract, sizing `out` to
/// `4 * code_points.len()` always suffices.
pub fn encode_into(code_points: &[u32], out: &mut [u8]) -> Result<usize, Error> {
    let mut j = 0;
    for &code in code_points {
        let width = if code <= 0x7F {
            1
        } else if code <= 0x7FF {
            2
        } else if code <= 0xFFFF {
            3
        } else if code <= 0x10FFFF {
            4
        } else {
            return Err(Error::InvalidUtf8);
        };
        if j + width > out.len() {
            return Err(Error::BufferTooSmall);
        }
        match width {
            1 => out[j] = code as u8,
            2 => {
                out[j] = 0xC0 | (code >> 6) as u8;
                out[j + 1] = 0x80 | (code & 0x3F) as u8;
            }
            3 => {
                out[j] = 0xE0 | (code >> 12) as u8;
                out[j + 1] = 0x80 | ((code >> 6) & 0x3F) as u8;
                out[j + 2] = 0x80 | (code & 0x3F) as u8;
            }
            _ => {
                out[j] = 0xF0 | (code >> 18) as u8;
                out[j + 1] = 0x80 | ((code >> 12) & 0x3F) as u8;
                out[j + 2] = 0x80 | ((code >> 6) & 0x3F) as u8;
                out[j + 3] = 0x80 | (code & 0x3F) as u8;
            }
        }
        j += width;
    }
    Ok(j)
}

/// Encode code points as UTF-8 into a freshly allocated, self-sized buffer.
///
/// Convenience wrapper around [`encode_into`] for callers who would rather not
/// size their own buffer. Never fails with [`Error::BufferTooSmall`].
pub fn encode(code_points: &[u32]) -> Result<String, Error> {
    let mut buf = vec![0u8; code_points.len() * 4];
    let len = encode_into(code_points, &mut buf)?;
    buf.truncate(len);
    String::from_utf8(buf).map_err(|_| Error::InvalidUtf8)
}
