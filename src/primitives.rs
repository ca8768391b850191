//! Field-level helpers shared by every section codec.
//!
//! All multi-byte integers are big-endian. Three widths appear on the wire:
//! 1 byte (indices, short lengths), 2 bytes (payload lengths) and 5 bytes
//! (envelope region sizes).

use crate::error::{CodecError, Result};
use crate::options::{EncodeOptions, OverflowPolicy};

/// Largest value a 1-byte field can hold.
pub const U8_MAX: usize = 0xff;

/// Largest value a 2-byte length field can hold.
pub const U16_MAX: usize = 0xffff;

/// Largest value a 5-byte size field can hold (2^40 - 1).
pub const U40_MAX: u64 = (1 << 40) - 1;

// ============================================================================
// Writing
// ============================================================================

pub fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Append a 5-byte big-endian size. Callers must have checked `value <= U40_MAX`.
pub fn push_u40(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes()[3..]);
}

/// Reduce an index to its one-byte wire form according to `opts`.
pub fn fit_index(field: &'static str, value: u32, opts: &EncodeOptions) -> Result<u8> {
    if let Ok(byte) = u8::try_from(value) {
        return Ok(byte);
    }
    match opts.overflow {
        OverflowPolicy::Reject => Err(CodecError::ValueOutOfRange {
            field,
            value: value as u64,
            max: U8_MAX as u64,
        }),
        OverflowPolicy::Mask => {
            let masked = (value & 0xff) as u8;
            tracing::warn!(field, value, masked, "index masked to one byte");
            Ok(masked)
        }
    }
}

/// Make a text payload fit a length field of `max` bytes.
///
/// Under `Mask` the text is cut on the last character boundary at or before
/// `max`, so the length header always matches the bytes written.
pub fn fit_text<'a>(
    field: &'static str,
    text: &'a str,
    max: usize,
    opts: &EncodeOptions,
) -> Result<&'a [u8]> {
    if text.len() <= max {
        return Ok(text.as_bytes());
    }
    match opts.overflow {
        OverflowPolicy::Reject => Err(out_of_range(field, text.len(), max)),
        OverflowPolicy::Mask => {
            let mut end = max;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            tracing::warn!(field, len = text.len(), kept = end, "text payload truncated");
            Ok(&text.as_bytes()[..end])
        }
    }
}

/// Make a raw byte payload fit a length field of `max` bytes.
pub fn fit_bytes<'a>(
    field: &'static str,
    bytes: &'a [u8],
    max: usize,
    opts: &EncodeOptions,
) -> Result<&'a [u8]> {
    if bytes.len() <= max {
        return Ok(bytes);
    }
    match opts.overflow {
        OverflowPolicy::Reject => Err(out_of_range(field, bytes.len(), max)),
        OverflowPolicy::Mask => {
            tracing::warn!(field, len = bytes.len(), kept = max, "byte payload truncated");
            Ok(&bytes[..max])
        }
    }
}

fn out_of_range(field: &'static str, value: usize, max: usize) -> CodecError {
    CodecError::ValueOutOfRange {
        field,
        value: value as u64,
        max: max as u64,
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Bounds-checked cursor over an encoded section.
///
/// Every read that would run past the end of the buffer fails with
/// `CodecError::Framing` tagged with the section name and offset.
pub struct Reader<'a> {
    section: &'static str,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(section: &'static str, buf: &'a [u8]) -> Self {
        Self {
            section,
            buf,
            pos: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u40(&mut self) -> Result<u64> {
        let b = self.take(5)?;
        let mut wide = [0u8; 8];
        wide[3..].copy_from_slice(b);
        Ok(u64::from_be_bytes(wide))
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.framing(format!(
                "need {} bytes, {} remaining",
                len,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Everything not yet consumed.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..];
        self.pos = self.buf.len();
        out
    }

    /// A text payload of `len` bytes, converted lossily.
    pub fn text(&mut self, len: usize) -> Result<String> {
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }

    pub fn framing(&self, message: impl Into<String>) -> CodecError {
        CodecError::Framing {
            section: self.section,
            offset: self.pos,
            message: message.into(),
        }
    }
}
