//! # Field Codec
//!
//! Fixed-width field value shaping for dBase III PLUS tables.
//!
//! Every column in a dBase table occupies a fixed byte span inside each
//! record. This crate turns a textual field value into that span and back:
//! Character, Logical, and Date values are left-justified and space-padded,
//! Numeric values are right-justified so the digits line up at the low end
//! of the column.
//!
//! The transforms are pure -- the caller hands in the exact span to fill
//! (or read), and nothing here allocates except the decoded `String`.
//!
//! ## Example
//!
//! ```rust
//! use codec::{decode, encode_into, FieldType};
//!
//! let mut span = [0u8; 6];
//! encode_into(FieldType::Numeric, &mut span, "44.1");
//! assert_eq!(&span, b"  44.1");
//! assert_eq!(decode(&span), "44.1");
//! ```

/// Space byte used to pad every field span (`0x20`).
const PAD: u8 = 0x20;

/// Hard cap on a field's byte length. Descriptors store the length in a
/// single byte, so nothing wider than this can be represented on disk.
/// (dBase itself additionally limits Character columns to 254 bytes; that
/// ceiling is a caller-level concern, not enforced here.)
pub const MAX_FIELD_LENGTH: usize = 255;

/// The four column types of a dBase III PLUS table.
///
/// The on-disk encoding is the ASCII type byte returned by
/// [`type_byte`](FieldType::type_byte), not the enum discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Free-form text, left-justified, space-padded.
    Character,
    /// Decimal digits (optionally `-` and `.`), right-justified.
    Numeric,
    /// Single byte, conventionally one of `t f T F y Y n N`.
    Logical,
    /// Eight digits in `YYYYMMDD` form, left-justified.
    Date,
}

impl FieldType {
    /// Returns the ASCII type byte stored in the field descriptor
    /// (`C`, `N`, `L`, or `D`).
    #[must_use]
    pub const fn type_byte(self) -> u8 {
        match self {
            FieldType::Character => b'C',
            FieldType::Numeric => b'N',
            FieldType::Logical => b'L',
            FieldType::Date => b'D',
        }
    }

    /// Maps a descriptor type byte back to a [`FieldType`].
    ///
    /// Returns `None` for any unrecognized byte so the loader can fail
    /// fast instead of silently dropping the column.
    #[must_use]
    pub const fn from_type_byte(byte: u8) -> Option<Self> {
        match byte {
            b'C' => Some(FieldType::Character),
            b'N' => Some(FieldType::Numeric),
            b'L' => Some(FieldType::Logical),
            b'D' => Some(FieldType::Date),
            _ => None,
        }
    }
}

/// Encodes `value` into the fixed-width span `dst`.
///
/// The span is first filled with spaces, then:
///
/// - `Character` / `Logical` / `Date`: the value's bytes are copied from
///   the front, truncated at the span length. Logical values are **not**
///   validated or case-normalized -- whatever the caller wrote is stored
///   verbatim.
/// - `Numeric`: the value's bytes are copied from the span's rightmost
///   byte backward, taking the value's bytes from its end. A value longer
///   than the span therefore loses bytes from the *front* -- the historic
///   dBase behavior, kept for image compatibility.
pub fn encode_into(kind: FieldType, dst: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    dst.fill(PAD);
    let n = bytes.len().min(dst.len());
    match kind {
        FieldType::Character | FieldType::Logical | FieldType::Date => {
            dst[..n].copy_from_slice(&bytes[..n]);
        }
        FieldType::Numeric => {
            let tail = dst.len() - n;
            dst[tail..].copy_from_slice(&bytes[bytes.len() - n..]);
        }
    }
}

/// Decodes the textual value stored in a field span.
///
/// The span is cut at the first NUL byte (freshly appended records are
/// zero-filled), then surrounding whitespace -- the padding -- is trimmed.
/// The same rule covers every field type: left-justified values lose their
/// trailing pad, right-justified values their leading pad.
#[must_use]
pub fn decode(raw: &[u8]) -> String {
    let cut = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..cut]).trim().to_string()
}

#[cfg(test)]
mod tests;
