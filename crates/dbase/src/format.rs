//! dBase III PLUS binary layout constants and header byte helpers.
//!
//! ## Header (32 bytes)
//!
//! ```text
//! [signature: u8][yy mm dd: 3 x u8][record_count: u32 LE]
//! [header_size: u16 LE][record_length: u16 LE][reserved: 20]
//! ```
//!
//! ## Field descriptor (32 bytes each, starting at offset 32)
//!
//! ```text
//! [name: 10, NUL-padded][NUL: 1][type: 1][reserved: 4]
//! [length: u8][precision: u8][reserved: 14]
//! ```
//!
//! The descriptor array is closed by a single `0x0D` terminator byte, so
//! `header_size == 32 * (1 + field_count) + 1` and a parser recovers the
//! field count as `(header_size - 1 - 32) / 32`.

use byteorder::{ByteOrder, LittleEndian};
use codec::FieldType;

use crate::error::TableError;
use crate::schema::Field;

/// File signature of a dBase III PLUS table without a memo file.
pub const SIGNATURE: u8 = 0x03;

/// Size of the fixed file header in bytes.
pub const HEADER_BYTES: usize = 32;

/// Size of one field descriptor in bytes.
pub const DESCRIPTOR_BYTES: usize = 32;

/// Maximum stored length of a field name.
pub const NAME_BYTES: usize = 10;

/// Byte closing the descriptor array.
pub const HEADER_TERMINATOR: u8 = 0x0D;

/// Byte appended after the last record in a persisted image.
pub const EOF_MARKER: u8 = 0x1A;

/// Record marker byte of an active row.
pub const ACTIVE_MARKER: u8 = 0x20;

/// Record marker byte of a logically deleted row.
pub const DELETED_MARKER: u8 = 0x2A;

/// Language-driver byte written at header offset 28 (`0xF0` = UTF-8).
pub(crate) const LANGUAGE_DRIVER_UTF8: u8 = 0xF0;

/// Header offset of the language-driver byte.
pub(crate) const LANGUAGE_DRIVER_OFFSET: usize = 28;

const RECORD_COUNT_OFFSET: usize = 4;
const HEADER_SIZE_OFFSET: usize = 8;
const RECORD_LENGTH_OFFSET: usize = 10;

const DESC_TYPE_OFFSET: usize = 11;
const DESC_LENGTH_OFFSET: usize = 16;
const DESC_PRECISION_OFFSET: usize = 17;

pub(crate) fn read_record_count(buf: &[u8]) -> u32 {
    LittleEndian::read_u32(&buf[RECORD_COUNT_OFFSET..RECORD_COUNT_OFFSET + 4])
}

pub(crate) fn write_record_count(buf: &mut [u8], count: u32) {
    LittleEndian::write_u32(&mut buf[RECORD_COUNT_OFFSET..RECORD_COUNT_OFFSET + 4], count);
}

pub(crate) fn read_header_size(buf: &[u8]) -> u16 {
    LittleEndian::read_u16(&buf[HEADER_SIZE_OFFSET..HEADER_SIZE_OFFSET + 2])
}

pub(crate) fn write_header_size(buf: &mut [u8], size: u16) {
    LittleEndian::write_u16(&mut buf[HEADER_SIZE_OFFSET..HEADER_SIZE_OFFSET + 2], size);
}

pub(crate) fn read_record_length(buf: &[u8]) -> u16 {
    LittleEndian::read_u16(&buf[RECORD_LENGTH_OFFSET..RECORD_LENGTH_OFFSET + 2])
}

pub(crate) fn write_record_length(buf: &mut [u8], length: u16) {
    LittleEndian::write_u16(&mut buf[RECORD_LENGTH_OFFSET..RECORD_LENGTH_OFFSET + 2], length);
}

/// Returns how many descriptor slots a header of `header_size` bytes
/// holds. Saturates to zero for a field-less header (`header_size == 32`).
pub(crate) fn descriptor_slots(header_size: u16) -> usize {
    (header_size as usize).saturating_sub(HEADER_BYTES + 1) / DESCRIPTOR_BYTES
}

/// A field descriptor as parsed off an image, before schema
/// normalization (the schema store uppercases and truncates the name).
pub(crate) struct Descriptor {
    pub name: String,
    pub kind: FieldType,
    pub length: u8,
    pub precision: u8,
}

/// Serializes one field into its 32-byte descriptor.
pub(crate) fn encode_descriptor(field: &Field) -> [u8; DESCRIPTOR_BYTES] {
    let mut desc = [0u8; DESCRIPTOR_BYTES];
    let name = field.name().as_bytes();
    let n = name.len().min(NAME_BYTES);
    desc[..n].copy_from_slice(&name[..n]);
    // desc[NAME_BYTES] stays 0x00, the name terminator.
    desc[DESC_TYPE_OFFSET] = field.kind().type_byte();
    desc[DESC_LENGTH_OFFSET] = field.length();
    desc[DESC_PRECISION_OFFSET] = field.precision();
    desc
}

/// Parses one 32-byte descriptor slot.
///
/// An unrecognized type byte is a hard error: skipping the field while
/// the header still counts it would desynchronize the name map and every
/// subsequent field offset.
pub(crate) fn parse_descriptor(raw: &[u8]) -> Result<Descriptor, TableError> {
    let name_raw = &raw[..NAME_BYTES];
    let cut = name_raw.iter().position(|&b| b == 0).unwrap_or(NAME_BYTES);
    let name = String::from_utf8_lossy(&name_raw[..cut]).into_owned();

    let type_byte = raw[DESC_TYPE_OFFSET];
    let kind = FieldType::from_type_byte(type_byte)
        .ok_or(TableError::UnknownFieldType(type_byte))?;

    // Logical and Date columns have fixed widths; historic dBase
    // readers ignore the descriptor bytes for them, and so do we.
    let (length, precision) = match kind {
        FieldType::Logical => (1, 0),
        FieldType::Date => (8, 0),
        FieldType::Character | FieldType::Numeric => {
            (raw[DESC_LENGTH_OFFSET], raw[DESC_PRECISION_OFFSET])
        }
    };

    Ok(Descriptor {
        name,
        kind,
        length,
        precision,
    })
}
