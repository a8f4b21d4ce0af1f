//! Whole-table persistence: byte-image snapshot and reconstruction, plus
//! the file-level load/save built on top.
//!
//! Saving is crash-safe in the same way the rest of the stack writes
//! files: the image goes to a temporary file first, is fsynced, and is
//! then atomically renamed over the destination.

use std::fs::{rename, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::format;
use crate::schema::Schema;
use crate::Table;
use crate::TableError;

impl Table {
    /// Reconstructs a table from a persisted byte image.
    ///
    /// The schema is rebuilt by walking the descriptor array, deleted rows
    /// are re-collected into the free-list, and the schema is frozen --
    /// loaded tables never accept structural changes, even when empty.
    /// A trailing EOF marker (and anything after the declared extent) is
    /// dropped so the in-memory buffer is exactly header + records.
    ///
    /// # Errors
    ///
    /// - [`TableError::Corrupt`] if the image is shorter than its header
    ///   declares, or the declared record length disagrees with the field
    ///   widths.
    /// - [`TableError::UnknownFieldType`] if a descriptor carries a type
    ///   byte this implementation does not know. Failing fast here beats
    ///   the historic behavior of skipping the field, which silently
    ///   corrupted every subsequent field offset.
    /// - [`TableError::DuplicateField`] if two descriptors normalize to
    ///   the same name.
    pub fn from_bytes(mut image: Vec<u8>) -> Result<Self, TableError> {
        if image.len() < format::HEADER_BYTES {
            return Err(TableError::Corrupt(format!(
                "image is {} bytes, shorter than the {}-byte header",
                image.len(),
                format::HEADER_BYTES
            )));
        }

        let signature = image[0];
        let last_update = (image[1], image[2], image[3]);
        let record_count = format::read_record_count(&image);
        let header_size = format::read_header_size(&image);
        let record_length = format::read_record_length(&image);

        if (header_size as usize) < format::HEADER_BYTES {
            return Err(TableError::Corrupt(format!(
                "declared header size {header_size} is smaller than the fixed {}-byte header",
                format::HEADER_BYTES
            )));
        }
        if record_count > 0 && record_length == 0 {
            return Err(TableError::Corrupt(format!(
                "{record_count} records declared with a zero record length"
            )));
        }

        let expected =
            header_size as usize + record_count as usize * record_length as usize;
        if image.len() < expected {
            return Err(TableError::Corrupt(format!(
                "image is {} bytes but the header declares {} ({} records of {} bytes after a {}-byte header)",
                image.len(),
                expected,
                record_count,
                record_length,
                header_size
            )));
        }
        image.truncate(expected);

        let mut schema = Schema::default();
        for slot in 0..format::descriptor_slots(header_size) {
            let offset = format::HEADER_BYTES + slot * format::DESCRIPTOR_BYTES;
            let desc =
                format::parse_descriptor(&image[offset..offset + format::DESCRIPTOR_BYTES])?;
            schema.add(&desc.name, desc.kind, desc.length, desc.precision)?;
        }

        if schema.len() > 0 {
            let widths: usize = 1 + schema
                .fields()
                .iter()
                .map(|f| f.length() as usize)
                .sum::<usize>();
            if widths != record_length as usize {
                return Err(TableError::Corrupt(format!(
                    "declared record length {record_length} disagrees with the field widths ({widths})"
                )));
            }
        }
        schema.freeze();

        let mut table = Self {
            buf: image,
            schema,
            free: Vec::new(),
            signature,
            last_update,
            record_count,
            header_size,
            record_length,
        };
        for row in 0..table.num_records() {
            if table.is_deleted(row) {
                table.free.push(row);
            }
        }
        Ok(table)
    }

    /// Snapshots the table as a complete persisted image: header,
    /// descriptors, records, and the trailing EOF marker.
    ///
    /// The table itself is untouched; repeated snapshots are identical.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut image = Vec::with_capacity(self.buf.len() + 1);
        image.extend_from_slice(&self.buf);
        image.push(format::EOF_MARKER);
        image
    }

    /// Reads a table from a file in one whole-buffer read.
    ///
    /// # Errors
    ///
    /// I/O errors propagate unchanged; the image is validated as in
    /// [`Table::from_bytes`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Writes the table image to `path` in one whole-buffer write.
    ///
    /// The image is written to `path.dbf.tmp`, fsynced, and atomically
    /// renamed into place, so a crash mid-write leaves any previous file
    /// intact.
    ///
    /// # Errors
    ///
    /// Returns any underlying I/O error unchanged; there is no retry.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("dbf.tmp");

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(&self.to_bytes())?;
        file.sync_all()?;

        rename(&tmp_path, path)?;

        // Fsync the parent directory so the rename itself survives a
        // crash (a no-op on filesystems that journal metadata).
        if let Some(parent) = path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}
