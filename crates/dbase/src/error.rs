use std::io;
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// A structural change was attempted after the table already holds
    /// data (or was loaded from an image, which freezes the schema).
    #[error("schema is frozen: the table already holds data")]
    SchemaFrozen,

    /// A field with the same normalized name already exists.
    #[error("field {0:?} already exists")]
    DuplicateField(String),

    /// No field with the given name exists in the schema.
    #[error("field {0:?} does not exist")]
    FieldNotFound(String),

    /// A field descriptor carried a type byte this implementation does
    /// not recognize. Loading stops rather than desynchronizing the
    /// record layout.
    #[error("unknown field type byte {0:#04x}")]
    UnknownFieldType(u8),

    /// The byte image failed structural validation.
    #[error("corrupt table image: {0}")]
    Corrupt(String),

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
