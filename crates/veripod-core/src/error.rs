//! Error types for VeriPOD core validation and the share codec.

use thiserror::Error;

/// Structural errors for the top-level record shape.
///
/// Variants are ordered the way validation reports them: the first failed
/// check wins, so a record missing both `signature` and `signerPublicKey`
/// reports only the signature.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("record must have an \"entries\" field")]
    MissingEntries,

    #[error("record \"entries\" must be an object")]
    EntriesNotAnObject,

    #[error("record must have a \"signature\" field")]
    MissingSignature,

    #[error("record \"signature\" must be a non-empty string")]
    InvalidSignature,

    #[error("record must have a \"signerPublicKey\" field")]
    MissingSignerPublicKey,

    #[error("record \"signerPublicKey\" must be a non-empty string")]
    InvalidSignerPublicKey,
}

/// Per-entry validation errors.
///
/// Entry validation is fail-fast in map order: the error names the first
/// offending entry and nothing after it is examined.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry name {name:?} is not a valid identifier (letters, digits, underscore; must not start with a digit)")]
    InvalidName { name: String },

    #[error("entry {name:?} must be a primitive value or a {{type, value}} pair")]
    InvalidShape { name: String },

    #[error("entry {name:?} has unknown type {found:?}; valid types: string, int, cryptographic, boolean, date, eddsa_pubkey, bytes, null")]
    UnknownType { name: String, found: String },

    #[error("entry {name:?} declares type {ty} but its value is {found}")]
    TypeMismatch {
        name: String,
        ty: crate::entry::EntryType,
        found: &'static str,
    },
}

/// Errors from building a share URL.
#[derive(Debug, Error)]
pub enum ShareUrlError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}
