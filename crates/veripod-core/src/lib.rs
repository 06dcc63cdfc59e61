//! # VeriPOD Core
//!
//! Pure primitives for VeriPOD: malformation detection, JSON repair,
//! record validation, entry formatting, and the share-URL codec.
//!
//! This crate contains no I/O, no networking, and no cryptography. It is
//! pure computation over untrusted record text and parsed JSON values.
//!
//! ## Key Types
//!
//! - [`MalformationReport`] - What a piece of record text has wrong with it
//! - [`RepairResult`] - Outcome of the lenient-repair pass
//! - [`RecordView`] - A structurally validated borrow of a parsed record
//! - [`EntryType`] - The closed set of entry value types
//! - [`FormattedEntry`] - A display-ready rendering of one entry
//!
//! ## Pipeline position
//!
//! Callers normally go through the `veripod` crate, which chains these
//! primitives in a fixed order. Each module here is usable on its own.

pub mod detect;
pub mod entry;
pub mod error;
pub mod format;
pub mod repair;
pub mod share;
pub mod validation;

pub use detect::{detect, Malformation, MalformationReport};
pub use entry::{resolve_entry, EntryType, ResolvedEntry};
pub use error::{EntryError, ShareUrlError, StructureError};
pub use format::{format_entries, Category, FormattedEntry};
pub use repair::{repair, RepairResult};
pub use share::{
    canonicalize, decode_record, encode_record, extract_record, is_valid_record_json, share_url,
};
pub use validation::{validate_entries, validate_structure, RecordView};
