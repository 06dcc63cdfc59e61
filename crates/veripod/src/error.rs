//! Error taxonomy for the verification pipeline.

use thiserror::Error;

use veripod_core::{EntryError, ShareUrlError, StructureError};
use veripod_engine::EngineError;

/// Everything that can abort a verification run.
///
/// Each variant is one pipeline stage, in order. Signature mismatches and
/// signature-check failures never appear here: those are reported inside
/// a successful [`crate::Verification`].
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("input too large: {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },

    #[error("JSON parsing failed: {message}")]
    Parse { message: String },

    #[error("record structure invalid: {0}")]
    Structure(#[from] StructureError),

    #[error("record entries invalid: {0}")]
    Entry(#[from] EntryError),

    // No `#[from]`: only the construction stage maps engine errors here.
    #[error("verification engine rejected the record: {0}")]
    Engine(EngineError),

    #[error("share URL error: {0}")]
    ShareUrl(#[from] ShareUrlError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
