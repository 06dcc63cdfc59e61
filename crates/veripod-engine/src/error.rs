//! Engine error channels.

use thiserror::Error;

/// Failures an engine can report.
///
/// The two variants travel different paths through the pipeline:
/// `Construction` aborts verification, `SignatureCheck` is downgraded to
/// an unverified-but-displayable outcome.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("record construction failed: {0}")]
    Construction(String),

    #[error("signature check failed: {0}")]
    SignatureCheck(String),
}
