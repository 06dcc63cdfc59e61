//! The verification engine capability.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::EngineError;

/// A record as the engine understands it.
///
/// `content_id` addresses the entry content, `signer_public_key` echoes
/// the wire text of the key, and the byte fields carry whatever decoded
/// material the engine needs to check the signature later. Engines that
/// keep no material leave those empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRecord {
    pub content_id: String,
    pub signer_public_key: String,
    pub entries: Map<String, Value>,
    pub digest: Vec<u8>,
    pub signature: Vec<u8>,
    pub key: Vec<u8>,
}

impl EngineRecord {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Cryptographic backend for record verification.
///
/// Implementations must be cheap to share across tasks; the pipeline
/// holds one engine for its whole lifetime. `parse_record` is pure
/// computation and stays synchronous. `verify_signature` is the one
/// point where an engine may suspend (hardware tokens, remote signers).
#[async_trait]
pub trait VerificationEngine: Send + Sync {
    /// Build an [`EngineRecord`] from a structurally valid record value.
    ///
    /// Fails with [`EngineError::Construction`] when the signature or key
    /// material cannot be decoded.
    fn parse_record(&self, value: &Value) -> Result<EngineRecord, EngineError>;

    /// Check the record's signature.
    ///
    /// `Ok(false)` means the material was well-formed but the signature
    /// does not match; [`EngineError::SignatureCheck`] means the check
    /// could not be carried out at all.
    async fn verify_signature(&self, record: &EngineRecord) -> Result<bool, EngineError>;
}
