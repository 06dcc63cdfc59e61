//! The Verifier: a fixed pipeline from untrusted text to a verification
//! outcome.
//!
//! Stages run in a fixed order and each one either passes a refined value
//! forward or aborts with the error for its stage: bound and sanitize,
//! repair, strict parse, structure validation, entry validation, engine
//! record construction, signature check. Only the signature check is
//! async; everything before it is pure computation.

use std::borrow::Cow;

use serde_json::{Map, Value};
use url::Url;

use veripod_core::{
    format_entries, repair, share, validate_entries, FormattedEntry, Malformation, RecordView,
};
use veripod_engine::VerificationEngine;

use crate::error::{Result, VerifyError};

/// Default input bound: one megabyte of text.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1_000_000;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Inputs larger than this many bytes are rejected before any work.
    pub max_input_bytes: usize,
    /// Whether malformed text gets a repair attempt before strict parsing.
    pub attempt_repair: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            attempt_repair: true,
        }
    }
}

/// Outcome of a completed pipeline run.
///
/// Reaching this type means the record was well-formed and the engine
/// could construct it. It does NOT mean the signature matched: check
/// [`signature_valid`](Self::signature_valid). When the signature check
/// itself could not run, `signature_valid` is false and
/// [`signature_error`](Self::signature_error) says why.
#[derive(Debug, Clone)]
pub struct Verification {
    pub signature_valid: bool,
    /// Content-addressed id of the entries, as the engine computes it.
    pub content_id: String,
    /// Wire text of the signer's public key.
    pub signer_public_key: String,
    pub entry_count: usize,
    pub entries: Map<String, Value>,
    /// The text that was actually parsed, post-repair.
    pub canonical_text: String,
    /// True when the input needed repair before it parsed.
    pub repaired: bool,
    /// What the repair pass fixed, empty when `repaired` is false.
    pub fixes: Vec<Malformation>,
    pub signature_error: Option<String>,
}

impl Verification {
    /// Render the entries for display, important entries first.
    pub fn formatted_entries(&self) -> Vec<FormattedEntry> {
        format_entries(&self.entries)
    }

    /// Build a share URL for this record on top of `current_url`.
    pub fn share_url(&self, current_url: &str) -> Result<Url> {
        Ok(share::share_url(current_url, &self.canonical_text)?)
    }
}

/// The verification pipeline, generic over its engine.
pub struct Verifier<E: VerificationEngine> {
    engine: E,
    config: VerifierConfig,
}

impl<E: VerificationEngine> Verifier<E> {
    /// Create a verifier with default configuration.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, VerifierConfig::default())
    }

    pub fn with_config(engine: E, config: VerifierConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run the full pipeline over untrusted record text.
    pub async fn verify(&self, raw: &str) -> Result<Verification> {
        // 1. Bound the input, then scrub null bytes.
        if raw.len() > self.config.max_input_bytes {
            return Err(VerifyError::InputTooLarge {
                len: raw.len(),
                max: self.config.max_input_bytes,
            });
        }
        let sanitized: Cow<'_, str> = if raw.contains('\0') {
            Cow::Owned(raw.replace('\0', ""))
        } else {
            Cow::Borrowed(raw)
        };

        // 2-3. Repair if configured, then strict parse.
        let (value, canonical_text, repaired, fixes) = self.parse_stage(sanitized.as_ref())?;

        // 4. Top-level structure.
        let view = RecordView::from_value(&value)?;

        // 5. Entries, fail-fast in map order.
        validate_entries(view.entries())?;

        // 6. Engine record construction.
        let record = self
            .engine
            .parse_record(&value)
            .map_err(VerifyError::Engine)?;
        tracing::debug!(
            content_id = %record.content_id,
            entries = record.entry_count(),
            repaired,
            "record constructed"
        );

        // 7. Signature check. A check that cannot run is an unverified
        // outcome, not a pipeline error.
        let (signature_valid, signature_error) = match self.engine.verify_signature(&record).await {
            Ok(valid) => (valid, None),
            Err(err) => {
                tracing::warn!(error = %err, "signature check could not run");
                (false, Some(err.to_string()))
            }
        };

        Ok(Verification {
            signature_valid,
            content_id: record.content_id,
            signer_public_key: record.signer_public_key,
            entry_count: record.entries.len(),
            entries: record.entries,
            canonical_text,
            repaired,
            fixes,
            signature_error,
        })
    }

    /// Repair (when enabled) and strictly parse. On repair failure the
    /// strict parse of the original text supplies the error message.
    fn parse_stage(&self, text: &str) -> Result<(Value, String, bool, Vec<Malformation>)> {
        if self.config.attempt_repair {
            let outcome = repair(text);
            if let Some(value) = outcome.value {
                if outcome.was_repaired {
                    tracing::debug!(fixes = outcome.fixes.len(), "record text repaired");
                }
                return Ok((
                    value,
                    outcome.canonical_text,
                    outcome.was_repaired,
                    outcome.fixes,
                ));
            }
        }

        let trimmed = text.trim();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Ok((value, trimmed.to_string(), false, Vec::new())),
            Err(err) => Err(VerifyError::Parse {
                message: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.max_input_bytes, 1_000_000);
        assert!(config.attempt_repair);
    }
}
