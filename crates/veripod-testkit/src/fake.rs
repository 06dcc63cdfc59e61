//! A scriptable verification engine.
//!
//! [`FakeEngine`] stands in for the real Ed25519 engine when a test only
//! cares about which pipeline channel an outcome travels through. Records
//! still go through structural parsing, so construction failures caused by
//! bad input stay observable, but the signature verdict is scripted.

use async_trait::async_trait;
use serde_json::Value;
use veripod_core::RecordView;
use veripod_engine::{canonical_entry_bytes, EngineError, EngineRecord, VerificationEngine};

/// Scripted outcome for a [`FakeEngine`].
#[derive(Debug, Clone)]
pub enum FakeVerdict {
    /// Construct the record and report the signature as valid.
    Accept,
    /// Construct the record and report the signature as invalid.
    RejectSignature,
    /// Refuse to construct the record.
    FailConstruction(String),
    /// Construct the record, then fail the signature check itself.
    FailCheck(String),
}

/// Engine double with a scripted verdict.
///
/// Content ids are derived from the canonical entry bytes, so two records
/// with the same entries get the same id regardless of entry order.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    verdict: FakeVerdict,
}

impl FakeEngine {
    pub fn accepting() -> Self {
        Self { verdict: FakeVerdict::Accept }
    }

    pub fn rejecting() -> Self {
        Self { verdict: FakeVerdict::RejectSignature }
    }

    pub fn failing_construction(reason: impl Into<String>) -> Self {
        Self { verdict: FakeVerdict::FailConstruction(reason.into()) }
    }

    pub fn failing_check(reason: impl Into<String>) -> Self {
        Self { verdict: FakeVerdict::FailCheck(reason.into()) }
    }

    pub fn with_verdict(verdict: FakeVerdict) -> Self {
        Self { verdict }
    }

    pub fn verdict(&self) -> &FakeVerdict {
        &self.verdict
    }
}

#[async_trait]
impl VerificationEngine for FakeEngine {
    fn parse_record(&self, value: &Value) -> Result<EngineRecord, EngineError> {
        if let FakeVerdict::FailConstruction(reason) = &self.verdict {
            return Err(EngineError::Construction(reason.clone()));
        }
        let view =
            RecordView::from_value(value).map_err(|e| EngineError::Construction(e.to_string()))?;
        let entries = view.entries().clone();
        let digest = blake3::hash(&canonical_entry_bytes(&entries));
        Ok(EngineRecord {
            content_id: format!("fake{}", hex::encode(&digest.as_bytes()[..8])),
            signer_public_key: view.signer_public_key().to_string(),
            entries,
            digest: digest.as_bytes().to_vec(),
            signature: Vec::new(),
            key: Vec::new(),
        })
    }

    async fn verify_signature(&self, _record: &EngineRecord) -> Result<bool, EngineError> {
        match &self.verdict {
            FakeVerdict::Accept => Ok(true),
            FakeVerdict::RejectSignature => Ok(false),
            FakeVerdict::FailConstruction(_) => Ok(false),
            FakeVerdict::FailCheck(reason) => Err(EngineError::SignatureCheck(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use veripod::{Verifier, VerifyError};

    #[tokio::test]
    async fn accepting_fake_reports_valid() {
        let verifier = Verifier::new(FakeEngine::accepting());
        let outcome = verifier
            .verify(&fixtures::signed_record_text([1u8; 32]))
            .await
            .unwrap();
        assert!(outcome.signature_valid);
        assert!(outcome.content_id.starts_with("fake"));
    }

    #[tokio::test]
    async fn rejecting_fake_reports_invalid_without_error() {
        let verifier = Verifier::new(FakeEngine::rejecting());
        let outcome = verifier
            .verify(&fixtures::signed_record_text([1u8; 32]))
            .await
            .unwrap();
        assert!(!outcome.signature_valid);
        assert!(outcome.signature_error.is_none());
    }

    #[tokio::test]
    async fn construction_failure_surfaces_as_engine_error() {
        let verifier = Verifier::new(FakeEngine::failing_construction("scripted"));
        let err = verifier
            .verify(&fixtures::signed_record_text([1u8; 32]))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Engine(_)));
    }

    #[tokio::test]
    async fn check_failure_is_downgraded_to_outcome() {
        let verifier = Verifier::new(FakeEngine::failing_check("hsm offline"));
        let outcome = verifier
            .verify(&fixtures::signed_record_text([1u8; 32]))
            .await
            .unwrap();
        assert!(!outcome.signature_valid);
        assert!(outcome.signature_error.as_deref().unwrap().contains("hsm offline"));
    }

    #[tokio::test]
    async fn same_entries_in_any_order_share_a_content_id() {
        let engine = FakeEngine::accepting();
        let forward = fixtures::signed_record([2u8; 32]);
        let mut reversed_entries = serde_json::Map::new();
        let mut pairs: Vec<_> = fixtures::ticket_entries().into_iter().collect();
        pairs.reverse();
        for (name, value) in pairs {
            reversed_entries.insert(name, value);
        }
        let backward = veripod_engine::Keypair::from_seed(&[2u8; 32]).sign_record(reversed_entries);
        let a = engine.parse_record(&forward).unwrap();
        let b = engine.parse_record(&backward).unwrap();
        assert_eq!(a.content_id, b.content_id);
    }
}
