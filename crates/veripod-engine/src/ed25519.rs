//! Reference engine: Ed25519 over a Blake3 content digest.
//!
//! The signed message is the Blake3 hash of the entries in canonical
//! form (keys sorted recursively, compact JSON). Entry insertion order
//! therefore never affects the content id or the signature.
//!
//! Wire encoding for keys and signatures is standard base64 without
//! padding; decoding tolerates padded input.

use std::fmt;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use async_trait::async_trait;
use veripod_core::RecordView;

use crate::error::EngineError;
use crate::traits::{EngineRecord, VerificationEngine};

/// Standard-alphabet base64 text, optionally padded.
static BASE64_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+=*$").expect("base64 pattern is valid"));

/// Quick plausibility check for signature text before decoding.
pub fn looks_like_signature(text: &str) -> bool {
    text.len() >= 40 && BASE64_TEXT.is_match(text)
}

/// Quick plausibility check for public key text before decoding.
pub fn looks_like_public_key(text: &str) -> bool {
    text.len() >= 20 && BASE64_TEXT.is_match(text)
}

/// Entries in canonical byte form: keys sorted recursively, compact JSON.
pub fn canonical_entry_bytes(entries: &Map<String, Value>) -> Vec<u8> {
    let canonical = sorted_value(&Value::Object(entries.clone()));
    serde_json::to_vec(&canonical).unwrap_or_default()
}

fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, inner) in pairs {
                out.insert(key.clone(), sorted_value(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_value).collect()),
        other => other.clone(),
    }
}

fn decode_wire(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD_NO_PAD.decode(text.trim_end_matches('='))
}

/// Self-contained Ed25519 verification engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Engine;

impl Ed25519Engine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VerificationEngine for Ed25519Engine {
    fn parse_record(&self, value: &Value) -> Result<EngineRecord, EngineError> {
        let view =
            RecordView::from_value(value).map_err(|e| EngineError::Construction(e.to_string()))?;

        let signature_text = view.signature();
        if !looks_like_signature(signature_text) {
            return Err(EngineError::Construction(
                "signature is not plausible base64 signature material".to_string(),
            ));
        }
        let signature = decode_wire(signature_text)
            .map_err(|e| EngineError::Construction(format!("signature is not valid base64: {e}")))?;
        if signature.len() != 64 {
            return Err(EngineError::Construction(format!(
                "signature must decode to 64 bytes, got {}",
                signature.len()
            )));
        }

        let key_text = view.signer_public_key();
        if !looks_like_public_key(key_text) {
            return Err(EngineError::Construction(
                "signer public key is not plausible base64 key material".to_string(),
            ));
        }
        let key = decode_wire(key_text).map_err(|e| {
            EngineError::Construction(format!("signer public key is not valid base64: {e}"))
        })?;
        if key.len() != 32 {
            return Err(EngineError::Construction(format!(
                "signer public key must decode to 32 bytes, got {}",
                key.len()
            )));
        }
        let mut key_arr = [0u8; 32];
        key_arr.copy_from_slice(&key);
        VerifyingKey::from_bytes(&key_arr).map_err(|e| {
            EngineError::Construction(format!("signer public key is not a valid Ed25519 key: {e}"))
        })?;

        let entries = view.entries().clone();
        let digest = blake3::hash(&canonical_entry_bytes(&entries));
        let record = EngineRecord {
            content_id: hex::encode(digest.as_bytes()),
            signer_public_key: key_text.to_string(),
            entries,
            digest: digest.as_bytes().to_vec(),
            signature,
            key,
        };
        tracing::debug!(
            content_id = %record.content_id,
            entries = record.entry_count(),
            "constructed engine record"
        );
        Ok(record)
    }

    async fn verify_signature(&self, record: &EngineRecord) -> Result<bool, EngineError> {
        if record.key.len() != 32 {
            return Err(EngineError::SignatureCheck(format!(
                "key material must be 32 bytes, got {}",
                record.key.len()
            )));
        }
        if record.signature.len() != 64 {
            return Err(EngineError::SignatureCheck(format!(
                "signature material must be 64 bytes, got {}",
                record.signature.len()
            )));
        }

        let mut key_arr = [0u8; 32];
        key_arr.copy_from_slice(&record.key);
        let verifying_key = VerifyingKey::from_bytes(&key_arr)
            .map_err(|e| EngineError::SignatureCheck(format!("invalid Ed25519 key: {e}")))?;

        let mut sig_arr = [0u8; 64];
        sig_arr.copy_from_slice(&record.signature);
        let signature = Signature::from_bytes(&sig_arr);

        Ok(verifying_key.verify(&record.digest, &signature).is_ok())
    }
}

/// Signing-side counterpart to [`Ed25519Engine`], for minting records
/// the engine accepts.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The public key in wire form.
    pub fn public_key_base64(&self) -> String {
        STANDARD_NO_PAD.encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign `entries` and assemble a complete record value.
    pub fn sign_record(&self, entries: Map<String, Value>) -> Value {
        let digest = blake3::hash(&canonical_entry_bytes(&entries));
        let signature = self.signing_key.sign(digest.as_bytes());
        json!({
            "entries": entries,
            "signature": STANDARD_NO_PAD.encode(signature.to_bytes()),
            "signerPublicKey": self.public_key_base64(),
        })
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", &self.public_key_base64()[..8])
    }
}
