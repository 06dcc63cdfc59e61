//! # VeriPOD
//!
//! A tolerant verification pipeline for signed object records.
//!
//! ## Overview
//!
//! VeriPOD takes untrusted, possibly mangled text that claims to encode a
//! signed record and turns it into either a precise rejection or a
//! verification outcome:
//!
//! - **Repair**: copy-paste damage (smart quotes gone doubled, trailing
//!   commas, Python literals, comments) is detected and reversed before
//!   strict parsing, and valid input is never rewritten
//! - **Validation**: top-level structure and every entry are checked in a
//!   fixed order with one error per failure mode
//! - **Verification**: cryptography is delegated to an injected
//!   [`VerificationEngine`]; the pipeline itself never touches key material
//! - **Display**: verified entries format deterministically, important
//!   fields first
//! - **Sharing**: records encode to URL-safe tokens and back
//!
//! ## Key Concepts
//!
//! - **Record**: an `entries` map plus `signature` and `signerPublicKey`.
//! - **Repair**: strict parse first; transform only what strict parsing
//!   rejects; never invent structure.
//! - **Outcome vs error**: a signature that does not match is a successful
//!   pipeline run with `signature_valid == false`. Errors are reserved for
//!   records the pipeline could not take that far.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use veripod::{Ed25519Engine, Verifier};
//!
//! async fn example(text: &str) {
//!     let verifier = Verifier::new(Ed25519Engine::new());
//!     match verifier.verify(text).await {
//!         Ok(outcome) => {
//!             println!("signature valid: {}", outcome.signature_valid);
//!             for entry in outcome.formatted_entries() {
//!                 println!("  {}: {}", entry.name, entry.formatted_value);
//!             }
//!         }
//!         Err(err) => eprintln!("rejected: {err}"),
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `veripod::core` - Detection, repair, validation, formatting, sharing
//! - `veripod::engine` - The engine capability and the Ed25519 reference

pub mod error;
pub mod verifier;

// Re-export component crates
pub use veripod_core as core;
pub use veripod_engine as engine;

// Re-export main types for convenience
pub use error::{Result, VerifyError};
pub use verifier::{Verification, Verifier, VerifierConfig, DEFAULT_MAX_INPUT_BYTES};

// Re-export commonly used component types
pub use veripod_core::{
    decode_record, detect, encode_record, extract_record, format_entries, is_valid_record_json,
    repair, share_url, Category, EntryError, EntryType, FormattedEntry, Malformation,
    MalformationReport, RecordView, RepairResult, ShareUrlError, StructureError,
};
pub use veripod_engine::{Ed25519Engine, EngineError, EngineRecord, Keypair, VerificationEngine};
