//! # VeriPOD Testkit
//!
//! Shared test utilities for the VeriPOD workspace.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fake engine**: a scriptable [`VerificationEngine`](veripod_engine::VerificationEngine)
//!   double for exercising pipeline channels without cryptography
//! - **Fixtures**: canned records, a seeded signer, and a corpus of
//!   damaged-text samples
//! - **Generators**: proptest strategies over entries, records, and
//!   mangled record text
//! - **Golden vectors**: pinned canonical entry encodings that keep
//!   content ids stable across changes
//!
//! ## Fake engine
//!
//! ```rust
//! use veripod::Verifier;
//! use veripod_testkit::FakeEngine;
//!
//! let verifier = Verifier::new(FakeEngine::accepting());
//! ```
//!
//! ## Property testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use veripod_testkit::generators::record_text;
//!
//! proptest! {
//!     #[test]
//!     fn never_panics(text in record_text(6)) {
//!         let _ = veripod_core::repair(&text);
//!     }
//! }
//! ```
//!
//! This crate is a dev-tool. Nothing in it belongs in production builds.

pub mod fake;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fake::{FakeEngine, FakeVerdict};
pub use fixtures::{
    damaged_corpus, minimal_entries, signed_record, signed_record_text, tampered, ticket_entries,
};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
