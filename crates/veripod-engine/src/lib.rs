//! # VeriPOD Engine
//!
//! The verification engine capability and a reference implementation.
//!
//! The pipeline in the `veripod` crate never does cryptography itself; it
//! drives a [`VerificationEngine`] injected by the caller. This crate
//! defines that capability plus [`Ed25519Engine`], a self-contained
//! engine that signs and verifies records with Ed25519 over a Blake3
//! content digest.
//!
//! ## Error channels
//!
//! Engines distinguish two failure channels, and callers rely on the
//! distinction: [`EngineError::Construction`] means the record could not
//! even be built (malformed key or signature material), while
//! [`EngineError::SignatureCheck`] means the check itself could not run.
//! A signature that simply does not match is not an error at all; it is
//! `Ok(false)` from [`VerificationEngine::verify_signature`].

pub mod ed25519;
pub mod error;
pub mod traits;

pub use ed25519::{
    canonical_entry_bytes, looks_like_public_key, looks_like_signature, Ed25519Engine, Keypair,
};
pub use error::EngineError;
pub use traits::{EngineRecord, VerificationEngine};
