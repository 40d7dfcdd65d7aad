//! Core library for medical leave certificate (atestado médico) processing.
//!
//! This crate provides:
//! - Text normalization for noisy OCR output
//! - Rule-based field extraction (CID-10 code, physician, issue date, rest days)
//! - A learned-correction overlay that replays human corrections for
//!   similar future documents
//! - An entity source seam for plugging in an external NER tagger

pub mod certificate;
pub mod error;
pub mod learning;
pub mod models;
pub mod ner;
pub mod normalize;

pub use certificate::{CertificateEngine, CertificateExtractor};
pub use error::{AtestaError, ExtractionError, Result, StoreError};
pub use learning::{find_similar_correction, similarity, CorrectionStore};
pub use models::certificate::{is_not_found, CorrectionRecord, ExtractionResult, FieldKey};
pub use models::config::EngineConfig;
pub use ner::{EntitySource, NamedEntity};
pub use normalize::normalize_text;
