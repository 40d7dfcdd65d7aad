//! Certificate field extraction module.

mod engine;
pub mod rules;

pub use engine::CertificateEngine;

use crate::models::certificate::ExtractionResult;

/// Trait for certificate field extractors.
pub trait CertificateExtractor {
    /// Extract the four certificate fields from plain OCR text.
    ///
    /// Total: the result always carries every field key, with canonical
    /// "not found" messages for unresolved fields.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;
}
