//! Rule-based field extractors for medical leave certificates.

pub mod cid;
pub mod dates;
pub mod days;
pub mod doctor;
pub mod patterns;

pub use cid::{category_for, extract_cid, validate_cid, CidExtractor};
pub use dates::{extract_issue_date, format_issue_date, DateExtractor};
pub use days::{extract_rest_days, format_rest_days, DaysExtractor};
pub use doctor::{extract_doctor, looks_like_name, DoctorExtractor};

/// Trait for field extractors.
///
/// Each extractor runs an ordered cascade of pattern rules; the first rule
/// that both matches and validates wins, and the cascade order (explicit
/// context, then proximity, then bare occurrence) is part of the contract.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract a validated candidate from text, or nothing.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
