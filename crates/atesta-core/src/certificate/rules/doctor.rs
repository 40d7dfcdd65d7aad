//! Physician name extraction.

use super::patterns::{CRM_SUFFIX, DOCTOR_LABEL, DOCTOR_SIGNED_BY, DOCTOR_TITLE, NUMERIC_SUFFIX};
use super::FieldExtractor;

/// Physician name extractor.
pub struct DoctorExtractor;

impl DoctorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DoctorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DoctorExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        // Titled names render with their canonical title prefix.
        for caps in DOCTOR_TITLE.captures_iter(text) {
            let name = trim_credentials(caps[2].trim());
            if is_valid_name(&name) {
                return Some(format!("{} {}", canonical_title(&caps[1]), name));
            }
        }

        // Signature and label contexts carry no title.
        for pattern in [&*DOCTOR_SIGNED_BY, &*DOCTOR_LABEL] {
            for caps in pattern.captures_iter(text) {
                let name = trim_credentials(caps[1].trim());
                if is_valid_name(&name) {
                    return Some(name);
                }
            }
        }

        None
    }
}

/// Extract a physician name from text.
pub fn extract_doctor(text: &str) -> Option<String> {
    DoctorExtractor::new().extract(text)
}

/// A plausible person name: at least two words, every word capitalized.
pub fn looks_like_name(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    words
        .iter()
        .all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

fn is_valid_name(name: &str) -> bool {
    name.len() > 3 && looks_like_name(name)
}

/// Strip a trailing CRM registration and any digit-led tail from a
/// captured name.
fn trim_credentials(name: &str) -> String {
    let name = CRM_SUFFIX.replace(name, "");
    let name = NUMERIC_SUFFIX.replace(&name, "");
    name.trim().to_string()
}

fn canonical_title(title: &str) -> &'static str {
    match title.to_lowercase().as_str() {
        "dra" | "doutora" => "Dra.",
        _ => "Dr.",
    }
}
