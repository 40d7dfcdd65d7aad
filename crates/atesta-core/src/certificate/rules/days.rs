//! Rest day count extraction for medical certificates.

use super::patterns::{REST_DAYS_BARE, REST_DAYS_CONTEXT, REST_DAYS_LABELED};
use super::FieldExtractor;

/// Valid rest prescriptions run from one day to a full year.
const MIN_DAYS: u32 = 1;
const MAX_DAYS: u32 = 365;

/// Rest day count extractor.
pub struct DaysExtractor;

impl DaysExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DaysExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DaysExtractor {
    type Output = u32;

    fn extract(&self, text: &str) -> Option<u32> {
        for pattern in [&*REST_DAYS_CONTEXT, &*REST_DAYS_LABELED, &*REST_DAYS_BARE] {
            if let Some(caps) = pattern.captures(text) {
                if let Ok(days) = caps[1].parse::<u32>() {
                    if (MIN_DAYS..=MAX_DAYS).contains(&days) {
                        return Some(days);
                    }
                }
            }
        }
        None
    }
}

/// Extract a validated rest day count from text.
pub fn extract_rest_days(text: &str) -> Option<u32> {
    DaysExtractor::new().extract(text)
}

/// Render a day count with singular/plural agreement.
pub fn format_rest_days(days: u32) -> String {
    let unit = if days == 1 { "dia" } else { "dias" };
    format!("{days} {unit} de repouso")
}
