//! Token-set similarity between OCR texts.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::certificate::{CorrectionRecord, ExtractionResult};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

// Comparing a short snippet against a much longer document is unreliable:
// below this length ratio the score is damped by the penalty factor.
const SIZE_RATIO_CUTOFF: f32 = 0.5;
const SIZE_RATIO_PENALTY: f32 = 0.7;

/// Canonical form used for similarity comparison: lowercase, single
/// spaces, word characters only.
pub fn normalize_for_comparison(text: &str) -> String {
    let text = text.to_lowercase();
    let text = WHITESPACE.replace_all(text.trim(), " ");
    NON_WORD.replace_all(&text, "").to_string()
}

/// Jaccard similarity of whitespace token sets, with a size-ratio penalty.
///
/// Returns a value in [0.0, 1.0]; symmetric in its arguments. When the
/// shorter text is less than half the length of the longer, the score is
/// multiplied by 0.7.
pub fn similarity(text1: &str, text2: &str) -> f32 {
    if text1.is_empty() || text2.is_empty() {
        return 0.0;
    }

    let words1: HashSet<&str> = text1.split_whitespace().collect();
    let words2: HashSet<&str> = text2.split_whitespace().collect();
    if words1.is_empty() || words2.is_empty() {
        return 0.0;
    }

    let intersection = words1.intersection(&words2).count();
    let union = words1.union(&words2).count();
    if union == 0 {
        return 0.0;
    }

    let mut jaccard = intersection as f32 / union as f32;

    let min_len = text1.len().min(text2.len()) as f32;
    let max_len = text1.len().max(text2.len()) as f32;
    if min_len / max_len < SIZE_RATIO_CUTOFF {
        jaccard *= SIZE_RATIO_PENALTY;
    }

    jaccard
}

/// Find the stored correction whose source text best matches `text`.
///
/// Scans the log oldest-first and returns the corrected result of the
/// highest-scoring record at or above `threshold`; ties keep the earliest
/// record. Linear in log size, no allocation beyond the comparison forms.
pub fn find_similar_correction<'a>(
    text: &str,
    log: &'a [CorrectionRecord],
    threshold: f32,
) -> Option<&'a ExtractionResult> {
    if log.is_empty() {
        return None;
    }

    let current = normalize_for_comparison(text);

    let mut best: Option<&CorrectionRecord> = None;
    let mut best_score = 0.0f32;

    for record in log {
        let stored = normalize_for_comparison(&record.source_text);
        let score = similarity(&current, &stored);
        if score > best_score && score >= threshold {
            best_score = score;
            best = Some(record);
        }
    }

    if best.is_some() {
        debug!(similarity = best_score, "found matching correction in history");
    }
    best.map(|record| &record.corrected)
}
