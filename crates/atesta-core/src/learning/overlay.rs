//! Replay of learned corrections over a draft extraction.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::certificate::{is_not_found, CorrectionRecord, ExtractionResult, FieldKey};
use crate::models::config::EngineConfig;

use super::similarity::find_similar_correction;

/// Resolve a draft result against the correction history.
///
/// A whole-record match (a near-duplicate document) replaces the draft
/// outright, fresh extraction included: the historical correction is
/// assumed to apply across every field. Note this can regress a field the
/// extractor resolved but the matched record did not. Otherwise, each field
/// still unresolved in the draft takes the corrected value of the first
/// record sharing enough source tokens with the current text; fields the
/// extractor resolved are never touched in that stage.
pub fn resolve_with_history(
    draft: ExtractionResult,
    text: &str,
    log: &[CorrectionRecord],
    config: &EngineConfig,
) -> ExtractionResult {
    if let Some(corrected) = find_similar_correction(text, log, config.similarity_threshold) {
        info!("whole-record replay from correction history");
        return corrected.clone();
    }

    apply_learned_fields(draft, text, log, config.min_shared_tokens)
}

/// Per-field replay: fill unresolved fields from records whose source text
/// overlaps the current text by at least `min_shared_tokens` tokens.
fn apply_learned_fields(
    mut result: ExtractionResult,
    text: &str,
    log: &[CorrectionRecord],
    min_shared_tokens: usize,
) -> ExtractionResult {
    if log.is_empty() {
        return result;
    }

    let current_words = lowercase_tokens(text);

    for key in FieldKey::ALL {
        if !result.is_unresolved(key) {
            continue;
        }
        for record in log {
            let corrected_value = record.corrected.get(key);
            if corrected_value.is_empty() || is_not_found(corrected_value) {
                continue;
            }
            let history_words = lowercase_tokens(&record.source_text);
            let shared = history_words.intersection(&current_words).count();
            if shared >= min_shared_tokens {
                debug!(field = %key, shared, "per-field replay from correction history");
                result.set(key, corrected_value.to_string());
                break;
            }
        }
    }

    result
}

fn lowercase_tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resolved_result() -> ExtractionResult {
        ExtractionResult {
            cid: "J06".to_string(),
            doctor: "Dra. Ana Lima".to_string(),
            issue_date: "10/02/2025".to_string(),
            rest_days: "3 dias de repouso".to_string(),
        }
    }

    fn record(source_text: &str) -> CorrectionRecord {
        CorrectionRecord {
            original: ExtractionResult::unresolved(),
            corrected: resolved_result(),
            source_text: source_text.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_whole_record_replay_overrides_everything() {
        let text = "paciente avaliado em consulta apresentando quadro gripal agudo";
        let mut draft = ExtractionResult::unresolved();
        draft.cid = "Z00".to_string();

        let log = vec![record(text)];
        let result = resolve_with_history(draft, text, &log, &EngineConfig::default());

        assert_eq!(result, resolved_result());
    }

    #[test]
    fn test_per_field_replay_fills_unresolved_only() {
        let log = vec![record(
            "paciente avaliado em consulta apresentando dores intensas e febre",
        )];
        // Shares six tokens with the stored text; similarity stays below the
        // whole-record threshold.
        let text = "paciente avaliado em consulta apresentando febre com quadro distinto e sintomas novos registrados hoje";

        let mut draft = ExtractionResult::unresolved();
        draft.doctor = "Dr. Carlos Souza".to_string();

        let result = resolve_with_history(draft, text, &log, &EngineConfig::default());

        assert_eq!(result.cid, "J06");
        assert_eq!(result.issue_date, "10/02/2025");
        assert_eq!(result.doctor, "Dr. Carlos Souza");
    }

    #[test]
    fn test_per_field_replay_needs_enough_shared_tokens() {
        let log = vec![record("texto curto sem nada em comum")];
        let text = "atestado novo de outro paciente completamente diferente";

        let draft = ExtractionResult::unresolved();
        let result = resolve_with_history(draft, text, &log, &EngineConfig::default());

        assert!(result.is_unresolved(FieldKey::Cid));
    }

    #[test]
    fn test_per_field_replay_skips_unresolved_history_values() {
        let mut rec = record("paciente avaliado em consulta apresentando dores intensas e febre");
        rec.corrected.cid = FieldKey::Cid.not_found_message().to_string();
        let log = vec![rec];

        let text = "paciente avaliado em consulta apresentando febre com quadro distinto e sintomas novos registrados hoje";
        let result = resolve_with_history(ExtractionResult::unresolved(), text, &log, &EngineConfig::default());

        // The unresolved history value must not be replayed.
        assert!(result.is_unresolved(FieldKey::Cid));
        // Resolved history values still are.
        assert_eq!(result.doctor, "Dra. Ana Lima");
    }

    #[test]
    fn test_empty_log_returns_draft() {
        let draft = resolved_result();
        let result = resolve_with_history(draft.clone(), "qualquer texto", &[], &EngineConfig::default());
        assert_eq!(result, draft);
    }
}
