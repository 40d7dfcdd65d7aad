//! Hybrid certificate engine combining rule cascades, an optional entity
//! source and the learned-correction overlay.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::learning::{resolve_with_history, CorrectionStore};
use crate::models::certificate::{CorrectionRecord, ExtractionResult, FieldKey};
use crate::models::config::EngineConfig;
use crate::ner::EntitySource;
use crate::normalize::normalize_text;

use super::rules::{
    cid::CidExtractor,
    dates::{format_issue_date, DateExtractor},
    days::{format_rest_days, DaysExtractor},
    doctor::{looks_like_name, DoctorExtractor},
    FieldExtractor,
};
use super::CertificateExtractor;

/// Certificate extraction engine.
///
/// Owns the correction store: extraction reads it, correction submission
/// appends to it. Everything else is stateless configuration, so a shared
/// engine behind a read-write lock supports concurrent extraction with
/// serialized appends.
pub struct CertificateEngine {
    config: EngineConfig,
    store: CorrectionStore,
    entity_source: Option<Box<dyn EntitySource>>,
}

impl CertificateEngine {
    /// Engine with an in-memory correction store and default settings.
    pub fn new() -> Self {
        Self::with_store(CorrectionStore::in_memory())
    }

    /// Engine over a previously loaded correction store.
    pub fn with_store(store: CorrectionStore) -> Self {
        Self {
            config: EngineConfig::default(),
            store,
            entity_source: None,
        }
    }

    /// Replace the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach an external entity tagger, consulted for fields the rule
    /// cascades leave unresolved.
    pub fn with_entity_source(mut self, source: Box<dyn EntitySource>) -> Self {
        self.entity_source = Some(source);
        self
    }

    /// The correction log, oldest first.
    pub fn corrections(&self) -> &[CorrectionRecord] {
        self.store.records()
    }

    /// Extract the four certificate fields from OCR text.
    ///
    /// Runs normalization, the per-field rule cascades and the
    /// learned-correction overlay. Total: every field key is present in
    /// the result, unresolved ones carrying their canonical message.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let normalized = normalize_text(text);
        info!(chars = normalized.len(), "extracting certificate fields");

        let draft = self.extract_fields(&normalized);
        resolve_with_history(draft, &normalized, self.store.records(), &self.config)
    }

    /// Record a human correction and persist it for future replay.
    ///
    /// `corrected` is the name→value mapping as submitted (e.g. from a
    /// review form) and must cover every field key; partial submissions
    /// are rejected before anything reaches the log.
    pub fn submit_correction(
        &mut self,
        original: ExtractionResult,
        corrected: &HashMap<String, String>,
        source_text: &str,
    ) -> Result<()> {
        let corrected = ExtractionResult::from_map(corrected)?;
        let normalized = normalize_text(source_text);

        self.store.append(original, corrected, normalized)?;
        info!(total = self.store.len(), "correction recorded");
        Ok(())
    }

    fn extract_fields(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::unresolved();

        if let Some(cid) = CidExtractor::new().extract(text) {
            result.set(FieldKey::Cid, cid);
        }

        let doctor = DoctorExtractor::new()
            .extract(text)
            .or_else(|| self.doctor_from_entities(text));
        if let Some(doctor) = doctor {
            result.set(FieldKey::Doctor, doctor);
        }

        let date_extractor = DateExtractor::new().with_min_year(self.config.min_year);
        if let Some(date) = date_extractor.extract(text) {
            result.set(FieldKey::IssueDate, format_issue_date(date));
        }

        if let Some(days) = DaysExtractor::new().extract(text) {
            result.set(FieldKey::RestDays, format_rest_days(days));
        }

        debug!(
            resolved = FieldKey::ALL
                .iter()
                .filter(|&&key| !result.is_unresolved(key))
                .count(),
            "draft extraction complete"
        );
        result
    }

    /// First person entity from the external tagger that passes name
    /// validation, if a tagger is attached.
    fn doctor_from_entities(&self, text: &str) -> Option<String> {
        let source = self.entity_source.as_deref()?;
        source
            .identify(text)
            .into_iter()
            .filter(|entity| entity.is_person())
            .map(|entity| entity.text.trim().to_string())
            .find(|name| looks_like_name(name))
    }
}

impl Default for CertificateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateExtractor for CertificateEngine {
    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.extract(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::NamedEntity;
    use pretty_assertions::assert_eq;

    fn result_map(result: &ExtractionResult) -> HashMap<String, String> {
        result
            .fields()
            .map(|(key, value)| (key.as_str().to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_end_to_end_extraction() {
        let engine = CertificateEngine::new();
        let text = "CID: J00\nDr. João Silva\nEmitido em 15/01/2025\n5 dias de repouso";

        let result = engine.extract(text);

        assert_eq!(result.cid, "J00");
        assert_eq!(result.doctor, "Dr. João Silva");
        assert_eq!(result.issue_date, "15/01/2025");
        assert_eq!(result.rest_days, "5 dias de repouso");
    }

    #[test]
    fn test_unrecognizable_text_is_total() {
        let engine = CertificateEngine::new();

        for text in ["lorem ipsum", ""] {
            let result = engine.extract(text);
            for key in FieldKey::ALL {
                assert!(result.is_unresolved(key), "field {key} in input {text:?}");
                assert_eq!(result.get(key), key.not_found_message());
            }
        }
    }

    #[test]
    fn test_singular_rest_day() {
        let engine = CertificateEngine::new();
        let result = engine.extract("Atestado: 1 dia de repouso a partir de hoje");
        assert_eq!(result.rest_days, "1 dia de repouso");
    }

    #[test]
    fn test_date_formats_normalize() {
        let engine = CertificateEngine::new();
        for text in [
            "Emitido em 2025-01-15",
            "Emitido em 15/01/2025",
            "Emitido em 15 de janeiro de 2025",
        ] {
            assert_eq!(engine.extract(text).issue_date, "15/01/2025", "input: {text}");
        }
    }

    #[test]
    fn test_learning_whole_record_replay() {
        let mut engine = CertificateEngine::new();

        // OCR garbled the code token; the reviewer fixed it.
        let text = "Atestado médico declaro que o paciente necessita de afastamento \
                    das atividades laborais por motivo de doença CID M54.5 conforme avaliação";
        let original = engine.extract(text);

        let mut corrected = result_map(&original);
        corrected.insert("CID".to_string(), "M54.5".to_string());
        engine.submit_correction(original, &corrected, text).unwrap();

        // Same document, code token garbled differently this time.
        let garbled = text.replace("M54.5", "MS4.S");
        let replayed = engine.extract(&garbled);

        assert_eq!(replayed.cid, "M54.5");
    }

    #[test]
    fn test_per_field_replay_preserves_resolved_fields() {
        let mut engine = CertificateEngine::new();

        let old_text = "paciente necessita afastamento das atividades laborais conforme avaliação clínica";
        let mut corrected = result_map(&ExtractionResult::unresolved());
        corrected.insert("CID".to_string(), "M54.5".to_string());
        corrected.insert("Médico".to_string(), "Dra. Ana Lima".to_string());
        engine
            .submit_correction(ExtractionResult::unresolved(), &corrected, old_text)
            .unwrap();

        // Overlaps the stored text on more than five tokens but is a
        // different document with its own resolved physician.
        let text = "Dr. Carlos Souza atesta que o paciente necessita afastamento das atividades \
                    laborais conforme quadro apresentado em consulta realizada nesta unidade de saúde hoje";
        let result = engine.extract(text);

        assert_eq!(result.cid, "M54.5");
        assert_eq!(result.doctor, "Dr. Carlos Souza");
    }

    #[test]
    fn test_submit_correction_rejects_partial_mapping() {
        let mut engine = CertificateEngine::new();

        let mut partial = HashMap::new();
        partial.insert("CID".to_string(), "J00".to_string());

        let err = engine
            .submit_correction(ExtractionResult::unresolved(), &partial, "texto")
            .unwrap_err();

        assert!(err.to_string().contains("missing required field"));
        assert!(engine.corrections().is_empty());
    }

    struct FixedTagger;

    impl EntitySource for FixedTagger {
        fn identify(&self, _text: &str) -> Vec<NamedEntity> {
            vec![
                NamedEntity::new("São Paulo", "LOC", 0, 9),
                NamedEntity::new("Maria Oliveira Santos", "PER", 20, 41),
            ]
        }
    }

    #[test]
    fn test_entity_source_fills_unresolved_doctor() {
        let engine = CertificateEngine::new().with_entity_source(Box::new(FixedTagger));

        // No title marker, so the cascade finds nothing on its own.
        let result = engine.extract("Atestado assinado em São Paulo para Maria Oliveira Santos");
        assert_eq!(result.doctor, "Maria Oliveira Santos");
    }

    #[test]
    fn test_entity_source_never_overrides_cascade() {
        let engine = CertificateEngine::new().with_entity_source(Box::new(FixedTagger));

        let result = engine.extract("Dr. João Silva atesta repouso ao paciente");
        assert_eq!(result.doctor, "Dr. João Silva");
    }

    #[test]
    fn test_without_entity_source_cascade_only() {
        let engine = CertificateEngine::new();
        let result = engine.extract("Atestado para Maria Oliveira Santos");
        assert!(result.is_unresolved(FieldKey::Doctor));
    }
}
