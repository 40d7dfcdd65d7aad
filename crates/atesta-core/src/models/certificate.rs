//! Certificate data models: field keys, the four-field extraction result
//! and the learned-correction record.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// The four extraction targets of a medical leave certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// CID-10 diagnostic code.
    Cid,
    /// Physician name.
    Doctor,
    /// Certificate issue date.
    IssueDate,
    /// Prescribed rest days.
    RestDays,
}

impl FieldKey {
    /// All keys, in the fixed output order expected by record sinks.
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Cid,
        FieldKey::Doctor,
        FieldKey::IssueDate,
        FieldKey::RestDays,
    ];

    /// Column name used by record sinks and the correction log.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Cid => "CID",
            FieldKey::Doctor => "Médico",
            FieldKey::IssueDate => "Data de Emissão",
            FieldKey::RestDays => "Dias de Repouso",
        }
    }

    /// Canonical message rendered when the field could not be resolved.
    pub fn not_found_message(&self) -> &'static str {
        match self {
            FieldKey::Cid => {
                "CID não foi encontrado. Verifique se o texto está legível ou se segue o padrão CID-10 (ex.: J00, M54.5)."
            }
            FieldKey::Doctor => {
                "Nome do médico não foi encontrado. Certifique-se de que o prefixo 'Dr.' ou 'Dra.' esteja presente e legível."
            }
            FieldKey::IssueDate => {
                "Data de emissão não foi encontrada. A imagem pode estar ilegível ou sem a expressão 'emitido em'."
            }
            FieldKey::RestDays => {
                "Dias de repouso não foram encontrados. Verifique se a quantidade está indicada de forma numérica no atestado."
            }
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a field value is one of the canonical "not found" messages.
///
/// Matches the "não foi/foram encontrad" marker stem instead of the exact
/// phrasing, so message wording can evolve (and gender agreement can vary
/// per field) without breaking callers.
pub fn is_not_found(value: &str) -> bool {
    value.contains("não foi encontrad") || value.contains("não foram encontrad")
}

/// A complete four-field extraction result.
///
/// Total by construction: an unresolved field carries its canonical
/// "not found" message instead of being absent. Serializes with the record
/// sink column names as JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// CID-10 diagnostic code, uppercased.
    #[serde(rename = "CID")]
    pub cid: String,

    /// Physician name, with title prefix when one was present.
    #[serde(rename = "Médico")]
    pub doctor: String,

    /// Issue date, rendered DD/MM/YYYY.
    #[serde(rename = "Data de Emissão")]
    pub issue_date: String,

    /// Rest days, rendered "<n> dia(s) de repouso".
    #[serde(rename = "Dias de Repouso")]
    pub rest_days: String,
}

impl ExtractionResult {
    /// Result with every field set to its "not found" message.
    pub fn unresolved() -> Self {
        Self {
            cid: FieldKey::Cid.not_found_message().to_string(),
            doctor: FieldKey::Doctor.not_found_message().to_string(),
            issue_date: FieldKey::IssueDate.not_found_message().to_string(),
            rest_days: FieldKey::RestDays.not_found_message().to_string(),
        }
    }

    /// Value of a single field.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Cid => &self.cid,
            FieldKey::Doctor => &self.doctor,
            FieldKey::IssueDate => &self.issue_date,
            FieldKey::RestDays => &self.rest_days,
        }
    }

    /// Replace the value of a single field.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            FieldKey::Cid => self.cid = value,
            FieldKey::Doctor => self.doctor = value,
            FieldKey::IssueDate => self.issue_date = value,
            FieldKey::RestDays => self.rest_days = value,
        }
    }

    /// True if the field still carries its "not found" message.
    pub fn is_unresolved(&self, key: FieldKey) -> bool {
        is_not_found(self.get(key))
    }

    /// (key, value) pairs in the fixed output order, ready for hand-off to
    /// a record sink.
    pub fn fields(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        FieldKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Build a result from a name→value mapping, e.g. a corrected form
    /// submission. Every field key must be present; the correction log
    /// never contains a partial record.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, ExtractionError> {
        let field = |key: FieldKey| {
            map.get(key.as_str())
                .cloned()
                .ok_or_else(|| ExtractionError::MissingField(key.as_str().to_string()))
        };

        Ok(Self {
            cid: field(FieldKey::Cid)?,
            doctor: field(FieldKey::Doctor)?,
            issue_date: field(FieldKey::IssueDate)?,
            rest_days: field(FieldKey::RestDays)?,
        })
    }
}

/// A single learned correction: the result the engine originally produced,
/// the human-corrected result and the source text both came from.
///
/// Records are immutable once appended; their identity is their position in
/// the append-only log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// Result the engine originally produced.
    pub original: ExtractionResult,

    /// Human-corrected result, covering every field key.
    pub corrected: ExtractionResult,

    /// Normalized OCR text the extraction ran on.
    pub source_text: String,

    /// When the correction was submitted.
    pub timestamp: DateTime<Utc>,
}
