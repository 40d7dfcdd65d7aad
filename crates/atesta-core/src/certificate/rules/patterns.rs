//! Common regex patterns for certificate field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CID-10 code patterns. The code token is letter + 2-3 digits with an
    // optional subcategory suffix; OCR output is matched case-insensitively
    // and uppercased before validation.
    pub static ref CID_LABELED: Regex = Regex::new(
        r"(?i)CID[:\s\-]*(?:10[:\s\-]*)?\(?\s*([A-Z]\d{2,3}(?:\.\d{1,2})?)"
    ).unwrap();

    pub static ref CID_SPACED: Regex = Regex::new(
        r"(?i)C\.?\s*I\.?\s*D\.?\s*(?:10[:\s\-]*)?[:\s\-]*\(?\s*([A-Z]\d{2,3}(?:\.\d{1,2})?)"
    ).unwrap();

    pub static ref CID_DIAGNOSIS_LABEL: Regex = Regex::new(
        r"(?i)(?:diagn[oó]stico|c[oó]digo)[:\s]*\(?\s*([A-Z]\d{2,3}(?:\.\d{1,2})?)"
    ).unwrap();

    pub static ref CID_CODE: Regex = Regex::new(
        r"(?i)\b([A-Z]\d{2,3}(?:\.\d{1,2})?)\b"
    ).unwrap();

    pub static ref CID_MARKER: Regex = Regex::new(
        r"(?i)\bC\.?\s*I\.?\s*D\.?"
    ).unwrap();

    pub static ref CID_SHAPE: Regex = Regex::new(
        r"^[A-Z]\d{2,3}(?:\.\d{1,2})?$"
    ).unwrap();

    // Physician name patterns. The title marker is case-insensitive; the
    // captured name is not, so capitalization survives to validation. Name
    // words never cross a line break.
    pub static ref DOCTOR_TITLE: Regex = Regex::new(
        r"\b((?i:doutora|doutor|dra|dr))\.?[ \t]+([A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+(?:[ \t]+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+){1,4})"
    ).unwrap();

    pub static ref DOCTOR_SIGNED_BY: Regex = Regex::new(
        r"(?i:assinado[ \t]+por)[:\s]+([A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+(?:[ \t]+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+){1,4})"
    ).unwrap();

    pub static ref DOCTOR_LABEL: Regex = Regex::new(
        r"\b(?i:m[eé]dic[oa])[:\s]+([A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+(?:[ \t]+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-Za-zÀ-ÿ]+){1,4})"
    ).unwrap();

    // Trailing registration numbers trimmed from captured names.
    pub static ref CRM_SUFFIX: Regex = Regex::new(r"(?i)\s*CRM.*$").unwrap();
    pub static ref NUMERIC_SUFFIX: Regex = Regex::new(r"\s*\d+.*$").unwrap();

    // Issue date patterns. Tier 1 anchors on emission context (or a comma
    // directly before the date); tier 2 matches the bare shapes.
    pub static ref EMISSION_DATE_NUMERIC: Regex = Regex::new(
        r"(?i)(?:data\s+de\s+emiss[aã]o|emitid[oa]\s+em|emiss[aã]o)[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{4}-\d{1,2}-\d{1,2})"
    ).unwrap();

    pub static ref EMISSION_DATE_LONG: Regex = Regex::new(
        r"(?i)(?:data\s+de\s+emiss[aã]o|emitid[oa]\s+em|emiss[aã]o)[:\s]*(\d{1,2})\s+de\s+(\w+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref COMMA_DATE_NUMERIC: Regex = Regex::new(
        r",\s*(\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{4}-\d{1,2}-\d{1,2})"
    ).unwrap();

    pub static ref COMMA_DATE_LONG: Regex = Regex::new(
        r"(?i),\s*(\d{1,2})\s+de\s+(\w+)\s+de\s+(\d{4})"
    ).unwrap();

    pub static ref BARE_DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{4}-\d{1,2}-\d{1,2})\b"
    ).unwrap();

    pub static ref BARE_DATE_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+de\s+(\w+)\s+de\s+(\d{4})\b"
    ).unwrap();

    // Rest day patterns. The number may carry a parenthetical spelled-out
    // form ("5 (cinco) dias") between it and the day unit.
    pub static ref REST_DAYS_CONTEXT: Regex = Regex::new(
        r"(?i)(\d{1,2})\s*(?:\([^)]+\)\s*)?dias?\s*(?:de\s+)?(?:repouso|afastamento|afastad[oa])"
    ).unwrap();

    pub static ref REST_DAYS_LABELED: Regex = Regex::new(
        r"(?i)(?:repouso|afastamento)[:\s]*(\d{1,2})\s*dias?"
    ).unwrap();

    pub static ref REST_DAYS_BARE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*(?:\([^)]+\)\s*)?dias?\b"
    ).unwrap();
}
