//! CID-10 diagnostic code extraction and validation.

use super::patterns::{CID_CODE, CID_DIAGNOSIS_LABEL, CID_LABELED, CID_MARKER, CID_SHAPE, CID_SPACED};
use super::FieldExtractor;

/// CID-10 chapter groups keyed by the code's leading letter.
const CID_CATEGORIES: [(char, &str); 26] = [
    ('A', "Doenças infecciosas e parasitárias"),
    ('B', "Doenças infecciosas e parasitárias"),
    ('C', "Neoplasias (tumores)"),
    ('D', "Doenças do sangue"),
    ('E', "Doenças endócrinas"),
    ('F', "Transtornos mentais"),
    ('G', "Doenças do sistema nervoso"),
    ('H', "Doenças dos olhos e ouvidos"),
    ('I', "Doenças do aparelho circulatório"),
    ('J', "Doenças do aparelho respiratório"),
    ('K', "Doenças do aparelho digestivo"),
    ('L', "Doenças da pele"),
    ('M', "Doenças do sistema osteomuscular"),
    ('N', "Doenças do aparelho geniturinário"),
    ('O', "Gravidez, parto e puerpério"),
    ('P', "Algumas afecções originadas no período perinatal"),
    ('Q', "Malformações congênitas"),
    ('R', "Sintomas e sinais anormais"),
    ('S', "Lesões por causas externas"),
    ('T', "Lesões por causas externas"),
    ('U', "Códigos para situações especiais"),
    ('V', "Causas externas de morbidade"),
    ('W', "Causas externas de morbidade"),
    ('X', "Causas externas de morbidade"),
    ('Y', "Causas externas de morbidade"),
    ('Z', "Fatores que influenciam o estado de saúde"),
];

/// Keywords that license a bare code match anywhere in the text.
const MEDICAL_KEYWORDS: [&str; 5] = ["cid", "diagnóstico", "doença", "código", "classificação"];

/// Chapter description for a CID-10 leading letter, if the letter is valid.
pub fn category_for(letter: char) -> Option<&'static str> {
    let letter = letter.to_ascii_uppercase();
    CID_CATEGORIES
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, description)| *description)
}

/// Validate a CID-10 code: letter + 2-3 digits with an optional subcategory
/// suffix, leading letter present in the category table.
pub fn validate_cid(cid: &str) -> bool {
    if cid.len() < 3 {
        return false;
    }
    let Some(first) = cid.chars().next() else {
        return false;
    };
    if category_for(first).is_none() {
        return false;
    }
    CID_SHAPE.is_match(cid)
}

/// CID-10 field extractor.
pub struct CidExtractor;

impl CidExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CidExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CidExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        // Rule 1: a context marker directly before the code token.
        for pattern in [&*CID_LABELED, &*CID_SPACED, &*CID_DIAGNOSIS_LABEL] {
            for caps in pattern.captures_iter(text) {
                let cid = caps[1].to_uppercase();
                if validate_cid(&cid) {
                    return Some(cid);
                }
            }
        }

        // Rule 2: a code token on a line adjacent to a CID marker line.
        let lines: Vec<&str> = text.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            let window = &lines[i.saturating_sub(1)..(i + 2).min(lines.len())];
            if !window.iter().any(|l| CID_MARKER.is_match(l)) {
                continue;
            }
            for caps in CID_CODE.captures_iter(line) {
                let cid = caps[1].to_uppercase();
                if validate_cid(&cid) {
                    return Some(cid);
                }
            }
        }

        // Rule 3: a bare code token anywhere, if the text mentions any
        // medical context keyword.
        let lower = text.to_lowercase();
        if MEDICAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            for caps in CID_CODE.captures_iter(text) {
                let cid = caps[1].to_uppercase();
                if validate_cid(&cid) {
                    return Some(cid);
                }
            }
        }

        None
    }
}

/// Extract a validated CID-10 code from text.
pub fn extract_cid(text: &str) -> Option<String> {
    CidExtractor::new().extract(text)
}
