//! Issue date extraction for medical certificates.

use chrono::{Datelike, Local, NaiveDate};

use super::patterns::{
    BARE_DATE_LONG, BARE_DATE_NUMERIC, COMMA_DATE_LONG, COMMA_DATE_NUMERIC, EMISSION_DATE_LONG,
    EMISSION_DATE_NUMERIC,
};
use super::FieldExtractor;

/// Issue date extractor.
///
/// Tier 1 accepts only dates anchored to an emission context; tier 2 falls
/// back to bare date shapes when no anchored date validates.
pub struct DateExtractor {
    min_year: i32,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self { min_year: 2000 }
    }

    /// Set the oldest year accepted by validation.
    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    fn parse_numeric(&self, raw: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = raw.split(['/', '-']).collect();
        if parts.len() != 3 {
            return None;
        }
        // Four leading digits mean YYYY-MM-DD, otherwise DD/MM/YYYY.
        let (year, month, day) = if parts[0].len() == 4 {
            (parts[0], parts[1], parts[2])
        } else {
            (parts[2], parts[1], parts[0])
        };
        let date = NaiveDate::from_ymd_opt(
            year.parse().ok()?,
            month.parse().ok()?,
            day.parse().ok()?,
        )?;
        self.validate(date)
    }

    fn parse_long(&self, day: &str, month_name: &str, year: &str) -> Option<NaiveDate> {
        let month = portuguese_month_to_number(month_name);
        if month == 0 {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)?;
        self.validate(date)
    }

    fn validate(&self, date: NaiveDate) -> Option<NaiveDate> {
        let current_year = Local::now().year();
        (self.min_year..=current_year + 1)
            .contains(&date.year())
            .then_some(date)
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<NaiveDate> {
        // Tier 1: emission-anchored dates.
        for pattern in [&*EMISSION_DATE_NUMERIC, &*COMMA_DATE_NUMERIC] {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = self.parse_numeric(&caps[1]) {
                    return Some(date);
                }
            }
        }
        for pattern in [&*EMISSION_DATE_LONG, &*COMMA_DATE_LONG] {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = self.parse_long(&caps[1], &caps[2], &caps[3]) {
                    return Some(date);
                }
            }
        }

        // Tier 2: bare date shapes.
        for caps in BARE_DATE_NUMERIC.captures_iter(text) {
            if let Some(date) = self.parse_numeric(&caps[1]) {
                return Some(date);
            }
        }
        for caps in BARE_DATE_LONG.captures_iter(text) {
            if let Some(date) = self.parse_long(&caps[1], &caps[2], &caps[3]) {
                return Some(date);
            }
        }

        None
    }
}

/// Extract a validated issue date from text.
pub fn extract_issue_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text)
}

/// Render an issue date in the canonical DD/MM/YYYY form.
pub fn format_issue_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn portuguese_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => 0,
    }
}
