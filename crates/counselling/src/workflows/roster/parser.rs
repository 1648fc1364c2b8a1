use super::normalizer::{non_blank, normalize_header};
use super::{RosterWarning, SkipReason, SkippedRow};
use crate::workflows::counselling::{Applicant, ApplicationId, Category};
use serde::Deserialize;
use std::io::Read;

pub(crate) struct ParsedRoster {
    pub(crate) applicants: Vec<Applicant>,
    pub(crate) skipped: Vec<SkippedRow>,
    pub(crate) warnings: Vec<RosterWarning>,
}

pub(crate) fn parse_roster<R: Read>(reader: R) -> Result<ParsedRoster, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    csv_reader.set_headers(headers.clone());

    let mut parsed = ParsedRoster {
        applicants: Vec::new(),
        skipped: Vec::new(),
        warnings: Vec::new(),
    };

    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: RosterRow = record.deserialize(Some(&headers))?;

        match row.into_applicant() {
            Ok(applicant) => {
                if !applicant.category.is_known() {
                    parsed.warnings.push(RosterWarning::UnknownCategory {
                        line,
                        category: applicant.category.code().to_string(),
                    });
                }
                parsed.applicants.push(applicant);
            }
            Err(reason) => parsed.skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(
        rename = "application no",
        alias = "application id",
        alias = "cuet application",
        alias = "cuet application no",
        default
    )]
    application_id: Option<String>,
    #[serde(rename = "name", default)]
    name: Option<String>,
    #[serde(rename = "phone", alias = "phone no", default)]
    phone: Option<String>,
    #[serde(rename = "email", default)]
    email: Option<String>,
    #[serde(rename = "contact", alias = "phone/email", default)]
    contact: Option<String>,
    #[serde(
        rename = "score",
        alias = "cuet score",
        alias = "merit score",
        default
    )]
    score: Option<String>,
    #[serde(rename = "category", default)]
    category: Option<String>,
    #[serde(rename = "address", default)]
    address: Option<String>,
}

impl RosterRow {
    fn into_applicant(self) -> Result<Applicant, SkipReason> {
        let name = non_blank(self.name.as_deref()).ok_or(SkipReason::MissingName)?;
        let contact = self.contact_details().ok_or(SkipReason::MissingContact)?;
        let raw_score = non_blank(self.score.as_deref()).ok_or(SkipReason::MissingScore)?;
        let merit_score =
            parse_score(&raw_score).ok_or_else(|| SkipReason::InvalidScore(raw_score.clone()))?;
        let category = non_blank(self.category.as_deref())
            .map(|raw| Category::parse(&raw))
            .ok_or(SkipReason::MissingCategory)?;

        Ok(Applicant {
            application_id: ApplicationId(
                non_blank(self.application_id.as_deref()).unwrap_or_default(),
            ),
            display_name: name,
            contact,
            merit_score,
            category,
            address: non_blank(self.address.as_deref()).unwrap_or_default(),
        })
    }

    fn contact_details(&self) -> Option<String> {
        if let Some(contact) = non_blank(self.contact.as_deref()) {
            return Some(contact);
        }

        let parts: Vec<String> = [self.phone.as_deref(), self.email.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Whole numbers, or non-negative decimals truncated the way spreadsheet numeric cells are.
fn parse_score(raw: &str) -> Option<u32> {
    if let Ok(score) = raw.parse::<u32>() {
        return Some(score);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value.trunc() as u32)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn parse_score_for_tests(raw: &str) -> Option<u32> {
    parse_score(raw)
}
