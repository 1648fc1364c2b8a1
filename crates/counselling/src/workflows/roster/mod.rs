//! Roster ingestion: turns a spreadsheet CSV export into validated applicants.

mod normalizer;
mod parser;

use crate::workflows::counselling::Applicant;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read applicant roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid applicant roster CSV: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Why a roster row never reached allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "value")]
pub enum SkipReason {
    MissingName,
    MissingContact,
    MissingScore,
    InvalidScore(String),
    MissingCategory,
}

impl SkipReason {
    pub fn summary(&self) -> String {
        match self {
            SkipReason::MissingName => "missing applicant name".to_string(),
            SkipReason::MissingContact => "missing phone and email".to_string(),
            SkipReason::MissingScore => "missing merit score".to_string(),
            SkipReason::InvalidScore(raw) => {
                format!("merit score '{raw}' is not a non-negative number")
            }
            SkipReason::MissingCategory => "missing category".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: SkipReason,
}

/// Data-quality findings on rows that were still imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RosterWarning {
    UnknownCategory { line: u64, category: String },
}

impl RosterWarning {
    pub fn summary(&self) -> String {
        match self {
            RosterWarning::UnknownCategory { line, category } => format!(
                "line {line}: category '{category}' is not one of UR, OBC, SC, ST, PWD"
            ),
        }
    }
}

/// Applicants accepted from a roster, plus everything that was set aside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterImport {
    pub applicants: Vec<Applicant>,
    pub skipped: Vec<SkippedRow>,
    pub warnings: Vec<RosterWarning>,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterImport, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterImport, RosterImportError> {
        let parsed = parser::parse_roster(reader)?;

        for skipped in &parsed.skipped {
            warn!(line = skipped.line, reason = %skipped.reason.summary(), "skipping roster row");
        }
        for warning in &parsed.warnings {
            warn!("{}", warning.summary());
        }
        info!(
            accepted = parsed.applicants.len(),
            skipped = parsed.skipped.len(),
            "roster imported"
        );

        Ok(RosterImport {
            applicants: parsed.applicants,
            skipped: parsed.skipped,
            warnings: parsed.warnings,
        })
    }
}
