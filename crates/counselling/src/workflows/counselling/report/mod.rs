//! Printable and machine-readable renderings of an allocation.

mod export;
pub mod views;

pub use export::{read_allocation_csv, write_csv};
pub use views::{CategorySectionView, PlacementRowView};

use super::request::CounsellingRound;
use super::result::{AllocationResult, AllocationSummary};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Report handed to export consumers. Sections follow the result's display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<CounsellingRound>,
    pub generated_on: NaiveDate,
    pub sections: Vec<CategorySectionView>,
    pub summary: AllocationSummary,
    pub undistributed_seats: usize,
}

impl AllocationReport {
    pub fn new(result: &AllocationResult, generated_on: NaiveDate) -> Self {
        Self {
            round: None,
            generated_on,
            sections: result
                .iter()
                .map(CategorySectionView::from_allocation)
                .collect(),
            summary: result.summary().clone(),
            undistributed_seats: result.summary().undistributed_seats(),
        }
    }

    pub fn with_round(mut self, round: CounsellingRound) -> Self {
        self.round = Some(round);
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text<W: Write>(&self, out: &mut W) -> Result<(), ReportError> {
        match self.round {
            Some(round) => writeln!(out, "Seat allocation, {round}")?,
            None => writeln!(out, "Seat allocation")?,
        }
        writeln!(out, "Generated {}", self.generated_on)?;

        let summary = &self.summary;
        writeln!(
            out,
            "Pool of {} applicant(s): {} admitted, {} waitlisted, {} unplaced",
            summary.pool_size, summary.admitted, summary.waitlisted, summary.unplaced
        )?;
        if self.undistributed_seats > 0 {
            writeln!(
                out,
                "{} seat(s) left undistributed by quota truncation",
                self.undistributed_seats
            )?;
        }
        if !summary.unquoted_categories.is_empty() {
            let codes: Vec<&str> = summary
                .unquoted_categories
                .iter()
                .map(|category| category.code())
                .collect();
            writeln!(
                out,
                "Excluded categories without a quota: {}",
                codes.join(", ")
            )?;
        }

        for section in &self.sections {
            writeln!(
                out,
                "\n{} - {} ({} of {} seats filled, {} waitlisted)",
                section.category,
                section.category_label,
                section.admitted,
                section.seats,
                section.waitlisted
            )?;

            if section.rows.is_empty() {
                writeln!(out, "  no applicants placed")?;
                continue;
            }

            writeln!(
                out,
                "  {:>4}  {:<14} {:<32} {:>6}  {:<5} {}",
                "S.No", "Application", "Name", "Score", "Cat", "Contact"
            )?;
            for row in &section.rows {
                writeln!(
                    out,
                    "  {:>4}  {:<14} {:<32} {:>6}  {:<5} {}",
                    row.serial_no,
                    row.application_id,
                    row.display_label,
                    row.merit_score,
                    row.applicant_category.code(),
                    row.contact
                )?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid allocation CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed allocation export at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}
