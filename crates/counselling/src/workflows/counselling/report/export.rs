use super::super::domain::{Applicant, ApplicationId, Category, Placement};
use super::super::result::{AllocationResult, AllocationSummary, CategoryAllocation};
use super::ReportError;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const STATUS_ADMITTED: &str = "admitted";
const STATUS_WAITLISTED: &str = "waitlisted";
/// Marker row written for a category that placed nobody, so the category survives a re-read.
const STATUS_EMPTY: &str = "empty";

#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Seats")]
    seats: usize,
    #[serde(rename = "S.No.")]
    serial_no: Option<usize>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Waiting Rank")]
    waiting_rank: Option<usize>,
    #[serde(rename = "Application No")]
    application_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Contact")]
    contact: String,
    #[serde(rename = "Score")]
    score: Option<u32>,
    #[serde(rename = "Applicant Category")]
    applicant_category: String,
    #[serde(rename = "Address")]
    address: String,
}

impl ExportRow {
    fn empty(allocation: &CategoryAllocation) -> Self {
        Self {
            category: allocation.category.code().to_string(),
            seats: allocation.seats,
            serial_no: None,
            status: STATUS_EMPTY.to_string(),
            waiting_rank: None,
            application_id: String::new(),
            name: String::new(),
            contact: String::new(),
            score: None,
            applicant_category: String::new(),
            address: String::new(),
        }
    }

    fn placement(allocation: &CategoryAllocation, serial_no: usize, placement: &Placement) -> Self {
        let applicant = &placement.applicant;
        Self {
            category: allocation.category.code().to_string(),
            seats: allocation.seats,
            serial_no: Some(serial_no),
            status: placement.status.label().to_string(),
            waiting_rank: placement.status.waiting_rank(),
            application_id: applicant.application_id.0.clone(),
            name: applicant.display_name.clone(),
            contact: applicant.contact.clone(),
            score: Some(applicant.merit_score),
            applicant_category: applicant.category.code().to_string(),
            address: applicant.address.clone(),
        }
    }
}

/// Write every placement as one CSV row, categories in display order.
pub fn write_csv<W: Write>(result: &AllocationResult, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for allocation in result.iter() {
        if allocation.placements.is_empty() {
            csv_writer.serialize(ExportRow::empty(allocation))?;
            continue;
        }
        for (index, placement) in allocation.placements.iter().enumerate() {
            csv_writer.serialize(ExportRow::placement(allocation, index + 1, placement))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Rebuild an allocation from a [`write_csv`] export.
///
/// Only the admitted, waitlisted and seat counts of the summary can be recovered; pool
/// statistics are not part of the export.
pub fn read_allocation_csv<R: Read>(reader: R) -> Result<AllocationResult, ReportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut categories: Vec<CategoryAllocation> = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: ExportRow = record.deserialize(Some(&headers))?;

        let category = Category::parse(&row.category);
        let starts_section = categories
            .last()
            .map(|current| current.category != category)
            .unwrap_or(true);
        if starts_section {
            if categories.iter().any(|existing| existing.category == category) {
                return Err(malformed(line, format!("category {category} is split")));
            }
            categories.push(CategoryAllocation::new(category, row.seats));
        }
        let Some(allocation) = categories.last_mut() else {
            return Err(malformed(line, "missing category section".to_string()));
        };

        let placement = match row.status.as_str() {
            STATUS_EMPTY => continue,
            STATUS_ADMITTED => Placement::admitted(row_applicant(&row, line)?),
            STATUS_WAITLISTED => {
                let rank = row
                    .waiting_rank
                    .ok_or_else(|| malformed(line, "waitlisted row lacks a rank".to_string()))?;
                Placement::waitlisted(row_applicant(&row, line)?, rank)
            }
            other => return Err(malformed(line, format!("unknown status '{other}'"))),
        };
        allocation.placements.push(placement);
    }

    let summary = AllocationSummary {
        resolved_seats: categories
            .iter()
            .map(|allocation| allocation.seats)
            .fold(0, usize::saturating_add),
        admitted: categories
            .iter()
            .map(CategoryAllocation::admitted_count)
            .sum(),
        waitlisted: categories
            .iter()
            .map(CategoryAllocation::waitlisted_count)
            .sum(),
        ..AllocationSummary::default()
    };

    Ok(AllocationResult {
        categories,
        summary,
    })
}

fn row_applicant(row: &ExportRow, line: u64) -> Result<Applicant, ReportError> {
    let merit_score = row
        .score
        .ok_or_else(|| malformed(line, "placement row lacks a score".to_string()))?;

    Ok(Applicant {
        application_id: ApplicationId(row.application_id.clone()),
        display_name: row.name.clone(),
        contact: row.contact.clone(),
        merit_score,
        category: Category::parse(&row.applicant_category),
        address: row.address.clone(),
    })
}

fn malformed(line: u64, reason: String) -> ReportError {
    ReportError::Malformed { line, reason }
}
