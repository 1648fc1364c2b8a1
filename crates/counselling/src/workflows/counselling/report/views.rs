use super::super::domain::{AdmissionStatus, Category, Placement};
use super::super::result::CategoryAllocation;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRowView {
    pub serial_no: usize,
    pub status: AdmissionStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_rank: Option<usize>,
    pub application_id: String,
    pub display_label: String,
    pub name: String,
    pub contact: String,
    pub merit_score: u32,
    pub applicant_category: Category,
    pub address: String,
}

impl PlacementRowView {
    pub(crate) fn from_placement(serial_no: usize, placement: &Placement) -> Self {
        let applicant = &placement.applicant;
        Self {
            serial_no,
            status: placement.status,
            status_label: placement.status.label(),
            waiting_rank: placement.status.waiting_rank(),
            application_id: applicant.application_id.0.clone(),
            display_label: placement.display_label(),
            name: applicant.display_name.clone(),
            contact: applicant.contact.clone(),
            merit_score: applicant.merit_score,
            applicant_category: applicant.category.clone(),
            address: applicant.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySectionView {
    pub category: Category,
    pub category_label: String,
    pub seats: usize,
    pub admitted: usize,
    pub waitlisted: usize,
    pub vacant_seats: usize,
    pub rows: Vec<PlacementRowView>,
}

impl CategorySectionView {
    pub(crate) fn from_allocation(allocation: &CategoryAllocation) -> Self {
        let rows = allocation
            .placements
            .iter()
            .enumerate()
            .map(|(index, placement)| PlacementRowView::from_placement(index + 1, placement))
            .collect();

        Self {
            category: allocation.category.clone(),
            category_label: allocation.category.label().to_string(),
            seats: allocation.seats,
            admitted: allocation.admitted_count(),
            waitlisted: allocation.waitlisted_count(),
            vacant_seats: allocation.vacant_seats(),
            rows,
        }
    }
}
