use super::domain::{AdmissionStatus, Applicant, Category, Placement};
use super::quota::QuotaPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Admitted and waiting-list placements for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: Category,
    pub seats: usize,
    pub placements: Vec<Placement>,
}

impl CategoryAllocation {
    pub fn new(category: Category, seats: usize) -> Self {
        Self {
            category,
            seats,
            placements: Vec::new(),
        }
    }

    pub fn admitted(&self) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(|placement| placement.status.is_admitted())
    }

    pub fn waiting_list(&self) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(|placement| matches!(placement.status, AdmissionStatus::Waitlisted { .. }))
    }

    pub fn admitted_count(&self) -> usize {
        self.admitted().count()
    }

    pub fn waitlisted_count(&self) -> usize {
        self.waiting_list().count()
    }

    /// Seats left unfilled after the primary awards.
    pub fn vacant_seats(&self) -> usize {
        self.seats.saturating_sub(self.admitted_count())
    }
}

/// Outcome of one allocation call, categories in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub categories: Vec<CategoryAllocation>,
    #[serde(default)]
    pub summary: AllocationSummary,
}

impl AllocationResult {
    pub fn get(&self, category: &Category) -> Option<&CategoryAllocation> {
        self.categories
            .iter()
            .find(|allocation| &allocation.category == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryAllocation> {
        self.categories.iter()
    }

    pub fn summary(&self) -> &AllocationSummary {
        &self.summary
    }

    pub fn total_admitted(&self) -> usize {
        self.categories
            .iter()
            .map(CategoryAllocation::admitted_count)
            .sum()
    }

    pub fn total_waitlisted(&self) -> usize {
        self.categories
            .iter()
            .map(CategoryAllocation::waitlisted_count)
            .sum()
    }

    /// Explicit plan carrying each category's unfilled seats into the next round.
    /// Categories with every seat filled are left out.
    pub fn vacancies(&self) -> QuotaPlan {
        QuotaPlan::explicit(
            self.categories
                .iter()
                .filter(|allocation| allocation.vacant_seats() > 0)
                .map(|allocation| {
                    (
                        allocation.category.clone(),
                        i64::try_from(allocation.vacant_seats()).unwrap_or(i64::MAX),
                    )
                })
                .collect(),
        )
    }

    /// Applicants from `applicants` who did not win a seat this round. Waitlisted
    /// applicants stay eligible for the next round.
    ///
    /// Each admitted placement removes exactly one matching roster entry, so a row that
    /// appears twice in the roster still carries one copy over when one copy was admitted.
    pub fn carry_over(&self, applicants: &[Applicant]) -> Vec<Applicant> {
        let mut admitted: HashMap<&Applicant, usize> = HashMap::new();
        for placement in self.categories.iter().flat_map(CategoryAllocation::admitted) {
            *admitted.entry(&placement.applicant).or_default() += 1;
        }

        applicants
            .iter()
            .filter(|applicant| match admitted.get_mut(applicant) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    false
                }
                _ => true,
            })
            .cloned()
            .collect()
    }
}

/// Counts describing how the ranked pool was consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub pool_size: usize,
    /// Seats the plan nominally offers (total for percentage plans).
    pub nominal_seats: usize,
    /// Seats actually distributed after truncating percentage shares.
    pub resolved_seats: usize,
    pub admitted: usize,
    pub waitlisted: usize,
    pub unplaced: usize,
    /// Applicant categories present in the pool with no quota entry. Those applicants are
    /// left out of every list, including the open category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unquoted_categories: Vec<Category>,
}

impl AllocationSummary {
    /// Seats lost to truncation of percentage shares.
    pub fn undistributed_seats(&self) -> usize {
        self.nominal_seats.saturating_sub(self.resolved_seats)
    }
}
