use super::domain::{Applicant, Category, Placement, WAITING_LIST_SIZE};
use super::quota::{CategorySeats, QuotaPlan};
use super::ranking::RankedPool;
use super::result::{AllocationResult, AllocationSummary, CategoryAllocation};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Partitions a ranked pool into per-category admitted lists followed by waiting lists.
///
/// The allocator is a pure batch transformation: it never fails, never mutates its inputs
/// and produces the same result for the same pool and plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaAllocator {
    waiting_list_size: usize,
}

impl Default for QuotaAllocator {
    fn default() -> Self {
        Self::new(WAITING_LIST_SIZE)
    }
}

impl QuotaAllocator {
    pub fn new(waiting_list_size: usize) -> Self {
        Self { waiting_list_size }
    }

    pub fn waiting_list_size(&self) -> usize {
        self.waiting_list_size
    }

    pub fn allocate(&self, pool: &RankedPool, plan: &QuotaPlan) -> AllocationResult {
        let quotas = plan.resolve();
        let mut remaining = RemainingPool::new(pool.as_slice(), &quotas);
        let mut categories: Vec<CategoryAllocation> = quotas
            .iter()
            .map(|quota| CategoryAllocation::new(quota.category.clone(), quota.seats))
            .collect();
        let order = processing_order(&quotas);

        for &index in &order {
            let quota = &quotas[index];
            let awarded = remaining.take(&quota.category, quota.seats);
            debug!(
                category = %quota.category,
                seats = quota.seats,
                admitted = awarded.len(),
                "awarded primary seats"
            );
            categories[index]
                .placements
                .extend(awarded.into_iter().map(Placement::admitted));
        }

        for &index in &order {
            let quota = &quotas[index];
            let waiting = remaining.take(&quota.category, self.waiting_list_size);
            debug!(
                category = %quota.category,
                waitlisted = waiting.len(),
                "built waiting list"
            );
            categories[index].placements.extend(
                waiting
                    .into_iter()
                    .enumerate()
                    .map(|(position, applicant)| Placement::waitlisted(applicant, position + 1)),
            );
        }

        let admitted = categories
            .iter()
            .map(CategoryAllocation::admitted_count)
            .sum();
        let waitlisted = categories
            .iter()
            .map(CategoryAllocation::waitlisted_count)
            .sum();
        let summary = AllocationSummary {
            pool_size: pool.len(),
            nominal_seats: plan.nominal_seats(),
            resolved_seats: quotas
                .iter()
                .map(|quota| quota.seats)
                .fold(0, usize::saturating_add),
            admitted,
            waitlisted,
            unplaced: remaining.unconsumed(),
            unquoted_categories: remaining.unquoted_categories(),
        };

        info!(
            pool = summary.pool_size,
            admitted = summary.admitted,
            waitlisted = summary.waitlisted,
            unplaced = summary.unplaced,
            "allocation complete"
        );

        AllocationResult {
            categories,
            summary,
        }
    }
}

/// Open category first, then every other category in plan order.
fn processing_order(quotas: &[CategorySeats]) -> Vec<usize> {
    let open = quotas.iter().position(|quota| quota.category.is_open());
    open.into_iter()
        .chain((0..quotas.len()).filter(|index| Some(*index) != open))
        .collect()
}

/// Ranked applicants plus an exclusion set of everyone already placed.
///
/// The pool itself is never reordered or shrunk; taking an applicant only flips its
/// `consumed` flag, so every step sees the same rank positions.
struct RemainingPool<'a> {
    applicants: &'a [Applicant],
    consumed: Vec<bool>,
    eligible: Vec<bool>,
}

impl<'a> RemainingPool<'a> {
    fn new(applicants: &'a [Applicant], quotas: &[CategorySeats]) -> Self {
        let eligible = applicants
            .iter()
            .map(|applicant| {
                quotas
                    .iter()
                    .any(|quota| quota.category == applicant.category)
            })
            .collect();

        Self {
            applicants,
            consumed: vec![false; applicants.len()],
            eligible,
        }
    }

    /// Take up to `limit` of the best remaining applicants for `category`. The open category
    /// accepts any eligible applicant; reserved categories only their own members.
    fn take(&mut self, category: &Category, limit: usize) -> Vec<Applicant> {
        let mut taken = Vec::new();
        if limit == 0 {
            return taken;
        }

        for (index, applicant) in self.applicants.iter().enumerate() {
            if self.consumed[index] || !self.eligible[index] {
                continue;
            }
            if !category.is_open() && &applicant.category != category {
                continue;
            }

            self.consumed[index] = true;
            taken.push(applicant.clone());
            if taken.len() == limit {
                break;
            }
        }

        taken
    }

    fn unconsumed(&self) -> usize {
        self.consumed.iter().filter(|consumed| !**consumed).count()
    }

    fn unquoted_categories(&self) -> Vec<Category> {
        self.applicants
            .iter()
            .zip(&self.eligible)
            .filter(|(_, eligible)| !**eligible)
            .map(|(applicant, _)| applicant.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
