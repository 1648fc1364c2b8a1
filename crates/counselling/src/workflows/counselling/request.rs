use super::allocator::QuotaAllocator;
use super::domain::{Applicant, Category, WAITING_LIST_SIZE};
use super::quota::QuotaPlan;
use super::ranking::RankedPool;
use super::result::AllocationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counselling rounds run by the admissions office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CounsellingRound(u8);

impl CounsellingRound {
    pub const FIRST: Self = Self(1);
    pub const LAST: u8 = 4;

    pub fn new(round: u8) -> Result<Self, AllocationError> {
        if (1..=Self::LAST).contains(&round) {
            Ok(Self(round))
        } else {
            Err(AllocationError::InvalidRound(round))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Round one splits a seat total by percentage; later rounds receive explicit seats.
    pub const fn is_first(self) -> bool {
        self.0 == 1
    }
}

impl Default for CounsellingRound {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for CounsellingRound {
    type Error = AllocationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CounsellingRound> for u8 {
    fn from(value: CounsellingRound) -> Self {
        value.0
    }
}

impl fmt::Display for CounsellingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}", self.0)
    }
}

/// Everything one allocation call needs, validated before it reaches the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub round: CounsellingRound,
    pub applicants: Vec<Applicant>,
    pub plan: QuotaPlan,
    #[serde(default = "default_waiting_list_size")]
    pub waiting_list_size: usize,
}

fn default_waiting_list_size() -> usize {
    WAITING_LIST_SIZE
}

fn valid_fraction(fraction: f64) -> bool {
    fraction.is_finite() && fraction > 0.0 && fraction <= 1.0
}

impl AllocationRequest {
    pub fn new(round: CounsellingRound, applicants: Vec<Applicant>, plan: QuotaPlan) -> Self {
        Self {
            round,
            applicants,
            plan,
            waiting_list_size: WAITING_LIST_SIZE,
        }
    }

    pub fn with_waiting_list_size(mut self, size: usize) -> Self {
        self.waiting_list_size = size;
        self
    }

    /// Caller-side checks that must pass before seats are allocated.
    pub fn validate(&self) -> Result<(), AllocationError> {
        match (&self.plan, self.round.is_first()) {
            (QuotaPlan::Percentage { .. }, false) | (QuotaPlan::Explicit { .. }, true) => {
                return Err(AllocationError::RoundPlanMismatch { round: self.round });
            }
            _ => {}
        }

        match &self.plan {
            QuotaPlan::Percentage {
                total_seats,
                fractions,
            } => {
                if *total_seats <= 0 {
                    return Err(AllocationError::InvalidSeatCount {
                        category: None,
                        value: *total_seats,
                    });
                }
                if let Some((category, fraction)) = fractions
                    .iter()
                    .find(|(_, fraction)| !valid_fraction(*fraction))
                {
                    return Err(AllocationError::InvalidFraction {
                        category: category.clone(),
                        value: *fraction,
                    });
                }
            }
            QuotaPlan::Explicit { seats } => {
                if let Some((category, value)) = seats.iter().find(|(_, value)| *value <= 0) {
                    return Err(AllocationError::InvalidSeatCount {
                        category: Some(category.clone()),
                        value: *value,
                    });
                }
            }
        }

        if self.plan.categories().is_empty() {
            return Err(AllocationError::EmptyQuotaPlan);
        }

        if self.applicants.is_empty() {
            return Err(AllocationError::EmptyApplicantPool);
        }

        Ok(())
    }

    /// Validate, rank and allocate in one step.
    pub fn run(&self) -> Result<AllocationResult, AllocationError> {
        self.validate()?;
        Ok(self.allocate_unchecked())
    }

    /// Rank and allocate without validation. Invalid seat values clamp to empty takes.
    pub fn allocate_unchecked(&self) -> AllocationResult {
        let pool = RankedPool::rank(self.applicants.iter().cloned());
        QuotaAllocator::new(self.waiting_list_size).allocate(&pool, &self.plan)
    }
}

/// Rejections raised by caller-side validation. The allocator itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("{}", describe_seat_count(.category, .value))]
    InvalidSeatCount {
        category: Option<Category>,
        value: i64,
    },
    #[error("quota fraction for {category} must be within (0, 1], got {value}")]
    InvalidFraction { category: Category, value: f64 },
    #[error("no applicants were supplied for allocation")]
    EmptyApplicantPool,
    #[error("the quota plan does not list any category")]
    EmptyQuotaPlan,
    #[error("counselling round must be between 1 and 4, got {0}")]
    InvalidRound(u8),
    #[error("{round} requires {}", round_requirement(.round))]
    RoundPlanMismatch { round: CounsellingRound },
}

fn describe_seat_count(category: &Option<Category>, value: &i64) -> String {
    match category {
        Some(category) => format!("seat count for {category} must be positive, got {value}"),
        None => format!("total seats must be positive, got {value}"),
    }
}

fn round_requirement(round: &CounsellingRound) -> &'static str {
    if round.is_first() {
        "a total seat count"
    } else {
        "explicit per-category seats"
    }
}
