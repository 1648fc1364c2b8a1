use super::domain::Category;
use serde::{Deserialize, Serialize};

/// Slack added before flooring so fractions like 0.075 survive binary representation error.
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Seat policy supplied with each allocation call.
///
/// Categories keep the order they were supplied in. That order decides which reserved
/// category is served first and is the order categories appear in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum QuotaPlan {
    /// First-round policy: a seat total split by advisory fractions.
    Percentage {
        total_seats: i64,
        fractions: Vec<(Category, f64)>,
    },
    /// Later-round policy: explicit seat counts per category.
    Explicit { seats: Vec<(Category, i64)> },
}

impl QuotaPlan {
    /// The conventional split used for the first counselling round.
    pub fn default_fractions() -> Vec<(Category, f64)> {
        vec![
            (Category::Ur, 0.4),
            (Category::Obc, 0.3),
            (Category::Sc, 0.15),
            (Category::St, 0.075),
            (Category::Pwd, 0.075),
        ]
    }

    pub fn percentage(total_seats: i64, fractions: Vec<(Category, f64)>) -> Self {
        Self::Percentage {
            total_seats,
            fractions,
        }
    }

    pub fn standard(total_seats: i64) -> Self {
        Self::percentage(total_seats, Self::default_fractions())
    }

    pub fn explicit(seats: Vec<(Category, i64)>) -> Self {
        Self::Explicit { seats }
    }

    pub fn categories(&self) -> Vec<&Category> {
        match self {
            Self::Percentage { fractions, .. } => fractions.iter().map(|(c, _)| c).collect(),
            Self::Explicit { seats } => seats.iter().map(|(c, _)| c).collect(),
        }
    }

    /// Seat total the plan nominally distributes, before any truncation. Explicit plans
    /// count each category once, with the same clamping and duplicate rule as [`resolve`].
    ///
    /// [`resolve`]: QuotaPlan::resolve
    pub fn nominal_seats(&self) -> usize {
        match self {
            Self::Percentage { total_seats, .. } => clamp_seats(*total_seats),
            Self::Explicit { .. } => self
                .resolve()
                .iter()
                .map(|entry| entry.seats)
                .fold(0, usize::saturating_add),
        }
    }

    /// Resolve the plan into concrete per-category seat counts, in plan order.
    ///
    /// Percentage shares are truncated toward zero and leftovers are not redistributed.
    /// Negative inputs clamp to zero seats. A category listed twice keeps its first position
    /// and takes the later count.
    pub fn resolve(&self) -> Vec<CategorySeats> {
        let raw: Vec<(Category, i64)> = match self {
            Self::Percentage {
                total_seats,
                fractions,
            } => fractions
                .iter()
                .map(|(category, fraction)| {
                    (category.clone(), truncated_share(*total_seats, *fraction))
                })
                .collect(),
            Self::Explicit { seats } => seats.clone(),
        };

        let mut resolved: Vec<CategorySeats> = Vec::with_capacity(raw.len());
        for (category, count) in raw {
            let seats = clamp_seats(count);
            match resolved.iter_mut().find(|entry| entry.category == category) {
                Some(existing) => existing.seats = seats,
                None => resolved.push(CategorySeats { category, seats }),
            }
        }
        resolved
    }
}

/// A category paired with the number of primary seats it may award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeats {
    pub category: Category,
    pub seats: usize,
}

fn clamp_seats(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

fn truncated_share(total_seats: i64, fraction: f64) -> i64 {
    if total_seats <= 0 || !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    (total_seats as f64 * fraction + FRACTION_TOLERANCE).floor() as i64
}
