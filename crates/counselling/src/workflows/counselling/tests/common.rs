use crate::workflows::counselling::{
    Applicant, ApplicationId, Category, CategoryAllocation, Placement, QuotaPlan,
};

pub(super) fn applicant(id: &str, merit_score: u32, category: Category) -> Applicant {
    Applicant {
        application_id: ApplicationId(id.to_string()),
        display_name: format!("Applicant {id}"),
        contact: format!("{id}@example.com"),
        merit_score,
        category,
        address: "Bilaspur".to_string(),
    }
}

/// Twelve applicants with distinct descending scores, cycling through UR, OBC and SC.
pub(super) fn twelve_applicants() -> Vec<Applicant> {
    let categories = [Category::Ur, Category::Obc, Category::Sc];
    (0..12)
        .map(|index| {
            applicant(
                &format!("A{:02}", index + 1),
                700 - index as u32 * 10,
                categories[index % 3].clone(),
            )
        })
        .collect()
}

/// Deterministic pseudo-random pool with repeated scores across all five categories.
pub(super) fn mixed_pool(size: usize) -> Vec<Applicant> {
    let mut state: u64 = 0x2545_f491;
    (0..size)
        .map(|index| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let score = 400 + ((state >> 33) % 40) as u32 * 5;
            let category = Category::ordered()[(state >> 20) as usize % 5].clone();
            applicant(&format!("P{index:03}"), score, category)
        })
        .collect()
}

pub(super) fn ids<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> Vec<&'a str> {
    placements
        .into_iter()
        .map(|placement| placement.applicant.application_id.as_str())
        .collect()
}

pub(super) fn admitted_ids(allocation: &CategoryAllocation) -> Vec<&str> {
    ids(allocation.admitted())
}

pub(super) fn waiting_ids(allocation: &CategoryAllocation) -> Vec<&str> {
    ids(allocation.waiting_list())
}

pub(super) fn explicit(seats: &[(Category, i64)]) -> QuotaPlan {
    QuotaPlan::explicit(seats.to_vec())
}
