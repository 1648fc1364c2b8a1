use super::common::*;
use crate::workflows::counselling::{
    AdmissionStatus, Category, QuotaAllocator, QuotaPlan, RankedPool,
};
use std::collections::{HashMap, HashSet};

#[test]
fn open_category_draws_from_whole_pool_before_reserved_categories() {
    let pool = RankedPool::rank(vec![
        applicant("A", 90, Category::Ur),
        applicant("B", 85, Category::Obc),
        applicant("C", 80, Category::Ur),
    ]);
    let plan = QuotaPlan::percentage(10, vec![(Category::Ur, 0.5), (Category::Obc, 0.5)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let ur = result.get(&Category::Ur).expect("UR present");
    assert_eq!(ur.seats, 5);
    assert_eq!(admitted_ids(ur), vec!["A", "B", "C"]);
    assert!(waiting_ids(ur).is_empty());

    let obc = result.get(&Category::Obc).expect("OBC present");
    assert_eq!(obc.seats, 5);
    assert!(obc.placements.is_empty());
}

#[test]
fn empty_pool_yields_empty_categories_not_an_error() {
    let result = QuotaAllocator::default().allocate(&RankedPool::default(), &QuotaPlan::standard(100));

    let order: Vec<&Category> = result.iter().map(|allocation| &allocation.category).collect();
    assert_eq!(
        order,
        vec![
            &Category::Ur,
            &Category::Obc,
            &Category::Sc,
            &Category::St,
            &Category::Pwd
        ]
    );
    assert!(result.iter().all(|allocation| allocation.placements.is_empty()));
    assert_eq!(result.summary().pool_size, 0);
    // 40 + 30 + 15 + 7 + 7 after truncating 7.5 twice.
    assert_eq!(result.summary().resolved_seats, 99);
}

#[test]
fn category_without_matching_applicants_stays_empty() {
    let pool = RankedPool::rank(vec![
        applicant("U1", 650, Category::Ur),
        applicant("S1", 600, Category::Sc),
        applicant("S2", 590, Category::Sc),
    ]);
    let plan = explicit(&[(Category::Ur, 1), (Category::Sc, 1), (Category::Pwd, 3)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let pwd = result.get(&Category::Pwd).expect("PWD present");
    assert_eq!(pwd.seats, 3);
    assert!(pwd.placements.is_empty());
    assert_eq!(pwd.vacant_seats(), 3);
    assert_eq!(admitted_ids(result.get(&Category::Sc).expect("SC")), vec!["S1"]);
}

#[test]
fn open_waiting_list_takes_next_five_regardless_of_category() {
    let pool = RankedPool::rank(twelve_applicants());
    let plan = explicit(&[(Category::Ur, 3), (Category::Obc, 0), (Category::Sc, 0)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let ur = result.get(&Category::Ur).expect("UR present");
    assert_eq!(admitted_ids(ur), vec!["A01", "A02", "A03"]);
    assert_eq!(waiting_ids(ur), vec!["A04", "A05", "A06", "A07", "A08"]);
    let ranks: Vec<AdmissionStatus> = ur.waiting_list().map(|placement| placement.status).collect();
    assert_eq!(
        ranks,
        (1..=5)
            .map(|rank| AdmissionStatus::Waitlisted { rank })
            .collect::<Vec<_>>()
    );

    assert_eq!(waiting_ids(result.get(&Category::Obc).expect("OBC")), vec!["A11"]);
    assert_eq!(
        waiting_ids(result.get(&Category::Sc).expect("SC")),
        vec!["A09", "A12"]
    );
    assert_eq!(result.summary().unplaced, 1);
}

#[test]
fn reserved_categories_only_take_their_own_members() {
    let pool = RankedPool::rank(vec![
        applicant("U1", 700, Category::Ur),
        applicant("U2", 690, Category::Ur),
        applicant("O1", 680, Category::Obc),
        applicant("S1", 500, Category::Sc),
        applicant("O2", 450, Category::Obc),
    ]);
    let plan = explicit(&[(Category::Ur, 1), (Category::Obc, 1), (Category::Sc, 1)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    assert_eq!(admitted_ids(result.get(&Category::Ur).expect("UR")), vec!["U1"]);
    assert_eq!(admitted_ids(result.get(&Category::Obc).expect("OBC")), vec!["O1"]);
    assert_eq!(admitted_ids(result.get(&Category::Sc).expect("SC")), vec!["S1"]);
    // Open waiting list is served first and may absorb reserved-category applicants.
    assert_eq!(waiting_ids(result.get(&Category::Ur).expect("UR")), vec!["U2", "O2"]);
    assert!(waiting_ids(result.get(&Category::Obc).expect("OBC")).is_empty());
}

#[test]
fn open_waiting_list_wins_scarce_leftovers_even_when_listed_last() {
    let pool = RankedPool::rank(vec![
        applicant("X", 100, Category::Ur),
        applicant("Y", 90, Category::Obc),
        applicant("Z", 80, Category::Obc),
    ]);
    let plan = explicit(&[(Category::Obc, 1), (Category::Ur, 1)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let order: Vec<&Category> = result.iter().map(|allocation| &allocation.category).collect();
    assert_eq!(order, vec![&Category::Obc, &Category::Ur]);
    assert_eq!(admitted_ids(result.get(&Category::Ur).expect("UR")), vec!["X"]);
    assert_eq!(admitted_ids(result.get(&Category::Obc).expect("OBC")), vec!["Y"]);
    assert_eq!(waiting_ids(result.get(&Category::Ur).expect("UR")), vec!["Z"]);
    assert!(waiting_ids(result.get(&Category::Obc).expect("OBC")).is_empty());
}

#[test]
fn applicants_without_a_quota_entry_are_excluded_everywhere() {
    let pool = RankedPool::rank(vec![
        applicant("E1", 800, Category::Other("EWS".to_string())),
        applicant("U1", 600, Category::Ur),
        applicant("O1", 550, Category::Obc),
    ]);

    let result = QuotaAllocator::default().allocate(&pool, &QuotaPlan::standard(10));

    let placed: Vec<&str> = result
        .iter()
        .flat_map(|allocation| ids(&allocation.placements))
        .collect();
    assert!(!placed.contains(&"E1"));
    assert_eq!(admitted_ids(result.get(&Category::Ur).expect("UR")), vec!["U1", "O1"]);
    assert_eq!(
        result.summary().unquoted_categories,
        vec![Category::Other("EWS".to_string())]
    );
    assert_eq!(result.summary().unplaced, 1);
}

#[test]
fn negative_seat_values_clamp_to_empty_awards() {
    let pool = RankedPool::rank(twelve_applicants());
    let plan = explicit(&[(Category::Ur, -4), (Category::Obc, -1), (Category::Sc, 2)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let ur = result.get(&Category::Ur).expect("UR");
    assert_eq!(ur.seats, 0);
    assert_eq!(ur.admitted_count(), 0);
    assert_eq!(ur.waitlisted_count(), 5);
    assert_eq!(result.get(&Category::Obc).expect("OBC").admitted_count(), 0);
    assert_eq!(
        admitted_ids(result.get(&Category::Sc).expect("SC")),
        vec!["A03", "A06"]
    );
}

#[test]
fn waiting_list_size_is_configurable() {
    let pool = RankedPool::rank(twelve_applicants());
    let plan = explicit(&[(Category::Ur, 2), (Category::Obc, 1), (Category::Sc, 1)]);

    let result = QuotaAllocator::new(2).allocate(&pool, &plan);

    assert!(result.iter().all(|allocation| allocation.waitlisted_count() <= 2));
    assert_eq!(waiting_ids(result.get(&Category::Ur).expect("UR")), vec!["A04", "A06"]);

    let none = QuotaAllocator::new(0).allocate(&pool, &plan);
    assert_eq!(none.total_waitlisted(), 0);
}

#[test]
fn allocation_invariants_hold_for_mixed_pool() {
    let applicants = mixed_pool(80);
    let pool = RankedPool::rank(applicants);
    let plan = QuotaPlan::standard(30);
    let seats: HashMap<Category, usize> = plan
        .resolve()
        .into_iter()
        .map(|entry| (entry.category, entry.seats))
        .collect();
    let position: HashMap<&str, usize> = pool
        .iter()
        .enumerate()
        .map(|(index, applicant)| (applicant.application_id.as_str(), index))
        .collect();

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    let mut seen = HashSet::new();
    for allocation in result.iter() {
        for placement in &allocation.placements {
            assert!(
                seen.insert(placement.applicant.application_id.clone()),
                "{} placed twice",
                placement.applicant.application_id
            );
        }

        let admitted = allocation.admitted_count();
        assert!(admitted <= seats[&allocation.category]);
        if admitted < seats[&allocation.category] {
            // A shortfall means every eligible applicant was already admitted somewhere.
            let members = pool
                .iter()
                .filter(|applicant| {
                    allocation.category.is_open() || applicant.category == allocation.category
                })
                .count();
            let admitted_members = result
                .iter()
                .flat_map(|other| other.admitted())
                .filter(|placement| {
                    allocation.category.is_open()
                        || placement.applicant.category == allocation.category
                })
                .count();
            assert_eq!(admitted_members, members, "{} left seats unfilled", allocation.category);
        }
        assert!(allocation.waitlisted_count() <= 5);

        let lowest_admitted = allocation
            .admitted()
            .map(|placement| position[placement.applicant.application_id.as_str()])
            .max();
        let highest_waiting = allocation
            .waiting_list()
            .map(|placement| position[placement.applicant.application_id.as_str()])
            .min();
        if let (Some(admitted), Some(waiting)) = (lowest_admitted, highest_waiting) {
            assert!(admitted < waiting, "{} waitlist outranks admits", allocation.category);
        }

        let statuses: Vec<bool> = allocation
            .placements
            .iter()
            .map(|placement| placement.status.is_admitted())
            .collect();
        assert!(
            statuses.windows(2).all(|pair| pair[0] || !pair[1]),
            "admitted entries precede the waiting list"
        );
    }

    let summary = result.summary();
    assert_eq!(summary.admitted + summary.waitlisted + summary.unplaced, 80);
    assert!(summary.admitted <= summary.resolved_seats);
    assert_eq!(summary.resolved_seats, 29);
}

#[test]
fn allocation_is_deterministic() {
    let pool = RankedPool::rank(mixed_pool(50));
    let plan = QuotaPlan::standard(25);
    let allocator = QuotaAllocator::default();

    let first = allocator.allocate(&pool, &plan);
    let second = allocator.allocate(&pool, &plan);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize"),
        serde_json::to_vec(&second).expect("serialize")
    );
}

#[test]
fn result_owns_copies_of_applicants() {
    let applicants = twelve_applicants();
    let pool = RankedPool::rank(applicants.clone());
    let plan = explicit(&[(Category::Ur, 2), (Category::Obc, 1), (Category::Sc, 1)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);
    drop(pool);

    let first = &result.get(&Category::Ur).expect("UR").placements[0];
    assert_eq!(first.applicant, applicants[0]);
    assert_eq!(first.display_label(), "Applicant A01");
}

#[test]
fn huge_seat_counts_saturate_instead_of_overflowing() {
    let pool = RankedPool::rank(twelve_applicants());
    let explicit_plan = explicit(&[
        (Category::Ur, i64::MAX),
        (Category::Obc, 1),
        (Category::Sc, 1),
    ]);
    let expected = usize::try_from(i64::MAX)
        .unwrap_or(usize::MAX)
        .saturating_add(2);

    let result = QuotaAllocator::default().allocate(&pool, &explicit_plan);

    assert_eq!(result.summary().resolved_seats, expected);
    assert_eq!(result.summary().nominal_seats, expected);
    assert_eq!(result.summary().undistributed_seats(), 0);
    assert_eq!(result.get(&Category::Ur).expect("UR").admitted_count(), 12);
    assert_eq!(result.get(&Category::Obc).expect("OBC").admitted_count(), 0);

    // Three full shares of i64::MAX exceed usize::MAX.
    let percentage = QuotaPlan::percentage(
        i64::MAX,
        vec![(Category::Ur, 1.0), (Category::Obc, 1.0), (Category::Sc, 1.0)],
    );
    let result = QuotaAllocator::default().allocate(&pool, &percentage);
    assert_eq!(result.summary().resolved_seats, usize::MAX);
    assert_eq!(result.total_admitted(), 12);
}

#[test]
fn repeated_explicit_category_leaves_nothing_undistributed() {
    let pool = RankedPool::rank(twelve_applicants());
    let plan = explicit(&[(Category::Ur, 1), (Category::Sc, 2), (Category::Ur, 5)]);

    let result = QuotaAllocator::default().allocate(&pool, &plan);

    assert_eq!(result.summary().nominal_seats, 7);
    assert_eq!(result.summary().resolved_seats, 7);
    assert_eq!(result.summary().undistributed_seats(), 0);
}
