//! Reservation-quota seat allocation.
//!
//! A roster of applicants is ranked by merit score and partitioned into per-category
//! admitted lists, each followed by a short waiting list. The open category ("UR") is
//! filled first from the whole ranked pool; reserved categories then draw only their own
//! members from whoever remains.

mod allocator;
pub mod domain;
mod quota;
mod ranking;
pub mod report;
mod request;
mod result;
mod task;

#[cfg(test)]
mod tests;

pub use allocator::QuotaAllocator;
pub use domain::{
    AdmissionStatus, Applicant, ApplicationId, Category, Placement, WAITING_LIST_SIZE,
};
pub use quota::{CategorySeats, QuotaPlan};
pub use ranking::RankedPool;
pub use report::{read_allocation_csv, write_csv, AllocationReport, ReportError};
pub use request::{AllocationError, AllocationRequest, CounsellingRound};
pub use result::{AllocationResult, AllocationSummary, CategoryAllocation};
pub use task::{allocate_in_background, AllocationTaskError};
