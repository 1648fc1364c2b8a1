use super::domain::Applicant;
use serde::Serialize;
use std::cmp::Reverse;

/// Applicants in merit order: highest score first, ties kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedPool {
    applicants: Vec<Applicant>,
}

impl RankedPool {
    pub fn rank(applicants: impl IntoIterator<Item = Applicant>) -> Self {
        let mut applicants: Vec<Applicant> = applicants.into_iter().collect();
        // `sort_by_key` is stable, which keeps equal scores in roster order.
        applicants.sort_by_key(|applicant| Reverse(applicant.merit_score));
        Self { applicants }
    }

    pub fn as_slice(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Applicant> {
        self.applicants.iter()
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    pub fn into_inner(self) -> Vec<Applicant> {
        self.applicants
    }
}

impl<'a> IntoIterator for &'a RankedPool {
    type Item = &'a Applicant;
    type IntoIter = std::slice::Iter<'a, Applicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.applicants.iter()
    }
}

impl FromIterator<Applicant> for RankedPool {
    fn from_iter<T: IntoIterator<Item = Applicant>>(iter: T) -> Self {
        Self::rank(iter)
    }
}
