use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of waiting-list entries appended to every category.
pub const WAITING_LIST_SIZE: usize = 5;

/// Identifier wrapper for roster application numbers. May be empty when the roster omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reservation category an applicant belongs to, or a quota bucket seats are reserved for.
///
/// The five conventional categories are modelled explicitly. Anything else is kept as
/// [`Category::Other`] so ingestion can surface it as a data-quality warning instead of
/// silently dropping the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    Ur,
    Obc,
    Sc,
    St,
    Pwd,
    Other(String),
}

impl Category {
    /// The open-merit bucket, which draws from the whole ranked pool.
    pub const OPEN: Category = Category::Ur;

    pub const fn ordered() -> [Self; 5] {
        [Self::Ur, Self::Obc, Self::Sc, Self::St, Self::Pwd]
    }

    pub fn parse(raw: &str) -> Self {
        let code = raw.trim().to_ascii_uppercase();
        match code.as_str() {
            "UR" | "GEN" | "GENERAL" => Self::Ur,
            "OBC" => Self::Obc,
            "SC" => Self::Sc,
            "ST" => Self::St,
            "PWD" => Self::Pwd,
            _ => Self::Other(code),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Ur => "UR",
            Self::Obc => "OBC",
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Pwd => "PWD",
            Self::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Ur => "Unreserved",
            Self::Obc => "Other Backward Classes",
            Self::Sc => "Scheduled Castes",
            Self::St => "Scheduled Tribes",
            Self::Pwd => "Persons with Disabilities",
            Self::Other(code) => code,
        }
    }

    pub fn is_open(&self) -> bool {
        *self == Self::OPEN
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.code().to_string()
    }
}

/// One candidate record produced by roster ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Applicant {
    pub application_id: ApplicationId,
    pub display_name: String,
    pub contact: String,
    pub merit_score: u32,
    pub category: Category,
    #[serde(default)]
    pub address: String,
}

/// Whether a placement holds a seat or sits on the waiting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AdmissionStatus {
    Admitted,
    Waitlisted { rank: usize },
}

impl AdmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::Waitlisted { .. } => "waitlisted",
        }
    }

    pub const fn waiting_rank(self) -> Option<usize> {
        match self {
            Self::Admitted => None,
            Self::Waitlisted { rank } => Some(rank),
        }
    }

    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// An applicant copied into a category's allocation together with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub applicant: Applicant,
    pub status: AdmissionStatus,
}

impl Placement {
    pub fn admitted(applicant: Applicant) -> Self {
        Self {
            applicant,
            status: AdmissionStatus::Admitted,
        }
    }

    pub fn waitlisted(applicant: Applicant, rank: usize) -> Self {
        Self {
            applicant,
            status: AdmissionStatus::Waitlisted { rank },
        }
    }

    /// Name as shown on printed lists, e.g. `Asha Rao (Waiting List 2)`.
    pub fn display_label(&self) -> String {
        match self.status {
            AdmissionStatus::Admitted => self.applicant.display_name.clone(),
            AdmissionStatus::Waitlisted { rank } => {
                format!("{} (Waiting List {rank})", self.applicant.display_name)
            }
        }
    }
}
