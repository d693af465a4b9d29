use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::filter::ParseFilterError;

pub type JobId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkArrangement {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkArrangement {
    pub const ALL: [WorkArrangement; 3] = [Self::Remote, Self::Hybrid, Self::OnSite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }

    /// Chip label. Same as the canonical token for this filter.
    pub fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for WorkArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// Exact, case-sensitive match on the canonical token.
impl FromStr for WorkArrangement {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| ParseFilterError::new("work arrangement", s, &Self::ALL.map(|w| w.as_str())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_min: u32,
    pub salary_max: u32,
    pub salary_display: String, // "$120k - $150k"
    pub posted_days_ago: u32,
    pub posted_display: String, // "2 days ago", "1 week ago"
    pub work_arrangement: WorkArrangement,
    pub tags: Vec<String>,
    pub featured: bool,
}
