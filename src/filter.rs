use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::models::{JobPosting, WorkArrangement};

/// A categorical filter token outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError {
    pub kind: &'static str,
    pub value: String,
    pub accepted: Vec<&'static str>,
}

impl ParseFilterError {
    pub fn new(kind: &'static str, value: &str, accepted: &[&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            accepted: accepted.to_vec(),
        }
    }
}

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown {} '{}'. Available: {}",
            self.kind,
            self.value,
            self.accepted.join(", ")
        )
    }
}

impl std::error::Error for ParseFilterError {}

// --- Salary band ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryBand {
    #[serde(rename = "under-50k")]
    Under50k,
    #[serde(rename = "50k-75k")]
    From50kTo75k,
    #[serde(rename = "75k-100k")]
    From75kTo100k,
    #[serde(rename = "100k-150k")]
    From100kTo150k,
    #[serde(rename = "over-150k")]
    Over150k,
}

impl SalaryBand {
    pub const ALL: [SalaryBand; 5] = [
        Self::Under50k,
        Self::From50kTo75k,
        Self::From75kTo100k,
        Self::From100kTo150k,
        Self::Over150k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under50k => "under-50k",
            Self::From50kTo75k => "50k-75k",
            Self::From75kTo100k => "75k-100k",
            Self::From100kTo150k => "100k-150k",
            Self::Over150k => "over-150k",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under50k => "<$50k",
            Self::From50kTo75k => "$50k-$75k",
            Self::From75kTo100k => "$75k-$100k",
            Self::From100kTo150k => "$100k-$150k",
            Self::Over150k => ">$150k",
        }
    }

    /// Bands are not a partition: a range straddling a boundary
    /// (e.g. 90k-110k) falls in no band.
    pub fn contains(&self, salary_min: u32, salary_max: u32) -> bool {
        match self {
            Self::Under50k => salary_max < 50_000,
            Self::From50kTo75k => salary_min >= 50_000 && salary_max <= 75_000,
            Self::From75kTo100k => salary_min >= 75_000 && salary_max <= 100_000,
            Self::From100kTo150k => salary_min >= 100_000 && salary_max <= 150_000,
            Self::Over150k => salary_min > 150_000,
        }
    }
}

// --- Recency ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recency {
    Today,
    #[serde(rename = "last-3-days")]
    Last3Days,
    LastWeek,
    LastMonth,
}

impl Recency {
    pub const ALL: [Recency; 4] = [Self::Today, Self::Last3Days, Self::LastWeek, Self::LastMonth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last3Days => "last-3-days",
            Self::LastWeek => "last-week",
            Self::LastMonth => "last-month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Last3Days => "3 Days",
            Self::LastWeek => "1 Week",
            Self::LastMonth => "1 Month",
        }
    }

    pub fn max_days(&self) -> u32 {
        match self {
            Self::Today => 0,
            Self::Last3Days => 3,
            Self::LastWeek => 7,
            Self::LastMonth => 30,
        }
    }

    pub fn contains(&self, posted_days_ago: u32) -> bool {
        posted_days_ago <= self.max_days()
    }
}

macro_rules! impl_token_parsing {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ParseFilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ParseFilterError::new($kind, s, &<$ty>::ALL.map(|v| v.as_str())))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

impl_token_parsing!(SalaryBand, "salary band");
impl_token_parsing!(Recency, "posted date");

/// Steps a chip selection: unset -> first -> ... -> last -> unset.
pub fn cycle_next<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(cur) => {
            let pos = all.iter().position(|v| *v == cur)?;
            all.get(pos + 1).copied()
        }
    }
}

// --- Criteria ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub salary_band: Option<SalaryBand>,
    pub work_arrangement: Option<WorkArrangement>,
    pub recency: Option<Recency>,
}

impl FilterCriteria {
    pub fn matches(&self, job: &JobPosting) -> bool {
        self.matches_search(job)
            && self
                .salary_band
                .is_none_or(|band| band.contains(job.salary_min, job.salary_max))
            && self
                .work_arrangement
                .is_none_or(|w| w == job.work_arrangement)
            && self
                .recency
                .is_none_or(|r| r.contains(job.posted_days_ago))
    }

    fn matches_search(&self, job: &JobPosting) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        job.title.to_lowercase().contains(&needle) || job.company.to_lowercase().contains(&needle)
    }

    pub fn has_categorical_filters(&self) -> bool {
        self.salary_band.is_some() || self.work_arrangement.is_some() || self.recency.is_some()
    }
}

/// Catalog order is preserved; the catalog itself is only borrowed.
pub fn compute_visible_jobs<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a JobPosting> {
    catalog.all().iter().filter(|job| criteria.matches(job)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobId;

    fn ids(jobs: &[&JobPosting]) -> Vec<JobId> {
        jobs.iter().map(|j| j.id).collect()
    }

    fn visible(criteria: &FilterCriteria) -> Vec<JobId> {
        let catalog = Catalog::seeded();
        ids(&compute_visible_jobs(&catalog, criteria))
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        assert_eq!(visible(&FilterCriteria::default()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_matches_company_case_insensitively() {
        let criteria = FilterCriteria {
            search_text: "data".to_string(),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![2]);
    }

    #[test]
    fn test_search_matches_title() {
        let criteria = FilterCriteria {
            search_text: "MANAGER".to_string(),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![1, 4]);
    }

    #[test]
    fn test_search_ignores_location_and_description() {
        let criteria = FilterCriteria {
            search_text: "Austin".to_string(),
            ..Default::default()
        };
        assert!(visible(&criteria).is_empty());
    }

    #[test]
    fn test_search_is_not_trimmed() {
        let criteria = FilterCriteria {
            search_text: " datacorp".to_string(),
            ..Default::default()
        };
        assert!(visible(&criteria).is_empty());
    }

    #[test]
    fn test_salary_band_100k_150k() {
        let criteria = FilterCriteria {
            salary_band: Some(SalaryBand::From100kTo150k),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![1, 4]);
    }

    #[test]
    fn test_salary_band_50k_75k() {
        let criteria = FilterCriteria {
            salary_band: Some(SalaryBand::From50kTo75k),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![5]);
    }

    #[test]
    fn test_salary_bands_leave_straddling_ranges_unmatched() {
        // Job 3 pays $65k-$85k, which crosses the 75k boundary.
        let catalog = Catalog::seeded();
        let job = catalog.get(3).unwrap();
        for band in SalaryBand::ALL {
            assert!(!band.contains(job.salary_min, job.salary_max), "{:?}", band);
        }
        assert!(!SalaryBand::From75kTo100k.contains(90_000, 110_000));
        assert!(!SalaryBand::From100kTo150k.contains(90_000, 110_000));
    }

    #[test]
    fn test_salary_band_edges() {
        assert!(SalaryBand::Under50k.contains(40_000, 49_999));
        assert!(!SalaryBand::Under50k.contains(40_000, 50_000));
        assert!(SalaryBand::Over150k.contains(150_001, 200_000));
        assert!(!SalaryBand::Over150k.contains(150_000, 200_000));
        assert!(SalaryBand::From75kTo100k.contains(75_000, 100_000));
    }

    #[test]
    fn test_recency_last_3_days() {
        let criteria = FilterCriteria {
            recency: Some(Recency::Last3Days),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![1, 2, 3]);
    }

    #[test]
    fn test_recency_today_and_week() {
        let today = FilterCriteria {
            recency: Some(Recency::Today),
            ..Default::default()
        };
        assert!(visible(&today).is_empty());

        let week = FilterCriteria {
            recency: Some(Recency::LastWeek),
            ..Default::default()
        };
        assert_eq!(visible(&week), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_remote_and_salary_combined() {
        let criteria = FilterCriteria {
            work_arrangement: Some(WorkArrangement::Remote),
            salary_band: Some(SalaryBand::From75kTo100k),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![2]);
    }

    #[test]
    fn test_work_arrangement_on_site() {
        let criteria = FilterCriteria {
            work_arrangement: Some(WorkArrangement::OnSite),
            ..Default::default()
        };
        assert_eq!(visible(&criteria), vec![3, 5]);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("100k-150k".parse::<SalaryBand>().unwrap(), SalaryBand::From100kTo150k);
        assert_eq!("last-3-days".parse::<Recency>().unwrap(), Recency::Last3Days);
        assert_eq!("last-month".parse::<Recency>().unwrap(), Recency::LastMonth);

        let err = "200k+".parse::<SalaryBand>().unwrap_err();
        assert_eq!(err.value, "200k+");
        assert!(err.to_string().contains("under-50k"));
        assert!("yesterday".parse::<Recency>().is_err());
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("[{:<10}]", SalaryBand::From50kTo75k), "[50k-75k   ]");
        assert_eq!(format!("[{:<7}]", Recency::Today), "[today  ]");
    }

    #[test]
    fn test_serde_tokens_match_parse_tokens() {
        for band in SalaryBand::ALL {
            let json = serde_json::to_string(&band).unwrap();
            assert_eq!(json, format!("\"{}\"", band.as_str()));
        }
        for recency in Recency::ALL {
            let json = serde_json::to_string(&recency).unwrap();
            assert_eq!(json, format!("\"{}\"", recency.as_str()));
        }
    }

    #[test]
    fn test_cycle_next_wraps_through_unset() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..=Recency::ALL.len() {
            current = cycle_next(&Recency::ALL, current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Recency::Today),
                Some(Recency::Last3Days),
                Some(Recency::LastWeek),
                Some(Recency::LastMonth),
                None,
            ]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::JobId;
    use proptest::prelude::*;

    fn arb_salary_band() -> impl Strategy<Value = Option<SalaryBand>> {
        prop_oneof![
            Just(None),
            Just(Some(SalaryBand::Under50k)),
            Just(Some(SalaryBand::From50kTo75k)),
            Just(Some(SalaryBand::From75kTo100k)),
            Just(Some(SalaryBand::From100kTo150k)),
            Just(Some(SalaryBand::Over150k)),
        ]
    }

    fn arb_work() -> impl Strategy<Value = Option<WorkArrangement>> {
        prop_oneof![
            Just(None),
            Just(Some(WorkArrangement::Remote)),
            Just(Some(WorkArrangement::Hybrid)),
            Just(Some(WorkArrangement::OnSite)),
        ]
    }

    fn arb_recency() -> impl Strategy<Value = Option<Recency>> {
        prop_oneof![
            Just(None),
            Just(Some(Recency::Today)),
            Just(Some(Recency::Last3Days)),
            Just(Some(Recency::LastWeek)),
            Just(Some(Recency::LastMonth)),
        ]
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop_oneof![Just(String::new()), "[a-zA-Z ]{0,6}"],
            arb_salary_band(),
            arb_work(),
            arb_recency(),
        )
            .prop_map(|(search_text, salary_band, work_arrangement, recency)| FilterCriteria {
                search_text,
                salary_band,
                work_arrangement,
                recency,
            })
    }

    proptest! {
        #[test]
        fn prop_visible_is_ordered_subset(criteria in arb_criteria()) {
            let catalog = Catalog::seeded();
            let visible: Vec<JobId> = compute_visible_jobs(&catalog, &criteria).iter().map(|j| j.id).collect();
            let all: Vec<JobId> = catalog.all().iter().map(|j| j.id).collect();

            let mut cursor = all.iter();
            for id in &visible {
                prop_assert!(cursor.any(|a| a == id), "{} out of order or missing", id);
            }
        }

        #[test]
        fn prop_narrower_recency_never_grows(criteria in arb_criteria()) {
            let catalog = Catalog::seeded();
            let mut previous = usize::MAX;
            for recency in Recency::ALL.iter().rev() {
                let narrowed = FilterCriteria { recency: Some(*recency), ..criteria.clone() };
                let count = compute_visible_jobs(&catalog, &narrowed).len();
                prop_assert!(count <= previous);
                previous = count;
            }
        }

        #[test]
        fn prop_unset_filters_never_restrict(criteria in arb_criteria()) {
            let catalog = Catalog::seeded();
            let relaxed = FilterCriteria { search_text: criteria.search_text.clone(), ..Default::default() };
            let strict = compute_visible_jobs(&catalog, &criteria).len();
            let loose = compute_visible_jobs(&catalog, &relaxed).len();
            prop_assert!(strict <= loose);
        }
    }
}
