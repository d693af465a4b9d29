//! Session state for the board and the reducer that drives it.
//!
//! Every user action is expressed as an [`Action`] and applied through
//! [`reduce`]. The visible job list is never stored; it is derived from the
//! catalog and the current [`FilterCriteria`] on demand.

use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::Catalog;
use crate::filter::{FilterCriteria, Recency, SalaryBand, compute_visible_jobs};
use crate::models::{JobId, JobPosting, WorkArrangement};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub saved_job_ids: BTreeSet<JobId>,
    pub filters_panel_open: bool,
    pub dark_theme: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub criteria: FilterCriteria,
    pub selection: SelectionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSearchText(String),
    SetSalaryBand(Option<SalaryBand>),
    SetWorkArrangement(Option<WorkArrangement>),
    SetRecency(Option<Recency>),
    /// Clears the three categorical filters. Search text is kept.
    ClearAllFilters,
    /// Ids are not checked against the catalog.
    ToggleSavedJob(JobId),
    ToggleTheme,
    ToggleFiltersPanel,
}

pub fn reduce(mut state: BoardState, action: Action) -> BoardState {
    debug!(?action, "applying board action");
    match action {
        Action::SetSearchText(text) => state.criteria.search_text = text,
        Action::SetSalaryBand(band) => state.criteria.salary_band = band,
        Action::SetWorkArrangement(value) => state.criteria.work_arrangement = value,
        Action::SetRecency(value) => state.criteria.recency = value,
        Action::ClearAllFilters => {
            state.criteria.salary_band = None;
            state.criteria.work_arrangement = None;
            state.criteria.recency = None;
        }
        Action::ToggleSavedJob(id) => {
            let saved = &mut state.selection.saved_job_ids;
            if !saved.remove(&id) {
                saved.insert(id);
            }
        }
        Action::ToggleTheme => state.selection.dark_theme = !state.selection.dark_theme,
        Action::ToggleFiltersPanel => {
            state.selection.filters_panel_open = !state.selection.filters_panel_open
        }
    }
    state
}

impl BoardState {
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.apply(Action::SetSearchText(text.into()));
    }

    pub fn set_salary_band(&mut self, band: Option<SalaryBand>) {
        self.apply(Action::SetSalaryBand(band));
    }

    pub fn set_work_arrangement(&mut self, value: Option<WorkArrangement>) {
        self.apply(Action::SetWorkArrangement(value));
    }

    pub fn set_recency(&mut self, value: Option<Recency>) {
        self.apply(Action::SetRecency(value));
    }

    pub fn clear_all_filters(&mut self) {
        self.apply(Action::ClearAllFilters);
    }

    pub fn toggle_saved_job(&mut self, id: JobId) {
        self.apply(Action::ToggleSavedJob(id));
    }

    pub fn toggle_theme(&mut self) {
        self.apply(Action::ToggleTheme);
    }

    pub fn toggle_filters_panel(&mut self) {
        self.apply(Action::ToggleFiltersPanel);
    }

    pub fn is_saved(&self, id: JobId) -> bool {
        self.selection.saved_job_ids.contains(&id)
    }

    pub fn visible_jobs<'a>(&self, catalog: &'a Catalog) -> Vec<&'a JobPosting> {
        compute_visible_jobs(catalog, &self.criteria)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            "[a-z]{0,4}".prop_map(Action::SetSearchText),
            (0usize..=SalaryBand::ALL.len())
                .prop_map(|i| Action::SetSalaryBand(SalaryBand::ALL.get(i).copied())),
            (0usize..=WorkArrangement::ALL.len())
                .prop_map(|i| Action::SetWorkArrangement(WorkArrangement::ALL.get(i).copied())),
            (0usize..=Recency::ALL.len()).prop_map(|i| Action::SetRecency(Recency::ALL.get(i).copied())),
            Just(Action::ClearAllFilters),
            (0u32..8).prop_map(Action::ToggleSavedJob),
            Just(Action::ToggleTheme),
            Just(Action::ToggleFiltersPanel),
        ]
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores_saved_set(
            actions in prop::collection::vec(arb_action(), 0..20),
            id in 0u32..8,
        ) {
            let mut state = BoardState::default();
            for action in actions {
                state.apply(action);
            }
            let before = state.selection.saved_job_ids.clone();
            state.toggle_saved_job(id);
            state.toggle_saved_job(id);
            prop_assert_eq!(before, state.selection.saved_job_ids);
        }

        #[test]
        fn prop_clear_matches_never_filtered(
            actions in prop::collection::vec(arb_action(), 0..20),
        ) {
            let catalog = Catalog::seeded();
            let mut state = BoardState::default();
            for action in actions {
                state.apply(action);
            }
            state.clear_all_filters();

            let fresh = BoardState::with_criteria(FilterCriteria {
                search_text: state.criteria.search_text.clone(),
                ..Default::default()
            });
            let cleared: Vec<JobId> = state.visible_jobs(&catalog).iter().map(|j| j.id).collect();
            let expected: Vec<JobId> = fresh.visible_jobs(&catalog).iter().map(|j| j.id).collect();
            prop_assert_eq!(cleared, expected);
        }

        #[test]
        fn prop_actions_never_touch_catalog(
            actions in prop::collection::vec(arb_action(), 0..20),
        ) {
            let catalog = Catalog::seeded();
            let snapshot = catalog.all().to_vec();
            let mut state = BoardState::default();
            for action in actions {
                state.apply(action);
                let _ = state.visible_jobs(&catalog);
            }
            prop_assert_eq!(snapshot, catalog.all().to_vec());
        }
    }
}
