use serde::{Deserialize, Serialize};
use shared_types::{Place, SaveOutcome};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveState {
    pub pending: Option<Place>,
    pub is_saved: bool,
}

/// Drives the saved/unsaved toggle for the current search result.
///
/// Per search cycle: Idle -> Searched -> Saved, where Saved only exits via
/// a new search. A rejected save (duplicate) leaves the cycle in Searched,
/// still actionable.
#[derive(Debug, Default, Clone)]
pub struct SaveWorkflow {
    state: SaveState,
}

impl SaveWorkflow {
    pub fn state(&self) -> &SaveState {
        &self.state
    }

    /// A fresh search always supersedes any prior pending save.
    pub fn on_new_search_result(&mut self, place: Option<Place>) {
        self.state.pending = place;
        self.state.is_saved = false;
    }

    /// Returns the place to persist, or `None` when there is nothing
    /// pending or the current result was already saved. The guard is what
    /// keeps a double-submitted save down to a single persist request.
    pub fn begin_save(&self) -> Option<Place> {
        if self.state.is_saved {
            return None;
        }
        self.state.pending.clone()
    }

    /// `Created` completes the cycle and clears the transient place so the
    /// search panel returns to empty. `Duplicate` changes nothing.
    pub fn complete_save(&mut self, outcome: &SaveOutcome) {
        if let SaveOutcome::Created(_) = outcome {
            self.state.is_saved = true;
            self.state.pending = None;
        }
    }

    pub fn reset(&mut self) {
        self.state = SaveState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Coordinate;

    fn paris() -> Place {
        Place {
            id: None,
            name: "Paris".to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
            address: None,
        }
    }

    #[test]
    fn second_save_of_the_same_result_is_a_noop() {
        let mut workflow = SaveWorkflow::default();
        workflow.on_new_search_result(Some(paris()));

        assert_eq!(workflow.begin_save(), Some(paris()));
        let mut created = paris();
        created.id = Some(7);
        workflow.complete_save(&SaveOutcome::Created(created));

        assert!(workflow.state().is_saved);
        assert_eq!(workflow.state().pending, None);
        assert_eq!(workflow.begin_save(), None);
    }

    #[test]
    fn duplicate_outcome_leaves_the_save_actionable() {
        let mut workflow = SaveWorkflow::default();
        workflow.on_new_search_result(Some(paris()));

        workflow.complete_save(&SaveOutcome::Duplicate);

        assert!(!workflow.state().is_saved);
        assert_eq!(workflow.begin_save(), Some(paris()));
    }

    #[test]
    fn new_search_supersedes_a_completed_save() {
        let mut workflow = SaveWorkflow::default();
        workflow.on_new_search_result(Some(paris()));
        let mut created = paris();
        created.id = Some(7);
        workflow.complete_save(&SaveOutcome::Created(created));

        let mut london = paris();
        london.name = "London".to_string();
        workflow.on_new_search_result(Some(london.clone()));

        assert!(!workflow.state().is_saved);
        assert_eq!(workflow.begin_save(), Some(london));
    }

    #[test]
    fn save_without_a_search_result_is_rejected() {
        let workflow = SaveWorkflow::default();
        assert_eq!(workflow.begin_save(), None);
    }
}
