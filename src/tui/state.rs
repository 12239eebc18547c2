use crate::model::{Candidate, ReviewEvent, SavedCandidate};

/// UI-side session state. Owned by the UI thread only; no cross-thread
/// mutation.
pub struct UiState {
    pub tab: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub current: Option<Candidate>,
    pub info: String,

    pub saved: Vec<SavedCandidate>,
    pub saved_selected: usize,
    pub saved_scroll_offset: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            loading: false,
            error: None,
            current: None,
            info: String::new(),
            saved: Vec::new(),
            saved_selected: 0,
            saved_scroll_offset: 0,
        }
    }
}

impl UiState {
    /// Replace the saved roster and keep selection/scroll in bounds.
    pub fn set_saved(&mut self, roster: Vec<SavedCandidate>) {
        self.saved = roster;
        if self.saved.is_empty() {
            self.saved_selected = 0;
            self.saved_scroll_offset = 0;
            return;
        }
        if self.saved_selected >= self.saved.len() {
            self.saved_selected = self.saved.len() - 1;
        }
        if self.saved_scroll_offset > self.saved_selected {
            self.saved_scroll_offset = self.saved_selected;
        }
    }

    /// True while accept/reject controls should be ignored.
    pub fn review_controls_disabled(&self) -> bool {
        self.loading || self.error.is_some() || self.current.is_none()
    }
}

/// Fold one engine event into UI state.
pub fn apply_event(state: &mut UiState, ev: ReviewEvent) {
    match ev {
        ReviewEvent::CycleStarted => {
            state.loading = true;
            state.error = None;
            state.info = "Fetching candidate…".into();
        }
        ReviewEvent::AttemptFailed { attempt, .. } => {
            // Individual attempt failures are never shown as errors; the
            // status line just keeps moving.
            state.info = format!("Attempt {attempt} failed, retrying…");
        }
        ReviewEvent::CandidateReady { candidate } => {
            state.loading = false;
            state.error = None;
            state.current = Some(candidate);
            state.info.clear();
        }
        ReviewEvent::CycleFailed { message } => {
            state.loading = false;
            state.error = Some(message);
            state.info.clear();
        }
        ReviewEvent::CandidateSaved { login } => {
            state.info = format!("Saved {login}");
        }
        ReviewEvent::Info(msg) => state.info = msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            id: 1,
            login: "alpha".into(),
            name: None,
            avatar_url: String::new(),
            location: None,
            email: None,
            company: None,
            bio: None,
            html_url: String::new(),
        }
    }

    #[test]
    fn loading_spans_a_whole_cycle() {
        let mut state = UiState::default();
        apply_event(&mut state, ReviewEvent::CycleStarted);
        assert!(state.loading);
        assert!(state.review_controls_disabled());

        apply_event(
            &mut state,
            ReviewEvent::AttemptFailed {
                attempt: 1,
                message: "boom".into(),
            },
        );
        assert!(state.loading);
        assert!(state.error.is_none());

        apply_event(
            &mut state,
            ReviewEvent::CandidateReady {
                candidate: candidate(),
            },
        );
        assert!(!state.loading);
        assert!(!state.review_controls_disabled());
    }

    #[test]
    fn exhausted_cycle_sets_the_error_view() {
        let mut state = UiState::default();
        apply_event(&mut state, ReviewEvent::CycleStarted);
        apply_event(
            &mut state,
            ReviewEvent::CycleFailed {
                message: "Unable to load candidate. Please try again later.".into(),
            },
        );
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert!(state.review_controls_disabled());

        // A retry clears the error as soon as the next cycle starts.
        apply_event(&mut state, ReviewEvent::CycleStarted);
        assert!(state.error.is_none());
    }

    #[test]
    fn set_saved_clamps_selection() {
        let mut state = UiState {
            saved_selected: 5,
            saved_scroll_offset: 4,
            ..Default::default()
        };
        state.set_saved(vec![]);
        assert_eq!(state.saved_selected, 0);
        assert_eq!(state.saved_scroll_offset, 0);
    }
}
