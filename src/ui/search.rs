use crate::{
    core::constants::MIN_QUERY_CHARS,
    places::PlaceCandidate,
    prelude::{lock, Arc, Mutex},
    runtime::async_utils::RequestSequence,
    traits::AutocompleteProvider,
};
use serde::{Deserialize, Serialize};

/// Search box and results list as the host should draw them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchView {
    pub text: String,
    pub focused: bool,
    pub results_visible: bool,
    pub results: Vec<PlaceCandidate>,
}

/// Connects the search input to place autocomplete.
pub struct SearchController {
    autocomplete: Arc<dyn AutocompleteProvider>,
    view: Mutex<SearchView>,
    requests: RequestSequence,
    min_chars: usize,
    discard_stale: bool,
}

impl SearchController {
    pub fn new(autocomplete: Arc<dyn AutocompleteProvider>) -> Self {
        Self {
            autocomplete,
            view: Mutex::new(SearchView::default()),
            requests: RequestSequence::new(),
            min_chars: MIN_QUERY_CHARS,
            discard_stale: true,
        }
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_discard_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    /// Handles a change of the input text. Returns whether the list was updated.
    ///
    /// Short queries hide the list without asking the provider. Provider
    /// failures and empty answers leave the list exactly as it was.
    pub async fn on_input(&self, query: &str) -> bool {
        {
            let mut view = lock(&self.view);
            view.text = query.to_string();
            if query.chars().count() < self.min_chars {
                view.results_visible = false;
                self.requests.invalidate();
                return false;
            }
        }

        let ticket = self.requests.issue();
        let predictions = match self.autocomplete.predictions(query).await {
            Ok(predictions) => predictions,
            Err(e) => {
                log::debug!("autocomplete for '{}' ignored: {}", query, e);
                return false;
            }
        };
        if predictions.is_empty() {
            return false;
        }
        if self.discard_stale && !self.requests.is_latest(ticket) {
            log::warn!("dropping stale predictions for '{}'", query);
            return false;
        }

        let mut view = lock(&self.view);
        view.results = predictions;
        view.results_visible = true;
        true
    }

    /// Picks row `index` of the visible list.
    ///
    /// Hides the list and copies the row's primary label into the input. The
    /// returned candidate is what navigation should resolve.
    pub fn select(&self, index: usize) -> Option<PlaceCandidate> {
        let mut view = lock(&self.view);
        if !view.results_visible {
            return None;
        }
        let candidate = view.results.get(index)?.clone();
        view.results_visible = false;
        view.text = candidate.primary_label.clone();
        self.requests.invalidate();
        Some(candidate)
    }

    /// Click outside the search widget.
    pub fn dismiss(&self) {
        lock(&self.view).results_visible = false;
    }

    pub fn set_focused(&self, focused: bool) {
        lock(&self.view).focused = focused;
    }

    pub fn view(&self) -> SearchView {
        lock(&self.view).clone()
    }
}
