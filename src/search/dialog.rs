use std::time::Duration;

use tokio::time::Instant;

use crate::search::service::{SearchResult, SearchService, MAX_SEARCH_RESULTS};

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Idle,
    Loading,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    /// The event came from a text input, textarea or editable element,
    /// including the dialog's own search field.
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        KeyPress {
            key,
            ctrl: false,
            meta: false,
            in_text_field: false,
        }
    }

    pub fn from_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }

    /// Ctrl+K or Cmd+K outside any text field.
    pub fn is_toggle_shortcut(&self) -> bool {
        !self.in_text_field
            && (self.ctrl || self.meta)
            && matches!(self.key, Key::Char('k') | Key::Char('K'))
    }
}

/// A search the dialog wants dispatched. `generation` ties the answer back
/// to the query it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: u64,
    pub query: String,
}

/// Modal search session. Time is supplied by the caller so debouncing is
/// deterministic.
#[derive(Debug)]
pub struct SearchDialog {
    open: bool,
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
    generation: u64,
    deadline: Option<Instant>,
    in_flight: Option<u64>,
    answered: bool,
}

impl Default for SearchDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchDialog {
    pub fn new() -> Self {
        SearchDialog {
            open: false,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            generation: 0,
            deadline: None,
            in_flight: None,
            answered: false,
        }
    }

    pub fn state(&self) -> DialogState {
        if !self.open {
            DialogState::Closed
        } else if self.deadline.is_some() || self.in_flight.is_some() {
            DialogState::Loading
        } else if self.answered {
            DialogState::Results
        } else {
            DialogState::Idle
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    /// Opens with a clean slate.
    pub fn open(&mut self) {
        self.reset();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
        self.deadline = None;
        self.in_flight = None;
        self.answered = false;
        self.generation += 1;
    }

    /// Replaces the query text and restarts the debounce timer.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        if !self.open {
            return;
        }
        self.query = text.into();
        self.generation += 1;
        self.in_flight = None;

        if self.query.trim().is_empty() {
            self.deadline = None;
            self.results.clear();
            self.selected = 0;
            self.answered = false;
        } else {
            self.deadline = Some(now + DEBOUNCE_DELAY);
        }
    }

    /// When the pending debounce fires, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Hands out the search once the query has been quiet for the debounce
    /// delay.
    pub fn poll(&mut self, now: Instant) -> Option<PendingSearch> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.in_flight = Some(self.generation);
                Some(PendingSearch {
                    generation: self.generation,
                    query: self.query.clone(),
                })
            }
            _ => None,
        }
    }

    /// Applies results for `search`. Returns false and changes nothing when
    /// the query moved on since it was dispatched.
    pub fn complete(&mut self, search: &PendingSearch, mut results: Vec<SearchResult>) -> bool {
        if !self.open || self.in_flight != Some(search.generation) {
            return false;
        }
        results.truncate(MAX_SEARCH_RESULTS);
        self.results = results;
        self.selected = 0;
        self.in_flight = None;
        self.answered = true;
        true
    }

    /// Polls, and if due, runs the search and applies it.
    pub async fn run_due(&mut self, now: Instant, service: &SearchService) -> bool {
        let Some(search) = self.poll(now) else {
            return false;
        };
        let results = service.search(&search.query).await;
        self.complete(&search, results)
    }

    /// Handles a key press. Returns the URL to navigate to when a result was
    /// chosen.
    pub fn handle_key(&mut self, press: &KeyPress) -> Option<String> {
        if press.is_toggle_shortcut() {
            if self.open {
                self.close();
            } else {
                self.open();
            }
            return None;
        }
        if !self.open {
            return None;
        }

        match press.key {
            Key::Escape => {
                self.close();
                None
            }
            Key::ArrowDown | Key::ArrowUp | Key::Enter if self.results.is_empty() => None,
            Key::ArrowDown => {
                self.selected = (self.selected + 1).min(self.results.len() - 1);
                None
            }
            Key::ArrowUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Key::Enter => self.select(self.selected),
            Key::Char(_) => None,
        }
    }

    /// Picks a result by position, closing the dialog.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let url = self.results.get(index)?.url.clone();
        self.close();
        Some(url)
    }
}
