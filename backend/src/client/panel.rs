//! Resource panel state machine.
//!
//! A panel shows either the first page of a collection (`List`) or the
//! results of a free-text search (`Search`). Every mutation re-fetches the
//! current view; nothing is updated optimistically. Requests run one at a
//! time and the last response to resolve wins.
//!
//! Invalid search input raises a transient cue instead of a request. The cue
//! expires [`INVALID_CUE_DURATION`] after it was raised, measured with the
//! injected [`Clock`], and editing the input clears it immediately.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use super::api::{ResourceApi, ResourceApiError};
use super::validation::SearchInputRule;
use crate::domain::{Document, RecordId, record::document_id};

/// Number of records requested when showing the list view.
pub const PAGE_SIZE: u64 = 10;

/// How long the invalid-input cue stays raised.
pub const INVALID_CUE_DURATION: Duration = Duration::from_millis(500);

/// Which view the panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// First page of the collection.
    List,
    /// Results of the last accepted search.
    Search,
}

/// Client-side panel listing, searching, and editing one collection.
pub struct ResourcePanel {
    api: Arc<dyn ResourceApi>,
    clock: Arc<dyn Clock>,
    rule: SearchInputRule,
    input: String,
    records: Vec<Document>,
    view: ViewMode,
    loading: bool,
    error: bool,
    mutation_error: Option<String>,
    invalid_since: Option<DateTime<Utc>>,
}

impl ResourcePanel {
    /// Build an idle panel in list mode with no records loaded.
    ///
    /// # Errors
    /// Returns the regex error if the search input rule fails to compile.
    pub fn new(api: Arc<dyn ResourceApi>, clock: Arc<dyn Clock>) -> Result<Self, regex::Error> {
        Ok(Self {
            api,
            clock,
            rule: SearchInputRule::new()?,
            input: String::new(),
            records: Vec::new(),
            view: ViewMode::List,
            loading: false,
            error: false,
            mutation_error: None,
            invalid_since: None,
        })
    }

    /// Current view.
    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Records of the current view.
    #[must_use]
    pub fn records(&self) -> &[Document] {
        &self.records
    }

    /// Current search input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last view fetch failed.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error
    }

    /// Message describing the last failed mutation, if any.
    #[must_use]
    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// Whether the invalid-input cue is currently raised.
    #[must_use]
    pub fn invalid_input_cue(&self) -> bool {
        let Some(raised_at) = self.invalid_since else {
            return false;
        };
        let elapsed = self.clock.utc().signed_duration_since(raised_at);
        TimeDelta::from_std(INVALID_CUE_DURATION).is_ok_and(|limit| elapsed < limit)
    }

    /// Load the first page. Called once when the panel is shown.
    pub async fn mount(&mut self) {
        self.fetch_list().await;
    }

    /// Replace the search input, clearing any invalid-input cue.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.invalid_since = None;
        self.input = text.into();
    }

    /// Search for the current input.
    ///
    /// Returns `false` without issuing a request when the input is rejected;
    /// the invalid-input cue is raised instead.
    pub async fn submit_search(&mut self) -> bool {
        if !self.rule.accepts(&self.input) {
            debug!(input_len = self.input.chars().count(), "search input rejected");
            self.invalid_since = Some(self.clock.utc());
            return false;
        }
        self.fetch_search().await;
        true
    }

    /// Clear the input and return to the first page.
    pub async fn back_to_list(&mut self) {
        self.input.clear();
        self.fetch_list().await;
    }

    /// Create `record`, then refresh the current view.
    pub async fn create(&mut self, record: Document) {
        self.begin_mutation();
        let outcome = self.api.create(record).await.map(drop);
        self.finish_mutation("create", outcome).await;
    }

    /// Replace `record` under its own identifier, then refresh the current
    /// view.
    pub async fn update(&mut self, record: Document) {
        self.begin_mutation();
        let outcome = match document_id(&record) {
            Some(id) => self.api.replace(id, record).await.map(drop),
            None => Err(ResourceApiError::decode("record has no positive integer id")),
        };
        self.finish_mutation("update", outcome).await;
    }

    /// Delete the record stored under `id`, then refresh the current view.
    pub async fn delete(&mut self, id: RecordId) {
        self.begin_mutation();
        let outcome = self.api.delete(id).await;
        self.finish_mutation("delete", outcome).await;
    }

    fn begin_mutation(&mut self) {
        self.loading = true;
        self.mutation_error = None;
    }

    async fn finish_mutation(
        &mut self,
        action: &'static str,
        outcome: Result<(), ResourceApiError>,
    ) {
        self.loading = false;
        if let Err(err) = outcome {
            warn!(action, error = %err, "panel mutation failed");
            self.mutation_error = Some(err.to_string());
        }
        self.refresh().await;
    }

    async fn refresh(&mut self) {
        match self.view {
            ViewMode::List => self.fetch_list().await,
            ViewMode::Search => {
                self.submit_search().await;
            }
        }
    }

    async fn fetch_list(&mut self) {
        self.loading = true;
        self.error = false;
        let outcome = self.api.list(PAGE_SIZE).await;
        self.apply_view(ViewMode::List, outcome);
    }

    async fn fetch_search(&mut self) {
        self.loading = true;
        self.error = false;
        let outcome = self.api.search(&self.input).await;
        self.apply_view(ViewMode::Search, outcome);
    }

    fn apply_view(&mut self, view: ViewMode, outcome: Result<Vec<Document>, ResourceApiError>) {
        self.loading = false;
        match outcome {
            Ok(records) => {
                self.view = view;
                self.records = records;
            }
            Err(err) => {
                warn!(?view, error = %err, "panel view fetch failed");
                self.error = true;
            }
        }
    }
}
