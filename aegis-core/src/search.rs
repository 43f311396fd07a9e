//! Search controller: the research panel's query, results and filters

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::{with_deadline, BackendError, SearchBackend};
use crate::deferred::Deferred;
use crate::error::Result;
use crate::model::{FilterUpdate, SearchFilters, SearchResult};

/// How filter selections relate to the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPolicy {
    /// Filters are recorded and shown as selected, but every result stays visible
    #[default]
    DisplayOnly,
    /// Visible results are re-derived from the filters on every read
    Refilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Request dispatched; `superseded` is set when an older request was cancelled
    Started { superseded: bool },
    /// Query was empty or whitespace
    Empty,
    /// Controller has been disposed
    Disposed,
}

type Hits = std::result::Result<Vec<SearchResult>, BackendError>;

pub struct SearchController {
    backend: Arc<dyn SearchBackend>,
    deadline: Option<Duration>,
    policy: FilterPolicy,
    query: String,
    last_query: Option<String>,
    results: Vec<SearchResult>,
    filters: SearchFilters,
    loading: bool,
    error: Option<BackendError>,
    deferred: Deferred<Hits>,
    disposed: bool,
}

impl SearchController {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            deadline: None,
            policy: FilterPolicy::default(),
            query: String::new(),
            last_query: None,
            results: Vec::new(),
            filters: SearchFilters::default(),
            loading: false,
            error: None,
            deferred: Deferred::new(),
            disposed: false,
        }
    }

    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Start from a non-default filter selection
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn can_submit(&self) -> bool {
        !self.disposed && !self.loading && !self.query.trim().is_empty()
    }

    /// Results to render, according to the filter policy
    pub fn visible_results(&self, now: DateTime<Utc>) -> Vec<&SearchResult> {
        match self.policy {
            FilterPolicy::DisplayOnly => self.results.iter().collect(),
            FilterPolicy::Refilter => self
                .results
                .iter()
                .filter(|r| self.filters.matches(r, now))
                .collect(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Update one filter. Never touches the result list.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        debug!(?update, "filter changed");
        self.filters.apply(update);
    }

    /// String-keyed variant of [`set_filter`](Self::set_filter)
    pub fn set_filter_str(&mut self, field: &str, value: &str) -> Result<()> {
        let update = FilterUpdate::parse(field, value)?;
        self.set_filter(update);
        Ok(())
    }

    /// Search with the current query buffer
    pub fn submit(&mut self) -> SearchOutcome {
        let query = self.query.clone();
        self.search(query)
    }

    /// Start a search. A search already in flight is cancelled and replaced.
    pub fn search(&mut self, query: impl Into<String>) -> SearchOutcome {
        let query = query.into();
        if self.disposed {
            return SearchOutcome::Disposed;
        }
        if query.trim().is_empty() {
            return SearchOutcome::Empty;
        }

        info!(query = %query, "starting search");
        self.query = query.clone();
        let superseded = self.dispatch(query);
        SearchOutcome::Started { superseded }
    }

    /// Repeat the last search after a failure
    pub fn retry(&mut self) -> SearchOutcome {
        if self.disposed {
            return SearchOutcome::Disposed;
        }
        match (self.error.is_some(), self.last_query.clone()) {
            (true, Some(query)) => {
                info!(query = %query, "retrying search");
                let superseded = self.dispatch(query);
                SearchOutcome::Started { superseded }
            }
            _ => SearchOutcome::Empty,
        }
    }

    fn dispatch(&mut self, query: String) -> bool {
        let superseded = self.deferred.is_pending();
        self.loading = true;
        self.error = None;
        self.last_query = Some(query.clone());

        let backend = Arc::clone(&self.backend);
        let deadline = self.deadline;
        let filters = self.filters;
        self.deferred.schedule(async move {
            with_deadline(deadline, backend.query(&query, &filters)).await
        });
        superseded
    }

    pub fn poll(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.deferred.try_take() {
            Some(hits) => {
                self.complete(hits.unwrap_or_else(|panicked| Err(panicked.into())));
                true
            }
            None => false,
        }
    }

    pub async fn settle(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.deferred.next().await {
            Some(hits) => {
                self.complete(hits.unwrap_or_else(|panicked| Err(panicked.into())));
                true
            }
            None => false,
        }
    }

    fn complete(&mut self, hits: Hits) {
        self.loading = false;
        match hits {
            Ok(results) => {
                debug!(count = results.len(), "search results received");
                self.results = results;
            }
            Err(error) => {
                warn!(error = %error, "search failed");
                self.error = Some(error);
            }
        }
    }

    pub fn dispose(&mut self) {
        if self.deferred.cancel() {
            debug!("discarded pending search on dispose");
        }
        self.disposed = true;
    }
}

impl fmt::Debug for SearchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("filters", &self.filters)
            .field("policy", &self.policy)
            .field("loading", &self.loading)
            .field("disposed", &self.disposed)
            .finish()
    }
}
