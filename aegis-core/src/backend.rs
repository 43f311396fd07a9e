//! Collaborator traits for the conversation and search controllers
//!
//! The controllers only ever talk to these traits. The simulated
//! implementations stand in for an AI completion endpoint and a
//! search/citation endpoint: they wait a fixed delay and return the
//! demonstration dataset.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::deferred::Panicked;
use crate::fixtures;
use crate::model::{Message, SearchFilters, SearchResult};

/// Backend failure with classification
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Connection failed or was reset
    Network,
    /// Request exceeded its deadline
    Timeout,
    /// Response could not be understood
    Malformed,
}

impl std::fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BackendErrorKind::Network => "network error",
            BackendErrorKind::Timeout => "timed out",
            BackendErrorKind::Malformed => "malformed response",
        })
    }
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Malformed, message)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, BackendErrorKind::Network | BackendErrorKind::Timeout)
    }
}

impl From<Panicked> for BackendError {
    fn from(panicked: Panicked) -> Self {
        Self::malformed(format!("backend panicked: {}", panicked.message))
    }
}

/// Produces assistant replies
#[async_trait]
pub trait ConversationBackend: Send + Sync {
    /// Respond to `text`, given the conversation before this turn
    async fn respond(&self, history: &[Message], text: &str) -> Result<Message, BackendError>;
}

/// Produces search results
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn query(&self, text: &str, filters: &SearchFilters) -> Result<Vec<SearchResult>, BackendError>;
}

#[async_trait]
impl<T: ConversationBackend + ?Sized> ConversationBackend for Arc<T> {
    async fn respond(&self, history: &[Message], text: &str) -> Result<Message, BackendError> {
        (**self).respond(history, text).await
    }
}

#[async_trait]
impl<T: SearchBackend + ?Sized> SearchBackend for Arc<T> {
    async fn query(&self, text: &str, filters: &SearchFilters) -> Result<Vec<SearchResult>, BackendError> {
        (**self).query(text, filters).await
    }
}

/// Run a backend future under an optional deadline
pub(crate) async fn with_deadline<T, F>(deadline: Option<Duration>, fut: F) -> Result<T, BackendError>
where
    F: std::future::Future<Output = Result<T, BackendError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            BackendError::timeout(format!("no response after {} ms", limit.as_millis()))
        })?,
        None => fut.await,
    }
}

// ============================================================================
// Simulated backends
// ============================================================================

pub const DEFAULT_CONVERSATION_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1500);

/// Answers every prompt with the canned reply after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedConversation {
    delay: Duration,
}

impl SimulatedConversation {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedConversation {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATION_DELAY)
    }
}

#[async_trait]
impl ConversationBackend for SimulatedConversation {
    async fn respond(&self, history: &[Message], text: &str) -> Result<Message, BackendError> {
        tracing::debug!(turns = history.len(), delay_ms = self.delay.as_millis() as u64, "simulating assistant reply");
        tokio::time::sleep(self.delay).await;
        Ok(Message::assistant(
            fixtures::assistant_reply(text),
            fixtures::demo_citations(),
        ))
    }
}

/// Returns the demonstration result set after a fixed delay, whatever the query
#[derive(Debug, Clone)]
pub struct SimulatedSearch {
    delay: Duration,
}

impl SimulatedSearch {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

#[async_trait]
impl SearchBackend for SimulatedSearch {
    async fn query(&self, text: &str, _filters: &SearchFilters) -> Result<Vec<SearchResult>, BackendError> {
        tracing::debug!(query = %text, delay_ms = self.delay.as_millis() as u64, "simulating search");
        tokio::time::sleep(self.delay).await;
        Ok(fixtures::demo_results(Utc::now()))
    }
}
