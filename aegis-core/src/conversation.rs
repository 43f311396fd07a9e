//! Conversation controller: the chat panel's state and commands

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::{with_deadline, BackendError, ConversationBackend};
use crate::deferred::Deferred;
use crate::error::{AegisError, Result};
use crate::model::Message;

/// Quick-start prompt shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Health,
    Climate,
    Policy,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Health, Template::Climate, Template::Policy];

    pub fn id(&self) -> &'static str {
        match self {
            Template::Health => "health",
            Template::Climate => "climate",
            Template::Policy => "policy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Template::Health => "Health Analysis",
            Template::Climate => "Climate Impact",
            Template::Policy => "Policy Simulation",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Template::Health => {
                "Analyze current health trends and provide actionable insights for public health policy..."
            }
            Template::Climate => {
                "Assess climate change impacts and recommend adaptation strategies for our region..."
            }
            Template::Policy => "Simulate the potential outcomes of implementing this policy change...",
        }
    }

    /// Next template, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Template::Health => Template::Climate,
            Template::Climate => Template::Policy,
            Template::Policy => Template::Health,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self> {
        Template::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AegisError::unknown_template(s))
    }
}

/// What a submit call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User message appended and request dispatched
    Sent,
    /// Input was empty or whitespace
    Empty,
    /// A response is already in flight
    Busy,
    /// Controller has been disposed
    Disposed,
}

/// A request that failed, kept so it can be retried
#[derive(Debug, Clone)]
pub struct FailedExchange {
    pub user_message_id: String,
    pub text: String,
    pub error: BackendError,
}

#[derive(Debug, Clone)]
struct InFlight {
    user_message_id: String,
    text: String,
}

type Reply = std::result::Result<Message, BackendError>;

pub struct ConversationController {
    backend: Arc<dyn ConversationBackend>,
    deadline: Option<Duration>,
    messages: Vec<Message>,
    input: String,
    selected_template: Option<Template>,
    loading: bool,
    in_flight: Option<InFlight>,
    failure: Option<FailedExchange>,
    deferred: Deferred<Reply>,
    disposed: bool,
}

impl ConversationController {
    pub fn new(backend: Arc<dyn ConversationBackend>) -> Self {
        Self {
            backend,
            deadline: None,
            messages: Vec::new(),
            input: String::new(),
            selected_template: None,
            loading: false,
            in_flight: None,
            failure: None,
            deferred: Deferred::new(),
            disposed: false,
        }
    }

    /// Fail requests that take longer than `deadline`
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_template(&self) -> Option<Template> {
        self.selected_template
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn failure(&self) -> Option<&FailedExchange> {
        self.failure.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether the send action should be offered
    pub fn can_submit(&self) -> bool {
        !self.disposed && !self.loading && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Load a template prompt into the input buffer. Does not submit.
    pub fn apply_template(&mut self, template: Template) {
        debug!(template = %template, "applying prompt template");
        self.input = template.prompt().to_string();
        self.selected_template = Some(template);
    }

    pub fn apply_template_id(&mut self, id: &str) -> Result<Template> {
        let template: Template = id.parse()?;
        self.apply_template(template);
        Ok(template)
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> SubmitOutcome {
        let text = self.input.clone();
        self.submit(text)
    }

    /// Append a user message and request a reply.
    ///
    /// Empty input and submits while a reply is pending are ignored.
    pub fn submit(&mut self, text: impl Into<String>) -> SubmitOutcome {
        let text = text.into();
        if self.disposed {
            return SubmitOutcome::Disposed;
        }
        if text.trim().is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.loading {
            debug!("ignoring submit while a reply is in flight");
            return SubmitOutcome::Busy;
        }

        let history = self.messages.clone();
        let message = Message::user(text.clone());
        info!(message_id = %message.id, chars = text.len(), "submitting prompt");
        let user_message_id = message.id.clone();
        self.messages.push(message);
        self.input.clear();
        self.failure = None;
        self.dispatch(history, user_message_id, text);
        SubmitOutcome::Sent
    }

    /// Re-issue the last failed request without adding a second user message
    pub fn retry(&mut self) -> SubmitOutcome {
        if self.disposed {
            return SubmitOutcome::Disposed;
        }
        if self.loading {
            return SubmitOutcome::Busy;
        }
        let Some(failed) = self.failure.take() else {
            return SubmitOutcome::Empty;
        };

        let history: Vec<Message> = self
            .messages
            .iter()
            .take_while(|m| m.id != failed.user_message_id)
            .cloned()
            .collect();
        info!(message_id = %failed.user_message_id, "retrying failed prompt");
        self.dispatch(history, failed.user_message_id, failed.text);
        SubmitOutcome::Sent
    }

    fn dispatch(&mut self, history: Vec<Message>, user_message_id: String, text: String) {
        self.loading = true;
        self.in_flight = Some(InFlight {
            user_message_id,
            text: text.clone(),
        });

        let backend = Arc::clone(&self.backend);
        let deadline = self.deadline;
        self.deferred.schedule(async move {
            with_deadline(deadline, backend.respond(&history, &text)).await
        });
    }

    /// Apply a reply if one has arrived. Returns whether state changed.
    pub fn poll(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.deferred.try_take() {
            Some(reply) => {
                self.complete(reply.unwrap_or_else(|panicked| Err(panicked.into())));
                true
            }
            None => false,
        }
    }

    /// Wait for the pending reply (if any) and apply it
    pub async fn settle(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.deferred.next().await {
            Some(reply) => {
                self.complete(reply.unwrap_or_else(|panicked| Err(panicked.into())));
                true
            }
            None => false,
        }
    }

    fn complete(&mut self, reply: Reply) {
        self.loading = false;
        let in_flight = self.in_flight.take();
        match reply {
            Ok(message) => {
                debug!(message_id = %message.id, "assistant reply received");
                self.messages.push(message);
            }
            Err(error) => {
                warn!(error = %error, "assistant reply failed");
                if let Some(in_flight) = in_flight {
                    self.failure = Some(FailedExchange {
                        user_message_id: in_flight.user_message_id,
                        text: in_flight.text,
                        error,
                    });
                }
            }
        }
    }

    /// Tear down: cancel any pending reply. Later polls are no-ops.
    pub fn dispose(&mut self) {
        if self.deferred.cancel() {
            debug!("discarded pending reply on dispose");
        }
        self.disposed = true;
    }
}

impl fmt::Debug for ConversationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationController")
            .field("messages", &self.messages.len())
            .field("loading", &self.loading)
            .field("selected_template", &self.selected_template)
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimulatedConversation;
    use crate::model::MessageRole;

    fn controller() -> ConversationController {
        ConversationController::new(Arc::new(SimulatedConversation::default()))
    }

    #[test]
    fn test_template_parse() {
        assert_eq!("Climate".parse::<Template>().unwrap(), Template::Climate);
        assert!("finance".parse::<Template>().is_err());
    }

    #[test]
    fn test_apply_template_does_not_submit() {
        let mut chat = controller();
        chat.apply_template(Template::Policy);
        assert_eq!(chat.input(), Template::Policy.prompt());
        assert_eq!(chat.selected_template(), Some(Template::Policy));
        assert!(chat.messages().is_empty());
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_unknown_template_id_leaves_state() {
        let mut chat = controller();
        chat.set_input("draft");
        assert!(chat.apply_template_id("finance").is_err());
        assert_eq!(chat.input(), "draft");
        assert_eq!(chat.selected_template(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_user_message_first() {
        let mut chat = controller();
        chat.set_input("flu outbreak trends");
        assert_eq!(chat.submit_input(), SubmitOutcome::Sent);

        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, MessageRole::User);
        assert_eq!(chat.messages()[0].content, "flu outbreak trends");
        assert!(chat.input().is_empty());
        assert!(chat.is_loading());
        assert!(!chat.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_submit_is_noop() {
        let mut chat = controller();
        assert_eq!(chat.submit("   \t"), SubmitOutcome::Empty);
        assert!(chat.messages().is_empty());
        assert!(!chat.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_can_submit_waits_for_reply() {
        let mut chat = controller();
        assert!(!chat.can_submit());
        chat.set_input("flu trends");
        assert!(chat.can_submit());
        chat.submit_input();
        chat.set_input("next question");
        assert!(!chat.can_submit());
        chat.settle().await;
        assert!(chat.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_discards_pending_reply() {
        let mut chat = controller();
        chat.submit("water quality");
        chat.dispose();
        assert!(chat.is_disposed());
        chat.set_input("still typing");
        assert!(!chat.can_submit());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!chat.poll());
        assert!(!chat.settle().await);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.submit("again"), SubmitOutcome::Disposed);
    }
}
