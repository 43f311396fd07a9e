pub mod backend;
pub mod config;
pub mod conversation;
pub mod dashboard;
pub mod deferred;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod navigation;
pub mod search;
pub mod shell;

pub use backend::{
    BackendError, BackendErrorKind, ConversationBackend, SearchBackend, SimulatedConversation,
    SimulatedSearch,
};
pub use config::AegisConfig;
pub use conversation::{ConversationController, FailedExchange, SubmitOutcome, Template};
pub use error::{AegisError, Result};
pub use model::{
    CategoryFilter, Citation, FilterUpdate, Message, MessageRole, SearchFilters, SearchResult,
    SourceCategory, TimeRange,
};
pub use navigation::{Module, NavigationController, Surface, MODULES};
pub use search::{FilterPolicy, SearchController, SearchOutcome};
pub use shell::{Backends, Shell};
