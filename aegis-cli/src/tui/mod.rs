//! AEGIS terminal dashboard
//!
//! Sidebar module navigation on the left, the active module's surface on
//! the right:
//! - Overview widgets, health alerts and climate readings
//! - AI chat next to the module's data panel (health, governance, climate)
//! - Research search with category, time and relevance filters
//!
//! Normal/Edit mode switching (vim-style); `?` shows the key reference.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
