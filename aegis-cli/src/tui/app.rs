//! Core application state and mode management

use aegis_core::{
    FilterUpdate, Module, SearchOutcome, Shell, SubmitOutcome, Surface, Template,
};

/// Step used by the relevance threshold keys
pub const RELEVANCE_STEP: f32 = 0.05;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - switch modules, cycle filters and templates
    #[default]
    Normal,
    /// Edit mode - typing into the chat input or the search box
    Edit,
}

/// Main application state
pub struct App {
    /// Navigation plus whichever controller the active surface mounted
    pub shell: Shell,
    /// Current input mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// Key reference overlay
    pub show_help: bool,
}

impl App {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            show_help: false,
        }
    }

    pub fn surface(&self) -> Surface {
        self.shell.surface()
    }

    /// Whether the active surface has a text input
    pub fn has_input(&self) -> bool {
        self.surface() != Surface::Dashboard
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // === Navigation ===

    pub fn select_module(&mut self, module: Module) {
        self.shell.select_module(module);
        self.mode = Mode::Normal;
        self.clear_status();
    }

    /// Select by 1-based sidebar position
    pub fn select_index(&mut self, position: usize) {
        if let Some(module) = position.checked_sub(1).and_then(|i| Module::ALL.get(i)) {
            self.select_module(*module);
        }
    }

    pub fn select_next(&mut self) {
        let next = (self.shell.active_module().index() + 1) % Module::ALL.len();
        self.select_module(Module::ALL[next]);
    }

    pub fn select_prev(&mut self) {
        let len = Module::ALL.len();
        let prev = (self.shell.active_module().index() + len - 1) % len;
        self.select_module(Module::ALL[prev]);
    }

    pub fn toggle_sidebar(&mut self) {
        self.shell.toggle_sidebar();
    }

    // === Editing ===

    pub fn enter_edit(&mut self) {
        if self.has_input() {
            self.mode = Mode::Edit;
        }
    }

    pub fn exit_edit(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(chat) = self.shell.conversation_mut() {
            chat.push_char(c);
        } else if let Some(search) = self.shell.search_mut() {
            search.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(chat) = self.shell.conversation_mut() {
            chat.backspace();
        } else if let Some(search) = self.shell.search_mut() {
            search.backspace();
        }
    }

    /// Submit whatever the active input holds
    pub fn submit(&mut self) {
        if let Some(chat) = self.shell.conversation_mut() {
            match chat.submit_input() {
                SubmitOutcome::Sent => self.clear_status(),
                SubmitOutcome::Busy => self.set_status("Still waiting for the previous reply"),
                SubmitOutcome::Empty | SubmitOutcome::Disposed => {}
            }
        } else if let Some(search) = self.shell.search_mut() {
            match search.submit() {
                SearchOutcome::Started { superseded: true } => {
                    self.set_status("Previous search cancelled")
                }
                SearchOutcome::Started { .. } => self.clear_status(),
                SearchOutcome::Empty | SearchOutcome::Disposed => {}
            }
        }
    }

    /// Re-issue the last failed request on the active surface
    pub fn retry(&mut self) {
        let retried = if let Some(chat) = self.shell.conversation_mut() {
            chat.retry() == SubmitOutcome::Sent
        } else if let Some(search) = self.shell.search_mut() {
            matches!(search.retry(), SearchOutcome::Started { .. })
        } else {
            false
        };
        if retried {
            self.set_status("Retrying...");
        }
    }

    // === Templates and filters ===

    pub fn cycle_template(&mut self) {
        if let Some(chat) = self.shell.conversation_mut() {
            let next = chat
                .selected_template()
                .map(|t| t.next())
                .unwrap_or(Template::Health);
            chat.apply_template(next);
            self.set_status(format!("Template: {}", next.label()));
        }
    }

    pub fn cycle_category(&mut self) {
        if let Some(search) = self.shell.search_mut() {
            let next = search.filters().category.next();
            search.set_filter(FilterUpdate::Category(next));
        }
    }

    pub fn cycle_time_range(&mut self) {
        if let Some(search) = self.shell.search_mut() {
            let next = search.filters().time_range.next();
            search.set_filter(FilterUpdate::TimeRange(next));
        }
    }

    pub fn adjust_relevance(&mut self, delta: f32) {
        if let Some(search) = self.shell.search_mut() {
            let threshold = search.filters().min_relevance + delta;
            // Snap to the step grid
            let snapped = (threshold / RELEVANCE_STEP).round() * RELEVANCE_STEP;
            search.set_filter(FilterUpdate::MinRelevance(snapped));
        }
    }

    // === Completions ===

    /// Apply arrived completions; surfaces failures in the status bar
    pub fn tick(&mut self) -> bool {
        if !self.shell.poll() {
            return false;
        }

        let failure = self
            .shell
            .conversation()
            .and_then(|chat| chat.failure().map(|f| f.error.to_string()))
            .or_else(|| self.shell.search().and_then(|s| s.error().map(|e| e.to_string())));

        if let Some(err) = failure {
            self.set_status(format!("{} (press r to retry)", err));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::{AegisConfig, Backends, CategoryFilter};

    fn app() -> App {
        let config = AegisConfig::default();
        App::new(Shell::new(Backends::simulated(&config), config))
    }

    #[test]
    fn test_select_index_bounds() {
        let mut app = app();
        app.select_index(5);
        assert_eq!(app.shell.active_module(), Module::Search);
        app.select_index(0);
        app.select_index(9);
        assert_eq!(app.shell.active_module(), Module::Search);
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.shell.active_module(), Module::Search);
        app.select_next();
        assert_eq!(app.shell.active_module(), Module::Overview);
    }

    #[test]
    fn test_overview_has_no_input() {
        let mut app = app();
        app.enter_edit();
        assert_eq!(app.mode, Mode::Normal);

        app.select_module(Module::Health);
        app.enter_edit();
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn test_cycle_template_fills_input() {
        let mut app = app();
        app.select_module(Module::Climate);
        app.cycle_template();
        let chat = app.shell.conversation().unwrap();
        assert_eq!(chat.selected_template(), Some(Template::Health));
        assert_eq!(chat.input(), Template::Health.prompt());
    }

    #[test]
    fn test_filter_keys_update_search_filters() {
        let mut app = app();
        app.select_module(Module::Search);
        app.cycle_category();
        app.adjust_relevance(RELEVANCE_STEP);

        let filters = app.shell.search().unwrap().filters();
        assert_eq!(filters.category, CategoryFilter::PeerReviewed);
        assert!((filters.min_relevance - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_relevance_is_clamped() {
        let mut app = app();
        app.select_module(Module::Search);
        for _ in 0..30 {
            app.adjust_relevance(RELEVANCE_STEP);
        }
        assert_eq!(app.shell.search().unwrap().filters().min_relevance, 1.0);
    }
}
