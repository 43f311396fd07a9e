//! Event handling for the TUI

use std::time::Duration;

use aegis_core::Surface;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Mode, RELEVANCE_STEP};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            _ => {}
        }
    }

    // Any key dismisses the help overlay
    if app.show_help {
        app.show_help = false;
        return HandleResult::Continue;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Edit => handle_edit_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => return HandleResult::Quit,

        // Module navigation
        KeyCode::Char(c @ '1'..='9') => app.select_index(c as usize - '0' as usize),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('b') | KeyCode::Char('[') => app.toggle_sidebar(),

        // Input
        KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Enter => app.enter_edit(),
        KeyCode::Char('r') => app.retry(),

        // Surface-specific shortcuts
        KeyCode::Char('t') if app.surface() == Surface::Intelligence => app.cycle_template(),
        KeyCode::Char('c') if app.surface() == Surface::Search => app.cycle_category(),
        KeyCode::Char('w') if app.surface() == Surface::Search => app.cycle_time_range(),
        KeyCode::Char('+') | KeyCode::Char('=') if app.surface() == Surface::Search => {
            app.adjust_relevance(RELEVANCE_STEP)
        }
        KeyCode::Char('-') if app.surface() == Surface::Search => {
            app.adjust_relevance(-RELEVANCE_STEP)
        }

        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle keys in edit mode
fn handle_edit_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.exit_edit(),
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
    HandleResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::{AegisConfig, Backends, Module, Shell};

    fn app() -> App {
        let config = AegisConfig::default();
        App::new(Shell::new(Backends::simulated(&config), config))
    }

    fn press(app: &mut App, code: KeyCode) -> HandleResult {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), HandleResult::Quit);
        assert_eq!(
            handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            HandleResult::Quit
        );
    }

    #[test]
    fn test_digits_select_modules() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.shell.active_module(), Module::Health);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.shell.active_module(), Module::Search);
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.shell.sidebar_collapsed());
        press(&mut app, KeyCode::Char('b'));
        assert!(!app.shell.sidebar_collapsed());
    }

    #[test]
    fn test_q_is_typed_while_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, Mode::Edit);

        type_str(&mut app, "quality");
        assert_eq!(app.shell.search().unwrap().query(), "quality");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.shell.search().unwrap().query(), "qualit");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert_eq!(press(&mut app, KeyCode::Char('q')), HandleResult::Continue);
        assert!(!app.show_help);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_sends_chat_message() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "flu trends");
        press(&mut app, KeyCode::Enter);

        let chat = app.shell.conversation().unwrap();
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_loading());
        assert_eq!(chat.input(), "");

        tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
        tokio::task::yield_now().await;
        assert!(app.tick());
        assert_eq!(app.shell.conversation().unwrap().messages().len(), 2);
    }
}
