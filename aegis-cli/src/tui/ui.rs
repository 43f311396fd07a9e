//! UI rendering using ratatui

use aegis_core::dashboard::{
    Tone, CLIMATE_READINGS, GOVERNANCE, HEALTH_ALERTS, ONLINE, PROFILE, SUMMARY_WIDGETS,
};
use aegis_core::{
    ConversationController, FilterPolicy, Message, Module, SearchController, SearchResult,
    Surface, MODULES,
};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for status messages
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Error color
const DANGER: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

const GLOBAL_SEARCH_PLACEHOLDER: &str = "Search insights, policies, alerts...";

const HELP_TEXT: &str = "\
Navigation
  1-5          jump to module
  j/k ↑/↓      next / previous module
  b or [       collapse / expand sidebar
  q, Ctrl+C    quit

Input
  i, /, Enter  start typing (chat and search)
  Enter        send while typing
  Esc          stop typing
  r            retry a failed request

Chat
  t            cycle prompt template

Search
  c            cycle source category
  w            cycle time window
  + / -        raise / lower minimum relevance";

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Red => Color::Red,
        Tone::Yellow => Color::Yellow,
        Tone::Green => Color::Green,
        Tone::Blue => Color::Blue,
        Tone::Purple => Color::Magenta,
        Tone::Orange => Color::Rgb(230, 140, 40),
        Tone::Gray => Color::Gray,
    }
}

fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
    let color = if focused { ACCENT } else { SECONDARY };
    Block::default()
        .title(title.into())
        .title_style(if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let sidebar_width = if app.shell.sidebar_collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };

    // Main layout: sidebar (left) + main area (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, app, main_chunks[0]);

    // Main area layout: header + content + status
    let main_area_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Top bar
            Constraint::Min(6),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(main_chunks[1]);

    render_top_bar(frame, app, main_area_chunks[0]);

    match app.surface() {
        Surface::Dashboard => render_overview(frame, main_area_chunks[1]),
        Surface::Intelligence => render_intelligence(frame, app, main_area_chunks[1]),
        Surface::Search => render_search(frame, app, main_area_chunks[1]),
    }

    render_status_bar(frame, app, main_area_chunks[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the module sidebar
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let collapsed = app.shell.sidebar_collapsed();
    let active = app.shell.active_module();

    let items: Vec<ListItem> = MODULES
        .iter()
        .enumerate()
        .map(|(idx, info)| {
            let style = if info.module == active {
                Style::default()
                    .fg(Color::Black)
                    .bg(tone_color(info.tone))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let content = if collapsed {
                format!(" {} ", info.glyph)
            } else {
                format!(" {} {}. {}", info.glyph, idx + 1, info.label)
            };
            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    let title = if collapsed { "" } else { " AEGIS " };
    let list = List::new(items).block(panel(title, false));
    frame.render_widget(list, area);
}

/// Render the top bar: global search box on the left; presence, alerts and profile on the right
fn render_top_bar(frame: &mut Frame, app: &App, area: Rect) {
    let info = app.shell.active_module().info();

    let (dot, presence) = if ONLINE {
        (Span::styled("● ", Style::default().fg(SUCCESS)), "Online")
    } else {
        (Span::styled("● ", Style::default().fg(SECONDARY)), "Offline")
    };

    let search_box = Line::from(vec![
        Span::styled(" ⌕ ", Style::default().fg(DIM)),
        Span::styled(GLOBAL_SEARCH_PLACEHOLDER, Style::default().fg(DIM)),
    ]);

    let status = Line::from(vec![
        dot,
        Span::styled(presence, Style::default().fg(DIM)),
        Span::raw("   "),
        Span::raw("🔔"),
        Span::styled("●", Style::default().fg(DANGER)),
        Span::raw("   "),
        Span::styled(PROFILE.name, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {}", PROFILE.role), Style::default().fg(DIM)),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .title(format!(" {} {} ", info.glyph, info.label))
        .title_style(
            Style::default()
                .fg(tone_color(info.tone))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(status.width() as u16),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(search_box), halves[0]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), halves[1]);
}

// === Overview ===

fn render_overview(frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(area);

    let widget_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    for (widget, cell) in SUMMARY_WIDGETS.iter().zip(widget_areas.iter()) {
        let color = tone_color(widget.tone);
        let text = Text::from(vec![
            Line::from(Span::styled(
                widget.value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(widget.subtitle, Style::default().fg(DIM))),
            Line::from(widget.caption),
        ]);
        let block = Block::default()
            .title(format!(" {} ", widget.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(Paragraph::new(text).block(block), *cell);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_health_alerts(frame, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(columns[1]);
    render_climate(frame, right[0]);
    render_governance(frame, right[1]);
}

fn render_health_alerts(frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = HEALTH_ALERTS
        .iter()
        .map(|alert| {
            let color = tone_color(alert.priority.tone());
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::raw(alert.message),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("  {}", alert.priority.label()),
                        Style::default().fg(color),
                    ),
                    Span::styled(format!(" · {}", alert.time), Style::default().fg(DIM)),
                ]),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(panel(" Health Alerts ", false)), area);
}

fn render_climate(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = CLIMATE_READINGS
        .iter()
        .map(|reading| {
            Line::from(vec![
                Span::styled(format!("{:<14}", reading.label), Style::default().fg(DIM)),
                Span::styled(
                    reading.value,
                    Style::default()
                        .fg(tone_color(reading.tone))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Climate Monitor ", false)),
        area,
    );
}

fn render_governance(frame: &mut Frame, area: Rect) {
    let stat = |label: &'static str, value: u32| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Style::default().fg(DIM)),
            Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        stat("Active policies", GOVERNANCE.active_policies),
        stat("Pending decisions", GOVERNANCE.pending_decisions),
        stat("Citizen feedback", GOVERNANCE.citizen_feedback),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Governance ", false)),
        area,
    );
}

// === Intelligence (chat) ===

fn render_intelligence(frame: &mut Frame, app: &App, area: Rect) {
    let Some(chat) = app.shell.conversation() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_chat(frame, app, chat, columns[0]);

    let module = app.shell.active_module();
    let heading = match module {
        Module::Health => "Health Intelligence",
        Module::Governance => "Governance Intelligence",
        Module::Climate => "Climate Intelligence",
        // Rendered by their own surfaces
        Module::Overview | Module::Search => return,
    };

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(columns[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {} {}", module.info().glyph, heading),
            Style::default()
                .fg(tone_color(module.info().tone))
                .add_modifier(Modifier::BOLD),
        )),
        side[0],
    );

    match module {
        Module::Health => render_health_alerts(frame, side[1]),
        Module::Governance => render_governance(frame, side[1]),
        Module::Climate => render_climate(frame, side[1]),
        Module::Overview | Module::Search => {}
    }
}

fn render_chat(frame: &mut Frame, app: &App, chat: &ConversationController, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Templates
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Input
        ])
        .split(area);

    // Template strip
    let mut spans = vec![Span::styled(" Templates (t): ", Style::default().fg(DIM))];
    for template in aegis_core::Template::ALL {
        let style = if chat.selected_template() == Some(template) {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", template.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    // Transcript
    let mut lines: Vec<Line> = Vec::new();
    if chat.messages().is_empty() && !chat.is_loading() {
        lines.push(Line::from(Span::styled(
            "Ask about health trends, climate risks or policy impact.",
            Style::default().fg(DIM),
        )));
        lines.push(Line::from(Span::styled(
            "Press i to type or t to load a template.",
            Style::default().fg(DIM),
        )));
    }
    for message in chat.messages() {
        push_message_lines(&mut lines, message);
    }
    if chat.is_loading() {
        lines.push(Line::from(Span::styled(
            "AEGIS is analyzing…",
            Style::default().fg(DIM).add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(failure) = chat.failure() {
        lines.push(Line::from(Span::styled(
            format!("⚠ {} · press r to retry", failure.error),
            Style::default().fg(DANGER),
        )));
    }

    let block = panel(" AI Assistant ", false);
    let inner = block.inner(rows[1]);
    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Scroll by wrapped rows so the newest line stays on screen
    let wrapped_rows = transcript.line_count(inner.width);
    let scroll = wrapped_rows.saturating_sub(inner.height as usize);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(transcript.block(block).scroll((scroll, 0)), rows[1]);

    render_input(
        frame,
        " Ask AEGIS ",
        chat.input(),
        "Type a question…",
        app.mode == Mode::Edit,
        send_hint(chat.can_submit(), chat.is_loading(), "waiting for reply"),
        rows[2],
    );
}

fn push_message_lines(lines: &mut Vec<Line<'static>>, message: &Message) {
    let (speaker, color) = if message.is_user() {
        ("You", ACCENT)
    } else {
        ("AEGIS", SUCCESS)
    };
    lines.push(Line::from(vec![
        Span::styled(speaker, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", message.created_at.format("%H:%M")),
            Style::default().fg(DIM),
        ),
    ]));
    for text_line in message.content.lines() {
        lines.push(Line::from(text_line.to_string()));
    }
    for citation in message.citations() {
        lines.push(Line::from(vec![
            Span::styled(
                "  ● ",
                Style::default().fg(tone_color(citation.category.tone())),
            ),
            Span::raw(citation.source.clone()),
            Span::styled(
                format!(" [{}]", citation.category.label()),
                Style::default().fg(DIM),
            ),
        ]));
    }
    lines.push(Line::from(""));
}

/// Right-hand title on an input box: bright when Enter would send, dimmed while busy
fn send_hint(can_submit: bool, loading: bool, busy: &str) -> Option<Line<'static>> {
    if can_submit {
        Some(Line::from(Span::styled(" Enter to send ", Style::default().fg(ACCENT))))
    } else if loading {
        Some(Line::from(Span::styled(
            format!(" Enter to send ({}) ", busy),
            Style::default().fg(DIM),
        )))
    } else {
        None
    }
}

fn render_input(
    frame: &mut Frame,
    title: &str,
    value: &str,
    placeholder: &str,
    editing: bool,
    hint: Option<Line<'static>>,
    area: Rect,
) {
    let title = if editing {
        format!("{}[EDIT] ", title)
    } else {
        title.to_string()
    };
    let content = if editing {
        Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ])
    } else if value.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(DIM)))
    } else {
        Line::from(value.to_string())
    };
    let mut block = panel(title, editing);
    if let Some(hint) = hint {
        block = block.title_top(hint.right_aligned());
    }
    frame.render_widget(Paragraph::new(content).block(block), area);
}

// === Search ===

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let Some(search) = app.shell.search() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query
            Constraint::Length(1), // Filters
            Constraint::Min(3),    // Results
        ])
        .split(area);

    render_input(
        frame,
        " Search research and sources ",
        search.query(),
        "e.g. water quality in Zone B",
        app.mode == Mode::Edit,
        send_hint(search.can_submit(), search.is_loading(), "searching"),
        rows[0],
    );

    let filters = search.filters();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT));
    let filter_line = Line::from(vec![
        Span::raw(" "),
        key("c"),
        Span::raw(format!(" {}   ", filters.category.label())),
        key("w"),
        Span::raw(format!(" {}   ", filters.time_range.label())),
        key("+/-"),
        Span::raw(format!(" ≥{:.0}% relevance   ", filters.min_relevance * 100.0)),
        Span::styled(
            match search.policy() {
                FilterPolicy::DisplayOnly => "(filters not applied)",
                FilterPolicy::Refilter => "(filters applied)",
            },
            Style::default().fg(DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(filter_line), rows[1]);

    render_results(frame, search, Utc::now(), rows[2]);
}

fn render_results(frame: &mut Frame, search: &SearchController, now: DateTime<Utc>, area: Rect) {
    let visible = search.visible_results(now);
    let title = if search.is_loading() {
        " Results (searching…) ".to_string()
    } else {
        format!(" Results ({}) ", visible.len())
    };
    let block = panel(title, false);

    if let Some(err) = search.error() {
        let text = Text::from(vec![
            Line::from(Span::styled(format!("⚠ {}", err), Style::default().fg(DANGER))),
            Line::from(Span::styled("Press r to retry", Style::default().fg(DIM))),
        ]);
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    if search.is_loading() && visible.is_empty() {
        let skeleton: Vec<Line> = (0..3)
            .flat_map(|_| {
                [
                    Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░░░░░░░░░", Style::default().fg(DIM))),
                    Line::from(Span::styled("░░░░░░░░░░░░░░░░", Style::default().fg(DIM))),
                    Line::from(""),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(skeleton).block(block), area);
        return;
    }

    if visible.is_empty() {
        let hint = if search.results().is_empty() {
            "Press i, type a query and hit Enter"
        } else {
            "No results match the current filters"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(DIM))).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .into_iter()
        .map(|result| result_item(result, now))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn result_item(result: &SearchResult, now: DateTime<Utc>) -> ListItem<'static> {
    let badge_color = tone_color(result.category.tone());
    ListItem::new(vec![
        Line::from(Span::styled(
            result.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!(" {} ", result.category.label()),
                Style::default().fg(Color::Black).bg(badge_color),
            ),
            Span::styled(
                format!(" {}% relevant", result.relevance_percent()),
                Style::default().fg(SUCCESS),
            ),
            Span::styled(
                format!(" · {} · {}", result.source, result.observed_label(now)),
                Style::default().fg(DIM),
            ),
        ]),
        Line::from(result.snippet.clone()),
        Line::from(""),
    ])
}

// === Chrome ===

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::Edit => Span::styled(" EDIT ", Style::default().bg(SUCCESS).fg(Color::Black)),
    };

    let help_text = match (app.mode, app.surface()) {
        (Mode::Edit, _) => "Enter:send  Esc:done",
        (Mode::Normal, Surface::Dashboard) => "1-5:module  b:sidebar  ?:help  q:quit",
        (Mode::Normal, Surface::Intelligence) => "i:type  t:template  r:retry  ?:help  q:quit",
        (Mode::Normal, Surface::Search) => "i:type  c/w/+/-:filters  r:retry  ?:help  q:quit",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let height = (HELP_TEXT.lines().count() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 56.min(area.width.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys (press any key to close) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));

    let paragraph = Paragraph::new(HELP_TEXT)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::{AegisConfig, Backends, Shell};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let config = AegisConfig::default();
        App::new(Shell::new(Backends::simulated(&config), config))
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_overview_shows_widgets_and_profile() {
        let screen = draw(&app());
        assert!(screen.contains("Active Alerts"));
        assert!(screen.contains("Flu outbreak reported in District 3"));
        assert!(screen.contains("Dr. Sarah Chen"));
        assert!(screen.contains("Health Alerts"));
    }

    #[test]
    fn test_collapsed_sidebar_hides_labels() {
        let mut app = app();
        app.select_module(Module::Search);
        app.toggle_sidebar();
        let screen = draw(&app);
        assert!(!screen.contains("Governance"));
        assert!(screen.contains("AI Search"));
    }

    #[test]
    fn test_chat_surface_shows_templates() {
        let mut app = app();
        app.select_module(Module::Climate);
        let screen = draw(&app);
        assert!(screen.contains("AI Assistant"));
        assert!(screen.contains("Climate Monitor"));
        assert!(screen.contains("Templates"));
    }

    #[test]
    fn test_top_bar_has_global_search_and_alerts() {
        let screen = draw(&app());
        assert!(screen.contains(GLOBAL_SEARCH_PLACEHOLDER));
        assert!(screen.contains("🔔"));
        assert!(screen.contains("Online"));
    }

    #[test]
    fn test_governance_gets_its_own_panel() {
        let mut app = app();
        app.select_module(Module::Governance);
        let screen = draw(&app);
        assert!(screen.contains("Governance Intelligence"));
        assert!(screen.contains("Active policies"));
        assert!(!screen.contains("Climate Monitor"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_keeps_latest_wrapped_message_in_view() {
        let mut app = app();
        app.select_module(Module::Health);
        let chat = app.shell.conversation_mut().unwrap();
        for round in 0..5 {
            chat.submit(format!("question {round} on regional outbreak trends"));
            assert!(chat.settle().await);
        }
        chat.submit("LATEST-QUESTION");

        let screen = draw(&app);
        assert!(screen.contains("LATEST-QUESTION"));
        assert!(screen.contains("AEGIS is analyzing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_hint_dims_while_reply_pending() {
        let mut app = app();
        app.select_module(Module::Climate);
        app.shell.conversation_mut().unwrap().set_input("heat wave");
        let screen = draw(&app);
        assert!(screen.contains("Enter to send"));
        assert!(!screen.contains("waiting for reply"));

        let chat = app.shell.conversation_mut().unwrap();
        chat.submit_input();
        chat.set_input("and tomorrow?");
        let screen = draw(&app);
        assert!(screen.contains("Enter to send (waiting for reply)"));
    }
}
