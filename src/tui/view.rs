//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::types::{Choice, ChoiceEvent};

use super::state::{App, Mode, Notice};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole window to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Title at top, two columns in the middle, status and help at bottom
    let rows = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // status / prompt
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(), rows[0]);
    frame.render_widget(render_status(app), rows[2]);
    frame.render_widget(render_help(&app.mode), rows[3]);

    let columns =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(rows[1]);

    let left = Layout::vertical([
        Constraint::Length(5), // timer
        Constraint::Length(3), // duration input
        Constraint::Min(3),    // choices
    ])
    .split(columns[0]);

    render_timer(app, frame, left[0]);
    render_duration(app, frame, left[1]);
    render_choices(app, frame, left[2]);
    render_history(app, frame, columns[1]);
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled("Choice Timer", theme::STYLE_TITLE)))
}

/// Status line: export prompt while open, otherwise the current notice.
fn render_status(app: &App) -> Paragraph<'_> {
    if let Mode::ExportPrompt { path } = &app.mode {
        return Paragraph::new(Line::from(vec![
            Span::styled("Save to: ", theme::STYLE_INTERACTIVE),
            Span::styled(path.as_str(), theme::STYLE_INPUT_ACTIVE),
            Span::styled("_", theme::STYLE_INPUT_ACTIVE),
        ]));
    }
    match &app.notice {
        Some(Notice::Info(text)) => Paragraph::new(Span::styled(text.as_str(), theme::STYLE_INFO)),
        Some(Notice::Error(text)) => {
            Paragraph::new(Span::styled(format!("Error: {}", text), theme::STYLE_ERROR))
        }
        None => Paragraph::new(""),
    }
}

/// Help line showing available keybindings for the current mode.
fn render_help(mode: &Mode) -> Paragraph<'static> {
    let help_text = match mode {
        Mode::Normal => {
            "[s] start  [p] stop  [r] reset  [t] time  [a-d] choose  [l] lap  [X] clear  [e] export  [q] quit"
        }
        Mode::EditDuration { .. } => "type seconds  [Enter] keep  [Esc] cancel",
        Mode::ExportPrompt { .. } => "edit path  [Enter] save  [Esc] cancel",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// LEFT COLUMN
// ============================================================================

fn render_timer(app: &App, frame: &mut Frame, area: Rect) {
    let running = app.countdown.is_running();
    let (status, status_style) = if running {
        ("running", theme::STYLE_RUNNING)
    } else {
        ("stopped", theme::STYLE_DIM)
    };
    let start_style = if running {
        theme::STYLE_DISABLED
    } else {
        theme::STYLE_INTERACTIVE
    };

    let lines = vec![
        Line::from(Span::styled(app.countdown.display(), theme::STYLE_CLOCK)),
        Line::from(Span::styled(status, status_style)),
        Line::from(vec![
            Span::styled("[s] Start", start_style),
            Span::raw("  "),
            Span::styled("[p] Stop", theme::STYLE_INTERACTIVE),
            Span::raw("  "),
            Span::styled("[r] Reset", theme::STYLE_INTERACTIVE),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().title("Timer"));
    frame.render_widget(paragraph, area);
}

fn render_duration(app: &App, frame: &mut Frame, area: Rect) {
    let editing = matches!(app.mode, Mode::EditDuration { .. });
    let mut spans = vec![Span::raw("Set time (seconds): ")];
    if editing {
        spans.push(Span::styled(app.duration_input.as_str(), theme::STYLE_INPUT_ACTIVE));
        spans.push(Span::styled("_", theme::STYLE_INPUT_ACTIVE));
    } else {
        spans.push(Span::styled(app.duration_input.as_str(), theme::STYLE_IMPORTANT));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::bordered());
    frame.render_widget(paragraph, area);
}

fn render_choices(app: &App, frame: &mut Frame, area: Rect) {
    let highlighted = app.highlight.map(|h| h.choice);

    let mut spans = Vec::with_capacity(Choice::ALL.len() * 2);
    for choice in Choice::ALL {
        let style = if highlighted == Some(choice) {
            theme::STYLE_HIGHLIGHT
        } else {
            theme::STYLE_CHOICE
        };
        spans.push(Span::styled(format!(" {} ", choice), style));
        spans.push(Span::raw("   "));
    }

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::bordered().title("Make your choice"));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// RIGHT COLUMN
// ============================================================================

/// History list, scrolled so the newest entry is always visible.
fn render_history(app: &App, frame: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let events = app.log.events();
    let skip = events.len().saturating_sub(visible);

    let lines: Vec<Line> = events
        .iter()
        .zip(app.log.display_lines())
        .skip(skip)
        .map(|(event, text)| match event {
            ChoiceEvent::LapSeparator => Line::from(Span::styled(text, theme::STYLE_LAP)),
            ChoiceEvent::Choice { .. } => Line::from(text),
        })
        .collect();

    let title = format!("Choice History ({})", events.len());
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(title));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
