//! State transitions: (App, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal
//! or threads: anything effectful comes back as an `Effect`. Each mode
//! defines which actions it accepts; everything else is a no-op.

use std::path::PathBuf;

use crate::countdown::TickOutcome;

use super::state::{Action, App, AppEvent, Effect, Highlight, Mode, Notice, Transition};

/// Apply a user action.
pub fn update(app: &mut App, action: &Action) -> Transition {
    match std::mem::take(&mut app.mode) {
        Mode::Normal => update_normal(app, action),
        Mode::EditDuration { previous } => update_edit_duration(app, previous, action),
        Mode::ExportPrompt { path } => update_export_prompt(app, path, action),
    }
}

/// Apply an event from a background producer.
///
/// Ticks must already be filtered to the current clock epoch by the
/// caller; a tick that arrives after a stop is still harmless because
/// the countdown ignores ticks while idle.
pub fn handle_background_event(app: &mut App, event: AppEvent) -> Transition {
    match event {
        AppEvent::Tick(_) => match app.countdown.tick() {
            TickOutcome::Finished => {
                app.notice = Some(Notice::Info("Time's up!".to_string()));
                Transition::Effect(Effect::StopClock)
            }
            TickOutcome::Counting(_) | TickOutcome::Ignored => Transition::Render,
        },
        AppEvent::HighlightExpired(token) => {
            if app.highlight.is_some_and(|h| h.token == token) {
                app.highlight = None;
            }
            Transition::Render
        }
        // Keys are routed through map_key → update, never here.
        AppEvent::Key(_) => Transition::Render,
    }
}

// ============================================================================
// PER-MODE HANDLERS
// ============================================================================

/// Normal mode: every command on the surface.
fn update_normal(app: &mut App, action: &Action) -> Transition {
    match action {
        Action::Start => start(app),
        Action::Stop => {
            if app.countdown.is_running() {
                app.countdown.stop();
                Transition::Effect(Effect::StopClock)
            } else {
                Transition::Render
            }
        }
        Action::Reset => {
            app.countdown.reset();
            app.duration_input = app.config.default_duration.to_string();
            Transition::Effect(Effect::StopClock)
        }
        Action::Choose(choice) => {
            app.log.record_choice(*choice);
            let token = app.next_highlight_token();
            app.highlight = Some(Highlight { choice: *choice, token });
            Transition::Effect(Effect::ScheduleRevert {
                token,
                delay: app.config.highlight,
            })
        }
        Action::AddLap => {
            app.log.add_lap_separator();
            Transition::Render
        }
        Action::ClearHistory => {
            app.log.clear();
            Transition::Render
        }
        Action::Export => {
            // Check before prompting so an empty log never opens the prompt.
            match app.log.export_text() {
                Ok(_) => {
                    app.notice = None;
                    app.mode = Mode::ExportPrompt {
                        path: app.config.default_export_path().display().to_string(),
                    };
                }
                Err(e) => app.notice = Some(Notice::Error(e.to_string())),
            }
            Transition::Render
        }
        Action::EditDuration => {
            app.mode = Mode::EditDuration {
                previous: app.duration_input.clone(),
            };
            Transition::Render
        }
        Action::Cancel => {
            app.notice = None;
            Transition::Render
        }
        Action::Quit => Transition::Quit,
        Action::Input(_) | Action::Backspace | Action::Confirm => Transition::Render,
    }
}

fn start(app: &mut App) -> Transition {
    if app.countdown.is_running() {
        return Transition::Render;
    }
    match app.countdown.start(&app.duration_input) {
        Ok(()) => {
            app.notice = None;
            Transition::Effect(Effect::StartClock)
        }
        Err(e) => {
            tracing::warn!(error = %e, "start rejected");
            app.notice = Some(Notice::Error(e.to_string()));
            Transition::Render
        }
    }
}

/// Duration field: free text until Enter (keep) or Esc (restore).
fn update_edit_duration(app: &mut App, previous: String, action: &Action) -> Transition {
    match action {
        Action::Input(c) => {
            app.duration_input.push(*c);
            app.mode = Mode::EditDuration { previous };
        }
        Action::Backspace => {
            app.duration_input.pop();
            app.mode = Mode::EditDuration { previous };
        }
        Action::Confirm => {}
        Action::Cancel => app.duration_input = previous,
        Action::Quit => return Transition::Quit,
        _ => app.mode = Mode::EditDuration { previous },
    }
    Transition::Render
}

/// Export prompt: edit the destination, Enter writes, Esc abandons.
fn update_export_prompt(app: &mut App, mut path: String, action: &Action) -> Transition {
    match action {
        Action::Input(c) => {
            path.push(*c);
            app.mode = Mode::ExportPrompt { path };
            Transition::Render
        }
        Action::Backspace => {
            path.pop();
            app.mode = Mode::ExportPrompt { path };
            Transition::Render
        }
        Action::Confirm => {
            let trimmed = path.trim();
            if trimmed.is_empty() {
                app.notice = Some(Notice::Error("enter a file name to export to".to_string()));
                app.mode = Mode::ExportPrompt { path };
                return Transition::Render;
            }
            match app.log.export_text() {
                Ok(contents) => Transition::Effect(Effect::WriteExport {
                    path: PathBuf::from(trimmed),
                    contents,
                }),
                Err(e) => {
                    app.notice = Some(Notice::Error(e.to_string()));
                    Transition::Render
                }
            }
        }
        Action::Cancel => Transition::Render,
        Action::Quit => Transition::Quit,
        _ => {
            app.mode = Mode::ExportPrompt { path };
            Transition::Render
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
