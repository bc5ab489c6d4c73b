//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: several producers feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Clock thread: one `Tick` per second while the countdown runs
//! - One-shot threads: highlight reverts
//! The event loop is the only consumer and the only code that touches
//! `App` or the terminal.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::clock::{Clock, OneShot, TICK_PERIOD};
use crate::export::write_export;
use crate::types::{AppConfig, Choice};

use super::state::{Action, App, AppEvent, Effect, Mode, Notice, Transition};
use super::update::{handle_background_event, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// While a text field is active, printable keys become `Input` so that
/// typing a path containing "a" or "q" never fires a command.
pub fn map_key(key: KeyEvent, mode: &Mode) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if !matches!(mode, Mode::Normal) {
        return match key.code {
            KeyCode::Char(c) => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        };
    }

    match key.code {
        // Countdown
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::Stop),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('t') => Some(Action::EditDuration),

        // Choices
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Choose(Choice::A)),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Action::Choose(Choice::B)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Choose(Choice::C)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Choose(Choice::D)),

        // History (clear needs capital X)
        KeyCode::Char('l') => Some(Action::AddLap),
        KeyCode::Char('X') => Some(Action::ClearHistory),
        KeyCode::Char('e') => Some(Action::Export),

        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Owns the background time sources the effects drive.
struct Effects {
    tx: mpsc::Sender<AppEvent>,
    clock: Clock<AppEvent>,
    pending_revert: Option<OneShot>,
}

/// Run the TUI until the user quits.
///
/// Sets up the terminal, spawns the key reader, and runs the event loop.
/// The terminal is restored on exit and on panic.
pub fn run(config: AppConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx.clone());

    let mut effects = Effects {
        clock: Clock::new(tx.clone(), TICK_PERIOD, AppEvent::Tick),
        tx,
        pending_revert: None,
    };

    tracing::info!("choice-timer started");

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        let transition = match event {
            AppEvent::Key(key) => match map_key(key, &app.mode) {
                Some(action) => update(&mut app, &action),
                None => continue,
            },
            AppEvent::Tick(epoch) if !effects.clock.is_current(epoch) => continue,
            background_event => handle_background_event(&mut app, background_event),
        };

        match transition {
            Transition::Render => {}
            Transition::Quit => app.should_quit = true,
            Transition::Effect(effect) => handle_effect(effect, &mut app, &mut effects),
        }
    }

    effects.clock.stop();
    if let Some(pending) = effects.pending_revert.take() {
        pending.cancel();
    }
    tracing::info!(entries = app.log.len(), "choice-timer exiting");

    restore_terminal()?;
    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Execute a side effect requested by the update layer.
fn handle_effect(effect: Effect, app: &mut App, effects: &mut Effects) {
    match effect {
        Effect::StartClock => {
            effects.clock.start();
        }
        Effect::StopClock => effects.clock.stop(),
        Effect::ScheduleRevert { token, delay } => {
            if let Some(previous) = effects.pending_revert.take() {
                previous.cancel();
            }
            effects.pending_revert = Some(OneShot::schedule(
                delay,
                effects.tx.clone(),
                AppEvent::HighlightExpired(token),
            ));
        }
        Effect::WriteExport { path, contents } => {
            app.notice = Some(match write_export(&path, &contents) {
                Ok(written) => Notice::Info(format!("Choices exported to {}", written.display())),
                Err(e) => Notice::Error(e.to_string()),
            });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
