//! Countdown controller: the single owner of timer state.
//!
//! Both foreground commands and background ticks go through the methods
//! here; nothing else touches `remaining` or `running`. Pure state, no
//! threads. The clock thread only produces events, it never calls in.

use crate::error::{Error, Result};

/// Outcome of applying one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the tick had no effect.
    Ignored,
    /// Still running with this many seconds left.
    Counting(u64),
    /// Reached zero on this tick. Reported once per run.
    Finished,
}

/// Remaining seconds plus run status.
///
/// Invariant: `running` is false whenever `remaining == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    running: bool,
    reset_to: u64,
}

impl Countdown {
    /// Idle at 00:00. `reset_to` is the value `reset()` restores.
    pub fn new(reset_to: u64) -> Self {
        Countdown {
            remaining: 0,
            running: false,
            reset_to,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin counting down from the duration in `input`.
    ///
    /// Ignored while already running. On a parse failure or a
    /// non-positive value the state is left untouched.
    pub fn start(&mut self, input: &str) -> Result<()> {
        if self.running {
            return Ok(());
        }
        let secs = parse_duration(input)?;
        self.remaining = secs;
        self.running = true;
        tracing::info!(secs, "countdown started");
        Ok(())
    }

    /// Apply one elapsed second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            tracing::info!("countdown finished");
            TickOutcome::Finished
        } else {
            TickOutcome::Counting(self.remaining)
        }
    }

    /// Pause. Remaining time is kept; no-op when idle.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::info!(remaining = self.remaining, "countdown stopped");
        }
    }

    /// Stop and restore the default duration.
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.reset_to;
        tracing::info!(remaining = self.remaining, "countdown reset");
    }

    /// Remaining time as zero-padded `MM:SS`.
    pub fn display(&self) -> String {
        format_mmss(self.remaining)
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse a duration field into a positive number of seconds.
pub fn parse_duration(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let value: i64 = trimmed.parse().map_err(|_| Error::InvalidDuration {
        input: input.to_string(),
        reason: "enter a whole number of seconds",
    })?;
    if value <= 0 {
        return Err(Error::InvalidDuration {
            input: input.to_string(),
            reason: "duration must be greater than zero",
        });
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(countdown: &mut Countdown, ticks: u64) -> usize {
        (0..ticks)
            .map(|_| countdown.tick())
            .filter(|o| *o == TickOutcome::Finished)
            .count()
    }

    #[test]
    fn starts_idle_at_zero() {
        let countdown = Countdown::new(60);
        assert_eq!(countdown.remaining(), 0);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "00:00");
    }

    #[test]
    fn full_run_finishes_exactly_once() {
        for d in [1u64, 2, 5, 59, 61, 600] {
            let mut countdown = Countdown::new(60);
            countdown.start(&d.to_string()).unwrap();
            assert_eq!(run_to_end(&mut countdown, d), 1, "duration {}", d);
            assert_eq!(countdown.remaining(), 0);
            assert!(!countdown.is_running());
        }
    }

    #[test]
    fn five_second_run_displays_zero() {
        let mut countdown = Countdown::new(60);
        countdown.start("5").unwrap();
        for _ in 0..5 {
            countdown.tick();
        }
        assert_eq!(countdown.display(), "00:00");
        assert!(!countdown.is_running());
    }

    #[test]
    fn extra_ticks_after_finish_are_ignored() {
        let mut countdown = Countdown::new(60);
        countdown.start("1").unwrap();
        assert_eq!(countdown.tick(), TickOutcome::Finished);
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn tick_reports_remaining_while_counting() {
        let mut countdown = Countdown::new(60);
        countdown.start("3").unwrap();
        assert_eq!(countdown.tick(), TickOutcome::Counting(2));
        assert_eq!(countdown.tick(), TickOutcome::Counting(1));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let mut countdown = Countdown::new(60);
        let err = countdown.start("-3").unwrap_err();
        assert!(matches!(err, Error::InvalidDuration { .. }));
        assert_eq!(countdown.remaining(), 0);
        assert!(!countdown.is_running());
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let mut countdown = Countdown::new(60);
        assert!(matches!(
            countdown.start("abc"),
            Err(Error::InvalidDuration { .. })
        ));
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(parse_duration("0").is_err());
    }

    #[test]
    fn rejected_start_keeps_paused_value() {
        let mut countdown = Countdown::new(60);
        countdown.start("10").unwrap();
        countdown.tick();
        countdown.stop();
        assert!(countdown.start("nope").is_err());
        assert_eq!(countdown.remaining(), 9);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        assert_eq!(parse_duration("  42 ").unwrap(), 42);
    }

    #[test]
    fn stop_pauses_without_resetting() {
        let mut countdown = Countdown::new(60);
        countdown.start("10").unwrap();
        countdown.tick();
        countdown.tick();
        countdown.stop();
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining(), 8);
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.remaining(), 8);
    }

    #[test]
    fn stop_is_idempotent_when_idle() {
        let mut countdown = Countdown::new(60);
        countdown.stop();
        countdown.stop();
        assert_eq!(countdown, Countdown::new(60));
    }

    #[test]
    fn stop_then_reset_yields_default() {
        let mut countdown = Countdown::new(60);
        countdown.start("10").unwrap();
        countdown.tick();
        countdown.stop();
        countdown.reset();
        assert_eq!(countdown.remaining(), 60);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "01:00");
    }

    #[test]
    fn reset_while_running_stops() {
        let mut countdown = Countdown::new(90);
        countdown.start("10").unwrap();
        countdown.reset();
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining(), 90);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut countdown = Countdown::new(60);
        countdown.start("10").unwrap();
        countdown.tick();
        countdown.start("500").unwrap();
        assert_eq!(countdown.remaining(), 9);
    }

    #[test]
    fn format_pads_and_does_not_wrap_minutes() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(9), "00:09");
        assert_eq!(format_mmss(60), "01:00");
        assert_eq!(format_mmss(3599), "59:59");
        assert_eq!(format_mmss(6000), "100:00");
    }
}
