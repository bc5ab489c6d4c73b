//! Append-only record of choices and lap separators.
//!
//! Pure data: the log produces display lines and export text, it never
//! writes files itself (see `export`).

use chrono::{Local, NaiveTime, Timelike};

use crate::error::{Error, Result};
use crate::types::{Choice, ChoiceEvent, EXPORT_HEADER, LAP_DIVIDER};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceLog {
    events: Vec<ChoiceEvent>,
}

impl ChoiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a choice stamped with the current local time.
    pub fn record_choice(&mut self, choice: Choice) {
        let now = Local::now().time();
        self.record_choice_at(choice, now.with_nanosecond(0).unwrap_or(now));
    }

    /// Append a choice with an explicit timestamp.
    pub fn record_choice_at(&mut self, choice: Choice, at: NaiveTime) {
        tracing::info!(%choice, at = %at.format("%H:%M:%S"), "choice recorded");
        self.events.push(ChoiceEvent::Choice { choice, at });
    }

    pub fn add_lap_separator(&mut self) {
        tracing::info!(position = self.events.len(), "lap separator added");
        self.events.push(ChoiceEvent::LapSeparator);
    }

    /// Drop every event. Irreversible.
    pub fn clear(&mut self) {
        tracing::info!(discarded = self.events.len(), "history cleared");
        self.events.clear();
    }

    pub fn events(&self) -> &[ChoiceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Lines as shown in the history list: `[HH:MM:SS] A` or the divider.
    pub fn display_lines(&self) -> Vec<String> {
        self.events.iter().map(display_line).collect()
    }

    /// Plain-text export: header line, then one line per event.
    ///
    /// Choices are reduced to their label; timestamps are display-only.
    pub fn export_text(&self) -> Result<String> {
        if self.events.is_empty() {
            return Err(Error::NoData);
        }
        let mut lines = Vec::with_capacity(self.events.len() + 1);
        lines.push(EXPORT_HEADER);
        lines.extend(self.events.iter().map(|event| match event {
            ChoiceEvent::Choice { choice, .. } => choice.label(),
            ChoiceEvent::LapSeparator => LAP_DIVIDER,
        }));
        Ok(lines.join("\n"))
    }
}

fn display_line(event: &ChoiceEvent) -> String {
    match event {
        ChoiceEvent::Choice { choice, at } => format!("[{}] {}", at.format("%H:%M:%S"), choice),
        ChoiceEvent::LapSeparator => LAP_DIVIDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn record_choice_appends_in_call_order() {
        let mut log = ChoiceLog::new();
        for (i, choice) in [Choice::C, Choice::A, Choice::A, Choice::D].into_iter().enumerate() {
            log.record_choice(choice);
            assert_eq!(log.len(), i + 1);
        }
        let order: Vec<Choice> = log
            .events()
            .iter()
            .filter_map(|e| match e {
                ChoiceEvent::Choice { choice, .. } => Some(*choice),
                ChoiceEvent::LapSeparator => None,
            })
            .collect();
        assert_eq!(order, vec![Choice::C, Choice::A, Choice::A, Choice::D]);
    }

    #[test]
    fn recorded_time_has_second_resolution() {
        let mut log = ChoiceLog::new();
        log.record_choice(Choice::B);
        match &log.events()[0] {
            ChoiceEvent::Choice { at, .. } => assert_eq!(at.nanosecond(), 0),
            other => panic!("Expected a choice, got {:?}", other),
        }
    }

    #[test]
    fn export_choice_lap_choice() {
        let mut log = ChoiceLog::new();
        log.record_choice(Choice::A);
        log.add_lap_separator();
        log.record_choice(Choice::B);
        assert_eq!(
            log.export_text().unwrap(),
            "My Choices:\nA\n________________\nB"
        );
    }

    #[test]
    fn export_drops_timestamps() {
        let mut log = ChoiceLog::new();
        log.record_choice(Choice::A);
        log.record_choice(Choice::B);
        log.add_lap_separator();
        log.record_choice(Choice::C);
        assert_eq!(
            log.export_text().unwrap(),
            "My Choices:\nA\nB\n________________\nC"
        );
    }

    #[test]
    fn export_of_empty_log_is_no_data() {
        assert!(matches!(ChoiceLog::new().export_text(), Err(Error::NoData)));
    }

    #[test]
    fn export_after_clear_is_no_data() {
        let mut log = ChoiceLog::new();
        log.record_choice(Choice::D);
        log.add_lap_separator();
        log.clear();
        assert!(log.is_empty());
        assert!(matches!(log.export_text(), Err(Error::NoData)));
    }

    #[test]
    fn lap_only_log_still_exports() {
        let mut log = ChoiceLog::new();
        log.add_lap_separator();
        assert_eq!(log.export_text().unwrap(), "My Choices:\n________________");
    }

    #[test]
    fn display_lines_keep_timestamps() {
        let mut log = ChoiceLog::new();
        log.record_choice_at(Choice::A, time(9, 5, 7));
        log.add_lap_separator();
        log.record_choice_at(Choice::D, time(14, 30, 0));
        assert_eq!(
            log.display_lines(),
            vec![
                "[09:05:07] A".to_string(),
                "________________".to_string(),
                "[14:30:00] D".to_string(),
            ]
        );
    }
}
