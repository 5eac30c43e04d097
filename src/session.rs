use crate::metrics;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Remaining seconds at which the countdown enters its warning state.
pub const TIMER_WARNING_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Untimed; finishes only by completing the passage. Never recorded.
    Practice,
    /// Counts down from the configured duration.
    Timed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharOutcome {
    Pending,
    Correct,
    Incorrect,
}

/// One typing run against a single passage.
///
/// Sessions are values: restart and next-text build a fresh `Session` and drop
/// the old one, which is also what cancels its countdown. Keystroke counters
/// are monotonic; backspace rewinds the cursor and outcome marks only.
#[derive(Debug)]
pub struct Session {
    pub passage: String,
    chars: Vec<char>,
    pub outcomes: Vec<CharOutcome>,
    pub cursor: usize,
    pub total_keystrokes: u64,
    pub correct_keystrokes: u64,
    pub errors: u64,
    pub mode: Mode,
    pub stop_on_error: bool,
    pub duration_secs: Option<u32>,
    pub remaining_secs: Option<u32>,
    pub started_at: Option<SystemTime>,
    finished: bool,
    // (wpm, accuracy) captured at the moment of completion
    final_metrics: Option<(u32, u32)>,
}

impl Session {
    pub fn new(
        passage: String,
        mode: Mode,
        duration_secs: Option<u32>,
        stop_on_error: bool,
    ) -> Self {
        let chars: Vec<char> = passage.chars().collect();
        let duration_secs = match mode {
            Mode::Practice => None,
            Mode::Timed => duration_secs,
        };
        Self {
            outcomes: vec![CharOutcome::Pending; chars.len()],
            chars,
            passage,
            cursor: 0,
            total_keystrokes: 0,
            correct_keystrokes: 0,
            errors: 0,
            mode,
            stop_on_error,
            duration_secs,
            remaining_secs: duration_secs,
            started_at: None,
            finished: false,
            final_metrics: None,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.finished
    }

    fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(SystemTime::now());
        }
    }

    /// Idempotent; freezes the metrics so the final report equals the live
    /// values at the instant of completion.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.final_metrics = Some((
            metrics::words_per_minute(self.correct_keystrokes, self.elapsed()),
            metrics::accuracy(self.correct_keystrokes, self.total_keystrokes),
        ));
    }

    /// Apply one character keystroke. Modifier-only input never reaches this
    /// point; a finished session ignores everything.
    pub fn write(&mut self, c: char) {
        if self.finished || self.cursor >= self.chars.len() {
            return;
        }

        self.start();
        self.total_keystrokes += 1;

        if c == self.chars[self.cursor] {
            self.outcomes[self.cursor] = CharOutcome::Correct;
            self.correct_keystrokes += 1;
            self.cursor += 1;
        } else {
            self.outcomes[self.cursor] = CharOutcome::Incorrect;
            self.errors += 1;
            if !self.stop_on_error {
                self.cursor += 1;
            }
        }

        if self.cursor == self.chars.len() {
            self.finish();
        }
    }

    /// Rewind one position and clear its mark. Counters are keystroke-counted,
    /// not position-counted, so they are untouched.
    pub fn backspace(&mut self) {
        if self.finished || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.outcomes[self.cursor] = CharOutcome::Pending;
    }

    /// One-per-second countdown tick. Ignored until the first keystroke and
    /// after finishing; practice sessions have no countdown at all.
    pub fn on_tick(&mut self) {
        if !self.has_started() || self.finished {
            return;
        }
        if let Some(remaining) = self.remaining_secs {
            let remaining = remaining.saturating_sub(1);
            self.remaining_secs = Some(remaining);
            if remaining == 0 {
                self.finish();
            }
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at
            .map(|t| t.elapsed().unwrap_or(Duration::ZERO))
    }

    /// Live metric while running; the frozen completion value afterwards.
    pub fn wpm(&self) -> u32 {
        match self.final_metrics {
            Some((wpm, _)) => wpm,
            None => metrics::words_per_minute(self.correct_keystrokes, self.elapsed()),
        }
    }

    /// Live metric while running; the frozen completion value afterwards.
    pub fn accuracy(&self) -> u32 {
        match self.final_metrics {
            Some((_, accuracy)) => accuracy,
            None => metrics::accuracy(self.correct_keystrokes, self.total_keystrokes),
        }
    }

    /// Seconds consumed on the countdown clock, for the time-typed aggregate.
    pub fn seconds_used(&self) -> u32 {
        match (self.duration_secs, self.remaining_secs) {
            (Some(duration), Some(remaining)) => duration.saturating_sub(remaining),
            _ => self
                .elapsed()
                .map(|e| e.as_secs().min(u64::from(u32::MAX)) as u32)
                .unwrap_or(0),
        }
    }

    pub fn in_warning_zone(&self) -> bool {
        self.has_started() && matches!(self.remaining_secs, Some(r) if r <= TIMER_WARNING_SECS)
    }
}
