//! Solve statistics.

use std::time::Duration;

/// Aggregate statistics over all recorded solves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Fastest solve.
    pub best_time: Option<Duration>,
    /// Most recent solve.
    pub last_time: Option<Duration>,
    /// Mean of all solve times; zero before the first solve.
    pub average_time: Duration,
    pub total_solves: u32,
    /// Number of moves in the most recent solve.
    pub last_move_count: u32,
}

impl Stats {
    /// Folds one solve into the running totals.
    pub fn record_solve(&mut self, time: Duration, move_count: u32) {
        self.best_time = Some(match self.best_time {
            Some(best) => best.min(time),
            None => time,
        });
        self.last_time = Some(time);
        self.average_time = if self.total_solves == 0 {
            time
        } else {
            (self.average_time * self.total_solves + time) / (self.total_solves + 1)
        };
        self.total_solves += 1;
        self.last_move_count = move_count;
    }

    /// Returns the average, or `None` before the first solve.
    pub fn average(&self) -> Option<Duration> {
        (self.total_solves > 0).then_some(self.average_time)
    }
}

/// Formats a duration as `mm:ss.cc`.
pub fn format_time(time: Duration) -> String {
    let centis = time.as_millis() / 10;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    let hundredths = centis % 100;
    format!("{minutes:02}:{seconds:02}.{hundredths:02}")
}

/// Formats an optional duration, showing `-` when absent.
pub fn format_optional_time(time: Option<Duration>) -> String {
    time.map_or_else(|| "-".to_string(), format_time)
}
