use std::time::{Duration, Instant};

// @module: Wall-clock timing around whole operations

/// Start/stop chronometer over monotonic time.
///
/// The library core never touches this; the binary wraps the run with it
/// and reports the total at exit.
#[derive(Debug, Default)]
pub struct Chronometer {
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Chronometer {
    pub fn new() -> Self {
        Chronometer::default()
    }

    /// Start (or restart) the chronometer.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.elapsed = None;
    }

    /// Stop the chronometer, freezing the measured duration.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at {
            self.elapsed = Some(started_at.elapsed());
        }
    }

    /// Measured duration: up to now while running, frozen once stopped,
    /// zero if never started.
    pub fn duration(&self) -> Duration {
        match (self.elapsed, self.started_at) {
            (Some(elapsed), _) => elapsed,
            (None, Some(started_at)) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    /// Human-readable form of the measured duration.
    pub fn formatted_duration(&self) -> String {
        format_seconds(self.duration().as_secs())
    }
}

/// Format whole seconds as "N hours, M minutes, S seconds", omitting zero
/// components; a zero duration reads "0 seconds".
pub fn format_seconds(total_seconds: u64) -> String {
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut formatted = String::new();

    if hours > 0 {
        formatted.push_str(&format!("{} hours", hours));
    }

    if minutes > 0 {
        if !formatted.is_empty() {
            formatted.push_str(", ");
        }
        formatted.push_str(&format!("{} minutes", minutes));
    }

    if seconds > 0 || (hours == 0 && minutes == 0) {
        if !formatted.is_empty() {
            formatted.push_str(", ");
        }
        formatted.push_str(&format!("{} seconds", seconds));
    }

    formatted
}
