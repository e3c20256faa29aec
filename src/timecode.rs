use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SRT timestamp encoding and decoding

// @const: Strict SRT timestamp pattern, hours may exceed two digits
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm).
///
/// Hours are not clamped to 24; a track longer than a day keeps counting up.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds.
pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let caps = TIMESTAMP_REGEX
        .captures(timestamp)
        .ok_or_else(|| SubtitleError::TimestampFormat(timestamp.to_string()))?;

    let part = |idx: usize| -> Result<u64, SubtitleError> {
        caps.get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| SubtitleError::TimestampFormat(timestamp.to_string()))
    };

    let hours = part(1)?;
    let minutes = part(2)?;
    let seconds = part(3)?;
    let millis = part(4)?;

    // Validate time components
    if minutes >= 60 || seconds >= 60 {
        return Err(SubtitleError::TimestampFormat(timestamp.to_string()));
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Convert fractional seconds to whole milliseconds.
///
/// The value is rounded to the nearest microsecond first so that binary
/// float noise (1.001 stored as 1.000999...) cannot flip a millisecond,
/// then the sub-millisecond remainder is truncated. This is the one
/// truncation rule used everywhere in the crate.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    let micros = (seconds * 1_000_000.0).round() as u64;
    micros / 1_000
}

/// Convert whole milliseconds to fractional seconds.
pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1_000.0
}
