use std::fmt;

use crate::errors::SubtitleError;
use crate::timecode;

// @module: Subtitle entries and whole-track (de)serialization

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse one SRT block into an entry.
    ///
    /// A block is the index line, the time-range line, and zero or more
    /// text lines. The index must be numeric; a non-numeric index line
    /// usually means the block boundaries slipped, so it is rejected
    /// rather than carried along as opaque text.
    pub fn from_block(block: &str) -> Result<Self, SubtitleError> {
        let lines: Vec<&str> = block.trim().lines().collect();

        if lines.len() < 2 {
            return Err(SubtitleError::MalformedBlock(format!(
                "expected an index line and a time range line, got {} line(s)",
                lines.len()
            )));
        }

        let seq_num: usize = lines[0].trim().parse().map_err(|_| {
            SubtitleError::MalformedBlock(format!(
                "sequence number '{}' is not numeric",
                lines[0].trim()
            ))
        })?;

        let range: Vec<&str> = lines[1].split(" --> ").collect();
        if range.len() != 2 {
            return Err(SubtitleError::MalformedBlock(format!(
                "time range line '{}' does not split into start and end",
                lines[1]
            )));
        }

        let start_time_ms = timecode::parse_timestamp(range[0].trim())?;
        let end_time_ms = timecode::parse_timestamp(range[1].trim())?;
        let text = lines[2..].join("\n").trim().to_string();

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        })
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_timestamp(self.end_time_ms)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)
    }
}

/// An ordered collection of subtitle entries.
///
/// After a merge the entries are ordered by start time, free of overlaps,
/// and numbered contiguously from 1. Freshly coalesced tracks carry the
/// same numbering but inherit whatever timing the transcript fragments had.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    pub fn new() -> Self {
        SubtitleTrack {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleTrack { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse SRT text into a track.
    ///
    /// Blocks are separated by blank lines; empty segments are discarded.
    /// A malformed block fails the whole parse, identified by its 1-based
    /// position, instead of being silently skipped.
    pub fn parse(content: &str) -> Result<Self, SubtitleError> {
        let mut entries = Vec::new();

        for (position, block) in content
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .enumerate()
        {
            let entry = SubtitleEntry::from_block(block).map_err(|e| {
                // Attach the block position without stacking prefixes
                let reason = match e {
                    SubtitleError::MalformedBlock(reason) => reason,
                    other => other.to_string(),
                };
                SubtitleError::MalformedBlock(format!("block {}: {}", position + 1, reason))
            })?;
            entries.push(entry);
        }

        Ok(SubtitleTrack { entries })
    }

    /// Render the track as SRT text: blocks joined by blank lines,
    /// trimmed once for the whole track.
    pub fn serialize(&self) -> String {
        let blocks: Vec<String> = self.entries.iter().map(|entry| entry.to_string()).collect();
        blocks.join("\n\n").trim().to_string()
    }

    /// Stably sort entries by start time.
    pub fn sort_by_start(&mut self) {
        self.entries.sort_by_key(|entry| entry.start_time_ms);
    }

    /// Renumber entries to a contiguous 1-based sequence in current order.
    pub fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}
