use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::subtitle_processor::{SubtitleEntry, SubtitleTrack};
use crate::timecode;

// @module: Transcript fragment coalescing

// @const: Chunk name pattern carrying HHMMSS start and end groups
static CHUNK_OFFSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{6})_(\d{6})\.json$").unwrap());

/// One raw timestamped text unit emitted by the speech recognition step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptFragment {
    /// Start time in seconds, possibly fractional
    pub start: f64,

    /// End time in seconds, possibly fractional
    pub end: f64,

    /// Recognized text
    pub text: String,
}

// Wire shape of one transcription result document.
#[derive(Debug, Deserialize)]
struct ChunkDocument {
    segments: Vec<TranscriptFragment>,
}

/// One batch of fragments from a single transcription invocation.
#[derive(Debug, Clone)]
pub struct TranscriptChunk {
    /// Name of the source document, used to recover the time offset
    pub source_name: String,

    /// Fragments in recognition order
    pub fragments: Vec<TranscriptFragment>,
}

impl TranscriptChunk {
    pub fn new(source_name: String, fragments: Vec<TranscriptFragment>) -> Self {
        TranscriptChunk {
            source_name,
            fragments,
        }
    }

    /// Deserialize a transcription result document (`{"segments": [...]}`).
    pub fn from_json(source_name: &str, json: &str) -> Result<Self, serde_json::Error> {
        let document: ChunkDocument = serde_json::from_str(json)?;
        Ok(TranscriptChunk {
            source_name: source_name.to_string(),
            fragments: document.segments,
        })
    }

    /// Offset in seconds recovered from the source name, if it carries one.
    pub fn offset_seconds(&self) -> Option<u64> {
        extract_offset(&self.source_name)
    }
}

/// Extract the time offset encoded in a chunk source name.
///
/// Names ending in `HHMMSS_HHMMSS.json` carry the chunk's position in the
/// full audio timeline; the first group is its start. A name without the
/// pattern yields no offset, which is fine for single-chunk runs.
pub fn extract_offset(source_name: &str) -> Option<u64> {
    match CHUNK_OFFSET_REGEX.captures(source_name) {
        Some(caps) => {
            let time_segment: u64 = caps[1].parse().ok()?;
            let (hours, remainder) = (time_segment / 10_000, time_segment % 10_000);
            let (minutes, seconds) = (remainder / 100, remainder % 100);
            Some(hours * 3_600 + minutes * 60 + seconds)
        }
        None => {
            debug!(
                "Chunk name '{}' does not match the offset pattern, no offset applied",
                source_name
            );
            None
        }
    }
}

/// Coalesce chunked transcript fragments into a subtitle track.
///
/// Each chunk's offset is applied to its fragments, then all fragments are
/// concatenated in chunk order (no time re-sorting) and walked once:
/// consecutive fragments with identical text collapse into a single entry
/// spanning from the first fragment's start to the last one's end. Speech
/// recognition emits the same phrase across several overlapping
/// micro-fragments while a live transcript stabilizes; without this pass
/// the track would be flooded with near-duplicate entries.
pub fn coalesce_chunks(chunks: &[TranscriptChunk]) -> SubtitleTrack {
    let mut fragments: Vec<TranscriptFragment> = Vec::new();
    for chunk in chunks {
        let offset = chunk.offset_seconds().unwrap_or(0) as f64;
        for fragment in &chunk.fragments {
            fragments.push(TranscriptFragment {
                start: fragment.start + offset,
                end: fragment.end + offset,
                text: fragment.text.clone(),
            });
        }
    }

    let mut entries: Vec<SubtitleEntry> = Vec::new();
    let mut current_text: Option<String> = None;
    let mut run_start = 0.0_f64;
    let mut run_end = 0.0_f64;

    for fragment in fragments {
        match &current_text {
            // A differing text closes the current run and starts a new one
            Some(text) if *text != fragment.text => {
                entries.push(SubtitleEntry::new(
                    entries.len() + 1,
                    timecode::seconds_to_ms(run_start),
                    timecode::seconds_to_ms(run_end),
                    text.clone(),
                ));
                current_text = Some(fragment.text);
                run_start = fragment.start;
                run_end = fragment.end;
            }
            // Identical text extends the run's end, start stays put
            Some(_) => {
                run_end = fragment.end;
            }
            None => {
                current_text = Some(fragment.text);
                run_start = fragment.start;
                run_end = fragment.end;
            }
        }
    }

    // Close the final open run
    if let Some(text) = current_text {
        entries.push(SubtitleEntry::new(
            entries.len() + 1,
            timecode::seconds_to_ms(run_start),
            timecode::seconds_to_ms(run_end),
            text,
        ));
    }

    SubtitleTrack::from_entries(entries)
}
