/*!
 * # subgen - Subtitle Generation from Speech Recognition
 *
 * A Rust library for turning timestamped speech-recognition transcript
 * fragments into SRT subtitle tracks.
 *
 * ## Features
 *
 * - Coalesce chunked transcript fragments into deduplicated subtitle entries
 * - Recover per-chunk time offsets from chunk source names
 * - Merge a freshly generated track into an existing one by time range,
 *   new content replacing whatever it overlaps
 * - Strict SRT parsing and serialization with attributable errors
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timecode`: SRT timestamp encoding and decoding
 * - `subtitle_processor`: Subtitle entries and whole-track (de)serialization
 * - `transcript_coalescer`: Chunk ingestion and fragment coalescing
 * - `track_merger`: Time-range replacement merge of two tracks
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `chronometer`: Wall-clock timing for the binary
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chronometer;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod timecode;
pub mod track_merger;
pub mod transcript_coalescer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunRequest};
pub use errors::{AppError, SubtitleError};
pub use subtitle_processor::{SubtitleEntry, SubtitleTrack};
pub use track_merger::merge_tracks;
pub use transcript_coalescer::{TranscriptChunk, TranscriptFragment, coalesce_chunks};
