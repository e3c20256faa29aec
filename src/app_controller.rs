use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleTrack;
use crate::track_merger;
use crate::transcript_coalescer::{self, TranscriptChunk};

// @module: Application controller for subtitle generation

/// Request describing one generation run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Directory holding the transcription chunk JSON files
    pub chunk_dir: PathBuf,

    /// Output SRT file path, or a directory to place the default file in
    pub output: PathBuf,

    /// Merge into an existing output file instead of replacing it
    pub merge: bool,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Generate SRT text from transcription chunks.
    ///
    /// Pure: coalesces the fragments and serializes the resulting track.
    pub fn generate_track(chunks: &[TranscriptChunk]) -> String {
        transcript_coalescer::coalesce_chunks(chunks).serialize()
    }

    /// Merge freshly generated SRT text into existing SRT text.
    ///
    /// Pure: parses both tracks, replaces time-overlapping entries of the
    /// existing one, and serializes the result. A parse failure says which
    /// of the two inputs (and which block) was at fault.
    pub fn merge_into_existing(existing: &str, new: &str) -> Result<String> {
        let existing_track = SubtitleTrack::parse(existing)
            .context("Failed to parse the existing subtitle track")?;
        let new_track = SubtitleTrack::parse(new)
            .context("Failed to parse the generated subtitle track")?;

        Ok(track_merger::merge_tracks(&existing_track, &new_track).serialize())
    }

    /// Run the main workflow: discover chunk files, generate the track,
    /// merge with the existing output when requested, write the result.
    ///
    /// All fallible work happens on in-memory strings before the output
    /// file is touched, and the final write goes through a temporary file,
    /// so a failure anywhere leaves any existing output untouched.
    pub fn run(&self, request: &RunRequest) -> Result<()> {
        if !FileManager::dir_exists(&request.chunk_dir) {
            return Err(anyhow!(
                "Chunk directory does not exist: {:?}",
                request.chunk_dir
            ));
        }

        let output_path =
            FileManager::validate_output_path(&request.output, &self.config.output_file_name)?;

        let chunk_files = FileManager::find_chunk_files(&request.chunk_dir)?;
        info!(
            "Found {} speech recognition chunk file(s) for processing",
            chunk_files.len()
        );

        let chunks = Self::load_chunks(&chunk_files)?;
        let mut srt_content = Self::generate_track(&chunks);
        debug!("Generated {} subtitle characters", srt_content.len());

        if request.merge && FileManager::file_exists(&output_path) {
            info!("Merging generated subtitles with existing ones");
            let existing = FileManager::read_to_string(&output_path)?;
            srt_content = Self::merge_into_existing(&existing, &srt_content)
                .with_context(|| format!("Failed to merge into: {:?}", output_path))?;
        }

        info!("Writing output file: {:?}", output_path);
        FileManager::write_atomic(&output_path, &srt_content)?;

        Ok(())
    }

    // Read and deserialize every chunk file; a failure names the file.
    fn load_chunks(paths: &[PathBuf]) -> Result<Vec<TranscriptChunk>> {
        let mut chunks = Vec::with_capacity(paths.len());

        for path in paths {
            let content = FileManager::read_to_string(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let chunk = TranscriptChunk::from_json(&name, &content)
                .with_context(|| format!("Failed to parse chunk file: {:?}", path))?;
            chunks.push(chunk);
        }

        Ok(chunks)
    }
}
