/*!
 * End-to-end tests for the generation and merge workflow
 */

use std::fs;

use anyhow::Result;
use subgen::app_config::Config;
use subgen::app_controller::{Controller, RunRequest};

use crate::common;

/// Test generating a track from chunk files with offset-carrying names
#[test]
fn test_run_withOffsetChunks_shouldGenerateAlignedTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;

    // Two chunks covering 0-4s and 4-8s of the timeline; the recognizer
    // reports times relative to each chunk
    common::create_chunk_file(
        &chunk_dir,
        "segment_000000_000004.json",
        &[(0.0, 1.0, "hello"), (1.0, 2.0, "hello")],
    )?;
    common::create_chunk_file(
        &chunk_dir,
        "segment_000004_000008.json",
        &[(0.0, 1.5, "world")],
    )?;

    let output = temp_dir.path().join("movie.srt");
    let controller = Controller::new_for_test()?;
    controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: false,
    })?;

    let written = fs::read_to_string(&output)?;
    let expected = "1\n00:00:00,000 --> 00:00:02,000\nhello\n\n\n2\n00:00:04,000 --> 00:00:05,500\nworld";
    assert_eq!(written, expected);

    Ok(())
}

/// Test that a directory output resolves to the configured default name
#[test]
fn test_run_withDirectoryOutput_shouldUseDefaultFileName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_chunk_file(&chunk_dir, "chunk.json", &[(0.0, 1.0, "hi")])?;

    let controller = Controller::with_config(Config::default())?;
    controller.run(&RunRequest {
        chunk_dir,
        output: temp_dir.path().to_path_buf(),
        merge: false,
    })?;

    let written = fs::read_to_string(temp_dir.path().join("output.srt"))?;
    assert!(written.contains("hi"));

    Ok(())
}

/// Test merging freshly generated subtitles into an existing track
#[test]
fn test_run_withMergeRequested_shouldReplaceOverlappedEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_chunk_file(&chunk_dir, "chunk.json", &[(2.0, 3.0, "B")])?;

    let output = temp_dir.path().to_path_buf().join("movie.srt");
    fs::write(&output, "1\n00:00:00,000 --> 00:00:05,000\nA")?;

    let controller = Controller::new_for_test()?;
    controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: true,
    })?;

    let written = fs::read_to_string(&output)?;
    assert_eq!(written, "1\n00:00:02,000 --> 00:00:03,000\nB");

    Ok(())
}

/// Test that merging preserves existing entries outside the new time ranges
#[test]
fn test_run_withMergeAndDisjointRanges_shouldPreserveExisting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_chunk_file(&chunk_dir, "chunk.json", &[(5.0, 6.0, "B")])?;

    let output = temp_dir.path().join("movie.srt");
    fs::write(
        &output,
        "1\n00:00:00,000 --> 00:00:02,000\nA\n\n2\n00:00:10,000 --> 00:00:12,000\nC",
    )?;

    let controller = Controller::new_for_test()?;
    controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: true,
    })?;

    let written = fs::read_to_string(&output)?;
    let texts: Vec<&str> = written
        .lines()
        .filter(|line| ["A", "B", "C"].contains(line))
        .collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
    assert!(written.contains("1\n00:00:00,000"));
    assert!(written.contains("2\n00:00:05,000"));
    assert!(written.contains("3\n00:00:10,000"));

    Ok(())
}

/// Test that without the merge flag an existing output is replaced outright
#[test]
fn test_run_withoutMerge_shouldOverwriteExisting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_chunk_file(&chunk_dir, "chunk.json", &[(0.0, 1.0, "fresh")])?;

    let output = temp_dir.path().join("movie.srt");
    fs::write(&output, "1\n00:00:00,000 --> 00:00:05,000\nstale")?;

    let controller = Controller::new_for_test()?;
    controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: false,
    })?;

    let written = fs::read_to_string(&output)?;
    assert!(written.contains("fresh"));
    assert!(!written.contains("stale"));

    Ok(())
}

/// Test that a malformed chunk file fails the run, names the file,
/// and leaves the existing output untouched
#[test]
fn test_run_withMalformedChunk_shouldFailAndKeepExistingOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_test_file(&chunk_dir, "broken.json", "not json at all")?;

    let output = temp_dir.path().join("movie.srt");
    let existing = "1\n00:00:00,000 --> 00:00:05,000\nA";
    fs::write(&output, existing)?;

    let controller = Controller::new_for_test()?;
    let result = controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: true,
    });

    let err = result.unwrap_err();
    assert!(
        format!("{:#}", err).contains("broken.json"),
        "error should name the chunk file, got: {:#}",
        err
    );
    assert_eq!(fs::read_to_string(&output)?, existing);

    Ok(())
}

/// Test that a malformed existing track fails the merge and is not rewritten
#[test]
fn test_run_withMalformedExistingTrack_shouldFailAndKeepFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chunk_dir = temp_dir.path().join("chunks");
    fs::create_dir(&chunk_dir)?;
    common::create_chunk_file(&chunk_dir, "chunk.json", &[(0.0, 1.0, "hi")])?;

    let output = temp_dir.path().join("movie.srt");
    let existing = "this is not an SRT document";
    fs::write(&output, existing)?;

    let controller = Controller::new_for_test()?;
    let result = controller.run(&RunRequest {
        chunk_dir,
        output: output.clone(),
        merge: true,
    });

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&output)?, existing);

    Ok(())
}

/// Test that a missing chunk directory is reported up front
#[test]
fn test_run_withMissingChunkDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::new_for_test()?;
    let result = controller.run(&RunRequest {
        chunk_dir: temp_dir.path().join("nowhere"),
        output: temp_dir.path().to_path_buf(),
        merge: false,
    });

    assert!(result.is_err());

    Ok(())
}

/// Test the pure operation surface without touching the file system
#[test]
fn test_pure_operations_withGeneratedTrack_shouldMergeLikeTheWorkflow() -> Result<()> {
    use subgen::transcript_coalescer::{TranscriptChunk, TranscriptFragment};

    let chunks = vec![TranscriptChunk::new(
        "chunk.json".to_string(),
        vec![TranscriptFragment {
            start: 2.0,
            end: 3.0,
            text: "B".to_string(),
        }],
    )];

    let generated = Controller::generate_track(&chunks);
    assert_eq!(generated, "1\n00:00:02,000 --> 00:00:03,000\nB");

    let existing = "1\n00:00:00,000 --> 00:00:05,000\nA";
    let merged = Controller::merge_into_existing(existing, &generated)?;
    assert_eq!(merged, "1\n00:00:02,000 --> 00:00:03,000\nB");

    Ok(())
}
