/*!
 * Tests for file and directory utilities
 */

use anyhow::Result;
use subgen::file_utils::FileManager;

use crate::common;

/// Test atomic write followed by read
#[test]
fn test_write_atomic_withContent_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("output.srt");

    FileManager::write_atomic(&path, "subtitle content")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "subtitle content");

    Ok(())
}

/// Test that an atomic write replaces previous content completely
#[test]
fn test_write_atomic_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("output.srt");

    FileManager::write_atomic(&path, "the original, much longer content")?;
    FileManager::write_atomic(&path, "short")?;

    assert_eq!(FileManager::read_to_string(&path)?, "short");

    Ok(())
}

/// Test chunk file discovery ordering and filtering
#[test]
fn test_find_chunk_files_withMixedDirectory_shouldReturnSortedJsonFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "segment_000200_000300.json", "{}")?;
    common::create_test_file(&dir, "segment_000000_000100.json", "{}")?;
    common::create_test_file(&dir, "notes.txt", "ignore me")?;
    common::create_test_file(&dir, "segment_000100_000200.json", "{}")?;

    let files = FileManager::find_chunk_files(&dir)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "segment_000000_000100.json",
            "segment_000100_000200.json",
            "segment_000200_000300.json",
        ]
    );

    Ok(())
}

/// Test that discovery does not descend into subdirectories
#[test]
fn test_find_chunk_files_withNestedDirectory_shouldStayFlat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "top.json", "{}")?;
    let nested = dir.join("nested");
    FileManager::ensure_dir(&nested)?;
    common::create_test_file(&nested, "deep.json", "{}")?;

    let files = FileManager::find_chunk_files(&dir)?;
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("top.json"));

    Ok(())
}

/// Test output path validation for a directory argument
#[test]
fn test_validate_output_path_withDirectory_shouldAppendDefaultName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let resolved = FileManager::validate_output_path(temp_dir.path(), "output.srt")?;
    assert_eq!(resolved, temp_dir.path().join("output.srt"));

    Ok(())
}

/// Test output path validation for a file argument
#[test]
fn test_validate_output_path_withSrtFile_shouldAcceptIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("movie.srt");

    let resolved = FileManager::validate_output_path(&target, "output.srt")?;
    assert_eq!(resolved, target);

    Ok(())
}

/// Test output path validation failures
#[test]
fn test_validate_output_path_withInvalidTargets_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    // Not an .srt file
    assert!(
        FileManager::validate_output_path(&temp_dir.path().join("movie.txt"), "output.srt")
            .is_err()
    );

    // Parent directory does not exist
    assert!(
        FileManager::validate_output_path(
            &temp_dir.path().join("missing").join("movie.srt"),
            "output.srt"
        )
        .is_err()
    );

    // Empty path
    assert!(FileManager::validate_output_path("", "output.srt").is_err());

    Ok(())
}

/// Test reading a subtitle fixture back
#[test]
fn test_read_to_string_withTrackFixture_shouldReadContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_track(&temp_dir.path().to_path_buf(), "test.srt")?;

    let content = FileManager::read_to_string(&path)?;
    assert!(content.contains("This is a test subtitle."));

    // A missing file names the path in the error
    let err = FileManager::read_to_string(temp_dir.path().join("missing.srt")).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.srt"));

    Ok(())
}

/// Test directory creation
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // Idempotent
    FileManager::ensure_dir(&nested)?;

    Ok(())
}
