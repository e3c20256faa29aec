use anyhow::{Context, Result, bail};
use log::warn;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file atomically.
    ///
    /// The content goes to a temporary file in the destination directory
    /// first and is persisted into place only once fully written, so a
    /// failure mid-write never leaves a partial file at the destination.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in: {:?}", dir))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write output content for: {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to move output into place: {:?}", path))?;

        Ok(())
    }

    /// Find transcription chunk files in a directory.
    ///
    /// Only the directory itself is scanned, and results come back in
    /// lexicographic file name order, which is the chunk processing order.
    pub fn find_chunk_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case("json") {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Resolve and validate an output location.
    ///
    /// A directory resolves to `<dir>/<default_name>`. Anything else must
    /// be an `.srt` path whose parent directory exists. An existing file is
    /// accepted but will be overwritten, which is worth a warning.
    pub fn validate_output_path<P: AsRef<Path>>(path: P, default_name: &str) -> Result<PathBuf> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            bail!("Output path must not be empty");
        }

        if path.is_dir() {
            return Ok(path.join(default_name));
        }

        let is_srt = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"))
            .unwrap_or(false);
        if !is_srt {
            bail!(
                "Invalid output file type, expected a path to an '.srt' file: {}",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Output directory does not exist: {}", parent.display());
            }
        }

        if path.exists() {
            warn!(
                "The file {} already exists and will be overwritten",
                path.display()
            );
        }

        Ok(path.to_path_buf())
    }
}
