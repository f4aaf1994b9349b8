use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::format::DocumentFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a translated document
    // @params: input_file, output_dir, format
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        format: DocumentFormat,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let output_filename = format!(
            "translated_{}.{}",
            stem.to_string_lossy(),
            format.extension()
        );
        output_dir.as_ref().join(output_filename)
    }

    /// Read a file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file atomically.
    ///
    /// The content lands in a fresh temp file first and only replaces the
    /// final destination on success, so a failed run never leaves a partial
    /// output file behind.
    pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
        temp.write_all(content)
            .with_context(|| format!("Failed to write output content for {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to move output into place: {:?}", path))?;

        Ok(())
    }

    /// Detect the document format of a file from its magic bytes.
    ///
    /// PDF files open with `%PDF`; DOCX files are zip containers (`PK`).
    /// Falls back to the file extension when the header is inconclusive.
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        let header = {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read file header: {:?}", path))?;
            bytes.into_iter().take(4).collect::<Vec<u8>>()
        };

        if header.starts_with(b"%PDF") {
            return Ok(DocumentFormat::Pdf);
        }
        if header.starts_with(b"PK") {
            return Ok(DocumentFormat::Docx);
        }

        // Header didn't settle it; try the extension
        if let Some(ext) = path.extension() {
            if let Ok(format) = ext.to_string_lossy().parse::<DocumentFormat>() {
                return Ok(format);
            }
        }

        Err(anyhow::anyhow!(
            "Could not determine document format of {:?} (expected PDF or DOCX)",
            path
        ))
    }
}
