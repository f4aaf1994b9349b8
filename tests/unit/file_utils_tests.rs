/*!
 * Tests for file utilities
 */

use std::path::PathBuf;

use doctran::file_utils::FileManager;
use doctran::format::DocumentFormat;

use crate::common::create_temp_dir;

#[test]
fn test_generate_output_path_withPdfInput_shouldPrefixTranslated() {
    let path = FileManager::generate_output_path(
        PathBuf::from("/docs/report.pdf"),
        PathBuf::from("/out"),
        DocumentFormat::Pdf,
    );
    assert_eq!(path, PathBuf::from("/out/translated_report.pdf"));
}

#[test]
fn test_generate_output_path_withFormatChange_shouldUseOutputExtension() {
    let path = FileManager::generate_output_path(
        PathBuf::from("report.pdf"),
        PathBuf::from("."),
        DocumentFormat::Docx,
    );
    assert_eq!(path, PathBuf::from("./translated_report.docx"));
}

#[test]
fn test_write_bytes_atomic_withNewFile_shouldWriteContent() {
    let dir = create_temp_dir().expect("tempdir");
    let target = dir.path().join("nested").join("out.bin");

    FileManager::write_bytes_atomic(&target, b"payload").expect("atomic write");

    assert!(target.is_file());
    assert_eq!(std::fs::read(&target).expect("read back"), b"payload");
}

#[test]
fn test_write_bytes_atomic_withExistingFile_shouldReplaceWholeContent() {
    let dir = create_temp_dir().expect("tempdir");
    let target = dir.path().join("out.bin");
    std::fs::write(&target, b"old longer content").expect("seed file");

    FileManager::write_bytes_atomic(&target, b"new").expect("atomic write");

    assert_eq!(std::fs::read(&target).expect("read back"), b"new");
}

#[test]
fn test_detect_format_withPdfMagic_shouldReturnPdf() {
    let dir = create_temp_dir().expect("tempdir");
    let path = dir.path().join("sample.bin");
    std::fs::write(&path, b"%PDF-1.7 rest of file").expect("write");

    assert_eq!(
        FileManager::detect_format(&path).expect("detect"),
        DocumentFormat::Pdf
    );
}

#[test]
fn test_detect_format_withZipMagic_shouldReturnDocx() {
    let dir = create_temp_dir().expect("tempdir");
    let path = dir.path().join("sample.bin");
    std::fs::write(&path, b"PK\x03\x04 rest of container").expect("write");

    assert_eq!(
        FileManager::detect_format(&path).expect("detect"),
        DocumentFormat::Docx
    );
}

#[test]
fn test_detect_format_withUnknownHeaderAndExtension_shouldFail() {
    let dir = create_temp_dir().expect("tempdir");
    let path = dir.path().join("sample.txt");
    std::fs::write(&path, b"plain text").expect("write");

    assert!(FileManager::detect_format(&path).is_err());
}

#[test]
fn test_detect_format_withUnknownHeaderButPdfExtension_shouldFallBackToExtension() {
    let dir = create_temp_dir().expect("tempdir");
    let path = dir.path().join("sample.pdf");
    std::fs::write(&path, b"xxxx").expect("write");

    assert_eq!(
        FileManager::detect_format(&path).expect("detect"),
        DocumentFormat::Pdf
    );
}
