/*!
 * End-to-end conversion pipeline tests.
 *
 * These run the full controller flow (extract, translate, render) with the
 * network boundary replaced by mock translators and font resolution pinned
 * to the builtin face.
 */

use std::sync::Arc;

use doctran::app_controller::{Controller, ConversionRequest};
use doctran::errors::AppError;
use doctran::extraction::{ContentExtractor, DocxExtractor, PdfExtractor};
use doctran::format::DocumentFormat;
use doctran::language_utils::TargetLanguage;
use doctran::progress::NoProgress;

use crate::common::mock_translators::MockTranslator;
use crate::common::{
    create_temp_dir, docx_fixture, document_from_paragraphs, document_from_table, offline_config,
    pdf_fixture,
};

fn request(
    input: std::path::PathBuf,
    input_format: DocumentFormat,
    output_format: DocumentFormat,
    show_comparison: bool,
) -> ConversionRequest {
    ConversionRequest {
        input,
        input_format,
        output_format,
        target: TargetLanguage::Chinese,
        show_comparison,
        preserve_layout: false,
    }
}

/// Scenario: one-page PDF with two paragraphs, translation-only output
#[tokio::test]
async fn test_convert_withSinglePagePdf_shouldRenderTranslationOnly() {
    let dir = create_temp_dir().expect("tempdir");
    let source = document_from_paragraphs(&[&["Hello", "World"]]);
    let input_path = dir.path().join("input.pdf");
    let bytes = pdf_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let conversion = controller
        .convert(
            &request(input_path, DocumentFormat::Pdf, DocumentFormat::Pdf, false),
            &NoProgress,
        )
        .await
        .expect("conversion should succeed");

    assert_eq!(conversion.format, DocumentFormat::Pdf);
    assert_eq!(conversion.mime_type(), "application/pdf");

    let output = PdfExtractor::new()
        .extract(&conversion.bytes, &NoProgress)
        .expect("output should re-extract");

    // One rendering pass, no page break
    assert_eq!(output.pages.len(), 1);
    let texts: Vec<String> = output.pages[0]
        .paragraphs
        .iter()
        .map(|p| p.text.clone())
        .collect();
    assert_eq!(
        texts,
        vec![
            MockTranslator::expected_translation("Hello"),
            MockTranslator::expected_translation("World"),
        ]
    );
    // No original text anywhere in the output
    assert!(!texts.iter().any(|t| t.contains("Hello") || t.contains("World")));
}

/// Scenario: DOCX with a 2x2 table, side-by-side output
#[tokio::test]
async fn test_convert_withDocxTableComparison_shouldEmitOriginalThenTranslatedTable() {
    let dir = create_temp_dir().expect("tempdir");
    let source = document_from_table(vec![
        vec![Some("a".to_string()), Some("b".to_string())],
        vec![Some("c".to_string()), Some("d".to_string())],
    ]);
    let input_path = dir.path().join("input.docx");
    let bytes = docx_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let conversion = controller
        .convert(
            &request(input_path, DocumentFormat::Docx, DocumentFormat::Docx, true),
            &NoProgress,
        )
        .await
        .expect("conversion should succeed");

    assert_eq!(
        conversion.mime_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let output = DocxExtractor::new()
        .extract(&conversion.bytes, &NoProgress)
        .expect("output should re-extract");

    assert_eq!(output.pages.len(), 1);
    let page = &output.pages[0];

    // Original 2x2 table immediately followed by the translated 2x2 table,
    // with no intervening heading text
    assert!(page.paragraphs.is_empty());
    assert_eq!(page.tables.len(), 2);
    assert_eq!(
        page.tables[0].rows,
        vec![
            vec![Some("a".to_string()), Some("b".to_string())],
            vec![Some("c".to_string()), Some("d".to_string())],
        ]
    );
    assert_eq!(
        page.tables[1].rows,
        vec![
            vec![
                Some(MockTranslator::expected_translation("a")),
                Some(MockTranslator::expected_translation("b")),
            ],
            vec![
                Some(MockTranslator::expected_translation("c")),
                Some(MockTranslator::expected_translation("d")),
            ],
        ]
    );
}

/// Scenario: truncated PDF input fails extraction and writes no output
#[tokio::test]
async fn test_convert_withTruncatedPdf_shouldFailWithoutOutputFile() {
    let dir = create_temp_dir().expect("tempdir");
    let input_path = dir.path().join("bad.pdf");
    std::fs::write(&input_path, b"%PDF-1.7\nnot really a pdf").expect("write garbage");
    let output_path = dir.path().join("translated_bad.pdf");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let result = controller
        .convert_to_file(
            &request(input_path, DocumentFormat::Pdf, DocumentFormat::Pdf, false),
            &output_path,
            &NoProgress,
        )
        .await;

    assert!(matches!(result, Err(AppError::Extraction(_))));
    assert!(!output_path.exists(), "no output file may be created");
}

/// Side-by-side PDF output interleaves whole pages, original first
#[tokio::test]
async fn test_convert_withPdfPageComparison_shouldAlternateOriginalAndTranslatedPages() {
    let dir = create_temp_dir().expect("tempdir");
    let source = document_from_paragraphs(&[&["Alpha"], &["Beta"]]);
    let input_path = dir.path().join("input.pdf");
    let bytes = pdf_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let conversion = controller
        .convert(
            &request(input_path, DocumentFormat::Pdf, DocumentFormat::Pdf, true),
            &NoProgress,
        )
        .await
        .expect("conversion should succeed");

    let merged = lopdf::Document::load_mem(&conversion.bytes).expect("merged output loads");
    // P original pages and P translated pages alternate into 2P pages
    assert_eq!(merged.get_pages().len(), 4);

    let page_1 = merged.extract_text(&[1]).expect("page 1");
    let page_2 = merged.extract_text(&[2]).expect("page 2");
    let page_3 = merged.extract_text(&[3]).expect("page 3");
    assert!(page_1.contains("Alpha"), "page 1 was: {}", page_1);
    assert!(
        page_2.contains(&MockTranslator::expected_translation("Alpha")),
        "page 2 was: {}",
        page_2
    );
    assert!(page_3.contains("Beta"), "page 3 was: {}", page_3);
}

/// DOCX source rendered to PDF side by side interleaves inline, pairwise
#[tokio::test]
async fn test_convert_withDocxToPdfComparison_shouldInterleavePairsInOrder() {
    let dir = create_temp_dir().expect("tempdir");
    let source = document_from_paragraphs(&[&["First", "Second"]]);
    let input_path = dir.path().join("input.docx");
    let bytes = docx_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let conversion = controller
        .convert(
            &request(input_path, DocumentFormat::Docx, DocumentFormat::Pdf, true),
            &NoProgress,
        )
        .await
        .expect("conversion should succeed");

    let output = PdfExtractor::new()
        .extract(&conversion.bytes, &NoProgress)
        .expect("output should re-extract");

    let texts: Vec<String> = output.pages[0]
        .paragraphs
        .iter()
        .map(|p| p.text.clone())
        .collect();
    // Exactly min(len, len) pairs, each (original[i], translated[i])
    assert_eq!(
        texts,
        vec![
            "First".to_string(),
            MockTranslator::expected_translation("First"),
            "Second".to_string(),
            MockTranslator::expected_translation("Second"),
        ]
    );
}

/// Structure is preserved through a full DOCX round trip
#[tokio::test]
async fn test_convert_withDocxTranslationOnly_shouldPreserveCardinality() {
    let dir = create_temp_dir().expect("tempdir");
    let mut source = document_from_paragraphs(&[&["One", "Two", "Three"]]);
    source.pages[0].tables.push(doctran::document_model::Table::new(vec![
        vec![Some("x".to_string()), Some("y".to_string())],
    ]));
    let input_path = dir.path().join("input.docx");
    let bytes = docx_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let conversion = controller
        .convert(
            &request(input_path, DocumentFormat::Docx, DocumentFormat::Docx, false),
            &NoProgress,
        )
        .await
        .expect("conversion should succeed");

    let output = DocxExtractor::new()
        .extract(&conversion.bytes, &NoProgress)
        .expect("output should re-extract");

    assert!(source.structure_matches(&output));
}

/// preserve_layout with no engine available falls back to the standard pipeline
#[tokio::test]
async fn test_convert_withPreserveLayoutAndNoEngine_shouldFallBackToStandardPipeline() {
    let dir = create_temp_dir().expect("tempdir");
    let source = document_from_paragraphs(&[&["Fallback"]]);
    let input_path = dir.path().join("input.pdf");
    let bytes = pdf_fixture(&source, dir.path()).await.expect("fixture");
    std::fs::write(&input_path, &bytes).expect("write fixture");

    let controller = Controller::with_translator(
        offline_config(dir.path()),
        Arc::new(MockTranslator::working()),
    );
    let mut req = request(input_path, DocumentFormat::Pdf, DocumentFormat::Pdf, false);
    req.preserve_layout = true;

    let conversion = controller
        .convert(&req, &NoProgress)
        .await
        .expect("fallback conversion should succeed");
    assert_eq!(conversion.format, DocumentFormat::Pdf);

    let output = PdfExtractor::new()
        .extract(&conversion.bytes, &NoProgress)
        .expect("output should re-extract");
    assert_eq!(
        output.pages[0].paragraphs[0].text,
        MockTranslator::expected_translation("Fallback")
    );
}
