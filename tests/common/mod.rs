/*!
 * Common test utilities for the doctran test suite
 */

use anyhow::Result;
use tempfile::TempDir;

use doctran::app_config::{Config, FontConfig, TranslationConfig};
use doctran::document_model::{Document, Page, Paragraph, Table, TranslatedDocument};
use doctran::render::{DocumentRenderer, DocxRenderer, PdfRenderer, RenderMode};


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Font configuration that never touches the network: no local candidates
/// and an unroutable download URL, so rendering settles on the builtin face
pub fn offline_font_config(cache_dir: &std::path::Path) -> FontConfig {
    FontConfig {
        preferred: Vec::new(),
        cache_dir: cache_dir.to_path_buf(),
        // Reserved TEST-NET-1 address; never routable
        download_url: "http://192.0.2.1/fonts.zip".to_string(),
        ..FontConfig::default()
    }
}

/// A full config suitable for offline end-to-end tests
pub fn offline_config(cache_dir: &std::path::Path) -> Config {
    Config {
        fonts: offline_font_config(cache_dir),
        translation: TranslationConfig {
            api_key: "test-api-key".to_string(),
            endpoint: "http://192.0.2.1/v1/chat/completions".to_string(),
            timeout_secs: 1,
            ..TranslationConfig::default()
        },
        ..Config::default()
    }
}

/// Build a document of plain-text pages: one inner slice per page,
/// one entry per paragraph
pub fn document_from_paragraphs(pages: &[&[&str]]) -> Document {
    let mut document = Document::new();
    for (index, paragraphs) in pages.iter().enumerate() {
        let mut page = Page::new(index + 1);
        for text in paragraphs.iter() {
            page.paragraphs.push(Paragraph::new(*text));
        }
        document.pages.push(page);
    }
    document
}

/// Build a one-page document carrying only the given table
pub fn document_from_table(rows: Vec<Vec<Option<String>>>) -> Document {
    let mut page = Page::new(1);
    page.tables.push(Table::new(rows));
    Document { pages: vec![page] }
}

/// Render a document as a translation-only PDF, used as a test input fixture
pub async fn pdf_fixture(document: &Document, cache_dir: &std::path::Path) -> Result<Vec<u8>> {
    let renderer = PdfRenderer::new(offline_font_config(cache_dir), None);
    let bytes = renderer
        .render(
            RenderMode::TranslationOnly,
            None,
            &TranslatedDocument::new(document.clone()),
        )
        .await?;
    Ok(bytes)
}

/// Render a document as a translation-only DOCX, used as a test input fixture
pub async fn docx_fixture(document: &Document, cache_dir: &std::path::Path) -> Result<Vec<u8>> {
    let renderer = DocxRenderer::new(offline_font_config(cache_dir));
    let bytes = renderer
        .render(
            RenderMode::TranslationOnly,
            None,
            &TranslatedDocument::new(document.clone()),
        )
        .await?;
    Ok(bytes)
}
