use std::io::{Cursor, Read};

use log::debug;
use quick_xml::Reader as XmlReader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::document_model::{Document, Page, Paragraph, Table};
use crate::errors::ExtractionError;
use crate::extraction::ContentExtractor;
use crate::progress::ProgressReporter;

// @module: DOCX content extraction

/// Extracts paragraphs and tables from a DOCX document.
///
/// DOCX has no page concept, so the whole document is modelled as a single
/// synthetic page. Embedded images are not supported for DOCX sources.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor
    pub fn new() -> Self {
        DocxExtractor
    }
}

impl ContentExtractor for DocxExtractor {
    fn extract(
        &self,
        bytes: &[u8],
        progress: &dyn ProgressReporter,
    ) -> Result<Document, ExtractionError> {
        progress.on_progress(0, 1, "Extracting document content");

        let xml = read_document_xml(bytes)?;
        let page = parse_document_xml(&xml)?;

        debug!(
            "DOCX: {} paragraphs, {} tables",
            page.paragraphs.len(),
            page.tables.len()
        );
        progress.on_progress(1, 1, "Extraction complete");

        Ok(Document { pages: vec![page] })
    }
}

/// Pull `word/document.xml` out of the OOXML zip container
fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Unreadable(format!("not a DOCX container: {}", e)))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Unreadable(format!("missing word/document.xml: {}", e)))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Unreadable(format!("unreadable document.xml: {}", e)))?;

    Ok(xml)
}

/// Walk the WordprocessingML body into the single synthetic page.
///
/// Top-level `w:p` elements become paragraphs; `w:tbl`/`w:tr`/`w:tc` become
/// raw grids. Paragraph text inside a table cell belongs to the cell only.
fn parse_document_xml(xml: &str) -> Result<Page, ExtractionError> {
    let mut reader = XmlReader::from_str(xml);

    let mut page = Page::new(1);

    let mut in_cell = false;
    let mut in_text = false;
    let mut current_para = String::new();
    let mut current_cell = String::new();
    let mut current_row: Vec<Option<String>> = Vec::new();
    let mut table_rows: Vec<Vec<Option<String>>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" if !in_cell => current_para.clear(),
                b"p" if in_cell => {
                    if !current_cell.is_empty() && !current_cell.ends_with('\n') {
                        current_cell.push('\n');
                    }
                }
                b"tbl" => table_rows.clear(),
                b"tr" => current_row.clear(),
                b"tc" => {
                    in_cell = true;
                    current_cell.clear();
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => append_text(&mut current_para, &mut current_cell, in_cell, "\t"),
                b"br" => append_text(&mut current_para, &mut current_cell, in_cell, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                // Only `w:t` content is document text; whitespace between
                // tags is formatting noise
                if in_text {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractionError::Unreadable(err.to_string()))?;
                    append_text(&mut current_para, &mut current_cell, in_cell, &text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if !in_cell => {
                    let text = current_para.trim();
                    if !text.is_empty() {
                        page.paragraphs.push(Paragraph::new(text));
                    }
                    current_para.clear();
                }
                b"tc" => {
                    in_cell = false;
                    let text = current_cell.trim();
                    current_row.push(if text.is_empty() {
                        None
                    } else {
                        Some(text.to_string())
                    });
                    current_cell.clear();
                }
                b"tr" => {
                    table_rows.push(std::mem::take(&mut current_row));
                }
                b"tbl" => {
                    if !table_rows.is_empty() {
                        page.tables.push(Table::new(std::mem::take(&mut table_rows)));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::Unreadable(format!(
                    "malformed document.xml at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    Ok(page)
}

fn append_text(para: &mut String, cell: &mut String, in_cell: bool, text: &str) {
    if in_cell {
        cell.push_str(text);
    } else {
        para.push_str(text);
    }
}
