use log::{debug, warn};
use lopdf::{Dictionary, Document as PdfFile, Object, ObjectId};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document_model::{Document, ImageRef, Page, Paragraph, Table};
use crate::errors::ExtractionError;
use crate::extraction::ContentExtractor;
use crate::progress::ProgressReporter;

// @module: PDF content extraction

// @const: Blank-line block separator
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @const: Cell separator inside a table-like line (tab or 2+ spaces)
static CELL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t| {2,}").unwrap());

/// Extracts text, tables and images from a PDF, page by page
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor
    pub fn new() -> Self {
        PdfExtractor
    }
}

impl ContentExtractor for PdfExtractor {
    fn extract(
        &self,
        bytes: &[u8],
        progress: &dyn ProgressReporter,
    ) -> Result<Document, ExtractionError> {
        let file = PdfFile::load_mem(bytes)
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

        // A present Encrypt entry means we cannot read the content streams
        if file.trailer.get(b"Encrypt").is_ok() {
            return Err(ExtractionError::Encrypted);
        }

        let pages = file.get_pages();
        let total = pages.len();
        let mut document = Document::new();

        for (index, (page_number, page_id)) in pages.iter().enumerate() {
            progress.on_progress(
                index + 1,
                total,
                &format!("Extracting page {}/{}", index + 1, total),
            );

            let text = file.extract_text(&[*page_number]).map_err(|e| {
                ExtractionError::Page {
                    page: *page_number as usize,
                    message: e.to_string(),
                }
            })?;

            let mut page = Page::new(*page_number as usize);
            for block in split_blocks(&text) {
                match parse_table_block(&block) {
                    Some(table) => page.tables.push(table),
                    None => page.paragraphs.push(Paragraph::new(block)),
                }
            }
            page.images = collect_page_images(&file, *page_id);

            debug!(
                "Page {}: {} paragraphs, {} tables, {} images",
                page_number,
                page.paragraphs.len(),
                page.tables.len(),
                page.images.len()
            );
            document.pages.push(page);
        }

        Ok(document)
    }
}

/// Split raw page text into blocks on blank-line boundaries,
/// discarding empty fragments
fn split_blocks(text: &str) -> Vec<String> {
    BLOCK_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret a block as a raw table grid when every line splits into at
/// least two aligned cells; a 2x2 grid is the minimum accepted shape
fn parse_table_block(block: &str) -> Option<Table> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let cells: Vec<&str> = CELL_SEPARATOR.split(line).map(str::trim).collect();
        if cells.len() < 2 {
            return None;
        }
        rows.push(
            cells
                .into_iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    Some(Table::new(rows))
}

/// Collect the raw bytes of every image XObject referenced by a page.
///
/// Images are only carried through for later pass-through rendering, so
/// unreadable resources are skipped rather than failing the page.
fn collect_page_images(file: &PdfFile, page_id: ObjectId) -> Vec<ImageRef> {
    let mut images = Vec::new();

    let Some(page_dict) = file
        .get_object(page_id)
        .ok()
        .and_then(|obj| obj.as_dict().ok())
    else {
        return images;
    };
    let Some(resources) = resolve_dict(file, page_dict.get(b"Resources").ok()) else {
        return images;
    };
    let Some(xobjects) = resolve_dict(file, resources.get(b"XObject").ok()) else {
        return images;
    };

    for (name, value) in xobjects.iter() {
        let stream = match value {
            Object::Reference(id) => file
                .get_object(*id)
                .ok()
                .and_then(|obj| obj.as_stream().ok()),
            Object::Stream(s) => Some(s),
            _ => None,
        };
        let Some(stream) = stream else { continue };

        let is_image = stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|s| s.as_name().ok())
            .map(|n| n == b"Image")
            .unwrap_or(false);
        if !is_image {
            continue;
        }

        // DCT streams are already self-contained JPEG data; anything else
        // is handed over decompressed when possible
        let is_dct = stream
            .dict
            .get(b"Filter")
            .ok()
            .and_then(|f| f.as_name().ok())
            .map(|n| n == b"DCTDecode")
            .unwrap_or(false);
        let data = if is_dct {
            stream.content.clone()
        } else {
            match stream.decompressed_content() {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        "Skipping unreadable image resource {}: {}",
                        String::from_utf8_lossy(name),
                        e
                    );
                    continue;
                }
            }
        };

        images.push(ImageRef {
            name: String::from_utf8_lossy(name).to_string(),
            data,
        });
    }

    images
}

/// Follow an optional object to its dictionary, through one reference hop
fn resolve_dict<'a>(file: &'a PdfFile, object: Option<&'a Object>) -> Option<&'a Dictionary> {
    match object? {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => file
            .get_object(*id)
            .ok()
            .and_then(|obj| obj.as_dict().ok()),
        _ => None,
    }
}
