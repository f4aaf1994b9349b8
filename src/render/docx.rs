use std::io::Cursor;

use async_trait::async_trait;
use docx_rs::{
    BreakType, Docx, Paragraph as DocxParagraph, Run, RunFonts, Table as DocxTable, TableCell,
    TableRow,
};

use crate::app_config::FontConfig;
use crate::document_model::{Document, Table, TranslatedDocument};
use crate::errors::RenderError;
use crate::render::{DocumentRenderer, RenderMode};

// @module: DOCX output rendering

/// Renders the structural model into a DOCX.
///
/// DOCX has no page concept, so pages flow sequentially. Every run carries
/// an explicit east-asian font mapping independent of the latin font name,
/// so platforms whose default east-asian face differs do not silently
/// substitute glyphs.
pub struct DocxRenderer {
    // @field: Font family configuration
    fonts: FontConfig,
}

impl DocxRenderer {
    /// Create a renderer from font configuration
    pub fn new(fonts: FontConfig) -> Self {
        Self { fonts }
    }

    /// A text run with both latin and east-asian families pinned
    fn styled_run(&self, text: &str) -> Run {
        let mut run = Run::new().fonts(
            RunFonts::new()
                .ascii(self.fonts.latin_family.as_str())
                .east_asia(self.fonts.east_asian_family.as_str()),
        );
        for (index, line) in text.lines().enumerate() {
            if index > 0 {
                run = run.add_break(BreakType::TextWrapping);
            }
            run = run.add_text(line);
        }
        run
    }

    fn build_paragraph(&self, text: &str) -> DocxParagraph {
        DocxParagraph::new().add_run(self.styled_run(text))
    }

    fn build_table(&self, table: &Table) -> DocxTable {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                TableRow::new(
                    row.iter()
                        .map(|cell| {
                            let text = cell.as_deref().unwrap_or("");
                            TableCell::new().add_paragraph(self.build_paragraph(text))
                        })
                        .collect(),
                )
            })
            .collect();
        DocxTable::new(rows)
    }
}

#[async_trait]
impl DocumentRenderer for DocxRenderer {
    async fn render(
        &self,
        mode: RenderMode,
        original: Option<&Document>,
        translated: &TranslatedDocument,
    ) -> Result<Vec<u8>, RenderError> {
        if mode == RenderMode::InterleavedPage {
            return Err(RenderError::OutputConstruction(
                "page-interleaved output is only available for PDF".to_string(),
            ));
        }

        let mut docx = Docx::new();
        let translated = translated.document();

        for (index, translated_page) in translated.pages.iter().enumerate() {
            let original_page = original.and_then(|o| o.pages.get(index));

            match (mode, original_page) {
                (RenderMode::InterleavedInline, Some(original_page)) => {
                    // Original unit immediately followed by its counterpart,
                    // pairwise by index; no labels between them
                    for (orig, trans) in original_page
                        .paragraphs
                        .iter()
                        .zip(translated_page.paragraphs.iter())
                    {
                        if !orig.is_blank() {
                            docx = docx.add_paragraph(self.build_paragraph(orig.text.trim()));
                        }
                        if !trans.is_blank() {
                            docx = docx.add_paragraph(self.build_paragraph(trans.text.trim()));
                        }
                    }
                    for (orig, trans) in original_page
                        .tables
                        .iter()
                        .zip(translated_page.tables.iter())
                    {
                        docx = docx.add_table(self.build_table(orig));
                        // Spacer paragraph keeps adjacent tables from merging
                        docx = docx.add_paragraph(DocxParagraph::new());
                        docx = docx.add_table(self.build_table(trans));
                        docx = docx.add_paragraph(DocxParagraph::new());
                    }
                }
                _ => {
                    for paragraph in &translated_page.paragraphs {
                        if !paragraph.is_blank() {
                            docx = docx.add_paragraph(self.build_paragraph(paragraph.text.trim()));
                        }
                    }
                    for table in &translated_page.tables {
                        docx = docx.add_table(self.build_table(table));
                        docx = docx.add_paragraph(DocxParagraph::new());
                    }
                }
            }
        }

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| RenderError::OutputConstruction(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}
