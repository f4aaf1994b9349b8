use log::{error, info};

use crate::document_model::{Document, Page, Paragraph, Table, TranslatedDocument};
use crate::errors::TranslationError;
use crate::language_utils::TargetLanguage;
use crate::progress::ProgressReporter;
use crate::translation::Translator;

// @module: Document translation orchestration

/// Walks an extracted document and builds its translated counterpart.
///
/// Strictly sequential: one translation call in flight at a time, in
/// document order. Any failure aborts the whole run; no partial document
/// is ever returned.
pub struct DocumentTranslator<'a> {
    // @field: Translation backend
    translator: &'a dyn Translator,
}

impl<'a> DocumentTranslator<'a> {
    /// Create an orchestrator over a translation backend
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self { translator }
    }

    /// Translate every paragraph and table cell of `document` in order.
    ///
    /// The result is structurally identical to the input: same page count,
    /// paragraph count and table grid shapes. Blank units pass through
    /// untranslated; images are copied by reference unchanged.
    ///
    /// The progress denominator counts paragraphs only, so `done` can run
    /// past `total` while table cells are being translated.
    pub async fn translate_document(
        &self,
        document: &Document,
        target: TargetLanguage,
        progress: &dyn ProgressReporter,
    ) -> Result<TranslatedDocument, TranslationError> {
        let total = document.paragraph_count();
        let mut done = 0;

        let mut pages = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let mut translated_page = Page::new(page.number);

            for paragraph in &page.paragraphs {
                done += 1;
                progress.on_progress(
                    done,
                    total,
                    &format!("Translating paragraph {}/{}", done, total),
                );

                let translated = if paragraph.is_blank() {
                    paragraph.clone()
                } else {
                    Paragraph {
                        text: self.translator.translate(&paragraph.text, target).await?,
                        bbox: paragraph.bbox,
                    }
                };
                translated_page.paragraphs.push(translated);
            }

            for table in &page.tables {
                let mut rows = Vec::with_capacity(table.rows.len());
                for row in &table.rows {
                    let mut translated_row = Vec::with_capacity(row.len());
                    for cell in row {
                        let translated_cell = match cell {
                            Some(text) if !text.trim().is_empty() => {
                                progress.on_progress(done, total, "Translating table cell");
                                Some(self.translator.translate(text, target).await?)
                            }
                            other => other.clone(),
                        };
                        translated_row.push(translated_cell);
                    }
                    rows.push(translated_row);
                }
                translated_page.tables.push(Table::new(rows));
            }

            translated_page.images = page.images.clone();
            pages.push(translated_page);
        }

        let translated = Document { pages };
        if !document.structure_matches(&translated) {
            // Unreachable by construction; logged loudly if it ever regresses
            error!(
                "Structure diverged during translation: {} pages in, {} pages out",
                document.pages.len(),
                translated.pages.len()
            );
        } else {
            info!(
                "Translated {} paragraphs across {} pages",
                total,
                translated.pages.len()
            );
        }

        Ok(TranslatedDocument::new(translated))
    }
}
