/*!
 * Content extraction from source documents.
 *
 * Extraction turns raw input bytes into the shared structural model
 * (pages, paragraphs, tables, images). The two implementations sit behind
 * a common trait so downstream logic never branches on the input format:
 *
 * - `pdf`: per-page extraction from PDF sources
 * - `docx`: whole-document extraction from DOCX sources (one synthetic page)
 */

use crate::document_model::Document;
use crate::errors::ExtractionError;
use crate::progress::ProgressReporter;

/// Common trait for all content extractors
///
/// An extractor either produces a complete structural model or fails with
/// an `ExtractionError`; partial results are never returned.
pub trait ContentExtractor: Send + Sync {
    /// Extract the structural model from raw source bytes.
    ///
    /// # Arguments
    /// * `bytes` - The raw source document
    /// * `progress` - Observational page-level progress sink
    ///
    /// # Returns
    /// * `Result<Document, ExtractionError>` - The extracted model or an error
    fn extract(
        &self,
        bytes: &[u8],
        progress: &dyn ProgressReporter,
    ) -> Result<Document, ExtractionError>;
}

pub mod pdf;
pub mod docx;

pub use self::docx::DocxExtractor;
pub use self::pdf::PdfExtractor;
