/*!
 * Output document rendering.
 *
 * Rendering turns a pair of structural models (original, translated) into
 * output bytes. Logical structure is preserved, not pixel layout. The two
 * implementations sit behind a common trait selected by the format adapter:
 *
 * - `pdf`: printpdf composition plus a lopdf page merge for the
 *   page-interleaved mode
 * - `docx`: docx-rs composition with explicit east-asian run fonts
 * - `fonts`: shared font resolution (local candidates, download fallback)
 */

use async_trait::async_trait;

use crate::document_model::{Document, TranslatedDocument};
use crate::errors::RenderError;

/// Output layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Translated content only
    TranslationOnly,
    /// Original unit immediately followed by its translated counterpart,
    /// pairwise by index
    InterleavedInline,
    /// Original page followed by translated page, alternating (PDF only)
    InterleavedPage,
}

/// Common trait for all output renderers
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render the translated document (and optionally its original) into
    /// output bytes.
    ///
    /// `original` is required for the interleaved modes and ignored for
    /// `TranslationOnly`. Nothing is written to disk here: the caller is
    /// responsible for placing the returned bytes atomically.
    async fn render(
        &self,
        mode: RenderMode,
        original: Option<&Document>,
        translated: &TranslatedDocument,
    ) -> Result<Vec<u8>, RenderError>;
}

pub mod fonts;
pub mod pdf;
pub mod docx;

pub use self::docx::DocxRenderer;
pub use self::fonts::{FontResolver, ResolvedFont};
pub use self::pdf::PdfRenderer;
