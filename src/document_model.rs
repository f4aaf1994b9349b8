use std::fmt;
use serde::{Deserialize, Serialize};

// @module: Structural document model shared by extraction, translation and rendering

// @struct: Single paragraph of extracted text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    // @field: Plain paragraph text
    pub text: String,

    // @field: Optional position hint (x0, y0, x1, y1), kept for layout fidelity
    pub bbox: Option<[f32; 4]>,
}

impl Paragraph {
    /// Create a paragraph from plain text with no position hint
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph {
            text: text.into(),
            bbox: None,
        }
    }

    /// Whether the paragraph carries no translatable content
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// @struct: 2-D grid of nullable cells; row widths need not be equal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Table {
    // @field: Rows of cells, each cell an optional text string
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create a table from raw rows
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Table { rows }
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when every row of `other` has the same cell count as ours
    pub fn shape_matches(&self, other: &Table) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| a.len() == b.len())
    }
}

/// Reference to an image embedded in a source page.
///
/// Images are passed through to the output untranslated; DOCX extraction
/// never produces any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    /// Resource name the image was found under
    pub name: String,

    /// Raw encoded image bytes as found in the source
    pub data: Vec<u8>,
}

// @struct: One page of extracted content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    // @field: 1-based page number
    pub number: usize,

    // @field: Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    // @field: Tables in document order
    pub tables: Vec<Table>,

    // @field: Embedded images in document order (PDF only)
    pub images: Vec<ImageRef>,
}

impl Page {
    /// Create an empty page with the given 1-based number
    pub fn new(number: usize) -> Self {
        Page {
            number,
            paragraphs: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// Ordered sequence of pages extracted from one source document.
///
/// Built once per conversion run by the extractor, consumed read-only by the
/// orchestrator and discarded after rendering. A DOCX source always yields
/// exactly one synthetic page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document { pages: Vec::new() }
    }

    /// Total paragraph count across all pages.
    ///
    /// This is the progress denominator used by the orchestrator; table
    /// cells are deliberately not counted.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(|p| p.paragraphs.len()).sum()
    }

    /// Check that `other` has the same structural shape as this document:
    /// page count, per-page paragraph count and per-table grid dimensions.
    pub fn structure_matches(&self, other: &Document) -> bool {
        if self.pages.len() != other.pages.len() {
            return false;
        }
        self.pages.iter().zip(other.pages.iter()).all(|(a, b)| {
            a.paragraphs.len() == b.paragraphs.len()
                && a.tables.len() == b.tables.len()
                && a.tables
                    .iter()
                    .zip(b.tables.iter())
                    .all(|(ta, tb)| ta.shape_matches(tb))
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Document")?;
        writeln!(f, "Pages: {}", self.pages.len())?;
        writeln!(f, "Paragraphs: {}", self.paragraph_count())?;
        Ok(())
    }
}

/// A document whose text fields have been replaced with translated text.
///
/// Structurally identical to its source: translation never adds or removes
/// structural units, only replaces text content.
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    document: Document,
}

impl TranslatedDocument {
    /// Wrap a translated structural model
    pub fn new(document: Document) -> Self {
        TranslatedDocument { document }
    }

    /// Borrow the underlying structural model
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Unwrap into the underlying structural model
    pub fn into_document(self) -> Document {
        self.document
    }
}
