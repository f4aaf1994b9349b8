use crate::app_config::Config;
use crate::errors::FormatError;
use crate::extraction::{ContentExtractor, DocxExtractor, PdfExtractor};
use crate::render::{DocumentRenderer, DocxRenderer, PdfRenderer};

// @module: Format selection behind the shared extraction/rendering interfaces

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    // @returns: Lowercase format identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// MIME type for the produced output
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            other => Err(FormatError::Unsupported(other.to_string())),
        }
    }
}

/// Select the extraction strategy for a declared input format
pub fn extractor_for(format: DocumentFormat) -> Box<dyn ContentExtractor> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfExtractor::new()),
        DocumentFormat::Docx => Box::new(DocxExtractor::new()),
    }
}

/// Select the rendering strategy for a desired output format.
///
/// The PDF renderer additionally receives the original source bytes so the
/// page-interleaved mode can merge against the untouched original pages.
pub fn renderer_for(
    format: DocumentFormat,
    config: &Config,
    source_pdf: Option<Vec<u8>>,
) -> Box<dyn DocumentRenderer> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfRenderer::new(config.fonts.clone(), source_pdf)),
        DocumentFormat::Docx => Box::new(DocxRenderer::new(config.fonts.clone())),
    }
}
