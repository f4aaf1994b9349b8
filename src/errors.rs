/*!
 * Error types for the doctran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while extracting content from a source document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Error when the source bytes cannot be opened or parsed at all
    #[error("Failed to open source document: {0}")]
    Unreadable(String),

    /// Error when the document is password protected
    #[error("Document is password protected")]
    Encrypted,

    /// Error when a page could not be read
    #[error("Failed to read page {page}: {message}")]
    Page {
        /// 1-based page number
        page: usize,
        /// Underlying error message
        message: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error when making an API request fails
    #[error("Translation request failed: {0}")]
    Request(String),

    /// Error returned by the API itself
    #[error("Translation API responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when the response carries no usable choice/content field
    #[error("Translation API returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while rendering the output document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Error when a font could not be registered with the output document
    #[error("Failed to register font: {0}")]
    Font(String),

    /// Error constructing the output document
    #[error("Failed to build output document: {0}")]
    OutputConstruction(String),

    /// Error merging original and translated pages
    #[error("Failed to merge pages: {0}")]
    PageMerge(String),

    /// Page-interleaved rendering requires the original source bytes
    #[error("Page-interleaved rendering requires the original document")]
    MissingSource,
}

/// Errors for formats outside the supported set
#[derive(Error, Debug)]
pub enum FormatError {
    /// Format token is not one of the supported formats
    #[error("Unsupported document format: {0}")]
    Unsupported(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from content extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from format selection
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
