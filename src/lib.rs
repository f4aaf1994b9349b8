/*!
 * # doctran - AI document translation
 *
 * A Rust library for translating PDF and DOCX documents using a remote
 * chat-completion API, preserving logical document structure.
 *
 * ## Features
 *
 * - Extract structured content (paragraphs, tables, images) from PDF and DOCX
 * - Translate every paragraph and table cell via a chat-completion API
 * - Re-assemble a translated document, optionally interleaving original and
 *   translated content for side-by-side review
 * - Script-aware font resolution with a download-and-cache fallback
 * - Optional hand-off to an external layout-preserving translation engine
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document_model`: Shared structural model (pages, paragraphs, tables)
 * - `extraction`: PDF and DOCX content extractors
 * - `translation`: Chat-completion client and document orchestrator:
 *   - `translation::client`: API client behind the `Translator` trait
 *   - `translation::orchestrator`: in-order walk over the model
 * - `render`: PDF and DOCX output renderers plus font resolution
 * - `format`: Format adapter selecting extraction/rendering strategies
 * - `layout_engine`: External layout-preserving engine collaborator
 * - `progress`: Injectable progress reporting seam
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported target-language set
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document_model;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod format;
pub mod language_utils;
pub mod layout_engine;
pub mod progress;
pub mod render;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Conversion, ConversionRequest};
pub use document_model::{Document, Page, Paragraph, Table, TranslatedDocument};
pub use errors::{AppError, ExtractionError, FormatError, RenderError, TranslationError};
pub use format::DocumentFormat;
pub use language_utils::TargetLanguage;
pub use progress::{NoProgress, ProgressReporter};
pub use translation::{ChatCompletionClient, DocumentTranslator, Translator};
