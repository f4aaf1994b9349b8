use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::format::{self, DocumentFormat};
use crate::language_utils::TargetLanguage;
use crate::layout_engine::LayoutEngine;
use crate::progress::ProgressReporter;
use crate::render::RenderMode;
use crate::translation::{ChatCompletionClient, DocumentTranslator, Translator};

// @module: Application controller for document conversion

/// One conversion request: source file, formats, target language and layout flags
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Source document path
    pub input: PathBuf,
    /// Declared input format
    pub input_format: DocumentFormat,
    /// Desired output format
    pub output_format: DocumentFormat,
    /// Target language
    pub target: TargetLanguage,
    /// Emit original and translated content side by side
    pub show_comparison: bool,
    /// Try the external layout-preserving engine first (PDF input only)
    pub preserve_layout: bool,
}

/// Result of one conversion: output bytes and the actually-produced format
#[derive(Debug)]
pub struct Conversion {
    /// Raw output document bytes
    pub bytes: Vec<u8>,
    /// Format of the produced bytes; layout-preserving mode always yields PDF
    pub format: DocumentFormat,
}

impl Conversion {
    /// MIME type matching the actually-produced format
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation backend override; None builds the API client
    translator: Option<Arc<dyn Translator>>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            translator: None,
        }
    }

    /// Create a controller over an explicit translation backend.
    ///
    /// Used by tests and by callers that wrap the API client with retry or
    /// batching behavior.
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self {
            config,
            translator: Some(translator),
        }
    }

    /// Run one conversion end to end.
    ///
    /// Extraction completes fully before any translation call; translation
    /// calls run one at a time in document order; rendering starts only
    /// after every translation call succeeded. A failure at any stage
    /// aborts the whole conversion; no partial document is returned.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<Conversion, AppError> {
        let start_time = std::time::Instant::now();
        let bytes = FileManager::read_bytes(&request.input)
            .map_err(|e| AppError::File(e.to_string()))?;

        // Layout-preserving path: the engine replaces the whole pipeline
        // when it succeeds, and always yields a PDF
        if request.preserve_layout && request.input_format == DocumentFormat::Pdf {
            if let Some(bytes) = self.try_layout_engine(request).await? {
                info!(
                    "Layout-preserving conversion finished in {:.1}s",
                    start_time.elapsed().as_secs_f64()
                );
                return Ok(Conversion {
                    bytes,
                    format: DocumentFormat::Pdf,
                });
            }
            warn!("Layout-preserving engine unavailable, using the standard pipeline");
        }

        let extractor = format::extractor_for(request.input_format);
        let document = extractor.extract(&bytes, progress)?;
        info!(
            "Extracted {} pages, {} paragraphs",
            document.pages.len(),
            document.paragraph_count()
        );

        let fallback_client;
        let translator: &dyn Translator = match &self.translator {
            Some(translator) => translator.as_ref(),
            None => {
                fallback_client = ChatCompletionClient::new(self.config.translation.clone());
                &fallback_client
            }
        };
        let orchestrator = DocumentTranslator::new(translator);
        let translated = orchestrator
            .translate_document(&document, request.target, progress)
            .await?;

        let source_pdf =
            (request.input_format == DocumentFormat::Pdf).then(|| bytes.clone());
        let renderer = format::renderer_for(request.output_format, &self.config, source_pdf);
        let mode = select_mode(request);
        let original = mode_needs_original(mode).then_some(&document);

        let rendered = renderer.render(mode, original, &translated).await?;

        info!(
            "Conversion finished in {:.1}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(Conversion {
            bytes: rendered,
            format: request.output_format,
        })
    }

    /// Run one conversion and write the output atomically to `output_path`
    pub async fn convert_to_file(
        &self,
        request: &ConversionRequest,
        output_path: &std::path::Path,
        progress: &dyn ProgressReporter,
    ) -> Result<Conversion, AppError> {
        let conversion = self.convert(request, progress).await?;
        FileManager::write_bytes_atomic(output_path, &conversion.bytes)
            .map_err(|e| AppError::File(e.to_string()))?;
        info!("Success: {}", output_path.display());
        Ok(conversion)
    }

    /// Attempt the external engine; temp artifacts live only for this call
    async fn try_layout_engine(
        &self,
        request: &ConversionRequest,
    ) -> Result<Option<Vec<u8>>, AppError> {
        let engine = LayoutEngine::new(self.config.layout_engine.clone());
        // Dropped on every exit path, deleting the engine's artifacts
        let workdir = tempfile::tempdir().map_err(|e| AppError::File(e.to_string()))?;

        let artifact = engine
            .translate_preserving_layout(
                &request.input,
                request.target.iso_code(),
                request.show_comparison,
                workdir.path(),
            )
            .await;

        match artifact {
            Some(path) => {
                let bytes = FileManager::read_bytes(&path)
                    .map_err(|e| AppError::File(e.to_string()))?;
                Ok(Some(bytes))
            }
            None => Ok(None),
        }
    }
}

/// Pick the render mode for a request.
///
/// Side-by-side PDF output from a PDF source interleaves whole pages (the
/// original pages stay untouched); everything else side-by-side interleaves
/// inline, paragraph by paragraph.
fn select_mode(request: &ConversionRequest) -> RenderMode {
    if !request.show_comparison {
        return RenderMode::TranslationOnly;
    }
    if request.output_format == DocumentFormat::Pdf
        && request.input_format == DocumentFormat::Pdf
    {
        RenderMode::InterleavedPage
    } else {
        RenderMode::InterleavedInline
    }
}

fn mode_needs_original(mode: RenderMode) -> bool {
    matches!(
        mode,
        RenderMode::InterleavedInline | RenderMode::InterleavedPage
    )
}
