use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use tokio::process::Command;

use crate::app_config::LayoutEngineConfig;

// @module: External layout-preserving translation engine

/// Wrapper around an external engine that re-renders a PDF preserving its
/// visual layout while substituting translated text.
///
/// This is a collaborator, not part of the core pipeline: when the engine
/// is unavailable, fails, or produces no recognizable artifact, the caller
/// falls back to the standard extract/translate/render pipeline instead of
/// failing the conversion.
pub struct LayoutEngine {
    // @field: Engine configuration
    config: LayoutEngineConfig,
}

impl LayoutEngine {
    /// Create an engine wrapper from explicit configuration
    pub fn new(config: LayoutEngineConfig) -> Self {
        Self { config }
    }

    /// Run the engine over `input_pdf`, writing artifacts into `output_dir`.
    ///
    /// On success the engine leaves files suffixed `-dual` (bilingual) and
    /// `-mono` (translation-only) in the output directory; the `-dual`
    /// artifact is picked when `side_by_side` was requested and present,
    /// else `-mono`. Every failure path returns `None` so the caller can
    /// fail over to the standard pipeline.
    pub async fn translate_preserving_layout(
        &self,
        input_pdf: &Path,
        lang_code: &str,
        side_by_side: bool,
        output_dir: &Path,
    ) -> Option<PathBuf> {
        if !self.config.enabled {
            debug!("Layout-preserving engine disabled in configuration");
            return None;
        }

        let invocation = Command::new(&self.config.command)
            .arg(input_pdf)
            .args(["--lang-out", lang_code])
            .arg("--output")
            .arg(output_dir)
            .output();

        let timeout = std::time::Duration::from_secs(self.config.timeout_secs);
        let output = tokio::select! {
            result = invocation => {
                match result {
                    Ok(output) => output,
                    Err(e) => {
                        warn!("Failed to launch layout engine '{}': {}", self.config.command, e);
                        return None;
                    }
                }
            },
            _ = tokio::time::sleep(timeout) => {
                warn!("Layout engine timed out after {}s", self.config.timeout_secs);
                return None;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Layout engine failed ({}): {}", output.status, stderr.trim());
            return None;
        }

        let artifact = self.pick_artifact(output_dir, side_by_side);
        if artifact.is_none() {
            warn!("Layout engine produced no recognizable output artifact");
        }
        artifact
    }

    /// Pick `-dual` when side-by-side was requested and present, else `-mono`
    fn pick_artifact(&self, output_dir: &Path, side_by_side: bool) -> Option<PathBuf> {
        let dual = find_with_suffix(output_dir, "-dual.pdf");
        let mono = find_with_suffix(output_dir, "-mono.pdf");

        if side_by_side {
            dual.or(mono)
        } else {
            mono.or(dual)
        }
    }
}

fn find_with_suffix(dir: &Path, suffix: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(suffix))
            .unwrap_or(false)
        {
            return Some(path);
        }
    }
    None
}
