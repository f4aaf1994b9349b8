use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{info, warn};
use tokio::sync::OnceCell;
use zip::ZipArchive;

use crate::app_config::FontConfig;

// @module: Font resolution for output rendering

/// Outcome of font resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFont {
    /// A usable font file on disk
    File(PathBuf),
    /// The guaranteed-available builtin face; output may be unreadable
    /// for non-latin scripts but rendering still succeeds
    Builtin,
}

/// Resolves a font capable of rendering the target script.
///
/// Candidates are tried as an ordered strategy list: configured local font
/// files first, then a one-time download of a known-good open CJK family
/// into the cache directory, and finally the builtin fallback. The result
/// is memoized per resolver instance, i.e. for one document render.
pub struct FontResolver {
    // @field: Font configuration
    config: FontConfig,
    // @field: Memoized resolution result
    resolved: OnceCell<ResolvedFont>,
}

impl FontResolver {
    /// Create a resolver from explicit configuration
    pub fn new(config: FontConfig) -> Self {
        Self {
            config,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve a font, memoized for the lifetime of this resolver.
    ///
    /// Never fails: exhaustion of all candidates yields the builtin face.
    pub async fn resolve(&self) -> &ResolvedFont {
        self.resolved
            .get_or_init(|| async {
                for candidate in &self.config.preferred {
                    if is_usable_candidate(candidate) {
                        info!("Using local font: {}", candidate.display());
                        return ResolvedFont::File(candidate.clone());
                    }
                }

                match self.download_fallback().await {
                    Ok(path) => {
                        info!("Using downloaded font: {}", path.display());
                        ResolvedFont::File(path)
                    }
                    Err(e) => {
                        warn!(
                            "Font download failed ({}); using builtin face, \
                             non-latin output may be unreadable",
                            e
                        );
                        ResolvedFont::Builtin
                    }
                }
            })
            .await
    }

    /// Fetch the fallback font family archive and unpack one face into the
    /// cache directory. A face already present in the cache is reused.
    async fn download_fallback(&self) -> Result<PathBuf> {
        let target = self.config.cache_dir.join(&self.config.download_file);
        if target.is_file() {
            return Ok(target);
        }

        std::fs::create_dir_all(&self.config.cache_dir)?;

        info!("Downloading fallback font family from {}", self.config.download_url);
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        let bytes = client
            .get(&self.config.download_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_ref()))?;

        // Prefer the configured face, else the first font file in the archive
        let mut picked: Option<usize> = None;
        for i in 0..archive.len() {
            let name = archive.by_index(i)?.name().to_string();
            if name.ends_with(&self.config.download_file) {
                picked = Some(i);
                break;
            }
            let lower = name.to_lowercase();
            if picked.is_none() && (lower.ends_with(".otf") || lower.ends_with(".ttf")) {
                picked = Some(i);
            }
        }
        let index = picked.ok_or_else(|| anyhow!("font archive contains no font face"))?;

        let mut entry = archive.by_index(index)?;
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content)?;
        std::fs::write(&target, &content)?;

        Ok(target)
    }
}

/// A candidate must exist and be a single-face font file.
/// TrueType collections (.ttc) cannot be embedded and are skipped.
fn is_usable_candidate(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_lowercase();
            ext == "ttf" || ext == "otf"
        }
        None => false,
    }
}
