//! Batch post-processor over the raw asset directory.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use super::transform::{bounded_resize, encode_webp, square_thumbnail};
use super::{OptimizeError, OptimizeReport};
use crate::catalog::{Catalog, CatalogEntry, CatalogStore};
use crate::config::OptimizeConfig;

/// Raw inputs the post-processor picks up (lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Subdirectory holding resized derivatives.
pub const WEBP_DIR: &str = "webp";

/// Subdirectory holding thumbnails.
pub const THUMBS_DIR: &str = "thumbs";

const DERIVATIVE_EXTENSION: &str = "webp";

/// Produces WebP derivatives and thumbnails for every raw image.
pub struct Optimizer {
    config: OptimizeConfig,
    store: CatalogStore,
    source_dir: PathBuf,
}

/// Derivative locations for one raw file.
#[derive(Debug, Clone)]
struct Derivatives {
    full: PathBuf,
    thumb: PathBuf,
}

impl Optimizer {
    /// Create a new optimizer for `source_dir`.
    pub fn new(config: OptimizeConfig, store: CatalogStore, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            store,
            source_dir: source_dir.into(),
        }
    }

    /// Process every raw image still missing a derivative and backfill the
    /// catalog. Per-file failures are logged and counted, never fatal.
    pub async fn run(&self, mut catalog: Catalog) -> Result<OptimizeReport, OptimizeError> {
        let mut report = OptimizeReport::default();

        let images = self.find_images().await?;
        if images.is_empty() {
            info!(dir = %self.source_dir.display(), "No images found");
            report.catalog = catalog;
            return Ok(report);
        }

        let webp_dir = self.source_dir.join(WEBP_DIR);
        let thumbs_dir = self.source_dir.join(THUMBS_DIR);
        fs::create_dir_all(&webp_dir).await?;
        fs::create_dir_all(&thumbs_dir).await?;

        for path in images {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };
            let stem = Path::new(&name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(&name)
                .to_string();

            let derivatives = Derivatives {
                full: webp_dir.join(format!("{}.{}", stem, DERIVATIVE_EXTENSION)),
                thumb: thumbs_dir.join(format!("{}.{}", stem, DERIVATIVE_EXTENSION)),
            };

            if exists(&derivatives.full).await && exists(&derivatives.thumb).await {
                debug!(file = %name, "Derivatives present, skipping");
                report.skipped += 1;
                continue;
            }

            match self.process_file(path.clone(), derivatives.clone()).await {
                Ok(()) => {
                    report.optimized += 1;
                    report.thumbnails += 1;
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Failed to process image");
                    report.failed += 1;
                    continue;
                }
            }

            let local = self.catalog_path(&derivatives.full);
            let thumb = self.catalog_path(&derivatives.thumb);
            match catalog.match_file(&name) {
                Some(found) => {
                    debug!(file = %name, ?found, "Backfilling catalog entry");
                    let entry = &mut catalog.entries[found.index()];
                    entry.local_path = Some(local);
                    entry.thumb_path = Some(thumb);
                    report.backfilled += 1;
                }
                None => {
                    debug!(file = %name, "No catalog entry, appending one");
                    catalog.entries.push(CatalogEntry {
                        title: Some(stem),
                        file: Some(name),
                        local_path: Some(local),
                        thumb_path: Some(thumb),
                        ..Default::default()
                    });
                    report.appended += 1;
                }
            }
        }

        if report.backfilled + report.appended > 0 {
            self.store.save_or_warn(&catalog).await;
        }

        info!(
            optimized = report.optimized,
            thumbnails = report.thumbnails,
            skipped = report.skipped,
            failed = report.failed,
            catalog = %self.store.path().display(),
            "Optimization finished"
        );

        report.catalog = catalog;
        Ok(report)
    }

    /// Supported raw images directly inside the source directory, sorted.
    pub async fn find_images(&self) -> Result<Vec<PathBuf>, OptimizeError> {
        let mut dir = match fs::read_dir(&self.source_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(dir = %self.source_dir.display(), "Source directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(OptimizeError::Io(e)),
        };

        let mut images = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if supported {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }

    /// Decode, transform and write both derivatives off the async runtime.
    async fn process_file(&self, path: PathBuf, out: Derivatives) -> Result<(), OptimizeError> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || -> Result<(), OptimizeError> {
            // Fetched slots may carry a coerced extension, so sniff the content.
            let img = image::ImageReader::open(&path)?
                .with_guessed_format()?
                .decode()?;

            let full = bounded_resize(&img, config.max_dimension);
            std::fs::write(&out.full, encode_webp(&full, config.quality)?)?;

            let thumb = square_thumbnail(&img, config.thumb_size);
            std::fs::write(&out.thumb, encode_webp(&thumb, config.thumb_quality)?)?;
            Ok(())
        })
        .await?
    }

    /// Path as recorded in the catalog: relative to the catalog's directory,
    /// with forward slashes.
    fn catalog_path(&self, path: &Path) -> String {
        let root = self.store.root();
        let relative = if root.as_os_str().is_empty() {
            path
        } else {
            path.strip_prefix(root).unwrap_or(path)
        };
        relative.to_string_lossy().replace('\\', "/")
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
