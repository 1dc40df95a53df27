//! JSON file backed catalog store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use super::{Catalog, CatalogError};

/// Reads and rewrites the catalog document as a whole.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the catalog document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory recorded derivative paths are relative to.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Load the catalog, falling back to an empty one.
    ///
    /// A missing document is the first-run case. A corrupt or unreadable
    /// one is logged and replaced by an empty catalog.
    pub async fn load(&self) -> Catalog {
        match self.try_load().await {
            Ok(Some(catalog)) => {
                debug!(
                    path = %self.path.display(),
                    count = catalog.count,
                    entries = catalog.entries.len(),
                    "Loaded catalog"
                );
                catalog
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No catalog yet, starting empty");
                Catalog::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Catalog unreadable, starting empty");
                Catalog::new()
            }
        }
    }

    /// Load the catalog, reporting corruption instead of hiding it.
    pub async fn try_load(&self) -> Result<Option<Catalog>, CatalogError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::Io(e)),
        };
        let catalog = serde_json::from_slice(&bytes).map_err(CatalogError::Corrupt)?;
        Ok(Some(catalog))
    }

    /// Replace the document with `catalog`.
    ///
    /// Writes a sibling temp file and renames it over the document so a
    /// reader never observes a half-written catalog.
    pub async fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let mut json = serde_json::to_string_pretty(catalog).map_err(CatalogError::Serialize)?;
        json.push('\n');

        let parent = self.root();
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, json.as_bytes()).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp catalog");
            }
            return Err(CatalogError::Io(e));
        }

        debug!(
            path = %self.path.display(),
            count = catalog.count,
            entries = catalog.entries.len(),
            "Saved catalog"
        );
        Ok(())
    }

    /// Save, logging instead of failing. Returns whether the write succeeded.
    pub async fn save_or_warn(&self, catalog: &Catalog) -> bool {
        match self.save(catalog).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save catalog");
                false
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
