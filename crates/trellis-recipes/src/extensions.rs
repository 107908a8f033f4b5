//! Extensions discovered from the content root
//!
//! Every directory under `modules/` or `themes/` is one extension exposing a
//! single feature. An optional `manifest.json` may give the feature a
//! display name:
//!
//! ```json
//! { "name": "Blog" }
//! ```

use crate::error::{RecipeError, Result};
use crate::services::ExtensionManager;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use trellis_constants::{EXTENSION_FOLDERS, EXTENSION_MANIFEST};
use trellis_types::FeatureDescriptor;

#[derive(Debug, Deserialize)]
struct ExtensionManifest {
    #[serde(default)]
    name: Option<String>,
}

/// Extension manager over a directory tree, rescanned on every call so
/// extensions added after startup are picked up
#[derive(Debug, Clone)]
pub struct DirectoryExtensionManager {
    root: PathBuf,
}

impl DirectoryExtensionManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan the root for extensions; features are sorted by sub-path
    async fn scan(&self) -> Result<Vec<FeatureDescriptor>> {
        let mut features = Vec::new();

        for folder in EXTENSION_FOLDERS {
            let dir = self.root.join(folder);
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(RecipeError::io(dir.display().to_string(), e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| RecipeError::io(dir.display().to_string(), e))?
            {
                let is_dir = entry
                    .file_type()
                    .await
                    .map(|file_type| file_type.is_dir())
                    .unwrap_or(false);
                if !is_dir {
                    continue;
                }

                let id = entry.file_name().to_string_lossy().into_owned();
                let name = read_manifest_name(&entry.path())
                    .await
                    .unwrap_or_else(|| id.clone());
                features.push(FeatureDescriptor::new(
                    id.clone(),
                    name,
                    format!("{folder}/{id}"),
                ));
            }
        }

        features.sort_by(|a, b| a.extension.sub_path.cmp(&b.extension.sub_path));
        debug!(
            "Found {} extensions under {}",
            features.len(),
            self.root.display()
        );
        Ok(features)
    }
}

#[async_trait::async_trait]
impl ExtensionManager for DirectoryExtensionManager {
    async fn features(&self) -> Result<Vec<FeatureDescriptor>> {
        self.scan().await
    }
}

/// Display name from the manifest; `None` when absent or unreadable
async fn read_manifest_name(extension_dir: &Path) -> Option<String> {
    let path = extension_dir.join(EXTENSION_MANIFEST);
    let content = fs::read_to_string(&path).await.ok()?;
    match serde_json::from_str::<ExtensionManifest>(&content) {
        Ok(manifest) => manifest.name.filter(|name| !name.trim().is_empty()),
        Err(e) => {
            warn!("Ignoring invalid manifest {}: {}", path.display(), e);
            None
        }
    }
}
