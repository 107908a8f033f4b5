//! File-system recipe harvesters

use crate::error::Result;
use crate::reader::read_recipes_in;
use crate::services::{ExtensionManager, RecipeHarvester};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use trellis_constants::RECIPES_FOLDER;
use trellis_types::RecipeDescriptor;

/// Recipes shipped with the application in `<root>/Recipes`
pub struct ApplicationRecipeHarvester {
    root: PathBuf,
}

impl ApplicationRecipeHarvester {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl RecipeHarvester for ApplicationRecipeHarvester {
    fn name(&self) -> &str {
        "application"
    }

    async fn harvest_recipes(&self) -> Result<Vec<RecipeDescriptor>> {
        let recipes = read_recipes_in(&self.root, &self.root.join(RECIPES_FOLDER)).await?;
        debug!("Harvested {} application recipes", recipes.len());
        Ok(recipes)
    }
}

/// Recipes shipped by extensions in `<root>/<sub_path>/Recipes`
pub struct ExtensionRecipeHarvester {
    root: PathBuf,
    extensions: Arc<dyn ExtensionManager>,
}

impl ExtensionRecipeHarvester {
    pub fn new(root: impl Into<PathBuf>, extensions: Arc<dyn ExtensionManager>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }
}

#[async_trait::async_trait]
impl RecipeHarvester for ExtensionRecipeHarvester {
    fn name(&self) -> &str {
        "extensions"
    }

    async fn harvest_recipes(&self) -> Result<Vec<RecipeDescriptor>> {
        // Several features can share one extension folder
        let mut seen = HashSet::new();
        let sub_paths: Vec<String> = self
            .extensions
            .features()
            .await?
            .into_iter()
            .map(|feature| feature.extension.sub_path)
            .filter(|sub_path| seen.insert(sub_path.clone()))
            .collect();

        let mut recipes = Vec::new();
        for sub_path in sub_paths {
            let dir = self
                .root
                .join(sub_path.trim_start_matches('/'))
                .join(RECIPES_FOLDER);
            recipes.extend(read_recipes_in(&self.root, &dir).await?);
        }

        debug!("Harvested {} extension recipes", recipes.len());
        Ok(recipes)
    }
}
