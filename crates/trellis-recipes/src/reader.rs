//! Reading `*.recipe.json` files
//!
//! A recipe file is a JSON object with descriptive header fields and a
//! `steps` array. The header becomes a [`RecipeDescriptor`]; the steps are
//! only loaded when the recipe runs.

use crate::error::{RecipeError, Result};
use serde::Deserialize;
use std::path::{Component, Path};
use tokio::fs;
use trellis_constants::RECIPE_FILE_SUFFIX;
use trellis_types::RecipeDescriptor;

/// Header fields of a recipe file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeHeader {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default, rename = "issetuprecipe", alias = "isSetupRecipe")]
    is_setup_recipe: bool,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// One entry of a recipe's `steps` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeStep {
    /// Handler name, e.g. `settings`
    pub name: String,
    /// The whole step object, `name` included
    #[serde(skip)]
    pub body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RecipeSteps {
    #[serde(default)]
    steps: Vec<serde_json::Value>,
}

/// Whether `file_name` looks like a recipe file
pub fn is_recipe_file(file_name: &str) -> bool {
    file_name.len() > RECIPE_FILE_SUFFIX.len()
        && file_name.to_ascii_lowercase().ends_with(RECIPE_FILE_SUFFIX)
}

/// `dir` relative to `root`, `/`-separated; empty when `dir` is the root
pub fn relative_base_path(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse the header of a recipe held in memory
pub fn parse_recipe(
    content: &str,
    base_path: &str,
    file_name: &str,
) -> std::result::Result<RecipeDescriptor, serde_json::Error> {
    let header: RecipeHeader = serde_json::from_str(content)?;
    Ok(RecipeDescriptor {
        name: header.name,
        display_name: header.display_name,
        description: header.description,
        author: header.author,
        website: header.website,
        version: header.version,
        is_setup_recipe: header.is_setup_recipe,
        categories: header.categories,
        tags: header.tags,
        base_path: base_path.to_string(),
        file_name: file_name.to_string(),
    })
}

/// Read the descriptor of the recipe at `path`, located under `root`
pub async fn read_recipe(root: &Path, path: &Path) -> Result<RecipeDescriptor> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| RecipeError::io(path.display().to_string(), e))?;

    let base_path = path
        .parent()
        .map(|dir| relative_base_path(root, dir))
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_recipe(&content, &base_path, &file_name)
        .map_err(|e| RecipeError::parse(path.display().to_string(), e))
}

/// Read every recipe directly inside `dir`, sorted by file name.
/// A missing folder holds no recipes.
pub async fn read_recipes_in(root: &Path, dir: &Path) -> Result<Vec<RecipeDescriptor>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(RecipeError::io(dir.display().to_string(), e)),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| RecipeError::io(dir.display().to_string(), e))?
    {
        let path = entry.path();
        let is_match = path
            .file_name()
            .is_some_and(|name| is_recipe_file(&name.to_string_lossy()));
        let is_file = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);
        if is_match && is_file {
            files.push(path);
        }
    }
    files.sort();

    let mut recipes = Vec::with_capacity(files.len());
    for file in files {
        recipes.push(read_recipe(root, &file).await?);
    }
    Ok(recipes)
}

/// Load the `steps` of a harvested recipe
pub async fn read_recipe_steps(root: &Path, recipe: &RecipeDescriptor) -> Result<Vec<RecipeStep>> {
    let path = root.join(recipe.relative_path());
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| RecipeError::io(path.display().to_string(), e))?;

    let parsed: RecipeSteps = serde_json::from_str(&content)
        .map_err(|e| RecipeError::parse(path.display().to_string(), e))?;

    parsed
        .steps
        .into_iter()
        .map(|body| {
            let mut step: RecipeStep = serde_json::from_value(body.clone())
                .map_err(|e| RecipeError::parse(path.display().to_string(), e))?;
            step.body = body;
            Ok(step)
        })
        .collect()
}
