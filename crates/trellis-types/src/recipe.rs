use serde::{Deserialize, Serialize};
use trellis_constants::HIDDEN_RECIPE_TAG;

/// Everything the admin screens need to know about one recipe file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDescriptor {
    /// Recipe name as declared in the file
    pub name: String,
    /// Human-readable title, falls back to `name` when absent
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub website: Option<String>,
    pub version: Option<String>,
    /// Setup recipes are meant for provisioning a new site
    pub is_setup_recipe: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Directory holding the recipe, relative to the content root, `/`-separated
    pub base_path: String,
    /// File name of the recipe inside `base_path`
    pub file_name: String,
}

impl RecipeDescriptor {
    /// Create a descriptor with only its identity filled in
    pub fn new(
        name: impl Into<String>,
        base_path: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            author: None,
            website: None,
            version: None,
            is_setup_recipe: false,
            categories: Vec::new(),
            tags: Vec::new(),
            base_path: base_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Add tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as a setup recipe
    pub fn setup(mut self) -> Self {
        self.is_setup_recipe = true;
        self
    }

    /// True when any tag equals `hidden`, ignoring ASCII case
    pub fn is_hidden(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(HIDDEN_RECIPE_TAG))
    }

    /// Identity used to resolve a recipe for execution
    pub fn matches(&self, base_path: &str, file_name: &str) -> bool {
        self.file_name == file_name && self.base_path == base_path
    }

    /// Path of the recipe file relative to the content root
    pub fn relative_path(&self) -> String {
        if self.base_path.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.base_path.trim_end_matches('/'), self.file_name)
        }
    }
}

/// Admin listing row for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeViewModel {
    pub name: String,
    pub display_name: String,
    pub file_name: String,
    pub base_path: String,
    pub tags: Vec<String>,
    pub is_setup_recipe: bool,
    /// Name of the feature that ships the recipe, if any
    pub feature: Option<String>,
    pub description: Option<String>,
}

impl RecipeViewModel {
    /// Project a descriptor, attaching the owning feature name
    pub fn from_descriptor(recipe: &RecipeDescriptor, feature: Option<String>) -> Self {
        Self {
            name: recipe.name.clone(),
            display_name: recipe
                .display_name
                .clone()
                .unwrap_or_else(|| recipe.name.clone()),
            file_name: recipe.file_name.clone(),
            base_path: recipe.base_path.clone(),
            tags: recipe.tags.clone(),
            is_setup_recipe: recipe.is_setup_recipe,
            feature,
            description: recipe.description.clone(),
        }
    }
}
