//! Constants for the trellis workspace
//!
//! This crate provides centralized constants that can be used across
//! multiple crates without creating circular dependencies.

/// Permission required to list and run recipes
pub const EXECUTE_RECIPES_PERMISSION: &str = "ExecuteRecipes";

/// Tag that keeps a recipe out of the admin listing (compared case-insensitively)
pub const HIDDEN_RECIPE_TAG: &str = "hidden";

/// File suffix recognised by the recipe harvesters
pub const RECIPE_FILE_SUFFIX: &str = ".recipe.json";

/// Folder holding recipes, both at the content root and inside each extension
pub const RECIPES_FOLDER: &str = "Recipes";

/// Folders scanned for extensions, in scan order
pub const EXTENSION_FOLDERS: [&str; 2] = ["modules", "themes"];

/// Optional per-extension manifest
pub const EXTENSION_MANIFEST: &str = "manifest.json";

/// Admin listing route
pub const RECIPES_INDEX_ROUTE: &str = "/admin/recipes";

/// Admin execute route
pub const RECIPES_EXECUTE_ROUTE: &str = "/admin/recipes/execute";

/// Header carrying the authenticated user name from the fronting proxy
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Server port
pub const ENV_PORT: &str = "PORT";

/// Item store location
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";

/// Root directory holding `Recipes/`, `modules/` and `themes/`
pub const ENV_CONTENT_ROOT: &str = "TRELLIS_CONTENT_ROOT";

/// Site display name
pub const ENV_SITE_NAME: &str = "TRELLIS_SITE_NAME";

/// Comma-separated user names granted the recipe permission
pub const ENV_RECIPE_ADMINS: &str = "TRELLIS_RECIPE_ADMINS";

/// Notification shown when an execute request names an unknown recipe
pub const RECIPE_NOT_FOUND_MESSAGE: &str = "Recipe was not found";
