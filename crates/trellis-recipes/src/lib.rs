//! Recipe administration
//!
//! Harvests recipe descriptors from the content root, lists them for the
//! admin screens and runs a selected recipe through the step executor.
//! Every collaborator sits behind a trait in [`services`] so the admin flow
//! can be driven by real implementations or test doubles alike.

pub mod admin;
pub mod authorization;
pub mod error;
pub mod executor;
pub mod extensions;
pub mod harvesters;
pub mod notifier;
pub mod reader;
pub mod services;
pub mod site;

pub use admin::{AdminResponse, RecipeAdmin};
pub use authorization::PermissionAuthorizer;
pub use error::{RecipeError, Result};
pub use executor::{
    LogStepHandler, RecipeStepContext, RecipeStepHandler, SettingsStepHandler, StepRecipeExecutor,
};
pub use extensions::DirectoryExtensionManager;
pub use harvesters::{ApplicationRecipeHarvester, ExtensionRecipeHarvester};
pub use notifier::InMemoryNotifier;
pub use services::*;
pub use site::InMemorySiteService;
