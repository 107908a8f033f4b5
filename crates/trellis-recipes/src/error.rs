//! Errors raised while harvesting or running recipes

use thiserror::Error;

/// Result type for recipe operations
pub type Result<T> = std::result::Result<T, RecipeError>;

#[derive(Error, Debug)]
pub enum RecipeError {
    /// Reading a recipe file or folder failed
    #[error("Recipe I/O error at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A recipe file is not valid recipe JSON
    #[error("Invalid recipe file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A harvester could not produce its recipes
    #[error("Harvester {harvester} failed: {message}")]
    Harvest { harvester: String, message: String },

    /// The recipe names a step no handler is registered for
    #[error("No handler for step '{step}' in recipe '{recipe}'")]
    StepNotFound { step: String, recipe: String },

    /// A step handler rejected its step
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// A `{{Name}}` template names an unknown execution parameter
    #[error("Unknown recipe parameter: {name}")]
    UnknownParameter { name: String },
}

impl RecipeError {
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse<P: Into<String>>(path: P, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn harvest<H: Into<String>, M: Into<String>>(harvester: H, message: M) -> Self {
        Self::Harvest {
            harvester: harvester.into(),
            message: message.into(),
        }
    }

    pub fn step_failed<S: Into<String>, M: Into<String>>(step: S, message: M) -> Self {
        Self::StepFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
