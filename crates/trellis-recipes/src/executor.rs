//! Step-based recipe executor
//!
//! A recipe's `steps` run in file order, each through the handler
//! registered under the step's `name`. Before dispatch, `{{SiteName}}` and
//! `{{AdminUsername}}` placeholders in string values are replaced with the
//! execution context.

use crate::error::{RecipeError, Result};
use crate::reader::{read_recipe_steps, RecipeStep};
use crate::services::RecipeExecutor;
use crate::site::InMemorySiteService;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use trellis_types::{ExecutionContext, RecipeDescriptor};

/// Everything a step handler sees
pub struct RecipeStepContext<'a> {
    pub execution_id: &'a str,
    pub recipe: &'a RecipeDescriptor,
    /// Step with placeholders already resolved
    pub step: &'a RecipeStep,
    pub environment: &'a ExecutionContext,
}

/// Handles one kind of recipe step
#[async_trait::async_trait]
pub trait RecipeStepHandler: Send + Sync {
    /// Step `name` this handler answers to
    fn step_name(&self) -> &str;

    async fn execute(&self, context: &RecipeStepContext<'_>) -> Result<()>;
}

/// Executor dispatching recipe steps to registered handlers
pub struct StepRecipeExecutor {
    root: PathBuf,
    handlers: HashMap<String, Arc<dyn RecipeStepHandler>>,
}

impl StepRecipeExecutor {
    /// Executor for recipes harvested under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing any handler with the same step name
    pub fn with_handler(mut self, handler: Arc<dyn RecipeStepHandler>) -> Self {
        self.handlers
            .insert(handler.step_name().to_string(), handler);
        self
    }

    fn handler_for(
        &self,
        step: &RecipeStep,
        recipe: &RecipeDescriptor,
    ) -> Result<Arc<dyn RecipeStepHandler>> {
        self.handlers
            .get(&step.name)
            .cloned()
            .ok_or_else(|| RecipeError::StepNotFound {
                step: step.name.clone(),
                recipe: recipe.name.clone(),
            })
    }
}

#[async_trait::async_trait]
impl RecipeExecutor for StepRecipeExecutor {
    async fn execute(
        &self,
        execution_id: &str,
        recipe: &RecipeDescriptor,
        context: &ExecutionContext,
    ) -> Result<()> {
        let steps = read_recipe_steps(&self.root, recipe).await?;

        // Resolve every handler up front so an unknown step runs nothing
        let handlers = steps
            .iter()
            .map(|step| self.handler_for(step, recipe))
            .collect::<Result<Vec<_>>>()?;

        for (index, (step, handler)) in steps.iter().zip(handlers).enumerate() {
            let resolved = RecipeStep {
                name: step.name.clone(),
                body: resolve_parameters(&step.body, context)?,
            };
            debug!(
                execution_id = %execution_id,
                step = %step.name,
                index = index,
                "Running recipe step"
            );

            handler
                .execute(&RecipeStepContext {
                    execution_id,
                    recipe,
                    step: &resolved,
                    environment: context,
                })
                .await?;
        }

        info!(
            execution_id = %execution_id,
            recipe = %recipe.name,
            steps = steps.len(),
            "Recipe completed"
        );
        Ok(())
    }
}

/// Replace `{{Name}}` placeholders in every string of `value`
pub fn resolve_parameters(
    value: &serde_json::Value,
    context: &ExecutionContext,
) -> Result<serde_json::Value> {
    use serde_json::Value;

    Ok(match value {
        Value::String(text) => Value::String(resolve_template(text, context)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_parameters(item, context))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| Ok((key.clone(), resolve_parameters(item, context)?)))
                .collect::<Result<_>>()?,
        ),
        other => other.clone(),
    })
}

fn resolve_template(template: &str, context: &ExecutionContext) -> Result<String> {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(open) = result[start..].find("{{") {
        let open = start + open;
        let Some(close) = result[open..].find("}}") else {
            break;
        };
        let close = open + close + 2;
        let key = result[open + 2..close - 2].trim().to_string();

        let value = context
            .get(&key)
            .ok_or(RecipeError::UnknownParameter { name: key })?
            .to_string();

        result.replace_range(open..close, &value);
        start = open + value.len();
    }

    Ok(result)
}

/// `log` step: writes `message` to the service log
#[derive(Debug, Default)]
pub struct LogStepHandler;

#[async_trait::async_trait]
impl RecipeStepHandler for LogStepHandler {
    fn step_name(&self) -> &str {
        "log"
    }

    async fn execute(&self, context: &RecipeStepContext<'_>) -> Result<()> {
        let message = context
            .step
            .body
            .get("message")
            .and_then(|m| m.as_str())
            .ok_or_else(|| RecipeError::step_failed("log", "missing string field 'message'"))?;

        info!(
            execution_id = %context.execution_id,
            recipe = %context.recipe.name,
            "{}",
            message
        );
        Ok(())
    }
}

/// `settings` step: writes site settings
///
/// `SiteName`, `BaseUrl` and `TimeZone` update the matching settings; any
/// other key is kept as a free-form property.
pub struct SettingsStepHandler {
    site: Arc<InMemorySiteService>,
}

impl SettingsStepHandler {
    pub fn new(site: Arc<InMemorySiteService>) -> Self {
        Self { site }
    }
}

#[async_trait::async_trait]
impl RecipeStepHandler for SettingsStepHandler {
    fn step_name(&self) -> &str {
        "settings"
    }

    async fn execute(&self, context: &RecipeStepContext<'_>) -> Result<()> {
        let Some(fields) = context.step.body.as_object() else {
            return Err(RecipeError::step_failed("settings", "step is not an object"));
        };

        let mut updates = Vec::new();
        for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != "name") {
            match key.as_str() {
                "SiteName" | "BaseUrl" | "TimeZone" if !value.is_string() => {
                    return Err(RecipeError::step_failed(
                        "settings",
                        format!("'{key}' must be a string"),
                    ));
                }
                _ => updates.push((key.clone(), value.clone())),
            }
        }

        self.site
            .update(|settings| {
                for (key, value) in updates {
                    match (key.as_str(), value.as_str()) {
                        ("SiteName", Some(text)) => settings.site_name = text.to_string(),
                        ("BaseUrl", Some(text)) => settings.base_url = Some(text.to_string()),
                        ("TimeZone", Some(text)) => settings.time_zone = Some(text.to_string()),
                        _ => {
                            settings.properties.insert(key, value);
                        }
                    }
                }
            })
            .await;

        debug!(execution_id = %context.execution_id, "Site settings updated");
        Ok(())
    }
}
