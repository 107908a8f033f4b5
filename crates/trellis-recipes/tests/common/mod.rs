//! Counting test doubles for the recipe admin collaborators

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trellis_recipes::{
    AuthorizationService, ExtensionManager, InMemoryNotifier, RecipeAdmin, RecipeError,
    RecipeExecutor, RecipeHarvester, SiteService,
};
use trellis_types::{
    ExecutionContext, FeatureDescriptor, Permission, RecipeDescriptor, SiteSettings, User,
};

/// Authorizer answering a fixed value and counting calls
pub struct FixedAuthorizer {
    pub allow: bool,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl AuthorizationService for FixedAuthorizer {
    async fn authorize(&self, _user: &User, permission: &Permission) -> bool {
        assert_eq!(permission.name, "ExecuteRecipes");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.allow
    }
}

/// Harvester returning a fixed list, or failing
pub struct StaticHarvester {
    pub recipes: Vec<RecipeDescriptor>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StaticHarvester {
    pub fn new(recipes: Vec<RecipeDescriptor>) -> Arc<Self> {
        Arc::new(Self {
            recipes,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            recipes: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecipeHarvester for StaticHarvester {
    fn name(&self) -> &str {
        "static"
    }

    async fn harvest_recipes(&self) -> trellis_recipes::Result<Vec<RecipeDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RecipeError::harvest("static", "source unavailable"));
        }
        Ok(self.recipes.clone())
    }
}

/// Harvester that only returns once every other barrier party arrived
pub struct BarrierHarvester {
    pub barrier: Arc<tokio::sync::Barrier>,
    pub recipe: RecipeDescriptor,
}

#[async_trait::async_trait]
impl RecipeHarvester for BarrierHarvester {
    fn name(&self) -> &str {
        "barrier"
    }

    async fn harvest_recipes(&self) -> trellis_recipes::Result<Vec<RecipeDescriptor>> {
        self.barrier.wait().await;
        Ok(vec![self.recipe.clone()])
    }
}

/// Executor recording every invocation
#[derive(Default)]
pub struct RecordingExecutor {
    pub runs: Mutex<Vec<(String, RecipeDescriptor, ExecutionContext)>>,
}

impl RecordingExecutor {
    pub fn runs(&self) -> Vec<(String, RecipeDescriptor, ExecutionContext)> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecipeExecutor for RecordingExecutor {
    async fn execute(
        &self,
        execution_id: &str,
        recipe: &RecipeDescriptor,
        context: &ExecutionContext,
    ) -> trellis_recipes::Result<()> {
        self.runs.lock().unwrap().push((
            execution_id.to_string(),
            recipe.clone(),
            context.clone(),
        ));
        Ok(())
    }
}

pub struct StaticSite(pub SiteSettings);

#[async_trait::async_trait]
impl SiteService for StaticSite {
    async fn site_settings(&self) -> trellis_recipes::Result<SiteSettings> {
        Ok(self.0.clone())
    }
}

pub struct StaticFeatures(pub Vec<FeatureDescriptor>);

#[async_trait::async_trait]
impl ExtensionManager for StaticFeatures {
    async fn features(&self) -> trellis_recipes::Result<Vec<FeatureDescriptor>> {
        Ok(self.0.clone())
    }
}

/// Admin flow wired to test doubles
pub struct Harness {
    pub admin: RecipeAdmin,
    pub authorizer: Arc<FixedAuthorizer>,
    pub harvesters: Vec<Arc<StaticHarvester>>,
    pub executor: Arc<RecordingExecutor>,
    pub notifier: InMemoryNotifier,
}

impl Harness {
    pub fn new(
        allow: bool,
        harvesters: Vec<Arc<StaticHarvester>>,
        features: Vec<FeatureDescriptor>,
    ) -> Self {
        let authorizer = Arc::new(FixedAuthorizer {
            allow,
            calls: AtomicUsize::new(0),
        });
        let executor = Arc::new(RecordingExecutor::default());

        let admin = RecipeAdmin::new(
            authorizer.clone(),
            harvesters
                .iter()
                .map(|h| h.clone() as Arc<dyn RecipeHarvester>)
                .collect(),
            executor.clone(),
            Arc::new(StaticSite(SiteSettings::new("Test Site"))),
            Arc::new(StaticFeatures(features)),
        );

        Self {
            admin,
            authorizer,
            harvesters,
            executor,
            notifier: InMemoryNotifier::new(),
        }
    }

    pub fn harvest_calls(&self) -> usize {
        self.harvesters.iter().map(|h| h.calls()).sum()
    }
}

pub fn admin_user() -> User {
    User::named("admin")
}
