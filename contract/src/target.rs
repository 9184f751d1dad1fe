//! Contract targets
//!
//! A `ContractTarget` binds one resource name to the controller under
//! contract. Names are derived once, when the target is built; every example
//! then asks the target for a fresh fixture and harness.

use std::sync::Arc;

use axum::Router;

use crate::config::ContractConfig;
use crate::domain::request::{ActionRequest, ActionResponse};
use crate::error::{ContractViolation, SetupError};
use crate::fixture::CrudFixture;
use crate::harness::{ControllerContext, ControllerHarness, RouterHarness};
use crate::naming::ResourceNames;

/// Builds the harness for one fixture
pub type HarnessFactory = Arc<dyn Fn(&CrudFixture) -> Arc<dyn ControllerHarness> + Send + Sync>;

/// A controller under contract, bound to its resource names
pub struct ContractTarget {
    names: ResourceNames,
    config: ContractConfig,
    harness: HarnessFactory,
}

impl ContractTarget {
    pub fn new<F>(resource: &str, config: ContractConfig, harness: F) -> Result<Self, SetupError>
    where
        F: Fn(&CrudFixture) -> Arc<dyn ControllerHarness> + Send + Sync + 'static,
    {
        let names = ResourceNames::derive(resource)?;
        tracing::debug!(
            "Contract target {} ({} / {})",
            names.model_name,
            names.singular_key,
            names.plural_key
        );
        Ok(Self {
            names,
            config,
            harness: Arc::new(harness),
        })
    }

    /// Target an axum router built from each fixture's collaborators
    pub fn for_router<F>(resource: &str, config: ContractConfig, router: F) -> Result<Self, SetupError>
    where
        F: Fn(ControllerContext) -> Router + Send + Sync + 'static,
    {
        Self::new(resource, config, move |fixture: &CrudFixture| {
            Arc::new(RouterHarness::new(router(fixture.context()), fixture))
                as Arc<dyn ControllerHarness>
        })
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Fresh doubles with the shared setup applied
    pub fn fixture(&self) -> CrudFixture {
        CrudFixture::setup(&self.names, &self.config)
    }

    pub fn harness(&self, fixture: &CrudFixture) -> Arc<dyn ControllerHarness> {
        (self.harness)(fixture)
    }

    /// Build a harness for `fixture` and send one request through it
    pub async fn dispatch(
        &self,
        fixture: &CrudFixture,
        request: ActionRequest,
    ) -> Result<ActionResponse, ContractViolation> {
        Ok(self.harness(fixture).dispatch(request).await?)
    }
}
