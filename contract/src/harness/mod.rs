//! Request simulation
//!
//! `ControllerHarness` is the seam between the suites and whatever hosts the
//! controller under contract. `RouterHarness` drives an axum `Router`
//! in-process; other hosts implement the trait themselves.

pub mod router;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ResourceModel, ViewRenderer};
use crate::domain::request::{ActionRequest, ActionResponse};
use crate::error::HarnessError;
use crate::naming::ResourceNames;

pub use router::{RouterHarness, FLASH_NOTICE_HEADER};

/// Simulates one controller request and reports what can be observed
#[async_trait]
pub trait ControllerHarness: Send + Sync {
    async fn dispatch(&self, request: ActionRequest) -> Result<ActionResponse, HarnessError>;
}

/// Collaborators handed to a controller under contract
#[derive(Clone)]
pub struct ControllerContext {
    pub model: Arc<dyn ResourceModel>,
    pub views: Arc<dyn ViewRenderer>,
    pub names: ResourceNames,
    pub route_prefix: String,
}

impl ControllerContext {
    /// `<prefix>/<plural_key>`, the index path every failure redirects to
    pub fn collection_path(&self) -> String {
        self.names.collection_path(&self.route_prefix)
    }

    pub fn edit_path(&self, id: i64) -> String {
        self.names.edit_path(&self.route_prefix, id)
    }
}
