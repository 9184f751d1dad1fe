//! Model port traits
//!
//! These traits describe the class-level and instance-level ORM operations an
//! admin controller relies on. Real controllers get an ORM-backed
//! implementation; the suites hand them recording doubles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::request::Params;
use crate::error::ModelError;

/// Class-level operations of a model
#[async_trait]
pub trait ResourceModel: Send + Sync {
    /// Class name, used in error messages
    fn model_name(&self) -> &str;

    /// Find all records, unfiltered
    async fn find_all(&self) -> Result<Arc<dyn RecordCollection>, ModelError>;

    /// Find a record by its id as received in the request path
    async fn find(&self, id: &str) -> Result<Arc<dyn Record>, ModelError>;

    /// Build an unsaved record from params
    async fn build(&self, params: &Params) -> Result<Arc<dyn Record>, ModelError>;

    /// Number of stored records
    async fn count(&self) -> Result<u64, ModelError>;
}

/// A single persisted (or about to be persisted) record
#[async_trait]
pub trait Record: Send + Sync {
    fn id(&self) -> i64;

    /// Persist the record. `Ok(false)` means validation failed
    async fn save(&self) -> Result<bool, ModelError>;

    /// Assign attributes and persist. `Ok(false)` means validation failed
    async fn update_attributes(&self, attributes: &Params) -> Result<bool, ModelError>;

    /// Delete the record
    async fn destroy(&self) -> Result<bool, ModelError>;

    fn to_xml(&self) -> String;

    /// Validation errors from the last save or update
    fn errors(&self) -> Arc<dyn ValidationErrors>;
}

/// Result of a find-all
pub trait RecordCollection: Send + Sync {
    fn records(&self) -> Vec<Arc<dyn Record>>;

    fn to_xml(&self) -> String;

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validation errors of a record
pub trait ValidationErrors: Send + Sync {
    fn full_messages(&self) -> Vec<String>;

    fn to_xml(&self) -> String;

    fn is_empty(&self) -> bool {
        self.full_messages().is_empty()
    }
}
