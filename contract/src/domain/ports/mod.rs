//! Domain ports (traits)
//!
//! Port traits define the collaborators a controller under contract depends on.
//! The doubles module provides recording implementations of each.

pub mod model;
pub mod views;

pub use model::{Record, RecordCollection, ResourceModel, ValidationErrors};
pub use views::ViewRenderer;
