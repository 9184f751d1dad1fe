//! Domain layer
//!
//! Types shared by the harness, the doubles and the suites.
//! - `request`: Actions, formats and the observable request/response pair
//! - `ports`: Trait definitions for the collaborators a controller talks to

pub mod ports;
pub mod request;

pub use ports::{Record, RecordCollection, ResourceModel, ValidationErrors, ViewRenderer};
pub use request::{Action, ActionRequest, ActionResponse, Assigned, Assigns, Format, Params};
