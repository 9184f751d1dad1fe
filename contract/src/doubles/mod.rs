//! Test doubles
//!
//! Recording implementations of the domain ports. Every double keeps canned
//! responses that tests can re-stub at any time and a `CallLog` the suites
//! assert against.
//!
//! Why hand-written doubles instead of mockall?
//! - The ports hand out `Arc<dyn Record>` objects whose identity the suites check
//! - Expectations are checked after the request, not declared up front
//! - Unstubbed calls surface as `ModelError::Unstubbed` instead of a panic inside a handler

pub mod call_log;
pub mod model;
pub mod record;
pub mod views;

pub use call_log::{Call, CallLog};
pub use model::{FindStub, ModelDouble};
pub use record::{CollectionDouble, ResourceDouble, ValidationErrorsDouble};
pub use views::{Rendered, ViewRecorder};
