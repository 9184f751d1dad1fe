//! CRUD contract suites for admin controllers
//!
//! Reusable behavioral checks for the six conventional admin actions
//! (index, show, create, update, destroy, edit). A suite is bound to one
//! resource name; it derives every naming variant from it, stubs the model
//! with recording doubles, drives the controller through a harness and
//! reports which expectations failed.
//!
//! ```ignore
//! use crud_contract::{ContractConfig, ContractTarget};
//!
//! let target = ContractTarget::for_router("Asset", ContractConfig::from_env(), admin_router)?;
//! crud_contract::run_all(&target).await.assert_passed();
//! ```

pub mod config;
pub mod domain;
pub mod doubles;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod naming;
pub mod suites;
pub mod target;

mod macros;

#[cfg(test)]
mod test_utils;


pub use config::ContractConfig;
pub use domain::{
    Action, ActionRequest, ActionResponse, Assigned, Assigns, Format, Params, Record,
    RecordCollection, ResourceModel, ValidationErrors, ViewRenderer,
};
pub use error::{ContractFailure, ContractViolation, HarnessError, ModelError, SetupError};
pub use fixture::CrudFixture;
pub use harness::{ControllerContext, ControllerHarness, RouterHarness, FLASH_NOTICE_HEADER};
pub use naming::ResourceNames;
pub use suites::{run_all, run_suite, ContractReport, SuiteReport};
pub use target::ContractTarget;
