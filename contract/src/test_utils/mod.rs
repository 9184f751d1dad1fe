//! Test utilities
//!
//! A reference admin controller written against the model and view ports,
//! plus deliberately faulty variants the suites must reject.

pub mod admin_controller;

pub use admin_controller::*;
