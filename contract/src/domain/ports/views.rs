//! View rendering port

use crate::domain::request::Assigns;

/// Renders a named template with view variables into an HTML body
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, assigns: Assigns) -> String;
}
