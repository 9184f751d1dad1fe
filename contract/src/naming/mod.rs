//! Resource naming
//!
//! Derives every name variant the suites need from one resource name.
//! For an `AssetsController` bound to `Asset`:
//! - `model_name`   => `Asset`
//! - `model_symbol` => `Asset`
//! - `human_plural` => `Assets`
//! - `singular_key` => `asset`  (params key, single view variable)
//! - `plural_key`   => `assets` (collection view variable, route segment)

pub mod inflections;

use std::fmt::Display;

use serde::Serialize;

use crate::error::SetupError;

pub use inflections::{camelize, classify, humanize, pluralize, singularize, underscore};

/// Name variants derived from a single resource name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNames {
    pub model_name: String,
    pub model_symbol: String,
    pub human_plural: String,
    pub singular_key: String,
    pub plural_key: String,
}

impl ResourceNames {
    /// Derive names from a resource name such as `Asset`, `asset` or `line_items`
    pub fn derive(resource: &str) -> Result<Self, SetupError> {
        let resource = resource.trim();
        if !is_identifier(resource) {
            return Err(SetupError::UnresolvableResource(resource.to_string()));
        }

        let model_name = classify(resource);
        if model_name.is_empty() {
            return Err(SetupError::UnresolvableResource(resource.to_string()));
        }

        let singular_key = underscore(&model_name);
        Ok(Self {
            model_symbol: model_name.clone(),
            human_plural: pluralize(&humanize(&model_name)),
            plural_key: pluralize(&singular_key),
            singular_key,
            model_name,
        })
    }

    /// Derive names from a model type, using its unqualified type name
    pub fn for_type<T: ?Sized>() -> Result<Self, SetupError> {
        let full = std::any::type_name::<T>();
        let without_generics = full.split('<').next().unwrap_or(full);
        let short = without_generics
            .rsplit("::")
            .next()
            .unwrap_or(without_generics);
        Self::derive(short)
    }

    /// `<prefix>/assets`
    pub fn collection_path(&self, prefix: &str) -> String {
        format!("{}/{}", prefix, self.plural_key)
    }

    /// `<prefix>/assets/<id>`
    pub fn member_path(&self, prefix: &str, id: impl Display) -> String {
        format!("{}/{}/{}", prefix, self.plural_key, id)
    }

    /// `<prefix>/assets/<id>/edit`
    pub fn edit_path(&self, prefix: &str, id: impl Display) -> String {
        format!("{}/edit", self.member_path(prefix, id))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
