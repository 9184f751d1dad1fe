//! Requests and responses as seen by the suites

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde::Serialize;

use crate::domain::ports::{Record, RecordCollection, ValidationErrors};

/// Request parameters (the map nested under the resource's singular key)
pub type Params = serde_json::Map<String, serde_json::Value>;

/// View variables handed to the renderer
pub type Assigns = BTreeMap<String, Assigned>;

/// The six admin controller actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Index,
    Show,
    Create,
    Update,
    Destroy,
    Edit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Index,
        Action::Show,
        Action::Create,
        Action::Update,
        Action::Destroy,
        Action::Edit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Show => "show",
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
            Action::Edit => "edit",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Action::Index | Action::Show | Action::Edit => Method::GET,
            Action::Create => Method::POST,
            Action::Update => Method::PUT,
            Action::Destroy => Method::DELETE,
        }
    }

    /// Whether the action addresses a single record
    pub fn is_member(&self) -> bool {
        !matches!(self, Action::Index | Action::Create)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.name())
    }
}

/// Requested representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Xml,
}

impl Format {
    /// Parse a `format` request parameter. Anything but `xml` is HTML
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.eq_ignore_ascii_case("xml") => Format::Xml,
            _ => Format::Html,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Xml => "xml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Html => "text/html; charset=utf-8",
            Format::Xml => "application/xml",
        }
    }
}

/// A view variable
#[derive(Clone)]
pub enum Assigned {
    Record(Arc<dyn Record>),
    Collection(Arc<dyn RecordCollection>),
    Errors(Arc<dyn ValidationErrors>),
    Count(u64),
}

impl Assigned {
    /// True if this is the given collection object (identity, not equality)
    pub fn is_collection(&self, expected: &Arc<dyn RecordCollection>) -> bool {
        matches!(self, Assigned::Collection(actual) if same_object(actual, expected))
    }

    /// True if this is the given record object
    pub fn is_record(&self, expected: &Arc<dyn Record>) -> bool {
        matches!(self, Assigned::Record(actual) if same_object(actual, expected))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Assigned::Record(_) => "record",
            Assigned::Collection(_) => "collection",
            Assigned::Errors(_) => "errors",
            Assigned::Count(_) => "count",
        }
    }
}

impl fmt::Debug for Assigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assigned::Record(record) => write!(f, "Record(id={})", record.id()),
            Assigned::Collection(collection) => write!(f, "Collection(len={})", collection.len()),
            Assigned::Errors(errors) => write!(f, "Errors({:?})", errors.full_messages()),
            Assigned::Count(count) => write!(f, "Count({})", count),
        }
    }
}

fn same_object<T: ?Sized, U: ?Sized>(a: &Arc<T>, b: &Arc<U>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// A simulated controller request
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub action: Action,
    pub id: Option<String>,
    pub format: Format,
    pub params: Option<Params>,
}

impl ActionRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            id: None,
            format: Format::Html,
            params: None,
        }
    }

    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }
}

/// Everything a suite can observe about a handled request
#[derive(Debug, Clone)]
pub struct ActionResponse {
    pub status: StatusCode,
    pub body: String,
    /// `Location` of a redirect response
    pub redirect_to: Option<String>,
    /// Flash notice set by the controller
    pub notice: Option<String>,
    /// Template handed to the view renderer, if any
    pub template: Option<String>,
    pub assigns: Assigns,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    pub fn assigned(&self, key: &str) -> Option<&Assigned> {
        self.assigns.get(key)
    }
}
