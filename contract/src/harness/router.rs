//! axum router harness
//!
//! Maps each action onto its conventional admin route and sends it through
//! the router with `tower::ServiceExt::oneshot`:
//! - index   => GET    <prefix>/<plural>
//! - show    => GET    <prefix>/<plural>/:id
//! - edit    => GET    <prefix>/<plural>/:id/edit
//! - create  => POST   <prefix>/<plural>
//! - update  => PUT    <prefix>/<plural>/:id
//! - destroy => DELETE <prefix>/<plural>/:id
//!
//! The format travels as `?format=`, params as a JSON body nested under the
//! singular key. Controllers report flash notices in the `x-flash-notice`
//! response header.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use super::ControllerHarness;
use crate::domain::request::{Action, ActionRequest, ActionResponse, Assigns, Params};
use crate::doubles::ViewRecorder;
use crate::error::HarnessError;
use crate::fixture::CrudFixture;
use crate::naming::ResourceNames;

/// Response header carrying the flash notice
pub const FLASH_NOTICE_HEADER: &str = "x-flash-notice";

/// Drives an axum router built for one fixture
pub struct RouterHarness {
    router: Router,
    names: ResourceNames,
    route_prefix: String,
    views: Arc<ViewRecorder>,
}

impl RouterHarness {
    pub fn new(router: Router, fixture: &CrudFixture) -> Self {
        Self {
            router: router.layer(TraceLayer::new_for_http()),
            names: fixture.names.clone(),
            route_prefix: fixture.config.route_prefix.clone(),
            views: fixture.views.clone(),
        }
    }

    /// Path and query for a request
    pub fn uri(&self, request: &ActionRequest) -> Result<String, HarnessError> {
        let path = if request.action.is_member() {
            let id = request.id.as_deref().ok_or(HarnessError::MissingId {
                action: request.action.name(),
            })?;
            let member = self
                .names
                .member_path(&self.route_prefix, urlencoding::encode(id));
            if request.action == Action::Edit {
                format!("{}/edit", member)
            } else {
                member
            }
        } else {
            self.names.collection_path(&self.route_prefix)
        };

        Ok(format!("{}?format={}", path, request.format.as_param()))
    }

    fn body(&self, params: Option<&Params>) -> Result<Body, HarnessError> {
        match params {
            Some(params) => {
                let mut nested = Params::new();
                nested.insert(
                    self.names.singular_key.clone(),
                    Value::Object(params.clone()),
                );
                Ok(Body::from(serde_json::to_vec(&nested)?))
            }
            None => Ok(Body::empty()),
        }
    }
}

#[async_trait]
impl ControllerHarness for RouterHarness {
    async fn dispatch(&self, request: ActionRequest) -> Result<ActionResponse, HarnessError> {
        let uri = self.uri(&request)?;
        let method = request.action.method();
        tracing::debug!("Dispatching {} {}", method, uri);

        let mut builder = Request::builder().method(method).uri(uri);
        if request.params.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let http_request = builder.body(self.body(request.params.as_ref())?)?;

        let renders_before = self.views.render_count();
        let response = match self.router.clone().oneshot(http_request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status();
        let redirect_to = if status.is_redirection() {
            header_value(response.headers(), header::LOCATION.as_str())
        } else {
            None
        };
        let notice = header_value(response.headers(), FLASH_NOTICE_HEADER);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| HarnessError::Body(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        let (template, assigns) = match self.views.last() {
            Some(rendered) if self.views.render_count() > renders_before => {
                (Some(rendered.template), rendered.assigns)
            }
            _ => (None, Assigns::new()),
        };

        tracing::debug!(
            "{} {} -> {} (template: {:?}, redirect: {:?})",
            request.action,
            request.format.as_param(),
            status,
            template,
            redirect_to
        );

        Ok(ActionResponse {
            status,
            body,
            redirect_to,
            notice,
            template,
            assigns,
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
