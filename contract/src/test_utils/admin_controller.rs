//! Reference admin controller
//!
//! A conventional axum admin controller over `ControllerContext`. With a
//! `Fault` it misbehaves in one specific way, so tests can check that the
//! suites catch it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::{
    Record, RecordCollection, ResourceModel, ValidationErrors, ViewRenderer,
};
use crate::domain::request::{Assigned, Assigns, Format, Params};
use crate::error::ModelError;
use crate::harness::{ControllerContext, FLASH_NOTICE_HEADER};

/// One way to break the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// index renders `list`
    WrongIndexTemplate,
    /// index XML serializes each record instead of the collection
    RecordByRecordXml,
    /// show answers XML requests with the HTML template
    ShowRendersHtmlForXml,
    /// create redirects to the index instead of the edit page
    CreateRedirectsToIndex,
    /// create renders `edit` when the record is invalid
    CreateRendersEditOnInvalid,
    /// create answers invalid XML requests with the record instead of its errors
    CreateXmlOmitsErrors,
    /// update succeeds without a flash notice
    SilentUpdate,
    /// update ignores the submitted params
    DropsUpdateParams,
    /// update renders the invalid branch without calling `update_attributes`
    SkipsUpdateAttributes,
    /// destroy redirects without destroying the record
    DestroyWithoutDestroying,
    /// missing records answer 200
    IgnoresMissingRecords,
}

pub struct AdminController {
    ctx: ControllerContext,
    fault: Option<Fault>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    format: Option<String>,
}

impl FormatQuery {
    fn format(&self) -> Format {
        Format::from_param(self.format.as_deref())
    }
}

type Controller = State<Arc<AdminController>>;

/// The well-behaved controller
pub fn admin_router(ctx: ControllerContext) -> Router {
    router(ctx, None)
}

/// A controller factory with one fault
pub fn faulty_router(fault: Fault) -> impl Fn(ControllerContext) -> Router + Send + Sync + 'static {
    move |ctx| router(ctx, Some(fault))
}

fn router(ctx: ControllerContext, fault: Option<Fault>) -> Router {
    let collection_route = ctx.collection_path();
    let member_route = format!("{}/:id", collection_route);
    let edit_route = format!("{}/edit", member_route);

    Router::new()
        .route(&collection_route, get(index).post(create))
        .route(&member_route, get(show).put(update).delete(destroy))
        .route(&edit_route, get(edit))
        .with_state(Arc::new(AdminController { ctx, fault }))
}

impl AdminController {
    fn has_fault(&self, fault: Fault) -> bool {
        self.fault == Some(fault)
    }

    fn render(&self, template: &str, assigns: Assigns) -> Response {
        Html(self.ctx.views.render(template, assigns)).into_response()
    }

    fn record_assigns(&self, record: Arc<dyn Record>) -> Assigns {
        let mut assigns = Assigns::new();
        assigns.insert(self.ctx.names.singular_key.clone(), Assigned::Record(record));
        assigns
    }

    /// Params nested under the singular key
    fn params(&self, body: Option<Json<Value>>) -> Params {
        body.and_then(|Json(body)| {
            body.get(&self.ctx.names.singular_key)
                .and_then(Value::as_object)
                .cloned()
        })
        .unwrap_or_default()
    }

    fn failed(&self, error: ModelError, format: Format) -> Response {
        match error {
            ModelError::RecordNotFound { .. } if self.has_fault(Fault::IgnoresMissingRecords) => {
                StatusCode::OK.into_response()
            }
            ModelError::RecordNotFound { .. } => match format {
                Format::Html => redirect(self.ctx.collection_path(), None),
                Format::Xml => StatusCode::NOT_FOUND.into_response(),
            },
            other => {
                tracing::error!("{} controller error: {}", self.ctx.names.model_name, other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn xml(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, Format::Xml.content_type())],
        body,
    )
        .into_response()
}

fn redirect(location: String, notice: Option<String>) -> Response {
    let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    if let Some(notice) = notice.and_then(|n| n.parse().ok()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(FLASH_NOTICE_HEADER), notice);
    }
    response
}

/// GET <prefix>/<plural>
async fn index(State(c): Controller, Query(query): Query<FormatQuery>) -> Response {
    let format = query.format();
    let collection = match c.ctx.model.find_all().await {
        Ok(collection) => collection,
        Err(e) => return c.failed(e, format),
    };

    match format {
        Format::Xml if c.has_fault(Fault::RecordByRecordXml) => {
            let body = collection
                .records()
                .iter()
                .map(|record| record.to_xml())
                .collect::<String>();
            xml(StatusCode::OK, body)
        }
        Format::Xml => xml(StatusCode::OK, collection.to_xml()),
        Format::Html => {
            let count = match c.ctx.model.count().await {
                Ok(count) => count,
                Err(e) => return c.failed(e, format),
            };
            let mut assigns = Assigns::new();
            assigns.insert(
                c.ctx.names.plural_key.clone(),
                Assigned::Collection(collection),
            );
            assigns.insert("count".to_string(), Assigned::Count(count));

            let template = if c.has_fault(Fault::WrongIndexTemplate) {
                "list"
            } else {
                "index"
            };
            c.render(template, assigns)
        }
    }
}

/// GET <prefix>/<plural>/:id
async fn show(
    State(c): Controller,
    Path(id): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Response {
    let format = query.format();
    match c.ctx.model.find(&id).await {
        Ok(record) => match format {
            Format::Xml if c.has_fault(Fault::ShowRendersHtmlForXml) => {
                c.render("show", c.record_assigns(record))
            }
            Format::Html => c.render("show", c.record_assigns(record)),
            Format::Xml => xml(StatusCode::OK, record.to_xml()),
        },
        Err(e) => c.failed(e, format),
    }
}

/// GET <prefix>/<plural>/:id/edit
async fn edit(
    State(c): Controller,
    Path(id): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Response {
    let format = query.format();
    match c.ctx.model.find(&id).await {
        Ok(record) => match format {
            Format::Html => c.render("edit", c.record_assigns(record)),
            Format::Xml => xml(StatusCode::OK, record.to_xml()),
        },
        Err(e) => c.failed(e, format),
    }
}

/// POST <prefix>/<plural>
async fn create(
    State(c): Controller,
    Query(query): Query<FormatQuery>,
    body: Option<Json<Value>>,
) -> Response {
    let format = query.format();
    let params = c.params(body);

    let record = match c.ctx.model.build(&params).await {
        Ok(record) => record,
        Err(e) => return c.failed(e, format),
    };

    match record.save().await {
        Ok(true) => match format {
            Format::Html if c.has_fault(Fault::CreateRedirectsToIndex) => {
                redirect(c.ctx.collection_path(), None)
            }
            Format::Html => redirect(c.ctx.edit_path(record.id()), None),
            Format::Xml => xml(StatusCode::CREATED, record.to_xml()),
        },
        Ok(false) => match format {
            Format::Html if c.has_fault(Fault::CreateRendersEditOnInvalid) => {
                c.render("edit", c.record_assigns(record))
            }
            Format::Html => c.render("new", c.record_assigns(record)),
            Format::Xml if c.has_fault(Fault::CreateXmlOmitsErrors) => {
                xml(StatusCode::UNPROCESSABLE_ENTITY, record.to_xml())
            }
            Format::Xml => xml(StatusCode::UNPROCESSABLE_ENTITY, record.errors().to_xml()),
        },
        Err(e) => c.failed(e, format),
    }
}

/// PUT <prefix>/<plural>/:id
async fn update(
    State(c): Controller,
    Path(id): Path<String>,
    Query(query): Query<FormatQuery>,
    body: Option<Json<Value>>,
) -> Response {
    let format = query.format();
    let params = if c.has_fault(Fault::DropsUpdateParams) {
        Params::new()
    } else {
        c.params(body)
    };

    let record = match c.ctx.model.find(&id).await {
        Ok(record) => record,
        Err(e) => return c.failed(e, format),
    };

    let updated = if c.has_fault(Fault::SkipsUpdateAttributes) {
        Ok(false)
    } else {
        record.update_attributes(&params).await
    };

    match updated {
        Ok(true) => match format {
            Format::Html => {
                let notice = (!c.has_fault(Fault::SilentUpdate))
                    .then(|| format!("{} was successfully updated.", c.ctx.names.model_name));
                redirect(c.ctx.collection_path(), notice)
            }
            Format::Xml => StatusCode::OK.into_response(),
        },
        Ok(false) => match format {
            Format::Html => c.render("edit", c.record_assigns(record)),
            Format::Xml => xml(StatusCode::UNPROCESSABLE_ENTITY, record.errors().to_xml()),
        },
        Err(e) => c.failed(e, format),
    }
}

/// DELETE <prefix>/<plural>/:id
async fn destroy(
    State(c): Controller,
    Path(id): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Response {
    let format = query.format();

    let record = match c.ctx.model.find(&id).await {
        Ok(record) => record,
        Err(e) => return c.failed(e, format),
    };

    let destroyed = if c.has_fault(Fault::DestroyWithoutDestroying) {
        Ok(true)
    } else {
        record.destroy().await
    };

    match destroyed {
        Ok(_) => match format {
            Format::Html => redirect(c.ctx.collection_path(), None),
            Format::Xml => StatusCode::OK.into_response(),
        },
        Err(e) => c.failed(e, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractConfig;
    use crate::fixture::CrudFixture;
    use crate::naming::ResourceNames;
    use axum_test::TestServer;
    use serde_json::json;

    fn fixture() -> CrudFixture {
        let names = ResourceNames::derive("Asset").unwrap();
        CrudFixture::setup(&names, &ContractConfig::default())
    }

    fn server(fixture: &CrudFixture) -> TestServer {
        TestServer::new(admin_router(fixture.context())).unwrap()
    }

    #[tokio::test]
    async fn index_renders_collection() {
        let fixture = fixture();
        let server = server(&fixture);

        let response = server.get("/admin/assets").await;

        response.assert_status_ok();
        let rendered = fixture.views.last().unwrap();
        assert_eq!(rendered.template, "index");
        assert!(rendered.assigns.contains_key("assets"));
        assert!(fixture.model.calls().received("count"));
    }

    #[tokio::test]
    async fn index_xml_uses_collection_xml() {
        let fixture = fixture();
        let server = server(&fixture);

        let response = server
            .get("/admin/assets")
            .add_query_param("format", "xml")
            .await;

        response.assert_status_ok();
        response.assert_text("XML");
        assert_eq!(response.header("content-type"), "application/xml");
        assert!(fixture.collection.calls().received("to_xml"));
        assert_eq!(fixture.views.render_count(), 0);
    }

    #[tokio::test]
    async fn missing_record_redirects_html_and_404s_xml() {
        let fixture = fixture();
        fixture.stub_record_missing();
        let server = server(&fixture);

        let html = server.get("/admin/assets/-1").await;
        html.assert_status(StatusCode::FOUND);
        assert_eq!(html.header("location"), "/admin/assets");

        let xml = server
            .get("/admin/assets/-1")
            .add_query_param("format", "xml")
            .await;
        xml.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_reads_nested_params() {
        let fixture = fixture();
        let record = fixture.stub_new_record();
        record.stub_save(true);
        let server = server(&fixture);

        let response = server
            .post("/admin/assets")
            .json(&json!({"asset": {"title": "test"}}))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "/admin/assets/1/edit");
        assert!(fixture
            .model
            .calls()
            .received_with("build", &[json!({"title": "test"})]));
    }

    #[tokio::test]
    async fn update_sets_flash_notice() {
        let fixture = fixture();
        fixture.record.stub_update_attributes(true);
        fixture.stub_record_found();
        let server = server(&fixture);

        let response = server
            .put("/admin/assets/1")
            .json(&json!({"asset": {"title": "test"}}))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(FLASH_NOTICE_HEADER),
            "Asset was successfully updated."
        );
    }

    #[tokio::test]
    async fn unstubbed_calls_are_server_errors() {
        let fixture = fixture();
        fixture.stub_record_found();
        let server = server(&fixture);

        let response = server.delete("/admin/assets/1").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn silent_update_has_no_notice() {
        let fixture = fixture();
        fixture.record.stub_update_attributes(true);
        fixture.stub_record_found();
        let server =
            TestServer::new(faulty_router(Fault::SilentUpdate)(fixture.context())).unwrap();

        let response = server.put("/admin/assets/1").await;

        response.assert_status(StatusCode::FOUND);
        assert!(response.headers().get(FLASH_NOTICE_HEADER).is_none());
    }
}
