//! CRUD DELETE destroy

use axum::http::StatusCode;
use serde_json::json;

use crate::domain::request::{Action, ActionRequest, Format};
use crate::fixture::CrudFixture;
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

use super::{expect, Example, ExampleFuture, SuiteReport};

const VALID: &str = "with a valid id";
const INVALID: &str = "with an invalid ID";

pub fn examples(names: &ResourceNames) -> Vec<Example> {
    vec![
        Example::within(
            VALID,
            format!("should find the correct {}", names.model_name),
            finds_record,
        ),
        Example::within(
            VALID,
            format!("should destroy the {}", names.model_name),
            destroys_record,
        ),
        Example::within(
            VALID,
            format!(
                "should redirect to {} index when requesting HTML",
                names.model_name
            ),
            redirects_to_index,
        ),
        Example::within(VALID, "should render 200 when requesting XML", ok_via_xml),
        Example::within(
            INVALID,
            format!(
                "should redirect to {} index when requesting HTML",
                names.model_name
            ),
            redirects_when_missing,
        ),
        Example::within(
            INVALID,
            "should render a 404 when requesting XML",
            not_found_via_xml,
        ),
    ]
}

pub async fn run(target: &ContractTarget) -> SuiteReport {
    super::run_suite(Action::Destroy, target).await
}

fn found(target: &ContractTarget) -> CrudFixture {
    let fixture = target.fixture();
    fixture.record.stub_destroy(true);
    fixture.stub_record_found();
    fixture
}

fn missing(target: &ContractTarget) -> CrudFixture {
    let fixture = target.fixture();
    fixture.stub_record_missing();
    fixture
}

fn delete(id: impl std::fmt::Display, format: Format) -> ActionRequest {
    ActionRequest::new(Action::Destroy)
        .with_id(id)
        .with_format(format)
}

fn finds_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        target
            .dispatch(&fixture, delete(fixture.record_id(), Format::Html))
            .await?;
        fixture
            .model
            .calls()
            .expect_received("find", &[json!(fixture.record_id())])
    })
}

fn destroys_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        target
            .dispatch(&fixture, delete(fixture.record_id(), Format::Html))
            .await?;
        fixture.record.calls().expect_received("destroy", &[])
    })
}

fn redirects_to_index(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, delete(fixture.record_id(), Format::Html))
            .await?;
        expect::redirect(&response, &fixture.collection_path())
    })
}

fn ok_via_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, delete(fixture.record_id(), Format::Xml))
            .await?;
        expect::status(&response, StatusCode::OK)
    })
}

fn redirects_when_missing(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = missing(target);
        let response = target
            .dispatch(&fixture, delete(fixture.config.invalid_id, Format::Html))
            .await?;
        expect::redirect(&response, &fixture.collection_path())
    })
}

fn not_found_via_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = missing(target);
        let response = target
            .dispatch(&fixture, delete(fixture.config.invalid_id, Format::Xml))
            .await?;
        expect::status(&response, StatusCode::NOT_FOUND)
    })
}
