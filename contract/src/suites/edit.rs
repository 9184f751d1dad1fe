//! CRUD GET edit

use axum::http::StatusCode;
use serde_json::json;

use crate::domain::request::{Action, ActionRequest, Format};
use crate::fixture::CrudFixture;
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

use super::{expect, Example, ExampleFuture, SuiteReport};

const VALID: &str = "with a valid ID";
const INVALID: &str = "with an invalid ID";

pub fn examples(names: &ResourceNames) -> Vec<Example> {
    vec![
        Example::within(
            VALID,
            format!("should find the {}", names.model_name),
            finds_record,
        ),
        Example::within(
            VALID,
            "should render the edit template when requesting HTML",
            renders_edit,
        ),
        Example::within(VALID, "should be successful", is_successful),
        Example::within(
            INVALID,
            format!(
                "should redirect to the {} index when requesting HTML",
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
    super::run_suite(Action::Edit, target).await
}

fn found(target: &ContractTarget) -> CrudFixture {
    let fixture = target.fixture();
    fixture.stub_record_found();
    fixture
}

fn missing(target: &ContractTarget) -> CrudFixture {
    let fixture = target.fixture();
    fixture.stub_record_missing();
    fixture
}

fn get(id: impl std::fmt::Display, format: Format) -> ActionRequest {
    ActionRequest::new(Action::Edit)
        .with_id(id)
        .with_format(format)
}

fn finds_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        target
            .dispatch(&fixture, get(fixture.record_id(), Format::Html))
            .await?;
        fixture
            .model
            .calls()
            .expect_received("find", &[json!(fixture.record_id())])
    })
}

fn renders_edit(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, get(fixture.record_id(), Format::Html))
            .await?;
        expect::template(&response, "edit")
    })
}

fn is_successful(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, get(fixture.record_id(), Format::Html))
            .await?;
        expect::success(&response)
    })
}

fn redirects_when_missing(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = missing(target);
        let response = target
            .dispatch(&fixture, get(fixture.config.invalid_id, Format::Html))
            .await?;
        expect::redirect(&response, &fixture.collection_path())
    })
}

fn not_found_via_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = missing(target);
        let response = target
            .dispatch(&fixture, get(fixture.config.invalid_id, Format::Xml))
            .await?;
        expect::status(&response, StatusCode::NOT_FOUND)
    })
}
