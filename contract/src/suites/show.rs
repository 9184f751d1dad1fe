//! CRUD GET show

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
            format!("should find the correct {}", names.model_name),
            finds_record,
        ),
        Example::within(
            VALID,
            "should render the correct template when requesting HTML",
            renders_show,
        ),
        Example::within(
            VALID,
            "should render the correct XML when requesting XML",
            renders_xml,
        ),
        Example::within(
            INVALID,
            "should redirect to the index if not found via HTML",
            redirects_when_missing,
        ),
        Example::within(
            INVALID,
            "should send a 404 if not found via XML",
            not_found_via_xml,
        ),
    ]
}

pub async fn run(target: &ContractTarget) -> SuiteReport {
    super::run_suite(Action::Show, target).await
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
    ActionRequest::new(Action::Show)
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

fn renders_show(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, get(fixture.record_id(), Format::Html))
            .await?;
        expect::template(&response, "show")
    })
}

fn renders_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = found(target);
        let response = target
            .dispatch(&fixture, get(fixture.record_id(), Format::Xml))
            .await?;
        fixture.record.calls().expect_received("to_xml", &[])?;
        expect::body(&response, fixture.record.canned_xml())
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
