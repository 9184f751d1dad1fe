//! CRUD PUT update

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::domain::request::{Action, ActionRequest, Format};
use crate::doubles::ValidationErrorsDouble;
use crate::fixture::{update_params, CrudFixture};
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

use super::{expect, Example, ExampleFuture, SuiteReport};

const VALID: &str = "with valid parameters";
const INVALID: &str = "with invalid parameters";

pub fn examples(names: &ResourceNames) -> Vec<Example> {
    vec![
        Example::within(
            VALID,
            format!("should find the {}", names.model_name),
            finds_record,
        ),
        Example::within(
            VALID,
            format!("should save the {}", names.model_name),
            updates_attributes,
        ),
        Example::within(
            VALID,
            "should redirect to the index path when requesting HTML",
            redirects_with_notice,
        ),
        Example::within(VALID, "should render 200 OK for XML", ok_via_xml),
        Example::within(
            INVALID,
            format!(
                "should redirect to the {} index if the {} was not found",
                names.model_name, names.model_name
            ),
            redirects_when_missing,
        ),
        Example::within(
            INVALID,
            "should render the edit action when requesting with HTML",
            renders_edit,
        ),
        Example::within(
            INVALID,
            "should render the errors to XML when requesting with XML",
            renders_errors_xml,
        ),
    ]
}

pub async fn run(target: &ContractTarget) -> SuiteReport {
    super::run_suite(Action::Update, target).await
}

/// The record is found and accepts the new attributes
fn valid(target: &ContractTarget) -> CrudFixture {
    let fixture = target.fixture();
    fixture.record.stub_update_attributes(true);
    fixture.stub_record_found();
    fixture
}

/// The record is found but rejects the new attributes
fn invalid(target: &ContractTarget) -> (CrudFixture, Arc<ValidationErrorsDouble>) {
    let fixture = target.fixture();
    let errors = fixture.validation_errors();
    fixture.record.stub_errors(errors.clone());
    fixture.record.stub_update_attributes(false);
    fixture.stub_record_found();
    (fixture, errors)
}

/// Both branches submit the same params; only the stubbed outcome differs
fn put(fixture: &CrudFixture, format: Format) -> ActionRequest {
    ActionRequest::new(Action::Update)
        .with_id(fixture.record_id())
        .with_format(format)
        .with_params(update_params())
}

fn finds_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = valid(target);
        target.dispatch(&fixture, put(&fixture, Format::Html)).await?;
        fixture
            .model
            .calls()
            .expect_received("find", &[json!(fixture.record_id())])
    })
}

fn updates_attributes(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = valid(target);
        target.dispatch(&fixture, put(&fixture, Format::Html)).await?;
        fixture
            .record
            .calls()
            .expect_received("update_attributes", &[Value::Object(update_params())])
    })
}

fn redirects_with_notice(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = valid(target);
        let response = target.dispatch(&fixture, put(&fixture, Format::Html)).await?;
        expect::redirect(&response, &fixture.collection_path())?;
        expect::notice(&response)
    })
}

fn ok_via_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = valid(target);
        let response = target.dispatch(&fixture, put(&fixture, Format::Xml)).await?;
        expect::status(&response, StatusCode::OK)
    })
}

fn redirects_when_missing(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, _) = invalid(target);
        fixture.stub_record_missing();
        let response = target.dispatch(&fixture, put(&fixture, Format::Html)).await?;
        expect::redirect(&response, &fixture.collection_path())
    })
}

fn renders_edit(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, _) = invalid(target);
        let response = target.dispatch(&fixture, put(&fixture, Format::Html)).await?;
        fixture
            .record
            .calls()
            .expect_received("update_attributes", &[Value::Object(update_params())])?;
        expect::template(&response, "edit")
    })
}

fn renders_errors_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, errors) = invalid(target);
        let response = target.dispatch(&fixture, put(&fixture, Format::Xml)).await?;
        errors.calls().expect_received("to_xml", &[])?;
        expect::body(&response, errors.canned_xml())
    })
}
