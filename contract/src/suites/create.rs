//! CRUD POST create

use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::Record;
use crate::domain::request::{Action, ActionRequest, Format};
use crate::doubles::{ResourceDouble, ValidationErrorsDouble};
use crate::fixture::{create_params, CrudFixture};
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

use super::{expect, Example, ExampleFuture, SuiteReport};

const VALID: &str = "with valid params";
const INVALID: &str = "with invalid parameters";

pub fn examples(names: &ResourceNames) -> Vec<Example> {
    vec![
        Example::within(
            VALID,
            format!("should build a new {}", names.model_name),
            builds_record,
        ),
        Example::within(
            VALID,
            format!("should save the {}", names.model_name),
            saves_record,
        ),
        Example::within(
            VALID,
            format!(
                "should redirect to the new {}'s edit page when requesting HTML",
                names.model_name
            ),
            redirects_to_edit,
        ),
        Example::within(
            VALID,
            "should return .to_xml when requesting XML",
            renders_xml,
        ),
        Example::within(
            INVALID,
            "should render the new template when requesting HTML",
            renders_new,
        ),
        Example::within(
            INVALID,
            "should render the errors to XML when requesting XML",
            renders_errors_xml,
        ),
    ]
}

pub async fn run(target: &ContractTarget) -> SuiteReport {
    super::run_suite(Action::Create, target).await
}

/// `build` hands out a record whose save succeeds
fn valid(target: &ContractTarget) -> (CrudFixture, Arc<ResourceDouble>) {
    let fixture = target.fixture();
    let record = fixture.stub_new_record();
    record.stub_save(true);
    (fixture, record)
}

/// `build` hands out a record whose save fails with validation errors
fn invalid(target: &ContractTarget) -> (CrudFixture, Arc<ValidationErrorsDouble>) {
    let fixture = target.fixture();
    let errors = fixture.validation_errors();
    let record = fixture.stub_new_record();
    record.stub_save(false);
    record.stub_errors(errors.clone());
    (fixture, errors)
}

fn post(format: Format) -> ActionRequest {
    ActionRequest::new(Action::Create)
        .with_format(format)
        .with_params(create_params())
}

fn builds_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, _) = valid(target);
        target.dispatch(&fixture, post(Format::Html)).await?;
        fixture
            .model
            .calls()
            .expect_received("build", &[Value::Object(create_params())])
    })
}

fn saves_record(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, record) = valid(target);
        target.dispatch(&fixture, post(Format::Html)).await?;
        record.calls().expect_received("save", &[])
    })
}

fn redirects_to_edit(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, record) = valid(target);
        let response = target.dispatch(&fixture, post(Format::Html)).await?;
        expect::redirect(&response, &fixture.edit_path(record.id()))
    })
}

fn renders_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, record) = valid(target);
        let response = target.dispatch(&fixture, post(Format::Xml)).await?;
        record.calls().expect_received("to_xml", &[])?;
        expect::body(&response, record.canned_xml())
    })
}

fn renders_new(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, _) = invalid(target);
        let response = target.dispatch(&fixture, post(Format::Html)).await?;
        expect::template(&response, "new")
    })
}

fn renders_errors_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let (fixture, errors) = invalid(target);
        let response = target.dispatch(&fixture, post(Format::Xml)).await?;
        errors.calls().expect_received("to_xml", &[])?;
        expect::body(&response, errors.canned_xml())
    })
}
