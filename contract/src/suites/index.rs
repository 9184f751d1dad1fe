//! CRUD GET index

use std::sync::Arc;

use crate::domain::ports::RecordCollection;
use crate::domain::request::{Action, ActionRequest, Format};
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

use super::{expect, Example, ExampleFuture, SuiteReport};

pub fn examples(names: &ResourceNames) -> Vec<Example> {
    vec![
        Example::new(format!("should find all {}", names.human_plural), finds_all),
        Example::new("should be successful", is_successful),
        Example::new("should render the correct template", renders_index),
        Example::new(
            format!(
                "should assign the {} to the {} view variable",
                names.human_plural, names.plural_key
            ),
            assigns_collection,
        ),
        Example::new("should render the correct xml", renders_xml),
    ]
}

pub async fn run(target: &ContractTarget) -> SuiteReport {
    super::run_suite(Action::Index, target).await
}

fn get(format: Format) -> ActionRequest {
    ActionRequest::new(Action::Index).with_format(format)
}

fn finds_all(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = target.fixture();
        target.dispatch(&fixture, get(Format::Html)).await?;
        fixture.model.calls().expect_received("find_all", &[])
    })
}

fn is_successful(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = target.fixture();
        let response = target.dispatch(&fixture, get(Format::Html)).await?;
        expect::success(&response)
    })
}

fn renders_index(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = target.fixture();
        let response = target.dispatch(&fixture, get(Format::Html)).await?;
        expect::template(&response, "index")
    })
}

fn assigns_collection(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = target.fixture();
        let response = target.dispatch(&fixture, get(Format::Html)).await?;
        let expected: Arc<dyn RecordCollection> = fixture.collection.clone();
        expect::assigned_collection(&response, &fixture.names.plural_key, &expected)
    })
}

fn renders_xml(target: &ContractTarget) -> ExampleFuture<'_> {
    Box::pin(async move {
        let fixture = target.fixture();
        let response = target.dispatch(&fixture, get(Format::Xml)).await?;
        fixture.collection.calls().expect_received("to_xml", &[])?;
        expect::body(&response, fixture.collection.canned_xml())
    })
}
