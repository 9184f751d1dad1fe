//! Contract suites
//!
//! One module per controller action. Each exposes its examples as a list so
//! they can be run, listed or filtered; every example builds its own fixture.

pub mod create;
pub mod destroy;
pub mod edit;
pub mod expect;
pub mod index;
pub mod show;
pub mod update;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::domain::request::Action;
use crate::error::{ContractFailure, ContractViolation};
use crate::naming::ResourceNames;
use crate::target::ContractTarget;

pub type ExampleFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), ContractViolation>> + Send + 'a>>;

pub type ExampleFn = for<'a> fn(&'a ContractTarget) -> ExampleFuture<'a>;

/// One named expectation about a controller action
pub struct Example {
    pub context: Option<&'static str>,
    pub description: String,
    run: ExampleFn,
}

impl Example {
    pub fn new(description: impl Into<String>, run: ExampleFn) -> Self {
        Self {
            context: None,
            description: description.into(),
            run,
        }
    }

    pub fn within(context: &'static str, description: impl Into<String>, run: ExampleFn) -> Self {
        Self {
            context: Some(context),
            description: description.into(),
            run,
        }
    }

    /// Context and description, e.g. "with an invalid ID should send a 404"
    pub fn full_description(&self) -> String {
        match self.context {
            Some(context) => format!("{} {}", context, self.description),
            None => self.description.clone(),
        }
    }

    pub async fn run(&self, target: &ContractTarget) -> Result<(), ContractViolation> {
        (self.run)(target).await
    }
}

/// Examples of one action's suite
pub fn examples(action: Action, names: &ResourceNames) -> Vec<Example> {
    match action {
        Action::Index => index::examples(names),
        Action::Show => show::examples(names),
        Action::Create => create::examples(names),
        Action::Update => update::examples(names),
        Action::Destroy => destroy::examples(names),
        Action::Edit => edit::examples(names),
    }
}

/// Outcome of a single example
#[derive(Debug)]
pub struct ExampleOutcome {
    pub description: String,
    pub result: Result<(), ContractViolation>,
}

/// Outcomes of one action's suite
#[derive(Debug)]
pub struct SuiteReport {
    pub action: Action,
    pub resource: String,
    pub outcomes: Vec<ExampleOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExampleOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// The failed example with the given description, if any
    pub fn failure(&self, description: &str) -> Option<&ContractViolation> {
        self.outcomes
            .iter()
            .find(|o| o.description == description)
            .and_then(|o| o.result.as_ref().err())
    }

    pub fn into_result(self) -> Result<(), ContractFailure> {
        collect_failures(&self.resource, std::slice::from_ref(&self))
    }

    /// Panics with every failed example
    pub fn assert_passed(self) {
        if let Err(failure) = self.into_result() {
            panic!("{}", failure);
        }
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CRUD {} ({})", self.action, self.resource)?;
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(()) => writeln!(f, "  ok   {}", outcome.description)?,
                Err(violation) => writeln!(f, "  FAIL {}: {}", outcome.description, violation)?,
            }
        }
        Ok(())
    }
}

/// Outcomes of every suite for one resource
#[derive(Debug)]
pub struct ContractReport {
    pub resource: String,
    pub suites: Vec<SuiteReport>,
}

impl ContractReport {
    pub fn passed(&self) -> bool {
        self.suites.iter().all(SuiteReport::passed)
    }

    pub fn suite(&self, action: Action) -> Option<&SuiteReport> {
        self.suites.iter().find(|s| s.action == action)
    }

    pub fn into_result(self) -> Result<(), ContractFailure> {
        collect_failures(&self.resource, &self.suites)
    }

    pub fn assert_passed(self) {
        if let Err(failure) = self.into_result() {
            panic!("{}", failure);
        }
    }
}

impl fmt::Display for ContractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for suite in &self.suites {
            write!(f, "{}", suite)?;
        }
        Ok(())
    }
}

fn collect_failures(resource: &str, suites: &[SuiteReport]) -> Result<(), ContractFailure> {
    let failures: Vec<(String, String)> = suites
        .iter()
        .flat_map(|suite| {
            suite.failures().map(move |outcome| {
                (
                    format!("CRUD {} {}", suite.action, outcome.description),
                    outcome
                        .result
                        .as_ref()
                        .err()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                )
            })
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ContractFailure {
            resource: resource.to_string(),
            failures,
        })
    }
}

/// Run every example of one action's suite, in order
pub async fn run_suite(action: Action, target: &ContractTarget) -> SuiteReport {
    let names = target.names();
    let mut report = SuiteReport {
        action,
        resource: names.model_name.clone(),
        outcomes: Vec::new(),
    };

    for example in examples(action, names) {
        let description = example.full_description();
        let result = example.run(target).await;
        if let Err(violation) = &result {
            tracing::warn!(
                "CRUD {} {} {}: {}",
                action,
                names.model_name,
                description,
                violation
            );
        }
        report.outcomes.push(ExampleOutcome {
            description,
            result,
        });
    }

    tracing::info!(
        "CRUD {} for {}: {}/{} examples passed",
        action,
        names.model_name,
        report.outcomes.len() - report.failures().count(),
        report.outcomes.len()
    );
    report
}

/// Run all six suites against one target
pub async fn run_all(target: &ContractTarget) -> ContractReport {
    let mut suites = Vec::with_capacity(Action::ALL.len());
    for action in Action::ALL {
        suites.push(run_suite(action, target).await);
    }
    ContractReport {
        resource: target.names().model_name.clone(),
        suites,
    }
}
