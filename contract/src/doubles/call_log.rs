//! Call recording shared by all doubles

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::error::ContractViolation;

/// One recorded invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub args: Vec<Value>,
}

impl Call {
    fn describe(&self) -> String {
        format!(":{}({})", self.method, describe_args(&self.args))
    }
}

/// Ordered log of the messages a double received
#[derive(Debug)]
pub struct CallLog {
    receiver: String,
    calls: Mutex<Vec<Call>>,
}

impl CallLog {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn record(&self, method: &'static str, args: Vec<Value>) {
        tracing::trace!("{} received :{}", self.receiver, method);
        self.lock().push(Call { method, args });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.lock().iter().filter(|c| c.method == method).count()
    }

    pub fn received(&self, method: &str) -> bool {
        self.count(method) > 0
    }

    /// Whether `method` was received with exactly `args`
    pub fn received_with(&self, method: &str, args: &[Value]) -> bool {
        self.lock()
            .iter()
            .any(|c| c.method == method && c.args.as_slice() == args)
    }

    /// Fails unless `method` was received with exactly `args`
    pub fn expect_received(
        &self,
        method: &'static str,
        args: &[Value],
    ) -> Result<(), ContractViolation> {
        if self.received_with(method, args) {
            return Ok(());
        }
        Err(self.violation(method, format!("({})", describe_args(args))))
    }

    /// Fails unless `method` was received at least once, with any arguments
    pub fn expect_received_any(&self, method: &'static str) -> Result<(), ContractViolation> {
        if self.received(method) {
            return Ok(());
        }
        Err(self.violation(method, "any arguments".to_string()))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn violation(&self, method: &'static str, expected: String) -> ContractViolation {
        let received = self
            .lock()
            .iter()
            .map(Call::describe)
            .collect::<Vec<_>>()
            .join(", ");
        ContractViolation::NotReceived {
            receiver: self.receiver.clone(),
            method,
            expected,
            received,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn describe_args(args: &[Value]) -> String {
    args.iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
