//! Instance-level doubles: records, collections and validation errors

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::call_log::CallLog;
use crate::domain::ports::{Record, RecordCollection, ValidationErrors};
use crate::domain::request::Params;
use crate::error::ModelError;

// ============================================================================
// Validation errors
// ============================================================================

/// Stand-in for a failed validation's error collection
#[derive(Debug)]
pub struct ValidationErrorsDouble {
    xml: String,
    messages: Vec<String>,
    calls: CallLog,
}

impl ValidationErrorsDouble {
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            messages: Vec::new(),
            calls: CallLog::new("errors"),
        }
    }

    pub fn canned_xml(&self) -> &str {
        &self.xml
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl ValidationErrors for ValidationErrorsDouble {
    fn full_messages(&self) -> Vec<String> {
        self.calls.record("full_messages", vec![]);
        self.messages.clone()
    }

    fn to_xml(&self) -> String {
        self.calls.record("to_xml", vec![]);
        self.xml.clone()
    }
}

// ============================================================================
// Record
// ============================================================================

#[derive(Default)]
struct RecordStubs {
    save: Option<bool>,
    update_attributes: Option<bool>,
    destroy: Option<bool>,
    errors: Option<Arc<ValidationErrorsDouble>>,
}

/// Stand-in for one record with canned responses
pub struct ResourceDouble {
    id: i64,
    xml: String,
    stubs: Mutex<RecordStubs>,
    calls: CallLog,
}

impl ResourceDouble {
    pub fn new(model_name: &str, id: i64, xml: impl Into<String>) -> Self {
        Self {
            id,
            xml: xml.into(),
            stubs: Mutex::new(RecordStubs::default()),
            calls: CallLog::new(format!("{}#{}", model_name, id)),
        }
    }

    /// Always true; lets controllers and tests tell doubles from real records
    pub fn is_double(&self) -> bool {
        true
    }

    pub fn canned_xml(&self) -> &str {
        &self.xml
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    pub fn stub_save(&self, result: bool) {
        self.stubs().save = Some(result);
    }

    pub fn stub_update_attributes(&self, result: bool) {
        self.stubs().update_attributes = Some(result);
    }

    pub fn stub_destroy(&self, result: bool) {
        self.stubs().destroy = Some(result);
    }

    pub fn stub_errors(&self, errors: Arc<ValidationErrorsDouble>) {
        self.stubs().errors = Some(errors);
    }

    fn stubs(&self) -> MutexGuard<'_, RecordStubs> {
        self.stubs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stubbed(&self, method: &str, value: Option<bool>) -> Result<bool, ModelError> {
        value.ok_or_else(|| ModelError::Unstubbed {
            receiver: self.calls.receiver().to_string(),
            method: method.to_string(),
        })
    }
}

#[async_trait]
impl Record for ResourceDouble {
    fn id(&self) -> i64 {
        self.id
    }

    async fn save(&self) -> Result<bool, ModelError> {
        self.calls.record("save", vec![]);
        let stub = self.stubs().save;
        self.stubbed("save", stub)
    }

    async fn update_attributes(&self, attributes: &Params) -> Result<bool, ModelError> {
        self.calls
            .record("update_attributes", vec![Value::Object(attributes.clone())]);
        let stub = self.stubs().update_attributes;
        self.stubbed("update_attributes", stub)
    }

    async fn destroy(&self) -> Result<bool, ModelError> {
        self.calls.record("destroy", vec![]);
        let stub = self.stubs().destroy;
        self.stubbed("destroy", stub)
    }

    fn to_xml(&self) -> String {
        self.calls.record("to_xml", vec![]);
        self.xml.clone()
    }

    fn errors(&self) -> Arc<dyn ValidationErrors> {
        self.calls.record("errors", vec![]);
        match self.stubs().errors.clone() {
            Some(errors) => errors as Arc<dyn ValidationErrors>,
            None => Arc::new(ValidationErrorsDouble::new(String::new())),
        }
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Stand-in for the result of a find-all
pub struct CollectionDouble {
    records: Vec<Arc<ResourceDouble>>,
    xml: String,
    calls: CallLog,
}

impl CollectionDouble {
    pub fn new(records: Vec<Arc<ResourceDouble>>, xml: impl Into<String>) -> Self {
        Self {
            records,
            xml: xml.into(),
            calls: CallLog::new("collection"),
        }
    }

    pub fn canned_xml(&self) -> &str {
        &self.xml
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl RecordCollection for CollectionDouble {
    fn records(&self) -> Vec<Arc<dyn Record>> {
        self.records
            .iter()
            .map(|r| r.clone() as Arc<dyn Record>)
            .collect()
    }

    fn to_xml(&self) -> String {
        self.calls.record("to_xml", vec![]);
        self.xml.clone()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
