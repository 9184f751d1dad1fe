//! Class-level model double

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::call_log::CallLog;
use super::record::{CollectionDouble, ResourceDouble};
use crate::domain::ports::{Record, RecordCollection, ResourceModel};
use crate::domain::request::Params;
use crate::error::ModelError;

/// Canned outcome of `find(id)`
#[derive(Clone)]
pub enum FindStub {
    Returns(Arc<ResourceDouble>),
    RaisesNotFound,
}

#[derive(Default)]
struct ModelStubs {
    find_all: Option<Arc<CollectionDouble>>,
    find: Option<FindStub>,
    build: Option<Arc<ResourceDouble>>,
    count: Option<u64>,
}

/// Stand-in for a model class with configurable finders
pub struct ModelDouble {
    model_name: String,
    stubs: Mutex<ModelStubs>,
    calls: CallLog,
}

impl ModelDouble {
    pub fn new(model_name: impl Into<String>) -> Self {
        let model_name = model_name.into();
        Self {
            calls: CallLog::new(model_name.clone()),
            model_name,
            stubs: Mutex::new(ModelStubs::default()),
        }
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    pub fn stub_find_all(&self, collection: Arc<CollectionDouble>) {
        self.stubs().find_all = Some(collection);
    }

    pub fn stub_find(&self, record: Arc<ResourceDouble>) {
        self.stubs().find = Some(FindStub::Returns(record));
    }

    pub fn stub_find_not_found(&self) {
        self.stubs().find = Some(FindStub::RaisesNotFound);
    }

    pub fn stub_build(&self, record: Arc<ResourceDouble>) {
        self.stubs().build = Some(record);
    }

    pub fn stub_count(&self, count: u64) {
        self.stubs().count = Some(count);
    }

    fn stubs(&self) -> MutexGuard<'_, ModelStubs> {
        self.stubs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unstubbed(&self, method: &str) -> ModelError {
        ModelError::Unstubbed {
            receiver: self.model_name.clone(),
            method: method.to_string(),
        }
    }
}

#[async_trait]
impl ResourceModel for ModelDouble {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn find_all(&self) -> Result<Arc<dyn RecordCollection>, ModelError> {
        self.calls.record("find_all", vec![]);
        let stub = self.stubs().find_all.clone();
        match stub {
            Some(collection) => Ok(collection as Arc<dyn RecordCollection>),
            None => Err(self.unstubbed("find_all")),
        }
    }

    async fn find(&self, id: &str) -> Result<Arc<dyn Record>, ModelError> {
        self.calls.record("find", vec![json!(id)]);
        let stub = self.stubs().find.clone();
        match stub {
            Some(FindStub::Returns(record)) => Ok(record as Arc<dyn Record>),
            Some(FindStub::RaisesNotFound) => Err(ModelError::RecordNotFound {
                model: self.model_name.clone(),
                id: id.to_string(),
            }),
            None => Err(self.unstubbed("find")),
        }
    }

    async fn build(&self, params: &Params) -> Result<Arc<dyn Record>, ModelError> {
        self.calls.record("build", vec![Value::Object(params.clone())]);
        let stub = self.stubs().build.clone();
        match stub {
            Some(record) => Ok(record as Arc<dyn Record>),
            None => Err(self.unstubbed("build")),
        }
    }

    async fn count(&self) -> Result<u64, ModelError> {
        self.calls.record("count", vec![]);
        let stub = self.stubs().count;
        stub.ok_or_else(|| self.unstubbed("count"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Arc<ResourceDouble> {
        Arc::new(ResourceDouble::new("Asset", 1, "XML"))
    }

    #[tokio::test]
    async fn find_returns_stubbed_record() {
        let model = ModelDouble::new("Asset");
        model.stub_find(asset());

        let found = model.find("1").await.unwrap();

        assert_eq!(found.id(), 1);
        assert!(model.calls().received_with("find", &[json!("1")]));
    }

    #[tokio::test]
    async fn find_raises_not_found() {
        let model = ModelDouble::new("Asset");
        model.stub_find_not_found();

        let result = model.find("-1").await;

        assert!(matches!(
            result,
            Err(ModelError::RecordNotFound { ref model, ref id }) if model == "Asset" && id == "-1"
        ));
    }

    #[tokio::test]
    async fn restubbing_find_overrides_setup() {
        let model = ModelDouble::new("Asset");
        model.stub_find(asset());
        model.stub_find_not_found();

        assert!(model.find("1").await.is_err());
    }

    #[tokio::test]
    async fn unstubbed_operations_fail() {
        let model = ModelDouble::new("Asset");

        assert!(matches!(
            model.find_all().await,
            Err(ModelError::Unstubbed { .. })
        ));
        assert!(matches!(
            model.build(&Params::new()).await,
            Err(ModelError::Unstubbed { .. })
        ));
        assert!(matches!(
            model.count().await,
            Err(ModelError::Unstubbed { .. })
        ));
    }

    #[tokio::test]
    async fn build_records_params() {
        let model = ModelDouble::new("Asset");
        model.stub_build(asset());
        let mut params = Params::new();
        params.insert("title".to_string(), json!("test"));

        model.build(&params).await.unwrap();

        assert!(model
            .calls()
            .received_with("build", &[json!({"title": "test"})]));
    }

    #[tokio::test]
    async fn count_returns_stub() {
        let model = ModelDouble::new("Asset");
        model.stub_count(10);

        assert_eq!(model.count().await, Ok(10));
    }
}
