//! Per-example fixtures
//!
//! `CrudFixture::setup` builds a fresh set of doubles for one example, with
//! the stubs every suite starts from. Nothing is shared between fixtures.

use std::sync::Arc;

use serde_json::json;

use crate::config::ContractConfig;
use crate::doubles::{
    CollectionDouble, ModelDouble, ResourceDouble, ValidationErrorsDouble, ViewRecorder,
};
use crate::domain::request::Params;
use crate::harness::ControllerContext;
use crate::naming::ResourceNames;

/// Doubles for one contract example
pub struct CrudFixture {
    pub names: ResourceNames,
    pub config: ContractConfig,
    pub model: Arc<ModelDouble>,
    pub record: Arc<ResourceDouble>,
    pub collection: Arc<CollectionDouble>,
    pub views: Arc<ViewRecorder>,
}

impl CrudFixture {
    /// For `Asset` this amounts to:
    /// - `record`     => Asset double, id 1, `to_xml` => "XML"
    /// - `collection` => [record]
    /// - `Asset.find_all` => collection, `Asset.count` => 10
    pub fn setup(names: &ResourceNames, config: &ContractConfig) -> Self {
        let record = Arc::new(ResourceDouble::new(
            &names.model_name,
            config.record_id,
            config.canned_xml.clone(),
        ));
        let collection = Arc::new(CollectionDouble::new(
            vec![record.clone()],
            config.canned_xml.clone(),
        ));

        let model = Arc::new(ModelDouble::new(names.model_name.clone()));
        model.stub_find_all(collection.clone());
        model.stub_count(config.record_count);

        Self {
            names: names.clone(),
            config: config.clone(),
            model,
            record,
            collection,
            views: Arc::new(ViewRecorder::new()),
        }
    }

    /// The record id as it appears in request paths
    pub fn record_id(&self) -> String {
        self.config.record_id.to_string()
    }

    /// `find(record_id)` returns the fixture record
    pub fn stub_record_found(&self) {
        self.model.stub_find(self.record.clone());
    }

    /// `find(_)` raises record-not-found
    pub fn stub_record_missing(&self) {
        self.model.stub_find_not_found();
    }

    /// A fresh, unsaved record that `build` will hand out
    pub fn stub_new_record(&self) -> Arc<ResourceDouble> {
        let record = Arc::new(ResourceDouble::new(
            &self.names.model_name,
            self.config.record_id,
            self.config.canned_xml.clone(),
        ));
        self.model.stub_build(record.clone());
        record
    }

    /// An errors double with no messages and the canned XML
    pub fn validation_errors(&self) -> Arc<ValidationErrorsDouble> {
        Arc::new(ValidationErrorsDouble::new(self.config.canned_xml.clone()))
    }

    /// `<prefix>/<plural_key>`
    pub fn collection_path(&self) -> String {
        self.names.collection_path(&self.config.route_prefix)
    }

    /// `<prefix>/<plural_key>/<id>/edit`
    pub fn edit_path(&self, id: i64) -> String {
        self.names.edit_path(&self.config.route_prefix, id)
    }

    /// What a controller factory receives for this fixture
    pub fn context(&self) -> ControllerContext {
        ControllerContext {
            model: self.model.clone(),
            views: self.views.clone(),
            names: self.names.clone(),
            route_prefix: self.config.route_prefix.clone(),
        }
    }
}

/// Params submitted by the create examples
pub fn create_params() -> Params {
    let mut params = Params::new();
    params.insert("title".to_string(), json!("test"));
    params.insert("key".to_string(), json!("value"));
    params
}

/// Params submitted by the successful update examples
pub fn update_params() -> Params {
    let mut params = Params::new();
    params.insert("title".to_string(), json!("test"));
    params
}
