use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ConfigMap;

use crate::{
    builder::{
        Build, ResourceKind,
        meta::{self, ObjectMetaBuilder},
    },
    validation::{Error, Errors},
};

const DATA_FIELD: &str = "data";

/// A builder to build [`ConfigMap`] objects.
#[derive(Clone, Debug)]
pub struct ConfigMapBuilder {
    metadata: ObjectMetaBuilder,
    data: Option<BTreeMap<String, String>>,
    errors: Errors,
}

impl Default for ConfigMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMapBuilder {
    pub fn new() -> Self {
        Self {
            metadata: ObjectMetaBuilder::new(ResourceKind::ConfigMap),
            data: None,
            errors: Errors::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let result = self.metadata.name(name);
        self.errors.record(result);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let result = self.metadata.namespace(namespace);
        self.errors.record(result);
        self
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        let result = self.metadata.with_labels(labels);
        self.errors.record(result);
        self
    }

    pub fn with_labels_new(mut self, labels: BTreeMap<String, String>) -> Self {
        let result = self.metadata.labels(labels);
        self.errors.record(result);
        self
    }

    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        let result = self.metadata.with_annotations(annotations);
        self.errors.record(result);
        self
    }

    pub fn with_annotations_new(mut self, annotations: BTreeMap<String, String>) -> Self {
        let result = self.metadata.annotations(annotations);
        self.errors.record(result);
        self
    }

    /// Replaces the data of the [`ConfigMap`].
    pub fn with_data(mut self, data: BTreeMap<String, String>) -> Self {
        let result = meta::replace_map(ResourceKind::ConfigMap, DATA_FIELD, &mut self.data, data);
        self.errors.record(result);
        self
    }

    /// Adds `data` to the existing data, overwriting entries with the same key.
    pub fn with_merged_data(mut self, data: BTreeMap<String, String>) -> Self {
        let result = meta::merge_map(ResourceKind::ConfigMap, DATA_FIELD, &mut self.data, data);
        self.errors.record(result);
        self
    }

    /// Returns the constructed [`ConfigMap`].
    ///
    /// Data is required: if no data setter ran at all, a missing data error is recorded
    /// here, so a [`ConfigMap`] without data is never returned.
    pub fn build(mut self) -> Result<ConfigMap, Errors> {
        let data_error_recorded = self.errors.iter().any(|error| {
            matches!(error, Error::MissingField { field, .. } if *field == DATA_FIELD)
        });
        if self.data.is_none() && !data_error_recorded {
            self.errors.push(Error::MissingField {
                kind: ResourceKind::ConfigMap,
                field: DATA_FIELD,
            });
        }

        let config_map = ConfigMap {
            metadata: self.metadata.build(),
            data: self.data,
            ..ConfigMap::default()
        };
        self.errors.finish(ResourceKind::ConfigMap, config_map)
    }
}

impl Build for ConfigMapBuilder {
    type Output = ConfigMap;

    const KIND: ResourceKind = ResourceKind::ConfigMap;

    fn build(self) -> Result<ConfigMap, Errors> {
        Self::build(self)
    }
}
