use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{PodTemplateSpec, Toleration};

use crate::{
    builder::{
        Build, ResourceKind,
        meta::ObjectMetaBuilder,
        pod::{PodSpecFields, container::ContainerBuilder, volume::VolumeBuilder},
    },
    validation::Errors,
};

/// A builder to build [`PodTemplateSpec`] objects, usable for building a
/// [`Job`](k8s_openapi::api::batch::v1::Job) through a
/// [`JobBuilder`](crate::builder::job::JobBuilder) or a
/// [`JobSpecBuilder`](crate::builder::job::JobSpecBuilder).
#[derive(Clone, Debug)]
pub struct PodTemplateSpecBuilder {
    metadata: ObjectMetaBuilder,
    spec: PodSpecFields,
    errors: Errors,
}

impl Default for PodTemplateSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PodTemplateSpecBuilder {
    pub fn new() -> Self {
        Self {
            metadata: ObjectMetaBuilder::new(ResourceKind::PodTemplateSpec),
            spec: PodSpecFields::new(ResourceKind::PodTemplateSpec),
            errors: Errors::default(),
        }
    }

    /// Merges `labels` into the existing labels.
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        let result = self.metadata.with_labels(labels);
        self.errors.record(result);
        self
    }

    /// Replaces all existing labels with `labels`.
    pub fn with_labels_new(mut self, labels: BTreeMap<String, String>) -> Self {
        let result = self.metadata.labels(labels);
        self.errors.record(result);
        self
    }

    /// Merges `annotations` into the existing annotations.
    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        let result = self.metadata.with_annotations(annotations);
        self.errors.record(result);
        self
    }

    /// Replaces all existing annotations with `annotations`.
    pub fn with_annotations_new(mut self, annotations: BTreeMap<String, String>) -> Self {
        let result = self.metadata.annotations(annotations);
        self.errors.record(result);
        self
    }

    pub fn with_service_account_name(mut self, service_account_name: impl Into<String>) -> Self {
        let result = self.spec.service_account_name(service_account_name);
        self.errors.record(result);
        self
    }

    pub fn with_restart_policy(mut self, restart_policy: impl Into<String>) -> Self {
        let result = self.spec.restart_policy(restart_policy);
        self.errors.record(result);
        self
    }

    /// Merges `node_selector` into the existing node selector.
    pub fn with_node_selector(mut self, node_selector: BTreeMap<String, String>) -> Self {
        let result = self.spec.with_node_selector(node_selector);
        self.errors.record(result);
        self
    }

    /// Replaces the existing node selector with `node_selector`.
    pub fn with_node_selector_new(mut self, node_selector: BTreeMap<String, String>) -> Self {
        let result = self.spec.node_selector(node_selector);
        self.errors.record(result);
        self
    }

    /// Appends `tolerations` to the existing tolerations.
    pub fn with_tolerations(mut self, tolerations: Vec<Toleration>) -> Self {
        let result = self.spec.tolerations(tolerations);
        self.errors.record(result);
        self
    }

    pub fn with_container_builder(mut self, container_builder: Option<ContainerBuilder>) -> Self {
        self.spec.add_container(&mut self.errors, container_builder);
        self
    }

    /// Adds every container, recording one error per failing builder.
    pub fn with_container_builders(
        mut self,
        container_builders: impl IntoIterator<Item = ContainerBuilder>,
    ) -> Self {
        for container_builder in container_builders {
            self.spec
                .add_container(&mut self.errors, Some(container_builder));
        }
        self
    }

    pub fn with_volume_builder(mut self, volume_builder: Option<VolumeBuilder>) -> Self {
        self.spec.add_volume(&mut self.errors, volume_builder);
        self
    }

    /// Adds every volume, recording one error per failing builder.
    pub fn with_volume_builders(
        mut self,
        volume_builders: impl IntoIterator<Item = VolumeBuilder>,
    ) -> Self {
        for volume_builder in volume_builders {
            self.spec.add_volume(&mut self.errors, Some(volume_builder));
        }
        self
    }

    /// Returns the constructed [`PodTemplateSpec`].
    pub fn build(self) -> Result<PodTemplateSpec, Errors> {
        let template = PodTemplateSpec {
            metadata: Some(self.metadata.build()),
            spec: Some(self.spec.build()),
        };
        self.errors.finish(ResourceKind::PodTemplateSpec, template)
    }
}

impl Build for PodTemplateSpecBuilder {
    type Output = PodTemplateSpec;

    const KIND: ResourceKind = ResourceKind::PodTemplateSpec;

    fn build(self) -> Result<PodTemplateSpec, Errors> {
        Self::build(self)
    }
}
