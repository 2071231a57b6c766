use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Container, Pod, PodSpec, Toleration, Volume};
use snafu::ensure;

use crate::{
    builder::{
        Build, ResourceKind, build_nested,
        meta::{self, ObjectMetaBuilder},
    },
    validation::{self, Error, Errors, MissingFieldSnafu},
};

use self::{container::ContainerBuilder, volume::VolumeBuilder};

pub mod container;
pub mod template;
pub mod volume;

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// A builder to build [`Pod`] objects.
///
/// Containers and volumes are added through their builders, which are finalized right
/// away. Their errors end up wrapped in a single error of this builder.
#[derive(Clone, Debug)]
pub struct PodBuilder {
    metadata: ObjectMetaBuilder,
    spec: PodSpecFields,
    errors: Errors,
}

impl Default for PodBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PodBuilder {
    pub fn new() -> Self {
        Self {
            metadata: ObjectMetaBuilder::new(ResourceKind::Pod),
            spec: PodSpecFields::new(ResourceKind::Pod),
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

    /// Accepts any non-empty policy, see [`RestartPolicy`](crate::constants::RestartPolicy)
    /// for the well-known ones.
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

    /// Builds the container and appends it to the containers of the pod.
    pub fn with_container_builder(mut self, container_builder: Option<ContainerBuilder>) -> Self {
        self.spec.add_container(&mut self.errors, container_builder);
        self
    }

    /// Builds the volume and appends it to the volumes of the pod.
    pub fn with_volume_builder(mut self, volume_builder: Option<VolumeBuilder>) -> Self {
        self.spec.add_volume(&mut self.errors, volume_builder);
        self
    }

    /// Returns the constructed [`Pod`].
    pub fn build(self) -> Result<Pod, Errors> {
        let pod = Pod {
            metadata: self.metadata.build(),
            spec: Some(self.spec.build()),
            status: None,
        };
        self.errors.finish(ResourceKind::Pod, pod)
    }
}

impl Build for PodBuilder {
    type Output = Pod;

    const KIND: ResourceKind = ResourceKind::Pod;

    fn build(self) -> Result<Pod, Errors> {
        Self::build(self)
    }
}

/// The [`PodSpec`] fields shared by [`PodBuilder`] and
/// [`PodTemplateSpecBuilder`](template::PodTemplateSpecBuilder).
///
/// Like [`ObjectMetaBuilder`] it hands validation errors back to the owning builder.
#[derive(Clone, Debug)]
struct PodSpecFields {
    kind: ResourceKind,
    containers: Vec<Container>,
    volumes: Vec<Volume>,
    node_selector: Option<BTreeMap<String, String>>,
    restart_policy: Option<String>,
    service_account_name: Option<String>,
    tolerations: Option<Vec<Toleration>>,
}

impl PodSpecFields {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            containers: Vec::new(),
            volumes: Vec::new(),
            node_selector: None,
            restart_policy: None,
            service_account_name: None,
            tolerations: None,
        }
    }

    fn service_account_name(&mut self, service_account_name: impl Into<String>) -> Result {
        self.service_account_name = Some(validation::non_empty_str(
            self.kind,
            "serviceAccountName",
            service_account_name,
        )?);
        Ok(())
    }

    fn restart_policy(&mut self, restart_policy: impl Into<String>) -> Result {
        self.restart_policy = Some(validation::non_empty_str(
            self.kind,
            "restartPolicy",
            restart_policy,
        )?);
        Ok(())
    }

    fn with_node_selector(&mut self, node_selector: BTreeMap<String, String>) -> Result {
        meta::merge_map(self.kind, "nodeSelector", &mut self.node_selector, node_selector)
    }

    fn node_selector(&mut self, node_selector: BTreeMap<String, String>) -> Result {
        meta::replace_map(self.kind, "nodeSelector", &mut self.node_selector, node_selector)
    }

    fn tolerations(&mut self, tolerations: Vec<Toleration>) -> Result {
        ensure!(
            !tolerations.is_empty(),
            MissingFieldSnafu {
                kind: self.kind,
                field: "tolerations"
            }
        );
        self.tolerations
            .get_or_insert_with(Vec::new)
            .extend(tolerations);
        Ok(())
    }

    fn add_container(&mut self, errors: &mut Errors, builder: Option<ContainerBuilder>) {
        if let Some(container) = build_nested(errors, self.kind, builder) {
            self.containers.push(container);
        }
    }

    fn add_volume(&mut self, errors: &mut Errors, builder: Option<VolumeBuilder>) {
        if let Some(volume) = build_nested(errors, self.kind, builder) {
            self.volumes.push(volume);
        }
    }

    fn build(self) -> PodSpec {
        let volumes = if self.volumes.is_empty() {
            None
        } else {
            Some(self.volumes)
        };

        PodSpec {
            containers: self.containers,
            node_selector: self.node_selector,
            restart_policy: self.restart_policy,
            service_account_name: self.service_account_name,
            tolerations: self.tolerations,
            volumes,
            ..PodSpec::default()
        }
    }
}
