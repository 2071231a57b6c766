use std::collections::BTreeMap;

use k8s_openapi::api::{
    batch::v1::{Job, JobSpec},
    core::v1::{PodSpec, PodTemplateSpec},
};

use crate::{
    builder::{
        Build, ResourceKind, build_nested, meta::ObjectMetaBuilder,
        pod::template::PodTemplateSpecBuilder,
    },
    validation::{self, Error, Errors},
};

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// A builder to build [`Job`] objects.
///
/// The pod template is added via a [`PodTemplateSpecBuilder`], which is finalized during
/// [`Self::with_pod_template_spec_builder`]. A restart policy set on this builder is applied
/// to the template when building, regardless of the order of the calls.
///
/// # Example
///
/// ```
/// # use workload_builder::builder::{
/// #     job::JobBuilder,
/// #     pod::{container::ContainerBuilder, template::PodTemplateSpecBuilder},
/// # };
/// let errors = JobBuilder::new()
///     .with_name("")
///     .with_namespace("batch")
///     .with_pod_template_spec_builder(Some(
///         PodTemplateSpecBuilder::new()
///             .with_container_builder(Some(ContainerBuilder::new().with_image(""))),
///     ))
///     .build()
///     .unwrap_err();
///
/// assert_eq!(
///     errors.to_string(),
///     "failed to build Job object: missing name, \
///      failed to build Job object: invalid PodTemplateSpec builder: \
///      [failed to build PodTemplateSpec object: invalid Container builder: \
///      [failed to build Container object: missing image]]"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct JobBuilder {
    metadata: ObjectMetaBuilder,
    spec: JobSpecFields,
    errors: Errors,
}

impl Default for JobBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBuilder {
    pub fn new() -> Self {
        Self {
            metadata: ObjectMetaBuilder::new(ResourceKind::Job),
            spec: JobSpecFields::new(ResourceKind::Job),
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

    pub fn with_pod_template_spec_builder(
        mut self,
        template_builder: Option<PodTemplateSpecBuilder>,
    ) -> Self {
        self.spec.template(&mut self.errors, template_builder);
        self
    }

    pub fn with_backoff_limit(mut self, backoff_limit: Option<i32>) -> Self {
        let result = self.spec.backoff_limit(backoff_limit);
        self.errors.record(result);
        self
    }

    pub fn with_ttl_seconds_after_finished(mut self, ttl: Option<i32>) -> Self {
        let result = self.spec.ttl_seconds_after_finished(ttl);
        self.errors.record(result);
        self
    }

    /// Sets the restart policy of the pod template.
    pub fn with_restart_policy(mut self, restart_policy: impl Into<String>) -> Self {
        let result = self.spec.restart_policy(restart_policy);
        self.errors.record(result);
        self
    }

    /// Returns the constructed [`Job`].
    pub fn build(self) -> Result<Job, Errors> {
        let job = Job {
            metadata: self.metadata.build(),
            spec: Some(self.spec.build()),
            status: None,
        };
        self.errors.finish(ResourceKind::Job, job)
    }
}

impl Build for JobBuilder {
    type Output = Job;

    const KIND: ResourceKind = ResourceKind::Job;

    fn build(self) -> Result<Job, Errors> {
        Self::build(self)
    }
}

/// A builder to build [`JobSpec`] objects.
#[derive(Clone, Debug)]
pub struct JobSpecBuilder {
    spec: JobSpecFields,
    errors: Errors,
}

impl Default for JobSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSpecBuilder {
    pub fn new() -> Self {
        Self {
            spec: JobSpecFields::new(ResourceKind::JobSpec),
            errors: Errors::default(),
        }
    }

    pub fn with_pod_template_spec_builder(
        mut self,
        template_builder: Option<PodTemplateSpecBuilder>,
    ) -> Self {
        self.spec.template(&mut self.errors, template_builder);
        self
    }

    pub fn with_backoff_limit(mut self, backoff_limit: Option<i32>) -> Self {
        let result = self.spec.backoff_limit(backoff_limit);
        self.errors.record(result);
        self
    }

    pub fn with_completions(mut self, completions: Option<i32>) -> Self {
        let result = self.spec.completions(completions);
        self.errors.record(result);
        self
    }

    pub fn with_parallelism(mut self, parallelism: Option<i32>) -> Self {
        let result = self.spec.parallelism(parallelism);
        self.errors.record(result);
        self
    }

    pub fn with_active_deadline_seconds(mut self, active_deadline_seconds: Option<i64>) -> Self {
        let result = self.spec.active_deadline_seconds(active_deadline_seconds);
        self.errors.record(result);
        self
    }

    pub fn with_ttl_seconds_after_finished(mut self, ttl: Option<i32>) -> Self {
        let result = self.spec.ttl_seconds_after_finished(ttl);
        self.errors.record(result);
        self
    }

    /// Sets the restart policy of the pod template.
    pub fn with_restart_policy(mut self, restart_policy: impl Into<String>) -> Self {
        let result = self.spec.restart_policy(restart_policy);
        self.errors.record(result);
        self
    }

    /// Returns the constructed [`JobSpec`].
    pub fn build(self) -> Result<JobSpec, Errors> {
        let spec = self.spec.build();
        self.errors.finish(ResourceKind::JobSpec, spec)
    }
}

impl Build for JobSpecBuilder {
    type Output = JobSpec;

    const KIND: ResourceKind = ResourceKind::JobSpec;

    fn build(self) -> Result<JobSpec, Errors> {
        Self::build(self)
    }
}

/// The [`JobSpec`] fields shared by [`JobBuilder`] and [`JobSpecBuilder`].
#[derive(Clone, Debug)]
struct JobSpecFields {
    kind: ResourceKind,
    template: Option<PodTemplateSpec>,
    restart_policy: Option<String>,
    active_deadline_seconds: Option<i64>,
    backoff_limit: Option<i32>,
    completions: Option<i32>,
    parallelism: Option<i32>,
    ttl_seconds_after_finished: Option<i32>,
}

impl JobSpecFields {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            template: None,
            restart_policy: None,
            active_deadline_seconds: None,
            backoff_limit: None,
            completions: None,
            parallelism: None,
            ttl_seconds_after_finished: None,
        }
    }

    fn template(&mut self, errors: &mut Errors, builder: Option<PodTemplateSpecBuilder>) {
        if let Some(template) = build_nested(errors, self.kind, builder) {
            self.template = Some(template);
        }
    }

    fn restart_policy(&mut self, restart_policy: impl Into<String>) -> Result {
        self.restart_policy = Some(validation::non_empty_str(
            self.kind,
            "restartPolicy",
            restart_policy,
        )?);
        Ok(())
    }

    fn backoff_limit(&mut self, backoff_limit: Option<i32>) -> Result {
        self.backoff_limit = Some(validation::non_negative(
            self.kind,
            "backoffLimit",
            backoff_limit,
        )?);
        Ok(())
    }

    fn completions(&mut self, completions: Option<i32>) -> Result {
        self.completions = Some(validation::non_negative(
            self.kind,
            "completions",
            completions,
        )?);
        Ok(())
    }

    fn parallelism(&mut self, parallelism: Option<i32>) -> Result {
        self.parallelism = Some(validation::non_negative(
            self.kind,
            "parallelism",
            parallelism,
        )?);
        Ok(())
    }

    fn active_deadline_seconds(&mut self, active_deadline_seconds: Option<i64>) -> Result {
        self.active_deadline_seconds = Some(validation::non_negative(
            self.kind,
            "activeDeadlineSeconds",
            active_deadline_seconds,
        )?);
        Ok(())
    }

    fn ttl_seconds_after_finished(&mut self, ttl: Option<i32>) -> Result {
        self.ttl_seconds_after_finished = Some(validation::non_negative(
            self.kind,
            "ttlSecondsAfterFinished",
            ttl,
        )?);
        Ok(())
    }

    fn build(self) -> JobSpec {
        let mut template = self.template.unwrap_or_default();
        if let Some(restart_policy) = self.restart_policy {
            template
                .spec
                .get_or_insert_with(PodSpec::default)
                .restart_policy = Some(restart_policy);
        }

        JobSpec {
            template,
            active_deadline_seconds: self.active_deadline_seconds,
            backoff_limit: self.backoff_limit,
            completions: self.completions,
            parallelism: self.parallelism,
            ttl_seconds_after_finished: self.ttl_seconds_after_finished,
            ..JobSpec::default()
        }
    }
}
