//! Fluent builders for Kubernetes workload resources (Jobs, Pods, Volumes and ConfigMaps).
//!
//! Every builder collects the errors of its setters instead of failing on the first
//! invalid value. Only [`build`](builder::Build::build) reports them, all at once and in
//! the order they were recorded. Builders can be nested: a [`JobBuilder`](builder::job::JobBuilder)
//! consumes a [`PodTemplateSpecBuilder`](builder::pod::template::PodTemplateSpecBuilder),
//! which in turn consumes [`ContainerBuilder`](builder::pod::container::ContainerBuilder)s
//! and [`VolumeBuilder`](builder::pod::volume::VolumeBuilder)s.
//!
//! ```
//! # use workload_builder::builder::{
//! #     job::JobBuilder,
//! #     pod::{container::ContainerBuilder, template::PodTemplateSpecBuilder},
//! # };
//! # use workload_builder::constants::RestartPolicy;
//! let job = JobBuilder::new()
//!     .with_name("cleanup")
//!     .with_namespace("default")
//!     .with_backoff_limit(Some(3))
//!     .with_restart_policy(RestartPolicy::Never)
//!     .with_pod_template_spec_builder(Some(
//!         PodTemplateSpecBuilder::new().with_container_builder(Some(
//!             ContainerBuilder::new()
//!                 .with_name("cleanup")
//!                 .with_image("busybox:1.36"),
//!         )),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(job.metadata.name.as_deref(), Some("cleanup"));
//! ```

pub mod builder;
pub mod constants;
pub mod validation;

// External re-exports
pub use k8s_openapi;
