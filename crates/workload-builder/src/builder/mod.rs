//! This module provides builders for various (Kubernetes) workload objects.
//!
//! All builders share the same contract: setters consume and return the builder so calls
//! can be chained in any order, invalid values are recorded instead of failing right away,
//! and [`Build::build`] either returns the finished object or every recorded error.
use strum::{AsRefStr, Display};

use crate::validation::{Error, Errors};

pub mod configmap;
pub mod job;
pub mod meta;
pub mod pod;

/// The kinds of objects the builders in this module produce. Used to attribute errors.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ResourceKind {
    ConfigMap,
    Container,
    Job,
    JobSpec,
    Pod,
    PodTemplateSpec,
    Volume,
}

/// A builder that can be finalized into an object.
///
/// Composing builders (for example [`job::JobBuilder`] accepting a
/// [`pod::template::PodTemplateSpecBuilder`]) only rely on this trait to consume their
/// nested builders.
pub trait Build {
    type Output;

    /// The kind of object this builder produces.
    const KIND: ResourceKind;

    /// Consumes the builder and returns the finished object, or all errors recorded while
    /// the builder was configured.
    fn build(self) -> Result<Self::Output, Errors>;
}

/// Finalizes a nested builder on behalf of the `kind` builder.
///
/// A missing builder or a failed nested build is recorded as exactly one error in
/// `errors`, in which case [`None`] is returned.
pub(crate) fn build_nested<B: Build>(
    errors: &mut Errors,
    kind: ResourceKind,
    builder: Option<B>,
) -> Option<B::Output> {
    let Some(builder) = builder else {
        errors.push(Error::MissingBuilder {
            kind,
            nested: B::KIND,
        });
        return None;
    };

    match builder.build() {
        Ok(output) => Some(output),
        Err(source) => {
            errors.push(Error::NestedBuild {
                kind,
                nested: B::KIND,
                source,
            });
            None
        }
    }
}
