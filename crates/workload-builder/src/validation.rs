//! Error records collected by the builders and the aggregate returned by `build`.

use std::fmt::Display;

use snafu::{OptionExt, Snafu, ensure};
use tracing::{debug, trace};

use crate::builder::ResourceKind;

/// A single error recorded by a builder setter.
#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to build {kind} object: missing {field}"))]
    MissingField {
        kind: ResourceKind,
        field: &'static str,
    },

    #[snafu(display("failed to build {kind} object: invalid {field} {value}, must not be negative"))]
    NegativeValue {
        kind: ResourceKind,
        field: &'static str,
        value: i64,
    },

    #[snafu(display("failed to build {kind} object: nil {nested} builder"))]
    MissingBuilder {
        kind: ResourceKind,
        nested: ResourceKind,
    },

    #[snafu(display("failed to build {kind} object: invalid {nested} builder: [{source}]"))]
    NestedBuild {
        kind: ResourceKind,
        nested: ResourceKind,
        source: Errors,
    },
}

impl Error {
    /// Returns `true` if the error stems from composing a nested builder rather than from
    /// validating a plain field.
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::MissingBuilder { .. } | Self::NestedBuild { .. })
    }

    /// The kind of resource whose builder recorded this error.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::MissingField { kind, .. }
            | Self::NegativeValue { kind, .. }
            | Self::MissingBuilder { kind, .. }
            | Self::NestedBuild { kind, .. } => *kind,
        }
    }
}

/// The errors collected by a builder, in the order they were recorded.
///
/// Builders append to it while their setters run and hand it out from `build` if it is not
/// empty. Errors are neither deduplicated nor reordered.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Errors(Vec<Error>);

impl Errors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, error: Error) {
        debug!(kind = %error.kind(), %error, "recorded builder error");
        self.0.push(error);
    }

    /// Records the error of a failed setter, if any.
    pub(crate) fn record(&mut self, result: Result<(), Error>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    /// Returns `value` if no error was recorded, and all recorded errors otherwise.
    pub(crate) fn finish<T>(self, kind: ResourceKind, value: T) -> Result<T, Self> {
        if self.is_empty() {
            trace!(%kind, "built object");
            Ok(value)
        } else {
            debug!(%kind, errors = self.len(), "failed to build object");
            Err(self)
        }
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            let prefix = match i {
                0 => "",
                _ => ", ",
            };
            write!(f, "{prefix}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl IntoIterator for Errors {
    type IntoIter = std::vec::IntoIter<Error>;
    type Item = Error;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type IntoIter = std::slice::Iter<'a, Error>;
    type Item = &'a Error;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fails with [`Error::MissingField`] if `value` is empty.
pub(crate) fn non_empty_str(
    kind: ResourceKind,
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, Error> {
    let value = value.into();
    ensure!(!value.is_empty(), MissingFieldSnafu { kind, field });
    Ok(value)
}

/// Fails with [`Error::MissingField`] if `value` is [`None`] and with
/// [`Error::NegativeValue`] if it is below zero.
pub(crate) fn non_negative<T>(
    kind: ResourceKind,
    field: &'static str,
    value: Option<T>,
) -> Result<T, Error>
where
    T: Copy + Into<i64>,
{
    let value = value.context(MissingFieldSnafu { kind, field })?;
    let wide: i64 = value.into();
    ensure!(wide >= 0, NegativeValueSnafu { kind, field, value: wide });
    Ok(value)
}
