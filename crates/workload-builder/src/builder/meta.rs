use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use snafu::ensure;

use crate::{
    builder::ResourceKind,
    validation::{self, Error, MissingFieldSnafu},
};

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// A builder to build [`ObjectMeta`] objects.
///
/// Unlike the resource builders it does not collect errors itself. Every setter returns the
/// validation error (attributed to the resource `kind` the metadata belongs to) and leaves
/// the field untouched, so the owning builder can record it in its own error list.
#[derive(Clone, Debug)]
pub struct ObjectMetaBuilder {
    kind: ResourceKind,
    name: Option<String>,
    namespace: Option<String>,
    labels: Option<BTreeMap<String, String>>,
    annotations: Option<BTreeMap<String, String>>,
}

impl ObjectMetaBuilder {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            name: None,
            namespace: None,
            labels: None,
            annotations: None,
        }
    }

    pub fn name(&mut self, name: impl Into<String>) -> Result {
        self.name = Some(validation::non_empty_str(self.kind, "name", name)?);
        Ok(())
    }

    pub fn namespace(&mut self, namespace: impl Into<String>) -> Result {
        self.namespace = Some(validation::non_empty_str(self.kind, "namespace", namespace)?);
        Ok(())
    }

    /// This adds multiple labels to the existing labels.
    /// Any existing label with a key that is contained in `labels` will be overwritten.
    pub fn with_labels(&mut self, labels: BTreeMap<String, String>) -> Result {
        merge_map(self.kind, "labels", &mut self.labels, labels)
    }

    /// This will replace all existing labels.
    pub fn labels(&mut self, labels: BTreeMap<String, String>) -> Result {
        replace_map(self.kind, "labels", &mut self.labels, labels)
    }

    /// This adds multiple annotations to the existing annotations.
    /// Any existing annotation with a key that is contained in `annotations` will be overwritten.
    pub fn with_annotations(&mut self, annotations: BTreeMap<String, String>) -> Result {
        merge_map(self.kind, "annotations", &mut self.annotations, annotations)
    }

    /// This will replace all existing annotations.
    pub fn annotations(&mut self, annotations: BTreeMap<String, String>) -> Result {
        replace_map(self.kind, "annotations", &mut self.annotations, annotations)
    }

    pub fn build(self) -> ObjectMeta {
        ObjectMeta {
            name: self.name,
            namespace: self.namespace,
            labels: self.labels,
            annotations: self.annotations,
            ..ObjectMeta::default()
        }
    }
}

/// Merges `entries` into `target`, creating the map if it does not exist yet.
pub(crate) fn merge_map(
    kind: ResourceKind,
    field: &'static str,
    target: &mut Option<BTreeMap<String, String>>,
    entries: BTreeMap<String, String>,
) -> Result {
    ensure!(!entries.is_empty(), MissingFieldSnafu { kind, field });
    target.get_or_insert_with(BTreeMap::new).extend(entries);
    Ok(())
}

/// Replaces `target` with `entries`.
pub(crate) fn replace_map(
    kind: ResourceKind,
    field: &'static str,
    target: &mut Option<BTreeMap<String, String>>,
    entries: BTreeMap<String, String>,
) -> Result {
    ensure!(!entries.is_empty(), MissingFieldSnafu { kind, field });
    *target = Some(entries);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn meta() {
        let mut builder = ObjectMetaBuilder::new(ResourceKind::Pod);
        builder.name("pod").unwrap();
        builder.namespace("default").unwrap();
        builder.with_labels(map([("app", "db")])).unwrap();
        builder.with_annotations(map([("note", "x")])).unwrap();
        let meta = builder.build();

        assert_eq!(meta.name.as_deref(), Some("pod"));
        assert_eq!(meta.namespace.as_deref(), Some("default"));
        assert_eq!(meta.labels, Some(map([("app", "db")])));
        assert_eq!(meta.annotations, Some(map([("note", "x")])));
    }

    #[test]
    fn empty_values_leave_fields_untouched() {
        let mut builder = ObjectMetaBuilder::new(ResourceKind::Job);
        builder.name("job").unwrap();

        assert_eq!(
            builder.name(""),
            Err(Error::MissingField {
                kind: ResourceKind::Job,
                field: "name"
            })
        );
        assert_eq!(
            builder.labels(BTreeMap::new()),
            Err(Error::MissingField {
                kind: ResourceKind::Job,
                field: "labels"
            })
        );

        let meta = builder.build();
        assert_eq!(meta.name.as_deref(), Some("job"));
        assert_eq!(meta.labels, None);
    }

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut builder = ObjectMetaBuilder::new(ResourceKind::Pod);
        builder.with_labels(map([("a", "1"), ("b", "1")])).unwrap();
        builder.with_labels(map([("b", "2"), ("c", "2")])).unwrap();

        assert_eq!(
            builder.build().labels,
            Some(map([("a", "1"), ("b", "2"), ("c", "2")]))
        );
    }

    #[test]
    fn replace_drops_previous_entries() {
        let mut builder = ObjectMetaBuilder::new(ResourceKind::Pod);
        builder.with_annotations(map([("a", "1")])).unwrap();
        builder.annotations(map([("b", "2")])).unwrap();

        assert_eq!(builder.build().annotations, Some(map([("b", "2")])));
    }
}
