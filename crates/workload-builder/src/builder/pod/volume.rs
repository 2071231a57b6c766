use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, EmptyDirVolumeSource, HostPathVolumeSource,
    PersistentVolumeClaimVolumeSource, ProjectedVolumeSource, SecretVolumeSource, Volume,
};
use snafu::OptionExt;

use crate::{
    builder::{Build, ResourceKind},
    constants::{DEFAULT_VOLUME_FILE_MODE, HostPathType},
    validation::{self, Error, Errors, MissingFieldSnafu},
};

type Result<T, E = Error> = std::result::Result<T, E>;

/// A builder to build [`Volume`] objects. May only contain one `volume_source`
/// at a time. E.g. a call like `with_secret` after `with_empty_dir` will overwrite the
/// `empty_dir`. A setter that fails validation keeps the previous source.
#[derive(Clone, Debug, Default)]
pub struct VolumeBuilder {
    name: Option<String>,
    volume_source: Option<VolumeSource>,
    errors: Errors,
}

#[derive(Clone, Debug, PartialEq)]
pub enum VolumeSource {
    ConfigMap(ConfigMapVolumeSource),
    EmptyDir(EmptyDirVolumeSource),
    HostPath(HostPathVolumeSource),
    PersistentVolumeClaim(PersistentVolumeClaimVolumeSource),
    Projected(ProjectedVolumeSource),
    Secret(SecretVolumeSource),
}

impl VolumeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        match validation::non_empty_str(ResourceKind::Volume, "name", name) {
            Ok(name) => self.name = Some(name),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Uses the host directory at `path` as source, without any type check.
    pub fn with_host_directory(self, path: impl Into<String>) -> Self {
        let source = validation::non_empty_str(ResourceKind::Volume, "path", path).map(|path| {
            VolumeSource::HostPath(HostPathVolumeSource { path, type_: None })
        });
        self.apply(source)
    }

    /// Uses the host path at `path` as source. The type is required and checked first.
    pub fn with_host_path_and_type(
        self,
        path: impl Into<String>,
        type_: Option<HostPathType>,
    ) -> Self {
        let source = type_
            .context(MissingFieldSnafu {
                kind: ResourceKind::Volume,
                field: "hostPath type",
            })
            .and_then(|type_| {
                let path = validation::non_empty_str(ResourceKind::Volume, "path", path)?;
                Ok(VolumeSource::HostPath(HostPathVolumeSource {
                    path,
                    type_: Some(type_.into()),
                }))
            });
        self.apply(source)
    }

    /// Uses the secret `secret_name` as source and names the volume after it.
    ///
    /// Without a `default_mode` the files are created with [`DEFAULT_VOLUME_FILE_MODE`].
    pub fn with_secret(
        mut self,
        secret_name: impl Into<String>,
        default_mode: Option<i32>,
    ) -> Self {
        match validation::non_empty_str(ResourceKind::Volume, "secretName", secret_name) {
            Ok(secret_name) => {
                self.volume_source = Some(VolumeSource::Secret(SecretVolumeSource {
                    secret_name: Some(secret_name.clone()),
                    default_mode: Some(default_mode.unwrap_or(DEFAULT_VOLUME_FILE_MODE)),
                    ..SecretVolumeSource::default()
                }));
                self.name = Some(secret_name);
            }
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Uses the config map `config_map_name` as source and names the volume after it.
    ///
    /// Without a `default_mode` the files are created with [`DEFAULT_VOLUME_FILE_MODE`].
    pub fn with_config_map(
        mut self,
        config_map_name: impl Into<String>,
        default_mode: Option<i32>,
    ) -> Self {
        match validation::non_empty_str(ResourceKind::Volume, "configMapName", config_map_name) {
            Ok(config_map_name) => {
                self.volume_source = Some(VolumeSource::ConfigMap(ConfigMapVolumeSource {
                    name: config_map_name.clone(),
                    default_mode: Some(default_mode.unwrap_or(DEFAULT_VOLUME_FILE_MODE)),
                    ..ConfigMapVolumeSource::default()
                }));
                self.name = Some(config_map_name);
            }
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub fn with_pvc_source(self, claim_name: impl Into<String>) -> Self {
        let source = Self::pvc_source(claim_name, None);
        self.apply(source)
    }

    pub fn with_read_only_pvc_source(self, claim_name: impl Into<String>) -> Self {
        let source = Self::pvc_source(claim_name, Some(true));
        self.apply(source)
    }

    pub fn with_empty_dir(self, empty_dir: Option<EmptyDirVolumeSource>) -> Self {
        let source = empty_dir
            .context(MissingFieldSnafu {
                kind: ResourceKind::Volume,
                field: "emptyDir",
            })
            .map(VolumeSource::EmptyDir);
        self.apply(source)
    }

    /// Uses the projected sources as source and names the volume `name`.
    ///
    /// An empty `name` is not an error: the volume keeps its current name (or stays unnamed).
    /// Nothing is renamed if `projected` is missing.
    pub fn with_projected_volumes(
        mut self,
        name: impl Into<String>,
        projected: Option<ProjectedVolumeSource>,
    ) -> Self {
        let source = projected
            .context(MissingFieldSnafu {
                kind: ResourceKind::Volume,
                field: "projected",
            })
            .map(VolumeSource::Projected);
        let name: String = name.into();
        if source.is_ok() && !name.is_empty() {
            self.name = Some(name);
        }
        self.apply(source)
    }

    fn pvc_source(
        claim_name: impl Into<String>,
        read_only: Option<bool>,
    ) -> Result<VolumeSource> {
        let claim_name = validation::non_empty_str(ResourceKind::Volume, "claimName", claim_name)?;
        Ok(VolumeSource::PersistentVolumeClaim(
            PersistentVolumeClaimVolumeSource {
                claim_name,
                read_only,
            },
        ))
    }

    /// Stores a validated source or records the error.
    fn apply(mut self, source: Result<VolumeSource>) -> Self {
        match source {
            Ok(source) => self.volume_source = Some(source),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Returns the constructed [`Volume`].
    pub fn build(self) -> Result<Volume, Errors> {
        let name = self.name.unwrap_or_default();
        let volume = match self.volume_source {
            None => Volume {
                name,
                ..Volume::default()
            },
            Some(VolumeSource::ConfigMap(config_map)) => Volume {
                name,
                config_map: Some(config_map),
                ..Volume::default()
            },
            Some(VolumeSource::EmptyDir(empty_dir)) => Volume {
                name,
                empty_dir: Some(empty_dir),
                ..Volume::default()
            },
            Some(VolumeSource::HostPath(host_path)) => Volume {
                name,
                host_path: Some(host_path),
                ..Volume::default()
            },
            Some(VolumeSource::PersistentVolumeClaim(pvc)) => Volume {
                name,
                persistent_volume_claim: Some(pvc),
                ..Volume::default()
            },
            Some(VolumeSource::Projected(projected)) => Volume {
                name,
                projected: Some(projected),
                ..Volume::default()
            },
            Some(VolumeSource::Secret(secret)) => Volume {
                name,
                secret: Some(secret),
                ..Volume::default()
            },
        };
        self.errors.finish(ResourceKind::Volume, volume)
    }
}

impl Build for VolumeBuilder {
    type Output = Volume;

    const KIND: ResourceKind = ResourceKind::Volume;

    fn build(self) -> Result<Volume, Errors> {
        Self::build(self)
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use rstest::rstest;

    use super::*;

    #[test]
    fn secret_without_mode_uses_default() {
        let volume = VolumeBuilder::new()
            .with_secret("tls", None)
            .build()
            .unwrap();

        assert_eq!(volume.name, "tls");
        let secret = volume.secret.unwrap();
        assert_eq!(secret.secret_name.as_deref(), Some("tls"));
        assert_eq!(secret.default_mode, Some(420));
    }

    #[test]
    fn config_map_with_explicit_mode() {
        let volume = VolumeBuilder::new()
            .with_config_map("settings", Some(0o400))
            .build()
            .unwrap();

        assert_eq!(volume.name, "settings");
        let config_map = volume.config_map.unwrap();
        assert_eq!(config_map.name, "settings");
        assert_eq!(config_map.default_mode, Some(0o400));
    }

    #[test]
    fn config_map_without_mode_uses_default() {
        let volume = VolumeBuilder::new()
            .with_config_map("settings", None)
            .build()
            .unwrap();

        assert_eq!(
            volume.config_map.and_then(|config_map| config_map.default_mode),
            Some(DEFAULT_VOLUME_FILE_MODE)
        );
    }

    #[test]
    fn empty_secret_name() {
        let builder = VolumeBuilder::new().with_secret("", None);

        assert_eq!(builder.name, None);
        assert_eq!(builder.volume_source, None);

        let errors = builder.build().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("missing secretName"));
    }

    #[test]
    fn host_path_and_type() {
        let volume = VolumeBuilder::new()
            .with_name("sockets")
            .with_host_path_and_type("/var/run", Some(HostPathType::Directory))
            .build()
            .unwrap();

        assert_eq!(
            volume.host_path,
            Some(HostPathVolumeSource {
                path: "/var/run".to_string(),
                type_: Some("Directory".to_string()),
            })
        );
    }

    #[rstest]
    #[case("", None, "hostPath type")]
    #[case("", Some(HostPathType::File), "path")]
    #[case("/var/run", None, "hostPath type")]
    fn host_path_and_type_errors(
        #[case] path: &str,
        #[case] type_: Option<HostPathType>,
        #[case] field: &'static str,
    ) {
        let errors = VolumeBuilder::new()
            .with_name("sockets")
            .with_host_path_and_type(path, type_)
            .build()
            .unwrap_err();

        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            vec![Error::MissingField {
                kind: ResourceKind::Volume,
                field,
            }]
        );
    }

    #[test]
    fn pvc_sources() {
        let volume = VolumeBuilder::new()
            .with_name("data")
            .with_pvc_source("data-claim")
            .build()
            .unwrap();
        assert_eq!(
            volume.persistent_volume_claim,
            Some(PersistentVolumeClaimVolumeSource {
                claim_name: "data-claim".to_string(),
                read_only: None,
            })
        );

        let volume = VolumeBuilder::new()
            .with_name("data")
            .with_read_only_pvc_source("data-claim")
            .build()
            .unwrap();
        assert_eq!(
            volume
                .persistent_volume_claim
                .and_then(|pvc| pvc.read_only),
            Some(true)
        );

        let errors = VolumeBuilder::new().with_pvc_source("").build().unwrap_err();
        assert!(errors.to_string().contains("missing claimName"));
    }

    #[test]
    fn empty_dir() {
        let volume = VolumeBuilder::new()
            .with_name("scratch")
            .with_empty_dir(Some(EmptyDirVolumeSource {
                medium: Some("Memory".to_string()),
                size_limit: Some(Quantity("64Mi".to_string())),
            }))
            .build()
            .unwrap();
        assert_eq!(
            volume.empty_dir.and_then(|dir| dir.medium),
            Some("Memory".to_string())
        );

        let errors = VolumeBuilder::new()
            .with_name("scratch")
            .with_empty_dir(None)
            .build()
            .unwrap_err();
        assert!(errors.to_string().contains("missing emptyDir"));
    }

    #[test]
    fn projected() {
        let projected = ProjectedVolumeSource {
            default_mode: Some(0o440),
            ..ProjectedVolumeSource::default()
        };

        let volume = VolumeBuilder::new()
            .with_projected_volumes("bundle", Some(projected.clone()))
            .build()
            .unwrap();
        assert_eq!(volume.name, "bundle");
        assert_eq!(volume.projected, Some(projected));

        let errors = VolumeBuilder::new()
            .with_projected_volumes("bundle", None)
            .build()
            .unwrap_err();
        assert!(errors.to_string().contains("missing projected"));
    }

    #[test]
    fn last_source_wins() {
        let volume = VolumeBuilder::new()
            .with_name("data")
            .with_empty_dir(Some(EmptyDirVolumeSource::default()))
            .with_host_directory("/data")
            .with_pvc_source("data-claim")
            .build()
            .unwrap();

        assert_eq!(volume.empty_dir, None);
        assert_eq!(volume.host_path, None);
        assert!(volume.persistent_volume_claim.is_some());
    }

    #[test]
    fn projected_with_empty_name_keeps_name() {
        let builder = VolumeBuilder::new()
            .with_name("bundle")
            .with_projected_volumes("", Some(ProjectedVolumeSource::default()));

        assert_eq!(builder.name.as_deref(), Some("bundle"));
        assert_eq!(builder.build().unwrap().name, "bundle");

        let builder = VolumeBuilder::new()
            .with_name("bundle")
            .with_projected_volumes("other", None);
        assert_eq!(builder.name.as_deref(), Some("bundle"));
    }

    #[rstest]
    #[case::name(|builder: VolumeBuilder| builder.with_name(""), "name")]
    #[case::host_directory(|builder: VolumeBuilder| builder.with_host_directory(""), "path")]
    #[case::host_path(
        |builder: VolumeBuilder| builder.with_host_path_and_type("", Some(HostPathType::File)),
        "path"
    )]
    #[case::secret(|builder: VolumeBuilder| builder.with_secret("", Some(0o400)), "secretName")]
    #[case::config_map(|builder: VolumeBuilder| builder.with_config_map("", None), "configMapName")]
    #[case::pvc(|builder: VolumeBuilder| builder.with_pvc_source(""), "claimName")]
    #[case::read_only_pvc(|builder: VolumeBuilder| builder.with_read_only_pvc_source(""), "claimName")]
    #[case::empty_dir(|builder: VolumeBuilder| builder.with_empty_dir(None), "emptyDir")]
    #[case::projected(
        |builder: VolumeBuilder| builder.with_projected_volumes("other", None),
        "projected"
    )]
    fn empty_value_keeps_previous_value(
        #[case] set_empty: fn(VolumeBuilder) -> VolumeBuilder,
        #[case] field: &'static str,
    ) {
        let valid = VolumeBuilder::new()
            .with_name("data")
            .with_pvc_source("data-claim");

        let builder = set_empty(valid.clone());

        assert_eq!(builder.name, valid.name);
        assert_eq!(builder.volume_source, valid.volume_source);
        assert_eq!(
            builder.build().unwrap_err().into_iter().collect::<Vec<_>>(),
            vec![Error::MissingField {
                kind: ResourceKind::Volume,
                field,
            }]
        );
    }

    #[test]
    fn failed_source_keeps_previous_source() {
        let builder = VolumeBuilder::new()
            .with_name("data")
            .with_host_directory("/data")
            .with_pvc_source("");

        assert!(matches!(
            builder.volume_source,
            Some(VolumeSource::HostPath(_))
        ));
        assert_eq!(builder.build().unwrap_err().len(), 1);
    }
}
