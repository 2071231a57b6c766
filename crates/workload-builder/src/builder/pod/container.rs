use k8s_openapi::api::core::v1::{Container, EnvVar, VolumeMount};

use crate::{
    builder::{Build, ResourceKind},
    validation::{self, Errors, MissingFieldSnafu},
};

/// A builder to build [`Container`] objects.
///
/// Containers are usually handed to a [`PodBuilder`](super::PodBuilder) or a
/// [`PodTemplateSpecBuilder`](super::template::PodTemplateSpecBuilder), which finalize
/// them while composing.
#[derive(Clone, Debug, Default)]
pub struct ContainerBuilder {
    args: Option<Vec<String>>,
    command: Option<Vec<String>>,
    env: Option<Vec<EnvVar>>,
    image: Option<String>,
    image_pull_policy: Option<String>,
    name: Option<String>,
    volume_mounts: Option<Vec<VolumeMount>>,
    errors: Errors,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        match validation::non_empty_str(ResourceKind::Container, "name", name) {
            Ok(name) => self.name = Some(name),
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        match validation::non_empty_str(ResourceKind::Container, "image", image) {
            Ok(image) => self.image = Some(image),
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub fn with_image_pull_policy(mut self, image_pull_policy: impl Into<String>) -> Self {
        match validation::non_empty_str(
            ResourceKind::Container,
            "imagePullPolicy",
            image_pull_policy,
        ) {
            Ok(policy) => self.image_pull_policy = Some(policy),
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub fn with_command(mut self, command: Vec<String>) -> Self {
        if command.is_empty() {
            self.errors.record(
                MissingFieldSnafu {
                    kind: ResourceKind::Container,
                    field: "command",
                }
                .fail(),
            );
            return self;
        }
        self.command = Some(command);
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        if args.is_empty() {
            self.errors.record(
                MissingFieldSnafu {
                    kind: ResourceKind::Container,
                    field: "args",
                }
                .fail(),
            );
            return self;
        }
        self.args = Some(args);
        self
    }

    /// Adds an environment variable with a literal value.
    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match validation::non_empty_str(ResourceKind::Container, "env name", name) {
            Ok(name) => self.env.get_or_insert_with(Vec::new).push(EnvVar {
                name,
                value: Some(value.into()),
                ..EnvVar::default()
            }),
            Err(error) => self.errors.push(error),
        }
        self
    }

    pub fn with_volume_mount(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        let mount = validation::non_empty_str(ResourceKind::Container, "volumeMount name", name)
            .and_then(|name| {
                let mount_path =
                    validation::non_empty_str(ResourceKind::Container, "mountPath", path)?;
                Ok(VolumeMount {
                    name,
                    mount_path,
                    ..VolumeMount::default()
                })
            });
        match mount {
            Ok(mount) => self.volume_mounts.get_or_insert_with(Vec::new).push(mount),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Returns the constructed [`Container`].
    pub fn build(self) -> Result<Container, Errors> {
        let container = Container {
            args: self.args,
            command: self.command,
            env: self.env,
            image: self.image,
            image_pull_policy: self.image_pull_policy,
            name: self.name.unwrap_or_default(),
            volume_mounts: self.volume_mounts,
            ..Container::default()
        };
        self.errors.finish(ResourceKind::Container, container)
    }
}

impl Build for ContainerBuilder {
    type Output = Container;

    const KIND: ResourceKind = ResourceKind::Container;

    fn build(self) -> Result<Container, Errors> {
        Self::build(self)
    }
}
