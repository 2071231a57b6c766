use strum::{AsRefStr, Display, EnumIter, EnumString};

/// File mode applied to secret and config map volume files when the caller does not pass
/// one. Equals `0o644`.
pub const DEFAULT_VOLUME_FILE_MODE: i32 = 420;

/// Restart policies understood by the kubelet.
///
/// Builders accept any non-empty string as restart policy, this enum only provides the
/// well-known values.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

impl From<RestartPolicy> for String {
    fn from(value: RestartPolicy) -> Self {
        value.to_string()
    }
}

/// The type of a `hostPath` volume, see
/// <https://kubernetes.io/docs/concepts/storage/volumes/#hostpath>.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum HostPathType {
    /// No check is performed before mounting the path.
    #[strum(serialize = "")]
    Unset,
    DirectoryOrCreate,
    Directory,
    FileOrCreate,
    File,
    Socket,
    CharDevice,
    BlockDevice,
}

impl From<HostPathType> for String {
    fn from(value: HostPathType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn default_file_mode_is_rw_r_r() {
        assert_eq!(DEFAULT_VOLUME_FILE_MODE, 0o644);
    }

    #[rstest]
    #[case(RestartPolicy::Always, "Always")]
    #[case(RestartPolicy::OnFailure, "OnFailure")]
    #[case(RestartPolicy::Never, "Never")]
    fn restart_policy_string(#[case] policy: RestartPolicy, #[case] expected: &str) {
        assert_eq!(String::from(policy), expected);
        assert_eq!(expected.parse::<RestartPolicy>(), Ok(policy));
    }

    #[test]
    fn host_path_types_parse_back() {
        for host_path_type in HostPathType::iter() {
            let serialized = String::from(host_path_type);
            assert_eq!(serialized.parse::<HostPathType>(), Ok(host_path_type));
        }

        assert_eq!(HostPathType::Unset.as_ref(), "");
    }
}
