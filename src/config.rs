//! Credential profile resolution.
//!
//! Operations accept an explicit [`Credential`] override; when none is
//! given, the client falls back to a configuration profile looked up under
//! the `hipchat` namespace. The profile lives in a YAML file:
//!
//! ```yaml
//! hipchat:
//!   api_key: peWcBiMOS9HrZG15peWcBiMOS9HrZG15
//!   api_version: v1
//! ```
//!
//! Environment variables with the `HIPCHAT_` prefix override the file:
//!
//! ```bash
//! export HIPCHAT_API_KEY="peWcBiMOS9HrZG15peWcBiMOS9HrZG15"
//! export HIPCHAT_API_VERSION="v2"
//! ```
//!
//! Resolution is deliberately forgiving: a missing file, a missing
//! `hipchat:` section, and missing keys are all the same "not configured"
//! answer. Deciding what to do about that (fail the call with a missing
//! credential) is the client's job, not this module's.
//!
//! [`Credential`]: crate::hipchat::Credential

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use mockall::automock;
use serde::Deserialize;

/// Namespace under which this crate's profile is filed.
pub const NAMESPACE: &str = "hipchat";

/// Raw configuration entries for one namespace.
///
/// Both entries are optional strings; validation (is the key usable, is the
/// version supported) happens when a call actually needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// The HipChat API key.
    pub api_key: Option<String>,
    /// The API version as written in the configuration, e.g. `"v1"`.
    pub api_version: Option<String>,
}

/// Supplies configuration profiles by namespace.
///
/// This trait abstracts the configuration source for easier testing with
/// mocks; the production implementation is [`FigmentResolver`].
#[automock]
pub trait ConfigResolver {
    /// Looks up the profile filed under `namespace`.
    ///
    /// `None` means "not configured", whatever the reason.
    fn profile(&self, namespace: &str) -> Option<Profile>;
}

/// File- and environment-backed [`ConfigResolver`].
pub struct FigmentResolver {
    figment: Figment,
}

impl FigmentResolver {
    /// Builds a resolver layering `HIPCHAT_*` environment variables over the
    /// YAML file at `path`. The file not existing is fine.
    pub fn from_file(path: &str) -> Self {
        let figment = Figment::new().merge(Yaml::file(path)).merge(
            Env::prefixed("HIPCHAT_")
                .map(|key| format!("{}.{}", NAMESPACE, key.as_str()).into())
                .split("."),
        );
        FigmentResolver { figment }
    }
}

impl ConfigResolver for FigmentResolver {
    fn profile(&self, namespace: &str) -> Option<Profile> {
        self.figment.extract_inner::<Profile>(namespace).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn path(file: &tempfile::NamedTempFile) -> String {
        file.path().to_str().unwrap().to_owned()
    }

    #[test]
    #[serial]
    fn test_profile_from_yaml_file() {
        let file = yaml_file("hipchat:\n  api_key: abc123\n  api_version: v1\n");
        let resolver = FigmentResolver::from_file(&path(&file));

        let profile = resolver.profile(NAMESPACE).unwrap();
        assert_eq!(profile.api_key.as_deref(), Some("abc123"));
        assert_eq!(profile.api_version.as_deref(), Some("v1"));
    }

    #[test]
    #[serial]
    fn test_profile_with_partial_keys() {
        let file = yaml_file("hipchat:\n  api_key: abc123\n");
        let resolver = FigmentResolver::from_file(&path(&file));

        let profile = resolver.profile(NAMESPACE).unwrap();
        assert_eq!(profile.api_key.as_deref(), Some("abc123"));
        assert_eq!(profile.api_version, None);
    }

    #[test]
    #[serial]
    fn test_missing_file_resolves_to_none() {
        let resolver = FigmentResolver::from_file("/nonexistent/hipchat.yaml");
        assert_eq!(resolver.profile(NAMESPACE), None);
    }

    #[test]
    #[serial]
    fn test_unknown_namespace_resolves_to_none() {
        let file = yaml_file("hipchat:\n  api_key: abc123\n");
        let resolver = FigmentResolver::from_file(&path(&file));
        assert_eq!(resolver.profile("slack"), None);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let file = yaml_file("hipchat:\n  api_key: from-file\n  api_version: v1\n");

        unsafe { std::env::set_var("HIPCHAT_API_KEY", "from-env") };
        let resolver = FigmentResolver::from_file(&path(&file));
        let profile = resolver.profile(NAMESPACE).unwrap();
        unsafe { std::env::remove_var("HIPCHAT_API_KEY") };

        assert_eq!(profile.api_key.as_deref(), Some("from-env"));
        assert_eq!(profile.api_version.as_deref(), Some("v1"));
    }

    #[test]
    #[serial]
    fn test_env_alone_is_enough() {
        unsafe {
            std::env::set_var("HIPCHAT_API_KEY", "env-key");
            std::env::set_var("HIPCHAT_API_VERSION", "v2");
        }
        let resolver = FigmentResolver::from_file("/nonexistent/hipchat.yaml");
        let profile = resolver.profile(NAMESPACE).unwrap();
        unsafe {
            std::env::remove_var("HIPCHAT_API_KEY");
            std::env::remove_var("HIPCHAT_API_VERSION");
        }

        assert_eq!(profile.api_key.as_deref(), Some("env-key"));
        assert_eq!(profile.api_version.as_deref(), Some("v2"));
    }
}
