use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::utils::{Error, Result};

/// Configuration key holding the tool version marker, attached by
/// [`TemplateConfig::finalize`] after acquisition. It is not part of the
/// defaults, so callers cannot override it.
pub const VERSION_KEY: &str = "appstamp_version";

/// The set of substitution values rendered into the template files.
///
/// Keys keep their insertion order so the interactive listing and the
/// prompt sequence are stable across runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateConfig {
    values: IndexMap<String, String>,
}

impl TemplateConfig {
    pub fn defaults() -> Self {
        let mut values = IndexMap::new();
        values.insert(String::from("name"), String::from("appstamp-template-app"));
        values.insert(
            String::from("repository"),
            String::from("https://appstamp-template-app.git"),
        );
        values.insert(
            String::from("description"),
            String::from("A template app bootstrapped with appstamp."),
        );
        values.insert(String::from("license"), String::from("Apache-2.0"));
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Replaces default values key by key. Every key must already exist in
    /// the defaults; the first unrecognized key fails the whole bootstrap
    /// before any file is touched.
    pub fn apply(&mut self, overrides: &[(String, String)]) -> Result<()> {
        for (key, value) in overrides {
            if !self.values.contains_key(key) {
                return Err(Error::UnrecognizedOption(key.clone()));
            }
            self.values.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Overrides `repository` with the remote URL and, when the URL ends in
    /// the conventional `.git` suffix, derives `name` from its final path
    /// segment.
    pub fn derive_from_remote(&mut self, url: &str) {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"([^/:]+)\.git$").unwrap());

        self.set("repository", url);
        if let Some(captures) = pattern.captures(url) {
            let name = captures.get(1).unwrap().as_str().to_string();
            self.set("name", name);
        }
    }

    pub fn finalize(&mut self, version: &str) {
        self.set(VERSION_KEY, version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fully_populated() {
        let config = TemplateConfig::defaults();
        for key in ["name", "repository", "description", "license"] {
            assert!(config.get(key).is_some(), "missing default for '{key}'");
        }
        assert_eq!(config.get(VERSION_KEY), None);
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let config = TemplateConfig::defaults();
        let keys = config.iter().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, ["name", "repository", "description", "license"]);
    }

    #[test]
    fn apply_overrides_recognized_keys_only() {
        let mut config = TemplateConfig::defaults();
        config
            .apply(&[(String::from("description"), String::from("X"))])
            .unwrap();
        assert_eq!(config.get("description"), Some("X"));
        assert_eq!(config.get("name"), Some("appstamp-template-app"));
        assert_eq!(config.get("license"), Some("Apache-2.0"));
    }

    #[test]
    fn apply_rejects_unrecognized_key() {
        let mut config = TemplateConfig::defaults();
        let err = config
            .apply(&[(String::from("color"), String::from("blue"))])
            .unwrap_err();
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn apply_rejects_version_marker_before_finalize() {
        let mut config = TemplateConfig::defaults();
        let result = config.apply(&[(String::from(VERSION_KEY), String::from("9.9.9"))]);
        assert!(result.is_err());
    }

    #[test]
    fn derive_from_remote_strips_repository_suffix() {
        let mut config = TemplateConfig::defaults();
        config.derive_from_remote("git@host:user/myapp-template.git");
        assert_eq!(config.get("name"), Some("myapp-template"));
        assert_eq!(config.get("repository"), Some("git@host:user/myapp-template.git"));
    }

    #[test]
    fn derive_from_remote_handles_scp_syntax_without_path() {
        let mut config = TemplateConfig::defaults();
        config.derive_from_remote("git@host:myapp.git");
        assert_eq!(config.get("name"), Some("myapp"));
    }

    #[test]
    fn derive_from_remote_without_suffix_keeps_default_name() {
        let mut config = TemplateConfig::defaults();
        config.derive_from_remote("https://host/user/myapp");
        assert_eq!(config.get("name"), Some("appstamp-template-app"));
        assert_eq!(config.get("repository"), Some("https://host/user/myapp"));
    }

    #[test]
    fn finalize_attaches_version_marker() {
        let mut config = TemplateConfig::defaults();
        config.finalize("0.1.0");
        assert_eq!(config.get(VERSION_KEY), Some("0.1.0"));
    }
}
