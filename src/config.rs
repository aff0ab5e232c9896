//! Session configuration.
//!
//! [`GuiseConfig`] is built in code with `with_*` builders or loaded from a
//! TOML file. Keys missing from the file keep their defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::platform::{ClientProduct, Environment};

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuiseConfig {
    /// Name reported in logs.
    pub application_name: Option<String>,
    /// URI that relative references in depicted output resolve against.
    pub base_uri: String,
    /// Write debugging attributes into depicted output.
    pub debug: bool,
    /// Indent depicted markup.
    pub pretty_print: bool,
    /// Write component ids into depicted output.
    pub depict_ids: bool,
}

impl Default for GuiseConfig {
    fn default() -> Self {
        Self {
            application_name: None,
            base_uri: "http://localhost/".to_owned(),
            debug: false,
            pretty_print: false,
            depict_ids: true,
        }
    }
}

impl GuiseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn with_depict_ids(mut self, depict_ids: bool) -> Self {
        self.depict_ids = depict_ids;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::invalid_argument(format!("config: {err}")))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: "guise::config", path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The render environment for a client.
    pub fn environment(&self, client: ClientProduct) -> Result<Environment> {
        Ok(Environment::parse(&self.base_uri)?
            .with_client(client)
            .with_debug(self.debug)
            .with_depict_ids(self.depict_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::platform::Brand;

    #[test]
    fn defaults() {
        let config = GuiseConfig::new();
        assert_eq!(config.base_uri, "http://localhost/");
        assert!(config.depict_ids);
        assert!(!config.debug);
        assert!(!config.pretty_print);
        assert_eq!(config.application_name, None);
    }

    #[test]
    fn builders() {
        let config = GuiseConfig::new()
            .with_application_name("shop")
            .with_base_uri("https://shop.example.com/")
            .with_debug(true)
            .with_pretty_print(true)
            .with_depict_ids(false);
        assert_eq!(config.application_name.as_deref(), Some("shop"));
        assert_eq!(config.base_uri, "https://shop.example.com/");
        assert!(config.debug && config.pretty_print && !config.depict_ids);
    }

    // ── TOML ─────────────────────────────────────────────────────────

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GuiseConfig::from_toml_str(
            r#"
            application_name = "shop"
            pretty_print = true
            "#,
        )
        .unwrap();
        assert_eq!(config.application_name.as_deref(), Some("shop"));
        assert!(config.pretty_print);
        assert_eq!(config.base_uri, "http://localhost/");
        assert!(config.depict_ids);
    }

    #[test]
    fn bad_toml() {
        let err = GuiseConfig::from_toml_str("debug = \"yes\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn missing_file() {
        let err = GuiseConfig::load("/nonexistent/guise.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    // ── Environment ──────────────────────────────────────────────────

    #[test]
    fn environment_carries_flags() {
        let config = GuiseConfig::new().with_debug(true).with_depict_ids(false);
        let env = config
            .environment(ClientProduct::new(Brand::Firefox, Some(115.0)))
            .unwrap();
        assert!(env.is_debug());
        assert!(!env.depict_ids());
        assert!(env.client().is_brand(Brand::Firefox));
    }

    #[test]
    fn environment_rejects_bad_base() {
        let config = GuiseConfig::new().with_base_uri("::");
        assert!(config.environment(ClientProduct::default()).is_err());
    }
}
