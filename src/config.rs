//! Configuration loading for jira-commit
//!
//! The config file is a YAML document with a `version` string and a flat
//! `settings` mapping:
//!
//! ```yaml
//! version: "1"
//! settings:
//!   user_email: me@example.com
//!   personal_access_token: secret
//!   organization: acme
//!   project_key: PROJ
//!   jira_api_version: "2"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

const USER_EMAIL: &str = "user_email";
const ACCESS_TOKEN: &str = "personal_access_token";
const ORGANIZATION: &str = "organization";
const PROJECT_KEY: &str = "project_key";
const API_VERSION: &str = "jira_api_version";

/// Static settings that select the Jira instance, project and credentials
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    version: Value,
    #[serde(default)]
    settings: Option<HashMap<String, Value>>,
}

impl Config {
    /// Load the configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be opened or read, and
    /// [`Error::Parse`] if it is empty or not a well-formed config document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::File {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parse the configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        if document.is_null() {
            return Err(Error::Parse("invalid config: document is empty".into()));
        }

        Ok(serde_yaml::from_value(document)?)
    }

    pub fn version(&self) -> String {
        scalar_to_string(&self.version)
    }

    pub fn user_email(&self) -> String {
        self.get(USER_EMAIL)
    }

    pub fn token(&self) -> String {
        self.get(ACCESS_TOKEN)
    }

    pub fn organization(&self) -> String {
        self.get(ORGANIZATION)
    }

    pub fn project_key(&self) -> String {
        self.get(PROJECT_KEY)
    }

    pub fn api_version(&self) -> String {
        self.get(API_VERSION)
    }

    /// Look up a setting, returning an empty string when it is absent
    fn get(&self, key: &str) -> String {
        self.settings
            .as_ref()
            .and_then(|settings| settings.get(key))
            .map(scalar_to_string)
            .unwrap_or_default()
    }
}

/// Render a YAML scalar as text; collections and null become empty
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
