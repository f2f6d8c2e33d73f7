//! Tool configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for docindex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Index file settings.
    #[serde(default)]
    pub index: IndexConfig,

    /// Query settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Index file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Default index file, also the file name `check` looks for in directories.
    #[serde(default = "default_index_path")]
    pub path: String,

    /// Variable the index is assigned to in script form.
    #[serde(default = "default_variable")]
    pub variable: String,

    /// Serialized size (bytes) above which an index is reported as too large.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

/// Query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default maximum number of results.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum snippet length in bytes.
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,
}

// Default value functions
fn default_index_path() -> String {
    "search_index.js".to_string()
}

fn default_variable() -> String {
    "documenterSearchIndex".to_string()
}

fn default_max_size() -> usize {
    500 * 1024
}

fn default_limit() -> usize {
    20
}

fn default_snippet_length() -> usize {
    150
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
            variable: default_variable(),
            max_size: default_max_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            snippet_length: default_snippet_length(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `DOCINDEX__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(Some(path), environment())
    }

    /// Load configuration if the file exists, otherwise use defaults.
    ///
    /// Environment overrides apply either way.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_with_env(path)
        } else {
            tracing::debug!(?path, "No configuration file, using defaults");
            Self::load_layered(None, environment())
        }
    }

    fn load_layered(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config: Config = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if !is_js_identifier(&self.index.variable) {
            return Err(CoreError::config(format!(
                "index.variable is not a valid identifier: {:?}",
                self.index.variable
            )));
        }

        if self.index.path.is_empty() {
            return Err(CoreError::config("index.path cannot be empty"));
        }

        if self.search.snippet_length == 0 {
            return Err(CoreError::config("search.snippet_length must be positive"));
        }

        if self.search.limit == 0 {
            tracing::warn!("search.limit is 0, queries will print no results by default");
        }

        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DOCINDEX")
        .separator("__")
        .try_parsing(true)
}

/// Check whether `name` can be used as a JavaScript variable name.
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[index]
path = "docs/build/search_index.js"
variable = "customIndex"
max_size = 1024

[search]
limit = 5
snippet_length = 80
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.index.path, "docs/build/search_index.js");
        assert_eq!(config.index.variable, "customIndex");
        assert_eq!(config.index.max_size, 1024);
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.search.snippet_length, 80);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        std::fs::write(&config_path, "[search]\nlimit = 3\n").expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.index.path, "search_index.js");
        assert_eq!(config.index.variable, "documenterSearchIndex");
        assert_eq!(config.index.max_size, 500 * 1024);
        assert_eq!(config.search.limit, 3);
        assert_eq!(config.search.snippet_length, 150);
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.index.variable, "customIndex");
        assert_eq!(config.search.snippet_length, 80);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_or_default(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config.index.variable, "documenterSearchIndex");
        assert_eq!(config.search.limit, 20);
    }

    fn env_overrides(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<config::Map<_, _>>();
        environment().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_without_file() {
        let env = env_overrides(&[
            ("DOCINDEX__SEARCH__LIMIT", "3"),
            ("DOCINDEX__INDEX__VARIABLE", "envIndex"),
        ]);
        let config = Config::load_layered(None, env).expect("load config");

        assert_eq!(config.search.limit, 3);
        assert_eq!(config.index.variable, "envIndex");
        assert_eq!(config.index.path, "search_index.js");
        assert_eq!(config.search.snippet_length, 150);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let env = env_overrides(&[("DOCINDEX__SEARCH__LIMIT", "3")]);
        let config = Config::load_layered(Some(&config_path), env).expect("load config");

        assert_eq!(config.search.limit, 3);
        assert_eq!(config.search.snippet_length, 80);
        assert_eq!(config.index.variable, "customIndex");
    }

    #[test]
    fn test_env_overrides_are_validated() {
        let env = env_overrides(&[("DOCINDEX__INDEX__VARIABLE", "search-index")]);
        let result = Config::load_layered(None, env);
        assert!(result.unwrap_err().to_string().contains("not a valid identifier"));
    }

    #[test]
    fn test_config_validation_bad_variable() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        std::fs::write(&config_path, "[index]\nvariable = \"search-index\"\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("not a valid identifier")
        );
    }

    #[test]
    fn test_config_validation_zero_snippet() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("docindex.toml");
        std::fs::write(&config_path, "[search]\nsnippet_length = 0\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("snippet_length"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/docindex.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("documenterSearchIndex"));
        assert!(is_js_identifier("_index"));
        assert!(is_js_identifier("$idx2"));
        assert!(!is_js_identifier(""));
        assert!(!is_js_identifier("2index"));
        assert!(!is_js_identifier("search-index"));
        assert!(!is_js_identifier("search index"));
    }
}
