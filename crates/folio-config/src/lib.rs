//! Configuration management for Folio.
//!
//! Parses `folio.toml` with serde and discovers it in the current directory
//! or any parent. Relative paths resolve against the config file's
//! directory. CLI settings are applied during load via [`CliSettings`].
//!
//! `site.base_url` supports `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "folio.toml";

const DEFAULT_SOURCE_DIR: &str = "content";
const DEFAULT_OUTPUT_DIR: &str = "dist";
const DEFAULT_NAV_PREFIX: &str = "/articles";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    docs: DocsConfigRaw,
    pub navigation: NavigationConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name appended to page titles.
    pub title: Option<String>,
    /// Absolute origin for social card URLs.
    pub base_url: Option<String>,
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: None,
            base_url: None,
            language: "en".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory scanned for markdown articles.
    pub source_dir: PathBuf,
    /// Directory rendered pages are written to.
    pub output_dir: PathBuf,
}

/// `[navigation]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Collection prefix listed in the navigation panel.
    pub prefix: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_NAV_PREFIX.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `site.base_url`).
        field: String,
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `folio.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// CLI settings take precedence over file values and are validated with
    /// them.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, an environment variable is unset, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            navigation: NavigationConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(title) = &self.site.title {
            require_non_empty(title, "site.title")?;
        }
        if let Some(base_url) = &self.site.base_url {
            require_http_url(base_url, "site.base_url")?;
        }
        require_non_empty(&self.site.language, "site.language")?;
        if !self.navigation.prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "navigation.prefix must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.site.base_url {
            self.site.base_url = Some(expand::expand_env(base_url, "site.base_url")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            output_dir: resolve(self.docs.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, None);
        assert_eq!(config.site.language, "en");
        assert_eq!(config.navigation.prefix, "/articles");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/dist"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "My Notes"
base_url = "https://example.com"
language = "de"

[docs]
source_dir = "posts"
output_dir = "public"

[navigation]
prefix = "/notes"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title.as_deref(), Some("My Notes"));
        assert_eq!(config.site.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.site.language, "de");
        assert_eq!(config.navigation.prefix, "/notes");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/posts")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.navigation.prefix, "/articles");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = Some("example.com".to_owned());

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn test_validate_prefix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.prefix = "articles".to_owned();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("navigation.prefix"));
    }

    #[test]
    fn test_validate_blank_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = Some("  ".to_owned());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            base_url: Some("https://cli.example.com".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://cli.example.com")
        );
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ntitle = \"Notes\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title.as_deref(), Some("Notes"));
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.docs_resolved.source_dir, temp.path().join("content"));
    }

    #[test]
    fn test_load_missing_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_expands_base_url() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_ORIGIN", "https://env.example.com");
        }
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nbase_url = \"${FOLIO_TEST_ORIGIN}\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://env.example.com")
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_ORIGIN");
        }
    }

    #[test]
    fn test_load_rejects_invalid_cli_base_url() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            base_url: Some("ftp://example.com".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
