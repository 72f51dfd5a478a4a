use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for release-pilot.
///
/// Contains package identity, build/artifact settings, source-host release
/// settings, package-index settings, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Package identity used for artifact naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageConfig {
    #[serde(default = "default_package_name")]
    pub name: String,
}

fn default_package_name() -> String {
    "package".to_string()
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            name: default_package_name(),
        }
    }
}

/// Configuration for the build stage and the artifacts it must produce.
///
/// Artifact templates accept `{name}` and `{version}` placeholders.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_build_command")]
    pub command: String,

    #[serde(default = "default_build_args")]
    pub args: Vec<String>,

    #[serde(default = "default_source_archive")]
    pub source_archive: String,

    #[serde(default = "default_binary_dist")]
    pub binary_dist: String,
}

fn default_build_command() -> String {
    "cargo".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["package".to_string()]
}

fn default_source_archive() -> String {
    "dist/{name}-{version}.tar.gz".to_string()
}

fn default_binary_dist() -> String {
    "dist/{name}-{version}-bin.tar.gz".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            command: default_build_command(),
            args: default_build_args(),
            source_archive: default_source_archive(),
            binary_dist: default_binary_dist(),
        }
    }
}

/// Configuration for the source-host release stage and the dev-bump stage.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_mainline")]
    pub mainline: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_host_command")]
    pub host_command: String,

    #[serde(default = "default_release_body")]
    pub body: String,

    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    #[serde(default = "default_version_file")]
    pub version_file: String,
}

fn default_mainline() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_host_command() -> String {
    "gh".to_string()
}

fn default_release_body() -> String {
    "Draft release for {name} {version}. Review the attached artifacts before publishing."
        .to_string()
}

fn default_labels() -> Vec<String> {
    vec!["release".to_string(), "automated".to_string()]
}

fn default_version_file() -> String {
    "Cargo.toml".to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            mainline: default_mainline(),
            remote: default_remote(),
            host_command: default_host_command(),
            body: default_release_body(),
            labels: default_labels(),
            version_file: default_version_file(),
        }
    }
}

/// Configuration for the package-index release stage.
///
/// `token_command` mints the short-lived publish token at run time; no
/// long-lived credential is ever read from this file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    #[serde(default = "default_publish_command")]
    pub publish_command: String,

    #[serde(default)]
    pub publish_args: Vec<String>,

    #[serde(default)]
    pub token_command: Option<String>,

    #[serde(default)]
    pub token_args: Vec<String>,
}

fn default_publish_command() -> String {
    "cargo".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            publish_command: default_publish_command(),
            publish_args: Vec::new(),
            token_command: None,
            token_args: Vec::new(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_require_approval")]
    pub require_approval: bool,
}

fn default_require_approval() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            require_approval: default_require_approval(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package: PackageConfig::default(),
            build: BuildConfig::default(),
            release: ReleaseConfig::default(),
            index: IndexConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Expand an artifact template with this config's package name and a version.
    pub fn expand_template(&self, template: &str, version: &str) -> String {
        template
            .replace("{name}", &self.package.name)
            .replace("{version}", version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasepilot.toml` in current directory
/// 3. `.releasepilot.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> crate::error::Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasepilot.toml").exists() {
        fs::read_to_string("./releasepilot.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasepilot.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| crate::error::ReleaseError::config(format!("invalid config: {}", e)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.release.mainline, "main");
        assert_eq!(config.release.remote, "origin");
        assert_eq!(config.release.labels.len(), 2);
        assert!(config.behavior.require_approval);
        assert!(config.index.token_command.is_none());
    }

    #[test]
    fn test_expand_template() {
        let mut config = Config::default();
        config.package.name = "widget".to_string();
        let path = config.expand_template("dist/{name}-{version}.tar.gz", "1.2.3");
        assert_eq!(path, "dist/widget-1.2.3.tar.gz");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [package]
            name = "widget"

            [release]
            mainline = "trunk"
            "#,
        )
        .unwrap();

        assert_eq!(config.package.name, "widget");
        assert_eq!(config.release.mainline, "trunk");
        // Unspecified fields keep their defaults
        assert_eq!(config.release.remote, "origin");
        assert_eq!(config.build.command, "cargo");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("package = 3");
        assert!(result.is_err());
    }
}
