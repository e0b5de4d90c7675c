use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".issue-blog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Repository {0} is not configured (set {1} or add it to the config file)")]
    Missing(&'static str, &'static str),
}

/// Top-level configuration loaded from .issue-blog.toml.
///
/// All fields are optional in the file; the environment fills whatever the
/// file leaves unset, so the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Where the template is read from and the page is written to
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// Repository owner. If None, falls back to REPO_OWNER env var.
    pub owner: Option<String>,
    /// Repository name. If None, falls back to REPO_NAME env var.
    pub repo: Option<String>,
    /// API root, for GitHub Enterprise installs.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_template")]
    pub template: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("template.html")
}

fn default_output() -> PathBuf {
    PathBuf::from("index.html")
}

/// The source repository, validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Config {
    /// Load configuration from `path`, or from .issue-blog.toml in the
    /// current directory when no path is given. A missing default file yields
    /// the default config; an explicitly named file must exist.
    ///
    /// Unset GitHub values are then filled from the environment.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)?
                } else {
                    Config::default()
                }
            }
        };

        config.fill_from_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Fill every unset GitHub value from `lookup`. File values take precedence.
    pub fn fill_from_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let github = &mut self.github;
        for (slot, key) in [
            (&mut github.token, "GITHUB_TOKEN"),
            (&mut github.owner, "REPO_OWNER"),
            (&mut github.repo, "REPO_NAME"),
        ] {
            if slot.is_none() {
                *slot = lookup(key).filter(|value| !value.is_empty());
            }
        }
    }

    /// The GitHub token, if any. Absence is not an error here: the request
    /// goes out unauthenticated and the API decides.
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    /// Resolve the owner/name pair, failing if either half is missing.
    pub fn repo(&self) -> Result<RepoId, ConfigError> {
        let owner = self
            .github
            .owner
            .clone()
            .ok_or(ConfigError::Missing("owner", "REPO_OWNER"))?;
        let name = self
            .github
            .repo
            .clone()
            .ok_or(ConfigError::Missing("name", "REPO_NAME"))?;
        Ok(RepoId { owner, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.paths.template, PathBuf::from("template.html"));
        assert_eq!(config.paths.output, PathBuf::from("index.html"));
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
owner = "octo"
repo = "notes"

[paths]
output = "public/index.html"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.owner.as_deref(), Some("octo"));
        assert_eq!(config.paths.output, PathBuf::from("public/index.html"));
        assert_eq!(config.paths.template, PathBuf::from("template.html"));
    }

    #[test]
    fn test_env_fills_unset_values() {
        let mut config = Config::default();
        config.fill_from_env(env(&[
            ("GITHUB_TOKEN", "t0k"),
            ("REPO_OWNER", "octo"),
            ("REPO_NAME", "blog"),
        ]));
        assert_eq!(config.github_token(), Some("t0k"));
        assert_eq!(
            config.repo().unwrap(),
            RepoId {
                owner: "octo".to_string(),
                name: "blog".to_string()
            }
        );
    }

    #[test]
    fn test_file_values_take_precedence() {
        let mut config: Config = toml::from_str("[github]\nowner = \"from-file\"").unwrap();
        config.fill_from_env(env(&[("REPO_OWNER", "from-env"), ("REPO_NAME", "blog")]));
        assert_eq!(config.repo().unwrap().owner, "from-file");
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        let mut config = Config::default();
        config.fill_from_env(env(&[("GITHUB_TOKEN", "")]));
        assert!(config.github_token().is_none());
    }

    #[test]
    fn test_missing_repo_is_an_error() {
        let mut config = Config::default();
        config.fill_from_env(env(&[("REPO_OWNER", "octo")]));
        let err = config.repo().unwrap_err();
        assert!(err.to_string().contains("REPO_NAME"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog.toml");
        fs::write(&path, "[paths]\ntemplate = \"site/template.html\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.paths.template, PathBuf::from("site/template.html"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
