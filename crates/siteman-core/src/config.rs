// crates/siteman-core/src/config.rs - Configuration System
//
// This module provides the configuration schema and loading mechanism for the
// siteman CLI tool. Configuration is resolved ONCE at startup into an
// immutable `SiteConfig` value which is then passed by reference to every
// command handler. Nothing reads configuration lazily or mutates it later.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--project, --deploy-host, --deploy-path)
// 2. Environment variables (SITEMAN_PROJECT, SITEMAN_DEPLOY_HOST, ...)
// 3. Project config file (<project>/.siteman.toml)
// 4. Global config file (~/.config/siteman/config.toml)
// 5. Built-in defaults
//
// MERGING:
// Files are read into a "partial" shape where every field is optional, then
// laid over the current values field by field. A project file that only sets
// `[deploy] host` keeps the global file's `[deploy] path`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".siteman.toml";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config {file}: {source}")]
    IoError {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete, resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub project: ProjectConfig,
    pub deploy: DeployConfig,
    pub generator: GeneratorConfig,
    pub editor: EditorConfig,
    pub selector: SelectorConfig,
}

/// Where the site lives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project root (the directory containing `content/`). `None` means the
    /// current directory.
    pub path: Option<PathBuf>,
}

/// Deployment target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Remote host for rsync, e.g. `user@example.com`
    pub host: Option<String>,
    /// Remote directory on `host`
    pub path: Option<String>,
    /// Build output directory relative to the project root
    pub publish_dir: String,
}

/// Static-site generator invocation
///
/// `{path}` in `new_args` is replaced by the new file's path relative to the
/// project root (e.g. `content/posts/2024-06-01-hello.md`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub command: String,
    pub new_args: Vec<String>,
    pub build_args: Vec<String>,
}

/// Editor integration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Editor command line, e.g. `hx` or `code --wait`. `None` disables the
    /// post-creation edit step and makes `edit` unavailable.
    pub command: Option<String>,
}

/// Interactive fuzzy selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Selector command. `None` disables filter-based `edit`.
    pub command: Option<String>,
    pub args: Vec<String>,
}

/// Values taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project: Option<PathBuf>,
    pub deploy_host: Option<String>,
    pub deploy_path: Option<String>,
}

/// Values taken from the process environment
///
/// Captured through a lookup function so tests never have to touch the real
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub project: Option<String>,
    pub editor: Option<String>,
    pub fallback_editor: Option<String>,
    pub deploy_host: Option<String>,
    pub deploy_path: Option<String>,
}

impl EnvOverrides {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            project: non_empty("SITEMAN_PROJECT"),
            editor: non_empty("SITEMAN_EDITOR"),
            fallback_editor: non_empty("VISUAL").or_else(|| non_empty("EDITOR")),
            deploy_host: non_empty("SITEMAN_DEPLOY_HOST"),
            deploy_path: non_empty("SITEMAN_DEPLOY_PATH"),
        }
    }

    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

// Partial shapes, as read from TOML files.

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    project: ProjectFile,
    deploy: DeployFile,
    generator: GeneratorFile,
    editor: EditorFile,
    selector: SelectorFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProjectFile {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeployFile {
    host: Option<String>,
    path: Option<String>,
    publish_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GeneratorFile {
    command: Option<String>,
    new_args: Option<Vec<String>>,
    build_args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EditorFile {
    command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SelectorFile {
    command: Option<String>,
    args: Option<Vec<String>>,
}

/// Configuration loading and management
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from all sources
    ///
    /// LOADING STRATEGY:
    /// 1. Start with built-in defaults
    /// 2. Lay the global config file over them (if it exists)
    /// 3. Work out the project path (flag > env > global file > cwd) and lay
    ///    the project's `.siteman.toml` over the result (if it exists)
    /// 4. Apply environment variables, then command-line flags
    /// 5. Validate
    ///
    /// Missing files are not errors; unreadable or malformed ones are.
    pub fn load(overrides: &ConfigOverrides) -> ConfigResult<SiteConfig> {
        let global = dirs::config_dir().map(|dir| dir.join("siteman").join("config.toml"));
        Self::load_from(global.as_deref(), &EnvOverrides::from_process(), overrides)
    }

    /// `load` with every external input passed in explicitly
    pub fn load_from(
        global_file: Option<&Path>,
        env: &EnvOverrides,
        overrides: &ConfigOverrides,
    ) -> ConfigResult<SiteConfig> {
        let mut config = SiteConfig::default();

        if let Some(path) = global_file {
            if let Some(file) = Self::try_load_file(path)? {
                config.apply_file(file);
            }
        }

        let project_dir = overrides
            .project
            .clone()
            .or_else(|| env.project.as_deref().map(expand_home))
            .or_else(|| config.project.path.clone());

        let project_file = project_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join(PROJECT_CONFIG_FILE);
        if let Some(file) = Self::try_load_file(&project_file)? {
            config.apply_file(file);
        }

        config.apply_env(env);
        config.apply_overrides(overrides);
        if config.project.path.is_none() {
            config.project.path = project_dir;
        }

        Self::validate_config(&config)?;
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Generate a commented project config file for `siteman init`
    pub fn generate_default_config() -> String {
        r#"# siteman project configuration
#
# Values here override ~/.config/siteman/config.toml and are overridden by
# SITEMAN_* environment variables and command-line flags.

[deploy]
# Remote host and directory used by `siteman deploy` (rsync over ssh)
# host = "user@example.com"
# path = "/var/www/site"

# Build output directory, relative to the project root
publish_dir = "public"

[generator]
# Static-site generator binary and its arguments
command = "hugo"
# {path} is replaced by the new file's path, e.g. content/posts/2024-06-01-hello.md
new_args = ["new", "content", "{path}"]
build_args = ["--minify"]

[editor]
# Overrides VISUAL/EDITOR; SITEMAN_EDITOR overrides this
# command = "hx"

[selector]
# Fuzzy selector for `siteman edit post|page`; set to "" to disable
command = "fzf"
args = ["--multi"]
"#
        .to_string()
    }

    fn try_load_file(path: &Path) -> ConfigResult<Option<ConfigFile>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            file: path.display().to_string(),
            source,
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: path.display().to_string(),
            error: e.to_string(),
        })?;

        debug!(file = %path.display(), "loaded config file");
        Ok(Some(file))
    }

    /// Catch values that would only fail later, deep inside a command
    fn validate_config(config: &SiteConfig) -> ConfigResult<()> {
        if config.generator.command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "generator.command cannot be empty".to_string(),
            ));
        }

        if config.deploy.publish_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "deploy.publish_dir cannot be empty".to_string(),
            ));
        }

        if Path::new(&config.deploy.publish_dir).is_absolute() {
            return Err(ConfigError::ValidationError(format!(
                "deploy.publish_dir must be relative to the project root, got '{}'",
                config.deploy.publish_dir
            )));
        }

        if !config.generator.new_args.iter().any(|arg| arg.contains("{path}")) {
            return Err(ConfigError::ValidationError(
                "generator.new_args must contain a {path} placeholder".to_string(),
            ));
        }

        Ok(())
    }
}

impl SiteConfig {
    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(path) = file.project.path {
            self.project.path = Some(expand_home(&path));
        }

        set(&mut self.deploy.host, file.deploy.host);
        set(&mut self.deploy.path, file.deploy.path);
        if let Some(dir) = file.deploy.publish_dir {
            self.deploy.publish_dir = dir;
        }

        if let Some(command) = file.generator.command {
            self.generator.command = command;
        }
        if let Some(args) = file.generator.new_args {
            self.generator.new_args = args;
        }
        if let Some(args) = file.generator.build_args {
            self.generator.build_args = args;
        }

        set(&mut self.editor.command, file.editor.command);

        if let Some(command) = file.selector.command {
            // An explicit empty command switches the selector off
            self.selector.command = Some(command).filter(|c| !c.trim().is_empty());
        }
        if let Some(args) = file.selector.args {
            self.selector.args = args;
        }
    }

    fn apply_env(&mut self, env: &EnvOverrides) {
        if let Some(project) = &env.project {
            self.project.path = Some(expand_home(project));
        }
        set(&mut self.deploy.host, env.deploy_host.clone());
        set(&mut self.deploy.path, env.deploy_path.clone());

        if env.editor.is_some() {
            self.editor.command = env.editor.clone();
        } else if self.editor.command.is_none() {
            self.editor.command = env.fallback_editor.clone();
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(project) = &overrides.project {
            self.project.path = Some(project.clone());
        }
        set(&mut self.deploy.host, overrides.deploy_host.clone());
        set(&mut self.deploy.path, overrides.deploy_path.clone());
    }
}

fn set(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = Some(value);
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn default_publish_dir() -> String {
    "public".to_string()
}

fn default_generator_command() -> String {
    "hugo".to_string()
}

fn default_new_args() -> Vec<String> {
    vec!["new".to_string(), "content".to_string(), "{path}".to_string()]
}

fn default_build_args() -> Vec<String> {
    vec!["--minify".to_string()]
}

fn default_selector_args() -> Vec<String> {
    vec!["--multi".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            deploy: DeployConfig::default(),
            generator: GeneratorConfig::default(),
            editor: EditorConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            host: None,
            path: None,
            publish_dir: default_publish_dir(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: default_generator_command(),
            new_args: default_new_args(),
            build_args: default_build_args(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            command: Some("fzf".to_string()),
            args: default_selector_args(),
        }
    }
}
