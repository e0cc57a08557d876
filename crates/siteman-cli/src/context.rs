// crates/siteman-cli/src/context.rs - Application context
//
// The "dependency injection container" for command handlers: resolved
// configuration, the project directory, and the external programs the
// commands hand control to. Tests build a Context with fake services.

use anyhow::{Context as AnyhowContext, Result};
use std::env;
use std::path::PathBuf;

use siteman_core::collaborators::{Builder, Editor, Generator, Selector, SyncTool};
use siteman_core::{ContentError, ContentResult, ContentRoot, SiteConfig};

use crate::services::{EditorService, GeneratorService, RsyncService, SelectorService};

/// External programs available to commands
///
/// `editor` and `selector` are optional: both can be left unconfigured, and
/// the commands that need them report `NotConfigured` at the point of use.
pub struct Services {
    pub generator: Box<dyn Generator>,
    pub builder: Box<dyn Builder>,
    pub sync: Box<dyn SyncTool>,
    pub editor: Option<Box<dyn Editor>>,
    pub selector: Option<Box<dyn Selector>>,
}

impl Services {
    /// Process-backed services described by `config`
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            generator: Box::new(GeneratorService::new(&config.generator)),
            builder: Box::new(GeneratorService::new(&config.generator)),
            sync: Box::new(RsyncService::new()),
            editor: config
                .editor
                .command
                .as_deref()
                .map(|command| Box::new(EditorService::new(command)) as Box<dyn Editor>),
            selector: SelectorService::from_config(&config.selector)
                .map(|selector| Box::new(selector) as Box<dyn Selector>),
        }
    }
}

/// Application context passed to command handlers
pub struct Context {
    config: SiteConfig,
    project_dir: PathBuf,
    pub services: Services,
}

impl Context {
    /// Build the context for a resolved configuration
    ///
    /// With no project path configured anywhere, the current directory is
    /// the project.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let project_dir = match config.project.path.clone() {
            Some(path) => path,
            None => env::current_dir().context("Cannot determine the current directory")?,
        };
        let services = Services::from_config(&config);
        Ok(Self::with_services(config, project_dir, services))
    }

    pub fn with_services(config: SiteConfig, project_dir: PathBuf, services: Services) -> Self {
        Self {
            config,
            project_dir,
            services,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Validate the project directory. Every content command starts here.
    pub fn content_root(&self) -> ContentResult<ContentRoot> {
        ContentRoot::open(&self.project_dir)
    }

    /// The editor, or `NotConfigured` with a hint
    pub fn editor(&self) -> ContentResult<&dyn Editor> {
        self.services.editor.as_deref().ok_or_else(|| {
            ContentError::NotConfigured(
                "no editor set; use SITEMAN_EDITOR, [editor] command, or EDITOR".to_string(),
            )
        })
    }

    /// The selector, or `NotConfigured` with a hint
    pub fn selector(&self) -> ContentResult<&dyn Selector> {
        self.services.selector.as_deref().ok_or_else(|| {
            ContentError::NotConfigured(
                "no selector set; configure [selector] command (e.g. fzf)".to_string(),
            )
        })
    }
}
