// crates/siteman-cli/src/services/site.rs - Project scaffolding service
//
// Knows HOW to lay out a fresh site project on disk; deciding WHEN to do it
// is the init command's job.
//
// CREATED STRUCTURE:
// ```
// project/
// ├── .siteman.toml     (commented defaults, never overwritten)
// └── content/
//     ├── posts/
//     └── pages/
// ```

use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::path::{Path, PathBuf};

use siteman_core::config::PROJECT_CONFIG_FILE;
use siteman_core::content::CONTENT_DIR;
use siteman_core::{ConfigManager, ContentType};

/// What `init_site` created, for reporting
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created_dirs: Vec<PathBuf>,
    pub config_written: bool,
}

/// Handles file-system setup for a site project
pub struct SiteService {
    project_path: PathBuf,
}

impl SiteService {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }

    /// Create the content directories and a project config file
    ///
    /// Safe to run on an existing project: directories that exist are left
    /// alone and an existing `.siteman.toml` is not touched.
    pub fn init_site(&self) -> Result<InitReport> {
        let mut report = InitReport::default();

        for kind in ContentType::ALL {
            let dir = self.project_path.join(CONTENT_DIR).join(kind.dir_name());
            if !dir.is_dir() {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
                report.created_dirs.push(dir);
            }
        }

        let config_path = self.config_path();
        if !config_path.exists() {
            fs::write(&config_path, ConfigManager::generate_default_config()).with_context(
                || format!("Failed to write config file: {}", config_path.display()),
            )?;
            report.config_written = true;
        }

        Ok(report)
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_path.join(PROJECT_CONFIG_FILE)
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteman_core::ContentRoot;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        let site = SiteService::new(temp.path().join("blog"));

        let report = site.init_site().unwrap();
        assert_eq!(report.created_dirs.len(), 2);
        assert!(report.config_written);
        assert!(temp.path().join("blog/content/posts").is_dir());
        assert!(temp.path().join("blog/content/pages").is_dir());

        // The result is a valid content root with a parseable config
        ContentRoot::open(site.project_path()).unwrap();
        let config = fs::read_to_string(site.config_path()).unwrap();
        assert!(config.contains("[deploy]"));
    }

    #[test]
    fn test_init_preserves_existing_config() {
        let temp = TempDir::new().unwrap();
        let site = SiteService::new(temp.path().to_path_buf());
        fs::write(site.config_path(), "[editor]\ncommand = \"hx\"\n").unwrap();

        let report = site.init_site().unwrap();
        assert!(!report.config_written);
        assert_eq!(
            fs::read_to_string(site.config_path()).unwrap(),
            "[editor]\ncommand = \"hx\"\n"
        );

        let again = site.init_site().unwrap();
        assert_eq!(again, InitReport::default());
    }
}
