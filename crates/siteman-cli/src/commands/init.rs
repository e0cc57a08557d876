// crates/siteman-cli/src/commands/init.rs - Project initialization command
//
// init runs before configuration is loaded: it creates the layout that the
// other commands validate, so it cannot go through Context.

use anyhow::{Context as AnyhowContext, Result};
use std::env;
use std::path::PathBuf;

use crate::services::SiteService;

/// Initialize a site project
///
/// Safe to re-run: nothing that exists is overwritten.
///
/// ```bash
/// siteman init                 # current directory
/// siteman init ~/sites/blog
/// ```
pub fn handle(path: Option<PathBuf>) -> Result<()> {
    let project_path = match path {
        Some(path) => path,
        None => env::current_dir().context("Cannot determine the current directory")?,
    };

    let site = SiteService::new(project_path);
    let report = site.init_site()?;

    println!("✅ Initialized site project at: {}", site.project_path().display());
    for dir in &report.created_dirs {
        println!("📁 Created {}", dir.display());
    }
    if report.config_written {
        println!("📝 Wrote {}", site.config_path().display());
    } else {
        println!("📝 Kept existing {}", site.config_path().display());
    }
    println!();
    println!("💡 Next steps:");
    println!("   siteman new post \"My First Post\"");
    println!("   siteman list");

    Ok(())
}
