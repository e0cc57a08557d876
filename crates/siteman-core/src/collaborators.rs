// crates/siteman-core/src/collaborators.rs - External program interfaces
//
// The core never spawns processes itself. Each external program the commands
// depend on is a one-method trait; the CLI crate provides process-backed
// implementations and tests substitute fakes.
//
// | Trait      | Real program            | Failure means                  |
// |------------|-------------------------|--------------------------------|
// | Generator  | `hugo new content ...`  | `new` aborts                   |
// | Builder    | `hugo --minify`         | `deploy` aborts (build failed) |
// | SyncTool   | `rsync --delete ...`    | `deploy` aborts (sync failed)  |
// | Editor     | $SITEMAN_EDITOR/$EDITOR | command aborts                 |
// | Selector   | `fzf --multi`           | `edit` aborts                  |
//
// Every call blocks until the program exits.

use std::path::{Path, PathBuf};

use crate::error::ContentResult;

/// Scaffolds a new content file with the generator's default front matter
pub trait Generator {
    /// `relative_target` is relative to `project_root`, e.g.
    /// `content/posts/2024-06-01-hello.md`
    fn scaffold(&self, project_root: &Path, relative_target: &Path) -> ContentResult<()>;
}

/// Renders the site into its publish directory
pub trait Builder {
    fn build(&self, project_root: &Path) -> ContentResult<()>;
}

/// Mirrors a local directory to a remote location, deleting remote files
/// that no longer exist locally
pub trait SyncTool {
    fn sync(
        &self,
        local_dir: &Path,
        host: &str,
        remote_path: &str,
        dry_run: bool,
    ) -> ContentResult<()>;
}

/// Opens files for interactive editing
pub trait Editor {
    fn open(&self, paths: &[PathBuf]) -> ContentResult<()>;
}

/// Lets the user pick rows out of a list
pub trait Selector {
    /// Returns the chosen rows verbatim; an empty result means nothing was
    /// chosen (e.g. the user pressed Escape)
    fn select(&self, rows: &[String]) -> ContentResult<Vec<String>>;
}
