// crates/siteman-cli/src/services/sync.rs - rsync-backed deploy sync

use std::path::Path;
use std::process::Command;

use siteman_core::collaborators::SyncTool;
use siteman_core::{Collaborator, ContentResult};

use super::process;

/// Mirrors the publish directory with `rsync -avz --delete`
pub struct RsyncService {
    program: String,
}

impl RsyncService {
    pub fn new() -> Self {
        Self {
            program: "rsync".to_string(),
        }
    }

    /// Arguments for one sync.
    ///
    /// The trailing slash on the source copies the directory's contents,
    /// not the directory itself.
    fn sync_args(local_dir: &Path, host: &str, remote_path: &str, dry_run: bool) -> Vec<String> {
        let mut args = vec!["-avz".to_string(), "--delete".to_string()];
        if dry_run {
            args.push("--dry-run".to_string());
        }

        let mut source = local_dir.to_string_lossy().into_owned();
        if !source.ends_with('/') {
            source.push('/');
        }
        args.push(source);
        args.push(format!("{}:{}", host, remote_path));
        args
    }
}

impl Default for RsyncService {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTool for RsyncService {
    fn sync(
        &self,
        local_dir: &Path,
        host: &str,
        remote_path: &str,
        dry_run: bool,
    ) -> ContentResult<()> {
        let mut command = Command::new(&self.program);
        command.args(Self::sync_args(local_dir, host, remote_path, dry_run));
        process::run(Collaborator::Sync, &mut command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_args() {
        let args = RsyncService::sync_args(
            Path::new("/site/public"),
            "user@example.com",
            "/var/www/site",
            false,
        );
        assert_eq!(
            args,
            vec!["-avz", "--delete", "/site/public/", "user@example.com:/var/www/site"]
        );
    }

    #[test]
    fn test_dry_run_is_forwarded() {
        let args = RsyncService::sync_args(Path::new("/site/public/"), "h", "/p", true);
        assert_eq!(args, vec!["-avz", "--delete", "--dry-run", "/site/public/", "h:/p"]);
    }
}
