// crates/siteman-cli/src/commands/deploy.rs - Build and publish
//
// build (generator, project root as cwd) -> sync (publish dir -> host:path)
//
// `--dry-run` only reaches the sync step: the build always runs for real so
// the dry run reports against fresh output.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use siteman_core::{Collaborator, ContentError, ContentResult, interrupt};

use crate::context::Context;

/// Build the site and sync it to the configured target
pub fn handle(ctx: &Context, dry_run: bool) -> Result<()> {
    let local = run(ctx, dry_run)?;
    if dry_run {
        println!("✅ Dry run finished for {}", local.display());
    } else {
        println!("✅ Deployed {}", local.display());
    }
    Ok(())
}

/// Returns the local directory that was synced
pub fn run(ctx: &Context, dry_run: bool) -> ContentResult<PathBuf> {
    let root = ctx.content_root()?;
    let deploy = &ctx.config().deploy;

    let host = required(deploy.host.as_deref(), "deploy.host", "SITEMAN_DEPLOY_HOST", "--deploy-host")?;
    let remote_path =
        required(deploy.path.as_deref(), "deploy.path", "SITEMAN_DEPLOY_PATH", "--deploy-path")?;

    info!(project = %root.project().display(), "building site");
    ctx.services.builder.build(root.project())?;
    if interrupt::is_interrupted() {
        return Err(ContentError::Interrupted);
    }

    let local = root.project().join(&deploy.publish_dir);
    if !local.is_dir() {
        return Err(ContentError::collaborator(
            Collaborator::Builder,
            format!("publish directory {} was not produced", local.display()),
        ));
    }

    info!(local = %local.display(), host, remote_path, dry_run, "syncing");
    ctx.services.sync.sync(&local, host, remote_path, dry_run)?;
    Ok(local)
}

fn required<'a>(value: Option<&'a str>, key: &str, env: &str, flag: &str) -> ContentResult<&'a str> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        ContentError::NotConfigured(format!(
            "{} is not set (use [deploy] in .siteman.toml, {} or {})",
            key, env, flag
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{FakeBuilder, FakeSync, fake_context, site};
    use siteman_core::SiteConfig;
    use std::fs;

    fn deploy_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.deploy.host = Some("user@example.com".to_string());
        config.deploy.path = Some("/var/www/blog".to_string());
        config
    }

    #[test]
    fn test_build_then_sync_with_dry_run_forwarded() {
        let temp = site();
        fs::create_dir(temp.path().join("public")).unwrap();
        let (ctx, calls) = fake_context(temp.path(), deploy_config());

        let local = run(&ctx, true).unwrap();
        assert!(local.ends_with("public"));

        let calls = calls.borrow();
        assert_eq!(calls.builds, 1);
        assert_eq!(
            calls.syncs,
            vec![(local, "user@example.com".to_string(), "/var/www/blog".to_string(), true)]
        );
    }

    #[test]
    fn test_missing_host_names_the_key() {
        let temp = site();
        let mut config = deploy_config();
        config.deploy.host = None;
        let (ctx, calls) = fake_context(temp.path(), config);

        let err = run(&ctx, false).unwrap_err();
        assert!(matches!(err, ContentError::NotConfigured(_)));
        assert!(err.to_string().contains("deploy.host"));
        assert_eq!(calls.borrow().builds, 0);
    }

    #[test]
    fn test_build_failure_stops_before_sync() {
        let temp = site();
        let (mut ctx, calls) = fake_context(temp.path(), deploy_config());
        ctx.services.builder = Box::new(FakeBuilder {
            calls: calls.clone(),
            fail: true,
        });

        let err = run(&ctx, false).unwrap_err();
        assert!(matches!(
            err,
            ContentError::CollaboratorFailure {
                collaborator: Collaborator::Builder,
                ..
            }
        ));
        assert!(calls.borrow().syncs.is_empty());
    }

    #[test]
    fn test_missing_publish_dir_is_a_build_failure() {
        let temp = site();
        let (ctx, calls) = fake_context(temp.path(), deploy_config());

        let err = run(&ctx, false).unwrap_err();
        assert!(err.to_string().contains("public"));
        assert!(calls.borrow().syncs.is_empty());
    }

    #[test]
    fn test_sync_failure_after_successful_build() {
        let temp = site();
        fs::create_dir(temp.path().join("public")).unwrap();
        let (mut ctx, calls) = fake_context(temp.path(), deploy_config());
        ctx.services.sync = Box::new(FakeSync {
            calls: calls.clone(),
            fail: true,
        });

        let err = run(&ctx, false).unwrap_err();
        assert!(matches!(
            err,
            ContentError::CollaboratorFailure {
                collaborator: Collaborator::Sync,
                ..
            }
        ));
        let calls = calls.borrow();
        assert_eq!(calls.builds, 1);
        assert_eq!(calls.syncs.len(), 1);
    }
}
