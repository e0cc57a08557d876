// crates/siteman-cli/src/commands/new.rs - Content creation command
//
// WORKFLOW:
// 1. Validate the project and derive a slug from the title
// 2. Work out the target path (dated for posts) and refuse to overwrite
// 3. Let the generator scaffold the file with its default front matter
// 4. Force `draft: true`, whatever the generator wrote
// 5. Open the file in the editor, if one is configured

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::{debug, info};

use siteman_core::content::new_content_path;
use siteman_core::frontmatter::set_draft_flag;
use siteman_core::{Collaborator, ContentError, ContentResult, ContentType, slugify};

use crate::context::Context;

/// Create a post or page and optionally open it
///
/// ```bash
/// siteman new post "My Title!!"      # content/posts/2024-06-01-my-title.md
/// siteman new page About --no-edit  # content/pages/about.md
/// ```
pub fn handle(ctx: &Context, kind: ContentType, title: &[String], no_edit: bool) -> Result<()> {
    let path = create(ctx, kind, &title.join(" "), Local::now().date_naive())?;
    println!("✅ Created {} (draft): {}", kind, path.display());

    if no_edit {
        return Ok(());
    }
    match ctx.services.editor.as_deref() {
        Some(editor) => editor.open(&[path])?,
        None => debug!("no editor configured, skipping edit step"),
    }
    Ok(())
}

/// Create the content file and return its absolute path
///
/// New content always starts as a draft, even when the generator's
/// archetype says `draft: false`.
pub fn create(
    ctx: &Context,
    kind: ContentType,
    title: &str,
    date: NaiveDate,
) -> ContentResult<PathBuf> {
    let root = ctx.content_root()?;

    let slug = slugify(title);
    if slug.is_empty() {
        return Err(ContentError::InvalidArgument(format!(
            "title '{}' has no characters usable in a filename",
            title
        )));
    }

    let relative = new_content_path(kind, &slug, date);
    let target = root.project().join(&relative);
    if target.exists() {
        return Err(ContentError::AlreadyExists(target));
    }

    info!(target = %relative.display(), "scaffolding new content");
    ctx.services.generator.scaffold(root.project(), &relative)?;

    if !target.is_file() {
        return Err(ContentError::collaborator(
            Collaborator::Generator,
            format!("reported success but did not create {}", relative.display()),
        ));
    }

    set_draft_flag(&target, true)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{fake_context, site};
    use siteman_core::SiteConfig;
    use siteman_core::frontmatter::read_draft_flag;
    use std::fs;
    use std::path::Path;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_new_post_then_already_exists() {
        let temp = site();
        let (ctx, calls) = fake_context(temp.path(), SiteConfig::default());

        let path = create(&ctx, ContentType::Post, "My Title!!", june_first()).unwrap();
        assert!(path.ends_with("content/posts/2024-06-01-my-title.md"));
        assert!(read_draft_flag(&path).unwrap());

        // The archetype's draft: false was replaced, not duplicated
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("draft:").count(), 1);
        assert!(text.contains("title: \"Scaffolded\""));

        let err = create(&ctx, ContentType::Post, "My Title!!", june_first()).unwrap_err();
        assert!(matches!(err, ContentError::AlreadyExists(p) if p == path));
        assert_eq!(calls.borrow().scaffolded.len(), 1);
    }

    #[test]
    fn test_generator_receives_relative_target() {
        let temp = site();
        let (ctx, calls) = fake_context(temp.path(), SiteConfig::default());

        create(&ctx, ContentType::Page, "Über uns", june_first()).unwrap();
        assert_eq!(
            calls.borrow().scaffolded,
            vec![Path::new("content/pages/uber-uns.md").to_path_buf()]
        );
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let temp = site();
        let (ctx, calls) = fake_context(temp.path(), SiteConfig::default());

        let err = create(&ctx, ContentType::Post, "!!! ???", june_first()).unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));
        assert!(calls.borrow().scaffolded.is_empty());
    }

    #[test]
    fn test_missing_content_dir_is_path_invalid() {
        let temp = tempfile::TempDir::new().unwrap();
        let (ctx, _) = fake_context(temp.path(), SiteConfig::default());

        let err = create(&ctx, ContentType::Post, "Hello", june_first()).unwrap_err();
        assert!(matches!(err, ContentError::PathInvalid { .. }));
    }

    #[test]
    fn test_generator_that_creates_nothing_is_a_failure() {
        use crate::context::testing::FakeGenerator;

        let temp = site();
        let (mut ctx, calls) = fake_context(temp.path(), SiteConfig::default());
        ctx.services.generator = Box::new(FakeGenerator {
            calls: calls.clone(),
            create_file: false,
        });

        let err = create(&ctx, ContentType::Post, "Ghost", june_first()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::CollaboratorFailure {
                collaborator: Collaborator::Generator,
                ..
            }
        ));
    }

    #[test]
    fn test_handle_opens_editor_unless_disabled() {
        let temp = site();
        let (ctx, calls) = fake_context(temp.path(), SiteConfig::default());

        handle(&ctx, ContentType::Page, &["About".to_string()], false).unwrap();
        handle(&ctx, ContentType::Page, &["Contact".to_string()], true).unwrap();

        let opened = &calls.borrow().opened;
        assert_eq!(opened.len(), 1);
        assert!(opened[0][0].ends_with("content/pages/about.md"));
    }
}
