// crates/siteman-core/src/scan.rs - Content discovery
//
// Walks `content/posts` and/or `content/pages` one level deep, classifies each
// content file and returns the items in a fixed order: posts before pages,
// then lexicographically by relative path. The fixed order is what makes
// ephemeral IDs reproducible across repeated scans of an unchanged tree.

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::content::{
    CONTENT_EXTENSIONS, ContentItem, ContentRoot, ContentType, Status, StatusFilter, TypeFilter,
};
use crate::error::ContentResult;
use crate::frontmatter::read_draft_flag;

/// Scan the content tree
///
/// - Only direct children of each type directory are considered
/// - A missing type directory contributes nothing
/// - Files are classified by directory (type) and `draft:` flag (status)
/// - Items failing either filter are dropped
/// - Output is ordered by type (posts, then pages), then by `relative_path`
///
/// ERROR HANDLING:
/// An unreadable content file aborts the scan with `ReadFailure`, since its
/// status cannot be known. Directory entries that cannot be listed are
/// skipped with a warning.
pub fn scan(
    root: &ContentRoot,
    type_filter: TypeFilter,
    status_filter: StatusFilter,
) -> ContentResult<Vec<ContentItem>> {
    let mut items = Vec::new();

    for kind in type_filter.types() {
        let dir = root.type_dir(kind);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "type directory missing, skipping");
            continue;
        }

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_content_file(entry.path()) {
                continue;
            }

            let status = Status::from_draft_flag(read_draft_flag(entry.path())?);
            if !status_filter.accepts(status) {
                continue;
            }

            items.push(ContentItem {
                relative_path: relative_path(kind, entry.file_name().to_string_lossy().as_ref()),
                content_type: kind,
                status,
                path: entry.path().to_path_buf(),
            });
        }
    }

    items.sort_by(|a, b| {
        a.content_type
            .cmp(&b.content_type)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
    debug!(count = items.len(), ?type_filter, ?status_filter, "scan complete");
    Ok(items)
}

fn is_content_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

fn relative_path(kind: ContentType, filename: &str) -> String {
    format!("{}/{}", kind.dir_name(), filename)
}

/// Scan everything, regardless of type or status
pub fn scan_all(root: &ContentRoot) -> ContentResult<Vec<ContentItem>> {
    scan(root, TypeFilter::Any, StatusFilter::Any)
}
