// crates/siteman-core/src/index.rs - Ephemeral, invocation-scoped content IDs
//
// IDs are a "look, then act" convenience: `siteman list` prints them and a
// following `siteman status 3 public` refers back to one. They are plain
// positions in a freshly built list and are never stored anywhere.
//
// SHARP EDGE:
// `status` and `edit` always resolve against an unfiltered scan, while the ID
// the user remembers may come from a filtered `list` (e.g. `list post draft`).
// In that case the same number can point at a different file. Persisting IDs
// between invocations would hide this by promising a stability the scheme
// does not have, so it is left visible instead: use `siteman list` without
// filters before acting on an ID.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::content::{ContentItem, ContentRoot};
use crate::error::{ContentError, ContentResult};
use crate::scan::scan_all;

/// A 1-based handle for a scanned item, valid for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EphemeralId(NonZeroUsize);

impl EphemeralId {
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for EphemeralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EphemeralId {
    type Err = ContentError;

    fn from_str(s: &str) -> ContentResult<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                ContentError::InvalidArgument(format!(
                    "'{}' is not a valid ID (expected a positive number)",
                    s
                ))
            })
    }
}

/// Scan results numbered 1..N in scan order
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    items: Vec<ContentItem>,
}

impl IdIndex {
    /// Number the items in the order they were given
    pub fn assign(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    /// Build the index used for resolving IDs typed by the user
    pub fn unfiltered(root: &ContentRoot) -> ContentResult<Self> {
        Ok(Self::assign(scan_all(root)?))
    }

    /// All entries with their IDs, in order
    pub fn entries(&self) -> impl Iterator<Item = (EphemeralId, &ContentItem)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(pos, item)| EphemeralId::new(pos + 1).map(|id| (id, item)))
    }

    /// Look up an ID
    pub fn resolve(&self, id: EphemeralId) -> ContentResult<&ContentItem> {
        self.items
            .get(id.get() - 1)
            .ok_or(ContentError::NotFound(id.get()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentType, Status};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn item(relative_path: &str, content_type: ContentType, status: Status) -> ContentItem {
        ContentItem {
            relative_path: relative_path.to_string(),
            content_type,
            status,
            path: PathBuf::from("/site/content").join(relative_path),
        }
    }

    fn id(value: usize) -> EphemeralId {
        EphemeralId::new(value).unwrap()
    }

    #[test]
    fn test_assign_numbers_from_one() {
        let index = IdIndex::assign(vec![
            item("posts/2024-01-01-a.md", ContentType::Post, Status::Draft),
            item("pages/b.md", ContentType::Page, Status::Public),
        ]);

        let numbered: Vec<_> = index
            .entries()
            .map(|(id, item)| (id.get(), item.relative_path.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "posts/2024-01-01-a.md"), (2, "pages/b.md")]);
    }

    #[test]
    fn test_resolve() {
        let index = IdIndex::assign(vec![
            item("posts/a.md", ContentType::Post, Status::Draft),
            item("pages/b.md", ContentType::Page, Status::Public),
        ]);

        assert_eq!(index.resolve(id(2)).unwrap().relative_path, "pages/b.md");
        assert!(matches!(index.resolve(id(3)), Err(ContentError::NotFound(3))));
        assert!(matches!(
            IdIndex::default().resolve(id(1)),
            Err(ContentError::NotFound(1))
        ));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("7".parse::<EphemeralId>().unwrap().get(), 7);
        assert_eq!(" 12 ".parse::<EphemeralId>().unwrap().get(), 12);
        assert!(matches!(
            "0".parse::<EphemeralId>(),
            Err(ContentError::InvalidArgument(_))
        ));
        assert!("-1".parse::<EphemeralId>().is_err());
        assert!("post".parse::<EphemeralId>().is_err());
    }

    #[test]
    fn test_unfiltered_index_is_reproducible() {
        let temp = TempDir::new().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(content.join("posts")).unwrap();
        fs::create_dir_all(content.join("pages")).unwrap();
        fs::write(content.join("posts/2024-01-01-a.md"), "---\ndraft: true\n---\n").unwrap();
        fs::write(content.join("pages/b.md"), "---\ntitle: B\n---\n").unwrap();
        let root = ContentRoot::open(temp.path()).unwrap();

        let first = IdIndex::unfiltered(&root).unwrap();
        let second = IdIndex::unfiltered(&root).unwrap();

        let summary = |index: &IdIndex| -> Vec<(usize, ContentType, Status, String)> {
            index
                .entries()
                .map(|(id, item)| (id.get(), item.content_type, item.status, item.relative_path.clone()))
                .collect()
        };
        assert_eq!(summary(&first), summary(&second));
        assert_eq!(
            summary(&first),
            vec![
                (1, ContentType::Post, Status::Draft, "posts/2024-01-01-a.md".to_string()),
                (2, ContentType::Page, Status::Public, "pages/b.md".to_string()),
            ]
        );
    }
}
