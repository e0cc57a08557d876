// crates/siteman-core/src/content.rs - Content model
//
// A site project looks like this:
// ```
// project/
// ├── content/          <- ContentRoot
// │   ├── posts/        <- ContentType::Post, dated filenames
// │   └── pages/        <- ContentType::Page
// └── public/           <- build output, synced on deploy
// ```
//
// Items are rebuilt from disk on every scan; nothing here is persisted.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ContentError, ContentResult};

/// Name of the content directory inside a project
pub const CONTENT_DIR: &str = "content";

/// File extensions treated as content
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

/// Kind of content, derived from the subdirectory holding the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Page,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Post, ContentType::Page];

    /// Subdirectory of the content root holding this kind
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::Page => "pages",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Post => "post",
            Self::Page => "page",
        })
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> ContentResult<Self> {
        match s {
            "post" => Ok(Self::Post),
            "page" => Ok(Self::Page),
            other => Err(ContentError::InvalidArgument(format!(
                "unknown content type '{}', expected post or page",
                other
            ))),
        }
    }
}

/// Publication state, derived from the `draft:` front-matter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Public,
}

impl Status {
    pub fn from_draft_flag(draft: bool) -> Self {
        if draft { Self::Draft } else { Self::Public }
    }

    pub fn is_draft(self) -> bool {
        self == Self::Draft
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Draft => "draft",
            Self::Public => "public",
        })
    }
}

impl FromStr for Status {
    type Err = ContentError;

    fn from_str(s: &str) -> ContentResult<Self> {
        match s {
            "draft" => Ok(Self::Draft),
            "public" => Ok(Self::Public),
            other => Err(ContentError::InvalidArgument(format!(
                "unknown status '{}', expected draft or public",
                other
            ))),
        }
    }
}

/// Which content types a scan should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    Only(ContentType),
    #[default]
    Any,
}

impl TypeFilter {
    pub fn types(self) -> Vec<ContentType> {
        match self {
            Self::Only(kind) => vec![kind],
            Self::Any => ContentType::ALL.to_vec(),
        }
    }
}

impl From<Option<ContentType>> for TypeFilter {
    fn from(kind: Option<ContentType>) -> Self {
        kind.map_or(Self::Any, Self::Only)
    }
}

/// Which publication states a scan should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Only(Status),
    #[default]
    Any,
}

impl StatusFilter {
    pub fn accepts(self, status: Status) -> bool {
        match self {
            Self::Only(wanted) => wanted == status,
            Self::Any => true,
        }
    }
}

impl From<Option<Status>> for StatusFilter {
    fn from(status: Option<Status>) -> Self {
        status.map_or(Self::Any, Self::Only)
    }
}

/// One discovered content file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    /// Path relative to the content root with `/` separators, e.g.
    /// `posts/2024-01-01-hello.md`. This is the identity and sort key.
    pub relative_path: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub status: Status,
    /// Absolute path, for handing to collaborators
    #[serde(skip)]
    pub path: PathBuf,
}

/// A validated site project with an existing content directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    project: PathBuf,
    content: PathBuf,
}

impl ContentRoot {
    /// Validate a project directory
    ///
    /// The project must exist and contain a `content/` directory. Missing
    /// `posts/` or `pages/` subdirectories are fine: they scan as empty and
    /// the generator creates them on demand.
    pub fn open(project: &Path) -> ContentResult<Self> {
        let invalid = |reason: &str| ContentError::PathInvalid {
            path: project.to_path_buf(),
            reason: reason.to_string(),
        };

        let project = project
            .canonicalize()
            .map_err(|e| invalid(&format!("cannot resolve project directory ({})", e)))?;

        if !project.is_dir() {
            return Err(ContentError::PathInvalid {
                path: project,
                reason: "not a directory".to_string(),
            });
        }

        let content = project.join(CONTENT_DIR);
        if !content.is_dir() {
            return Err(ContentError::PathInvalid {
                path: project,
                reason: format!("missing '{}' directory", CONTENT_DIR),
            });
        }

        Ok(Self { project, content })
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn content(&self) -> &Path {
        &self.content
    }

    /// Directory holding one content type
    pub fn type_dir(&self, kind: ContentType) -> PathBuf {
        self.content.join(kind.dir_name())
    }
}

/// Relative path (from the project root) for new content
///
/// Posts carry their creation date so they sort chronologically:
/// - post "my-title" on 2024-06-01 -> `content/posts/2024-06-01-my-title.md`
/// - page "about"                  -> `content/pages/about.md`
pub fn new_content_path(kind: ContentType, slug: &str, date: NaiveDate) -> PathBuf {
    let filename = match kind {
        ContentType::Post => format!("{}-{}.md", date.format("%Y-%m-%d"), slug),
        ContentType::Page => format!("{}.md", slug),
    };
    Path::new(CONTENT_DIR).join(kind.dir_name()).join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_content_paths() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            new_content_path(ContentType::Post, "my-title", date),
            Path::new("content/posts/2024-06-01-my-title.md")
        );
        assert_eq!(
            new_content_path(ContentType::Page, "about", date),
            Path::new("content/pages/about.md")
        );
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("post".parse::<ContentType>().unwrap(), ContentType::Post);
        assert_eq!("public".parse::<Status>().unwrap(), Status::Public);
        assert!(matches!(
            "posts".parse::<ContentType>(),
            Err(ContentError::InvalidArgument(_))
        ));
        assert!("published".parse::<Status>().is_err());
    }

    #[test]
    fn test_filters() {
        assert_eq!(TypeFilter::Any.types(), vec![ContentType::Post, ContentType::Page]);
        assert_eq!(TypeFilter::from(Some(ContentType::Page)).types(), vec![ContentType::Page]);
        assert!(StatusFilter::Any.accepts(Status::Draft));
        assert!(!StatusFilter::Only(Status::Public).accepts(Status::Draft));
    }

    #[test]
    fn test_content_root_requires_content_dir() {
        let temp = TempDir::new().unwrap();
        let err = ContentRoot::open(temp.path()).unwrap_err();
        assert!(err.to_string().contains("missing 'content' directory"));

        fs::create_dir(temp.path().join("content")).unwrap();
        let root = ContentRoot::open(temp.path()).unwrap();
        assert!(root.content().ends_with("content"));
        assert!(root.type_dir(ContentType::Post).ends_with("content/posts"));
    }

    #[test]
    fn test_content_root_missing_project() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nowhere");
        match ContentRoot::open(&missing).unwrap_err() {
            ContentError::PathInvalid { path, .. } => assert_eq!(path, missing),
            other => panic!("expected PathInvalid, got {:?}", other),
        }
    }
}
