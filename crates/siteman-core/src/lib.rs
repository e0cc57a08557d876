// crates/siteman-core/src/lib.rs - Core library for static-site content management
//
// MODULE MAP (leaf-first):
// - slug:          title -> URL-safe token
// - frontmatter:   read/write the `draft:` field without parsing the header
// - content:       content model (types, statuses, filters, content root)
// - scan:          discover and classify content files
// - index:         ephemeral per-invocation IDs
// - config:        layered, immutable configuration
// - collaborators: traits for external programs (generator, rsync, editor, fzf)
// - interrupt:     SIGINT/SIGTERM flag
// - error:         error kinds

pub mod collaborators;
pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod interrupt;
pub mod scan;
pub mod slug;

pub use config::{ConfigError, ConfigManager, ConfigOverrides, SiteConfig};
pub use content::{ContentItem, ContentRoot, ContentType, Status, StatusFilter, TypeFilter};
pub use error::{Collaborator, ContentError, ContentResult};
pub use index::{EphemeralId, IdIndex};
pub use slug::slugify;
