use anyhow::Result;
use std::path::PathBuf;

use siteman_core::frontmatter::set_draft_flag;
use siteman_core::{ContentResult, EphemeralId, IdIndex, Status};

use crate::context::Context;

/// Result of a `status` invocation
#[derive(Debug, PartialEq, Eq)]
pub enum StatusReport {
    /// Read-only query
    Current { relative_path: String, status: Status },
    /// The file was rewritten
    Changed {
        relative_path: String,
        from: Status,
        to: Status,
    },
    /// The file already had the requested status; nothing was written
    Already { relative_path: String, status: Status },
}

/// Show or change the status of one item
///
/// ```bash
/// siteman status 3            # 3  draft  posts/2024-06-01-hello.md
/// siteman status 3 public     # ✅ posts/2024-06-01-hello.md: draft -> public
/// ```
pub fn handle(ctx: &Context, id: EphemeralId, new_status: Option<Status>) -> Result<()> {
    match run(ctx, id, new_status)? {
        StatusReport::Current {
            relative_path,
            status,
        } => println!("{}  {}  {}", id, status, relative_path),
        StatusReport::Changed {
            relative_path,
            from,
            to,
        } => println!("✅ {}: {} -> {}", relative_path, from, to),
        StatusReport::Already {
            relative_path,
            status,
        } => println!("{} is already {}", relative_path, status),
    }
    Ok(())
}

pub fn run(ctx: &Context, id: EphemeralId, new_status: Option<Status>) -> ContentResult<StatusReport> {
    let root = ctx.content_root()?;
    let index = IdIndex::unfiltered(&root)?;
    let item = index.resolve(id)?;
    let relative_path = item.relative_path.clone();

    let Some(to) = new_status else {
        return Ok(StatusReport::Current {
            relative_path,
            status: item.status,
        });
    };

    let path: PathBuf = item.path.clone();
    if set_draft_flag(&path, to.is_draft())? {
        Ok(StatusReport::Changed {
            relative_path,
            from: item.status,
            to,
        })
    } else {
        Ok(StatusReport::Already {
            relative_path,
            status: to,
        })
    }
}
