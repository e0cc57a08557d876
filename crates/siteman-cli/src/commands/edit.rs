// crates/siteman-cli/src/commands/edit.rs - Open content in the editor
//
// Two mutually exclusive modes:
// - explicit IDs:   `siteman edit 1 3` resolves against a fresh unfiltered
//                   scan; unknown IDs are warned about and skipped
// - selection:      `siteman edit [post|page]` shows the matching rows in the
//                   fuzzy selector and maps the chosen rows back by ID
//
// Either way the editor receives every resolved path in one invocation.

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};

use siteman_core::scan::scan;
use siteman_core::{
    ContentError, ContentResult, ContentType, EphemeralId, IdIndex, StatusFilter, TypeFilter,
};

use crate::commands::list::format_row;
use crate::context::Context;

/// What the user asked to edit
#[derive(Debug, PartialEq, Eq)]
pub enum EditMode {
    /// Numeric IDs, in the order given
    Ids(Vec<usize>),
    /// Interactive selection over one type or everything
    Select(TypeFilter),
}

impl EditMode {
    /// Classify the positional arguments
    ///
    /// Nothing or a single type word selects interactively; otherwise every
    /// argument must be a number.
    pub fn parse(targets: &[String]) -> ContentResult<Self> {
        let kinds: Vec<ContentType> = targets
            .iter()
            .filter_map(|t| ContentType::from_str(t).ok())
            .collect();

        match (kinds.as_slice(), targets.len()) {
            ([], 0) => return Ok(Self::Select(TypeFilter::Any)),
            ([kind], 1) => return Ok(Self::Select(TypeFilter::Only(*kind))),
            ([], _) => {}
            _ => {
                return Err(ContentError::InvalidArgument(
                    "give either IDs or a single content type, not both".to_string(),
                ));
            }
        }

        targets
            .iter()
            .map(|t| {
                t.trim().parse::<usize>().map_err(|_| {
                    ContentError::InvalidArgument(format!(
                        "'{}' is neither an ID nor post/page",
                        t
                    ))
                })
            })
            .collect::<ContentResult<Vec<_>>>()
            .map(Self::Ids)
    }
}

/// Open content by ID or through the selector
///
/// With no arguments and piped stdin, IDs are read from stdin:
/// ```bash
/// siteman edit 2 5
/// siteman edit post
/// siteman list draft --json | jq -r '.[].id' | siteman edit
/// ```
pub fn handle(ctx: &Context, targets: Vec<String>) -> Result<()> {
    let targets = crate::stdin::args_or_stdin_tokens(targets)?;
    let opened = run(ctx, &targets)?;
    if opened.is_empty() {
        println!("No valid files to edit");
    }
    Ok(())
}

/// Resolve targets and hand them to the editor; returns the opened paths
pub fn run(ctx: &Context, targets: &[String]) -> ContentResult<Vec<PathBuf>> {
    let mode = EditMode::parse(targets)?;
    let editor = ctx.editor()?;
    let root = ctx.content_root()?;

    let paths = match mode {
        EditMode::Ids(ids) => {
            let index = IdIndex::unfiltered(&root)?;
            resolve_all(&index, ids)
        }
        EditMode::Select(type_filter) => {
            let index = IdIndex::assign(scan(&root, type_filter, StatusFilter::Any)?);
            if index.is_empty() {
                Vec::new()
            } else {
                let selector = ctx.selector()?;
                let rows: Vec<String> = index
                    .entries()
                    .map(|(id, item)| format_row(id, item, false))
                    .collect();
                let chosen = selector.select(&rows)?;
                debug!(chosen = chosen.len(), "selector returned");
                resolve_all(&index, chosen.iter().filter_map(|row| row_id(row)))
            }
        }
    };

    if !paths.is_empty() {
        editor.open(&paths)?;
    }
    Ok(paths)
}

/// Leading ID of a table row
fn row_id(row: &str) -> Option<usize> {
    row.split_whitespace().next()?.parse().ok()
}

/// Resolve IDs, warning about and skipping the ones that do not exist
fn resolve_all(index: &IdIndex, ids: impl IntoIterator<Item = usize>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for raw in ids {
        let resolved = EphemeralId::new(raw)
            .ok_or(ContentError::NotFound(raw))
            .and_then(|id| index.resolve(id));
        match resolved {
            Ok(item) => {
                if !paths.contains(&item.path) {
                    paths.push(item.path.clone());
                }
            }
            Err(err) => {
                warn!(id = raw, "skipping unknown ID");
                eprintln!("⚠️  {}, skipping", err);
            }
        }
    }
    paths
}
