use anyhow::Result;
use console::Style;
use serde::Serialize;
use std::str::FromStr;

use siteman_core::scan::scan;
use siteman_core::{
    ContentError, ContentItem, ContentResult, ContentType, EphemeralId, IdIndex, Status,
    StatusFilter, TypeFilter,
};

use crate::context::Context;

/// One record of `list --json`
#[derive(Serialize)]
struct JsonRow<'a> {
    id: usize,
    #[serde(flatten)]
    item: &'a ContentItem,
}

/// List content with ephemeral IDs
///
/// Filter words may come in any order, at most one of each kind:
/// ```bash
/// siteman list
/// siteman list post
/// siteman list draft page
/// siteman list post public --json | jq -r '.[].relative_path'
/// ```
pub fn handle(ctx: &Context, filters: &[String], json: bool) -> Result<()> {
    let index = build(ctx, filters)?;

    if json {
        let rows: Vec<JsonRow> = index
            .entries()
            .map(|(id, item)| JsonRow { id: id.get(), item })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if index.is_empty() {
        println!("No content found");
        return Ok(());
    }

    print!("{}", render_table(&index, console::colors_enabled()));
    Ok(())
}

/// Scan with the given filter words and number the result
pub fn build(ctx: &Context, filters: &[String]) -> ContentResult<IdIndex> {
    let (type_filter, status_filter) = parse_filters(filters)?;
    let root = ctx.content_root()?;
    Ok(IdIndex::assign(scan(&root, type_filter, status_filter)?))
}

/// Turn `post`/`page`/`draft`/`public` words into filters
pub fn parse_filters(words: &[String]) -> ContentResult<(TypeFilter, StatusFilter)> {
    let mut kind: Option<ContentType> = None;
    let mut status: Option<Status> = None;

    for word in words {
        if let Ok(parsed) = ContentType::from_str(word) {
            if kind.replace(parsed).is_some() {
                return Err(ContentError::InvalidArgument(format!(
                    "more than one content type given ('{}')",
                    word
                )));
            }
        } else if let Ok(parsed) = Status::from_str(word) {
            if status.replace(parsed).is_some() {
                return Err(ContentError::InvalidArgument(format!(
                    "more than one status given ('{}')",
                    word
                )));
            }
        } else {
            return Err(ContentError::InvalidArgument(format!(
                "unknown filter '{}' (expected post, page, draft or public)",
                word
            )));
        }
    }

    Ok((kind.into(), status.into()))
}

/// One table row without header, also used as selector input
pub fn format_row(id: EphemeralId, item: &ContentItem, color: bool) -> String {
    let style = match item.status {
        Status::Draft => Style::new().yellow(),
        Status::Public => Style::new().green(),
    }
    .force_styling(color);

    format!(
        "{:>3}  {}  {:<4}  {}",
        id,
        style.apply_to(format!("{:<6}", item.status)),
        item.content_type,
        item.relative_path
    )
}

/// Header plus one line per entry, newline-terminated
pub fn render_table(index: &IdIndex, color: bool) -> String {
    let mut out = format!("{:>3}  {:<6}  {:<4}  {}\n", "ID", "STATUS", "TYPE", "PATH");
    for (id, item) in index.entries() {
        out.push_str(&format_row(id, item, color));
        out.push('\n');
    }
    out
}
