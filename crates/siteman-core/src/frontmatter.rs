// crates/siteman-core/src/frontmatter.rs - The `draft:` front-matter field
//
// This module reads and writes exactly one front-matter field. It does not
// parse YAML: the file is treated as a list of lines and only the `draft:`
// line is ever touched, so unrelated fields keep their exact formatting.
//
// FILE SHAPE:
// ```text
// ---              <- opening delimiter (first non-blank line)
// title: "Hello"
// draft: true      <- the only line this module reads or writes
// ---              <- closing delimiter
// body...
// ```
//
// Files are handled as bytes. Only the ASCII `draft:` line and the `---`
// delimiters need to be recognised, so content in any ASCII-compatible
// encoding (UTF-8, Latin-1, Windows-1252) is read and rewritten without
// touching the other lines.
//
// WRITE SAFETY:
// Changes go to a sibling temporary file which is renamed over the original
// only after it has been fully written. Any failure (or an interrupt caught
// before the rename) drops the temporary file and leaves the original
// byte-for-byte intact.
//
// LIMITATION:
// Two processes flipping the same file can still race between "read current
// value" and "rename replacement"; the rename only guarantees that readers
// never observe a half-written file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::interrupt;

const DELIMITER: &str = "---";
const KEY: &str = "draft:";

/// What a rewrite did to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftEdit {
    /// The file already carried the requested value
    Unchanged,
    /// An existing `draft:` line (0-based index) was replaced
    Replaced { line: usize },
    /// A new `draft:` line was inserted at this 0-based index
    Inserted { line: usize },
}

/// Result of applying a draft value to file text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Full file contents after the edit
    pub text: Vec<u8>,
    pub edit: DraftEdit,
}

/// Where the line scanner currently is relative to the header block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Only blank lines seen so far
    BeforeHeader,
    /// Between the opening and closing delimiters
    InHeader,
    /// Past the closing delimiter
    AfterHeader,
    /// The first non-blank line was not a delimiter; there is no header
    NoHeader,
}

impl Region {
    fn next(self, content: &[u8]) -> Self {
        match self {
            Self::BeforeHeader if content.trim_ascii().is_empty() => Self::BeforeHeader,
            Self::BeforeHeader if is_delimiter(content) => Self::InHeader,
            Self::BeforeHeader => Self::NoHeader,
            Self::InHeader if is_delimiter(content) => Self::AfterHeader,
            other => other,
        }
    }
}

fn is_delimiter(content: &[u8]) -> bool {
    content.trim_ascii_end() == DELIMITER.as_bytes()
}

/// Parse a line as a `draft:` field
///
/// Returns `None` for any other line, `Some(true)` when the value is the
/// literal `true` and `Some(false)` for every other value.
fn draft_value(content: &[u8]) -> Option<bool> {
    let rest = content.trim_ascii_start().strip_prefix(KEY.as_bytes())?;
    let value = rest
        .split(u8::is_ascii_whitespace)
        .find(|token| !token.is_empty());
    Some(value == Some(b"true".as_slice()))
}

fn strip_eol(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line)
}

fn eol_of(line: &[u8]) -> &[u8] {
    &line[strip_eol(line).len()..]
}

/// Whether the file contents mark the content as a draft
///
/// True iff any line, ignoring leading whitespace, reads `draft:` followed by
/// the literal `true`. No such line means the content is public. Works on
/// raw bytes: a file in a legacy encoding still has an ASCII `draft:` line.
pub fn draft_flag_in(text: impl AsRef<[u8]>) -> bool {
    text.as_ref()
        .split(|&byte| byte == b'\n')
        .any(|line| draft_value(line) == Some(true))
}

fn read_bytes(path: &Path) -> ContentResult<Vec<u8>> {
    fs::read(path).map_err(|source| ContentError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the draft flag of a content file
pub fn read_draft_flag(path: &Path) -> ContentResult<bool> {
    Ok(draft_flag_in(read_bytes(path)?))
}

/// Compute the file contents with `draft:` set to `value`
///
/// This is the pure half of `set_draft_flag`:
/// 1. Already at `value` -> unchanged
/// 2. A `draft:` line exists -> replace it (one inside the header wins over
///    one further down). Clearing the flag rewrites every line reading
///    `true`, so the result never reads as a draft.
/// 3. Otherwise insert after the opening delimiter, or as the first line
///    when the file has no header
///
/// Every other line is copied byte-for-byte, whatever its encoding.
pub fn rewrite_draft(text: impl AsRef<[u8]>, value: bool) -> Rewrite {
    let text = text.as_ref();
    if draft_flag_in(text) == value {
        return Rewrite {
            text: text.to_vec(),
            edit: DraftEdit::Unchanged,
        };
    }

    let lines: Vec<&[u8]> = text.split_inclusive(|&byte| byte == b'\n').collect();
    let default_eol: &[u8] = lines
        .first()
        .map(|line| eol_of(line))
        .filter(|eol| !eol.is_empty())
        .unwrap_or(b"\n");

    let mut region = Region::BeforeHeader;
    let mut opening = None;
    let mut in_header = None;
    let mut anywhere = None;
    let mut reading_true = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let content = strip_eol(line);
        let previous = region;
        region = region.next(content);

        if previous == Region::BeforeHeader && region == Region::InHeader {
            opening = Some(index);
            continue;
        }

        if let Some(current) = draft_value(content) {
            if region == Region::InHeader && in_header.is_none() {
                in_header = Some(index);
            }
            anywhere.get_or_insert(index);
            if current {
                reading_true.push(index);
            }
        }
    }

    let field = format!("draft: {}", value);
    let mut out = Vec::with_capacity(text.len() + field.len() + 2);

    let targets: Vec<usize> = if value {
        in_header.or(anywhere).into_iter().collect()
    } else {
        reading_true
    };

    if let Some(&target) = targets.first() {
        for (index, line) in lines.iter().enumerate() {
            if targets.contains(&index) {
                out.extend_from_slice(field.as_bytes());
                out.extend_from_slice(eol_of(line));
            } else {
                out.extend_from_slice(line);
            }
        }
        return Rewrite {
            text: out,
            edit: DraftEdit::Replaced { line: target },
        };
    }

    let insert_at = opening.map_or(0, |index| index + 1);
    for (index, line) in lines.iter().enumerate() {
        if index == insert_at {
            out.extend_from_slice(field.as_bytes());
            out.extend_from_slice(default_eol);
        }
        out.extend_from_slice(line);
        if Some(index) == opening && eol_of(line).is_empty() {
            out.extend_from_slice(default_eol);
        }
    }
    if insert_at == lines.len() {
        out.extend_from_slice(field.as_bytes());
        out.extend_from_slice(default_eol);
    }

    Rewrite {
        text: out,
        edit: DraftEdit::Inserted { line: insert_at },
    }
}

/// Set the draft flag of a content file
///
/// Returns `Ok(true)` when the file was rewritten and `Ok(false)` when it
/// already carried `value` (no write happens, so mtime and VCS state are
/// untouched).
pub fn set_draft_flag(path: &Path, value: bool) -> ContentResult<bool> {
    let original = read_bytes(path)?;

    let rewrite = rewrite_draft(&original, value);
    debug!(path = %path.display(), value, edit = ?rewrite.edit, "draft flag rewrite");

    if rewrite.edit == DraftEdit::Unchanged {
        return Ok(false);
    }

    replace_contents(path, &rewrite.text, interrupt::is_interrupted)?;
    Ok(true)
}

/// Atomically replace `path` with `contents`
///
/// The temporary file lives next to the target so the final rename never
/// crosses filesystems. `NamedTempFile` deletes itself on drop, which covers
/// every early return below.
fn replace_contents(
    path: &Path,
    contents: &[u8],
    interrupted: impl Fn() -> bool,
) -> ContentResult<()> {
    let write_err = |source: io::Error| ContentError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut replacement = NamedTempFile::new_in(dir).map_err(write_err)?;
    replacement
        .write_all(contents)
        .map_err(write_err)?;
    replacement.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        replacement
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    if interrupted() {
        debug!(path = %path.display(), "interrupted before replace, discarding temporary file");
        return Err(ContentError::Interrupted);
    }

    replacement
        .persist(path)
        .map_err(|err| write_err(err.error))?;
    Ok(())
}
