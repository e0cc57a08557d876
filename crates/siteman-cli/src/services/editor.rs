// crates/siteman-cli/src/services/editor.rs - Editor Integration Service
//
// This service launches the user's editor on one or more content files and
// waits for it to exit.
//
// EDITOR SELECTION HIERARCHY (resolved in siteman_core::config):
// 1. SITEMAN_EDITOR environment variable
// 2. [editor] command in .siteman.toml or the global config
// 3. VISUAL, then EDITOR environment variables
// 4. Nothing: `new` skips its edit step and `edit` reports NotConfigured
//
// There is deliberately no built-in default like vim: a user without an
// editor configured gets their file created without being dropped into an
// unfamiliar program.

use std::path::PathBuf;
use std::process::Command;

use siteman_core::collaborators::Editor;
use siteman_core::{Collaborator, ContentError, ContentResult};

use super::process;

/// Handles text editor operations
///
/// The command line may carry arguments (`code --wait`); file paths are
/// appended after them, all in one invocation:
/// ```bash
/// export SITEMAN_EDITOR="code --wait"
/// siteman edit 1 3 4     # -> code --wait /site/content/posts/a.md ...
/// ```
///
/// The command line is split on whitespace. Shell quoting is not
/// interpreted, so an editor needing quoted arguments should be wrapped in
/// a script and that script configured instead.
pub struct EditorService {
    command_line: String,
}

impl EditorService {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }
}

impl Editor for EditorService {
    fn open(&self, paths: &[PathBuf]) -> ContentResult<()> {
        let (program, args) = process::split_command(&self.command_line).ok_or_else(|| {
            ContentError::NotConfigured("editor command is empty".to_string())
        })?;

        let mut command = Command::new(program);
        command.args(args).args(paths);
        process::run(Collaborator::Editor, &mut command)
    }
}
