use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

use crate::cli::Cli;

/// Print a completion script for `shell` to stdout
///
/// ```bash
/// siteman completions zsh > ~/.zfunc/_siteman
/// ```
pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "siteman", &mut io::stdout());
}
