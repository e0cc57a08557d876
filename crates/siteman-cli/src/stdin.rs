// crates/siteman-cli/src/stdin.rs - STDIN handling for commands that take IDs
//
// Follows the Unix convention: positional arguments win, otherwise read
// whitespace-separated tokens from piped stdin.
//
// ```bash
// siteman edit 1 3
// siteman list post draft --json | jq -r '.[].id' | siteman edit
// ```

use anyhow::Result;
use std::io::{self, IsTerminal, Read};

/// Use `args` if any were given; otherwise read tokens from piped stdin.
///
/// An interactive terminal is never read from, so a bare `siteman edit`
/// does not hang waiting for input.
pub fn args_or_stdin_tokens(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() || io::stdin().is_terminal() {
        return Ok(args);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(split_tokens(&buffer))
}

fn split_tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}
