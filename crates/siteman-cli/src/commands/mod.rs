// crates/siteman-cli/src/commands/mod.rs - Command Handler Modules
//
// One module per subcommand. Each exposes `handle`, which prints, and most
// also expose a `run`/`create`/`build` that returns data for tests.
//
// - init:        project scaffolding (no Context needed)
// - new:         create content as a draft
// - list:        filtered table / JSON
// - edit:        open by ID or through the selector
// - status:      show or flip the draft flag
// - deploy:      build + sync
// - completions: shell completion scripts

#[cfg(feature = "completions")]
pub mod completions;
pub mod deploy;
pub mod edit;
pub mod init;
pub mod list;
pub mod new;
pub mod status;
