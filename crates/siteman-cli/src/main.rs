// crates/siteman-cli/src/main.rs - CLI Application Entry Point
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │  (cli.rs)        │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │     Services        │
//                        │ (config + root)  │    │ (hugo, rsync, fzf,  │
//                        └──────────────────┘    │  editor)            │
//                                                └─────────────────────┘
//
// EXIT CODES:
// 0   success (including "nothing to do" outcomes and --help/--version)
// 1   any handled error, including bad arguments
// 130 interrupted by SIGINT/SIGTERM
//
// EXAMPLE USAGE:
// ```bash
// siteman init
// siteman new post "Hello World"
// siteman list post draft
// siteman status 1 public
// siteman deploy --dry-run
// ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::warn;

mod cli;
mod commands;
mod context;
mod logging;
mod services;
mod stdin;

use cli::{Cli, Commands};
use context::Context;
use logging::Verbosity;
use siteman_core::{ConfigManager, ConfigOverrides, ContentError, interrupt};

const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too, on stdout
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));
    if let Err(err) = interrupt::install() {
        warn!(%err, "could not install signal handlers");
    }

    let result = run(cli);
    if interrupt::is_interrupted() || is_interrupted_error(&result) {
        eprintln!("⚠️  Interrupted");
        return ExitCode::from(EXIT_INTERRUPTED);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch to a command handler
///
/// `init` and `completions` run without loading configuration; every other
/// command gets a Context built from the fully layered config.
fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        project: cli.project,
        deploy_host: cli.deploy_host,
        deploy_path: cli.deploy_path,
    };

    match cli.command {
        Commands::Init { path } => commands::init::handle(path.or(overrides.project)),
        #[cfg(feature = "completions")]
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
        Commands::New {
            kind,
            title,
            no_edit,
        } => commands::new::handle(&load_context(&overrides)?, kind, &title, no_edit),
        Commands::List { filters, json } => {
            commands::list::handle(&load_context(&overrides)?, &filters, json)
        }
        Commands::Edit { targets } => commands::edit::handle(&load_context(&overrides)?, targets),
        Commands::Status { id, status } => {
            commands::status::handle(&load_context(&overrides)?, id, status)
        }
        Commands::Deploy { dry_run } => commands::deploy::handle(&load_context(&overrides)?, dry_run),
    }
}

fn load_context(overrides: &ConfigOverrides) -> Result<Context> {
    let config = ConfigManager::load(overrides)?;
    Context::new(config)
}

fn is_interrupted_error(result: &Result<()>) -> bool {
    matches!(
        result
            .as_ref()
            .err()
            .and_then(|err| err.downcast_ref::<ContentError>()),
        Some(ContentError::Interrupted)
    )
}
