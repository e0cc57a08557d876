// crates/siteman-cli/src/services/process.rs - Shared child-process plumbing
//
// Every collaborator is "run a program, wait for it, map the outcome":
// - could not start  -> NotConfigured (missing binary) or CollaboratorFailure
// - non-zero exit    -> CollaboratorFailure with the exit code
//
// The project directory is handed to children via `Command::current_dir`;
// the siteman process itself never changes directory.

use std::io;
use std::process::{Command, ExitStatus};

use siteman_core::{Collaborator, ContentError, ContentResult};
use tracing::debug;

/// Split a configured command line such as `code --wait` into program + args
///
/// Splitting is on whitespace only. Quotes and escapes are not supported, so
/// `sh -c 'a b'` yields the arguments `-c`, `'a` and `b'`.
pub fn split_command(command_line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command_line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Describe a command for logs and error messages
pub fn describe(command: &Command) -> String {
    let mut text = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        text.push(' ');
        text.push_str(&arg.to_string_lossy());
    }
    text
}

/// Map a spawn error into the right error kind
pub fn spawn_error(collaborator: Collaborator, command: &Command, err: io::Error) -> ContentError {
    let program = command.get_program().to_string_lossy().into_owned();
    if err.kind() == io::ErrorKind::NotFound {
        ContentError::NotConfigured(format!(
            "{} program '{}' not found on PATH",
            collaborator, program
        ))
    } else {
        ContentError::collaborator(collaborator, format!("could not start '{}': {}", program, err))
    }
}

/// Map an exit status into Ok or a collaborator failure
pub fn check_status(
    collaborator: Collaborator,
    command: &Command,
    status: ExitStatus,
) -> ContentResult<()> {
    if status.success() {
        return Ok(());
    }
    let code = status
        .code()
        .map_or_else(|| "a signal".to_string(), |code| format!("status {}", code));
    Err(ContentError::collaborator(
        collaborator,
        format!("'{}' exited with {}", describe(command), code),
    ))
}

/// Run a command with inherited stdio and wait for it
pub fn run(collaborator: Collaborator, command: &mut Command) -> ContentResult<()> {
    debug!(%collaborator, command = %describe(command), "running");
    let status = command
        .status()
        .map_err(|err| spawn_error(collaborator, command, err))?;
    check_status(collaborator, command, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(
            split_command("code --wait"),
            Some(("code".to_string(), vec!["--wait".to_string()]))
        );
        assert_eq!(split_command("hx"), Some(("hx".to_string(), vec![])));
        assert_eq!(split_command("   "), None);
        assert_eq!(
            split_command("sh -c 'a b'"),
            Some((
                "sh".to_string(),
                vec!["-c".to_string(), "'a".to_string(), "b'".to_string()]
            ))
        );
    }

    #[test]
    fn test_missing_program_is_not_configured() {
        let mut command = Command::new("siteman-test-definitely-missing-binary");
        let err = run(Collaborator::Editor, &mut command).unwrap_err();
        assert!(matches!(err, ContentError::NotConfigured(_)));
        assert!(err.to_string().contains("siteman-test-definitely-missing-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_collaborator_failure() {
        let mut command = Command::new("false");
        let err = run(Collaborator::Builder, &mut command).unwrap_err();
        match err {
            ContentError::CollaboratorFailure { collaborator, detail } => {
                assert_eq!(collaborator, Collaborator::Builder);
                assert!(detail.contains("status 1"));
            }
            other => panic!("expected CollaboratorFailure, got {:?}", other),
        }
    }
}
