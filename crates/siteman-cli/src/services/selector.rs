// crates/siteman-cli/src/services/selector.rs - Fuzzy selector service
//
// Rows go to the selector's stdin, one per line; the chosen rows come back
// on its stdout. The selector draws its UI on the terminal directly, so only
// stdin and stdout are piped.
//
// fzf exit codes:
//   0   something was selected
//   1   no match
//   130 cancelled (Escape / Ctrl-C)
// Both 1 and 130 mean "nothing chosen", not a failure.

use std::io::Write;
use std::process::{Command, Stdio};

use siteman_core::collaborators::Selector;
use siteman_core::config::SelectorConfig;
use siteman_core::{Collaborator, ContentError, ContentResult};
use tracing::debug;

use super::process;

const NO_MATCH: i32 = 1;
const CANCELLED: i32 = 130;

/// Interactive multi-select through an external program such as fzf
pub struct SelectorService {
    program: String,
    args: Vec<String>,
}

impl SelectorService {
    /// Returns `None` when the selector is switched off in config
    pub fn from_config(config: &SelectorConfig) -> Option<Self> {
        let program = config.command.clone()?;
        Some(Self {
            program,
            args: config.args.clone(),
        })
    }
}

impl Selector for SelectorService {
    fn select(&self, rows: &[String]) -> ContentResult<Vec<String>> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());
        debug!(command = %process::describe(&command), rows = rows.len(), "starting selector");

        let mut child = command
            .spawn()
            .map_err(|err| process::spawn_error(Collaborator::Selector, &command, err))?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = rows.join("\n") + "\n";
            // The selector may exit before reading everything; that is not an error
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                debug!(%err, "selector closed stdin early");
            }
        }

        let output = child.wait_with_output().map_err(|err| {
            ContentError::collaborator(Collaborator::Selector, format!("wait failed: {}", err))
        })?;

        match output.status.code() {
            Some(NO_MATCH) | Some(CANCELLED) => return Ok(Vec::new()),
            _ => process::check_status(Collaborator::Selector, &command, output.status)?,
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(program: &str, args: &[&str]) -> SelectorService {
        SelectorService::from_config(&SelectorConfig {
            command: Some(program.to_string()),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_disabled_selector() {
        let config = SelectorConfig {
            command: None,
            args: vec![],
        };
        assert!(SelectorService::from_config(&config).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_rows_round_trip_through_program() {
        // `head -n 2` stands in for a user picking the first two rows
        let chosen = selector("head", &["-n", "2"])
            .select(&[
                "1  draft   post  a.md".to_string(),
                "2  public  post  b.md".to_string(),
                "3  draft   page  c.md".to_string(),
            ])
            .unwrap();
        assert_eq!(chosen, vec!["1  draft   post  a.md", "2  public  post  b.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_no_match_exit_is_empty_selection() {
        let chosen = selector("sh", &["-c", "cat > /dev/null; exit 1"])
            .select(&["1 a".to_string()])
            .unwrap();
        assert!(chosen.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_other_exit_is_failure() {
        let err = selector("sh", &["-c", "cat > /dev/null; exit 2"])
            .select(&["1 a".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::CollaboratorFailure {
                collaborator: Collaborator::Selector,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_selector_is_not_configured() {
        let err = selector("siteman-test-no-such-selector", &[])
            .select(&["1 a".to_string()])
            .unwrap_err();
        assert!(matches!(err, ContentError::NotConfigured(_)));
    }
}
