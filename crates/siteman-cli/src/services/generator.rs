// crates/siteman-cli/src/services/generator.rs - Static site generator service
//
// One configured generator program (hugo by default) serves two roles:
// - scaffolding:  `hugo new content content/posts/2024-06-01-title.md`
// - building:     `hugo --minify`
//
// Both run with the project root as the child's working directory.

use std::path::Path;
use std::process::Command;

use siteman_core::collaborators::{Builder, Generator};
use siteman_core::config::GeneratorConfig;
use siteman_core::{Collaborator, ContentResult};

use super::process;

const PATH_PLACEHOLDER: &str = "{path}";

/// Runs the configured site generator
pub struct GeneratorService {
    program: String,
    new_args: Vec<String>,
    build_args: Vec<String>,
}

impl GeneratorService {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            program: config.command.clone(),
            new_args: config.new_args.clone(),
            build_args: config.build_args.clone(),
        }
    }

    /// `new_args` with every `{path}` replaced by the target path
    fn scaffold_args(&self, relative_target: &Path) -> Vec<String> {
        let target = relative_target.to_string_lossy();
        self.new_args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, &target))
            .collect()
    }
}

impl Generator for GeneratorService {
    fn scaffold(&self, project_root: &Path, relative_target: &Path) -> ContentResult<()> {
        let mut command = Command::new(&self.program);
        command
            .args(self.scaffold_args(relative_target))
            .current_dir(project_root);
        process::run(Collaborator::Generator, &mut command)
    }
}

impl Builder for GeneratorService {
    fn build(&self, project_root: &Path) -> ContentResult<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.build_args).current_dir(project_root);
        process::run(Collaborator::Builder, &mut command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteman_core::ContentError;

    #[test]
    fn test_scaffold_args_substitute_path() {
        let service = GeneratorService::new(&GeneratorConfig::default());
        let args = service.scaffold_args(Path::new("content/posts/2024-06-01-my-title.md"));
        assert_eq!(
            args,
            vec!["new", "content", "content/posts/2024-06-01-my-title.md"]
        );
    }

    #[test]
    fn test_missing_generator_is_reported() {
        let config = GeneratorConfig {
            command: "siteman-test-no-such-generator".to_string(),
            ..GeneratorConfig::default()
        };
        let temp = tempfile::TempDir::new().unwrap();
        let err = GeneratorService::new(&config).build(temp.path()).unwrap_err();
        assert!(matches!(err, ContentError::NotConfigured(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_runs_in_project_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = GeneratorConfig {
            command: "sh".to_string(),
            new_args: vec!["{path}".to_string()],
            build_args: vec!["-c".to_string(), "touch built.txt".to_string()],
        };
        GeneratorService::new(&config).build(temp.path()).unwrap();
        assert!(temp.path().join("built.txt").exists());
    }
}
