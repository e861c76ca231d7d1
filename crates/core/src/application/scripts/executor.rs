// Script executor: ScriptCommandBuilder + CommandRunner, all failures folded
// into ExecutionResult

use super::command_builder::ScriptCommandBuilder;
use crate::application::panic_guard::join_failure_message;
use crate::domain::ExecutionResult;
use crate::port::{CommandError, CommandRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ScriptExecutor {
    builder: ScriptCommandBuilder,
    runner: Arc<dyn CommandRunner>,
}

impl ScriptExecutor {
    pub fn new(builder: ScriptCommandBuilder, runner: Arc<dyn CommandRunner>) -> Self {
        Self { builder, runner }
    }

    /// Run the script at `path`. Never fails and never panics outward.
    pub async fn execute(&self, path: &Path) -> ExecutionResult {
        let argv = match self.builder.build(path) {
            Ok(argv) => argv,
            Err(unsupported) => {
                warn!(path = %path.display(), reason = %unsupported, "Script rejected");
                return ExecutionResult::failed(unsupported.to_string());
            }
        };

        info!(path = %path.display(), command = ?argv, "Running script");

        // Runner panics stay inside the spawned task
        let runner = Arc::clone(&self.runner);
        let handle = tokio::task::spawn(async move { runner.run(&argv).await });

        let result = match handle.await {
            Ok(Ok(output)) => match output.exit_code {
                Some(code) => ExecutionResult::completed(code, output.stdout, output.stderr),
                None => ExecutionResult {
                    exit_code: None,
                    stdout: output.stdout,
                    stderr: output.stderr,
                    error: Some("Script terminated without an exit code".to_string()),
                },
            },
            Ok(Err(e)) => ExecutionResult::failed(describe_command_error(&e)),
            Err(join_err) => ExecutionResult::failed(format!(
                "Failed running script: {}",
                join_failure_message(join_err)
            )),
        };

        info!(
            path = %path.display(),
            exit_code = ?result.exit_code,
            error = ?result.error,
            "Script finished"
        );

        result
    }
}

fn describe_command_error(error: &CommandError) -> String {
    match error {
        CommandError::LaunchFailed { program, reason } => {
            format!("Missing runtime for script: {} ({})", program, reason)
        }
        other => format!("Failed running script: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlatformFamily;
    use crate::port::command_runner::mocks::ScriptedCommandRunner;
    use crate::port::command_runner::MockCommandRunner;
    use crate::port::CommandOutput;

    fn executor_with(runner: Arc<dyn CommandRunner>) -> ScriptExecutor {
        ScriptExecutor::new(
            ScriptCommandBuilder::new(PlatformFamily::Posix, "python3"),
            runner,
        )
    }

    #[tokio::test]
    async fn test_completed_script_keeps_streams() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|argv: &[String]| argv.len() == 2 && argv[0] == "bash" && argv[1] == "deploy.sh")
            .times(1)
            .returning(|_| Ok(CommandOutput::new(0, "done\n", "")));

        let result = executor_with(Arc::new(mock))
            .execute(Path::new("deploy.sh"))
            .await;

        assert!(result.is_success());
        assert_eq!(result.stdout, "done\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let runner = ScriptedCommandRunner::new()
            .with_output("python3", CommandOutput::new(2, "", "Traceback ..."));

        let result = executor_with(Arc::new(runner)).execute(Path::new("job.py")).await;

        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.error, None);
        assert_eq!(result.stderr, "Traceback ...");
    }

    #[tokio::test]
    async fn test_unsupported_extension_never_runs() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().times(0);

        let result = executor_with(Arc::new(mock)).execute(Path::new("readme.md")).await;

        assert_eq!(result.exit_code, None);
        assert_eq!(result.error.as_deref(), Some("Unsupported extension: .md"));
    }

    #[tokio::test]
    async fn test_batch_on_posix_is_error() {
        let runner = ScriptedCommandRunner::new();

        let result = executor_with(Arc::new(runner.clone()))
            .execute(Path::new("setup.bat"))
            .await;

        assert!(result.error.unwrap().contains("Windows"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_launch_error() {
        // "bash" not registered: the mock reports it as missing
        let result = executor_with(Arc::new(ScriptedCommandRunner::new()))
            .execute(Path::new("job.sh"))
            .await;

        assert_eq!(result.exit_code, None);
        assert!(result.error.unwrap().starts_with("Missing runtime for script: bash"));
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let runner = ScriptedCommandRunner::new().with_error("bash", CommandError::Timeout(1500));

        let result = executor_with(Arc::new(runner)).execute(Path::new("slow.sh")).await;

        assert_eq!(
            result.error.as_deref(),
            Some("Failed running script: Command timed out after 1500ms")
        );
    }

    #[tokio::test]
    async fn test_signal_termination_is_error() {
        let runner = ScriptedCommandRunner::new().with_output(
            "bash",
            CommandOutput {
                exit_code: None,
                stdout: "partial".to_string(),
                stderr: String::new(),
            },
        );

        let result = executor_with(Arc::new(runner)).execute(Path::new("killed.sh")).await;

        assert!(result.is_error());
        assert_eq!(result.stdout, "partial");
    }

    #[tokio::test]
    async fn test_runner_panic_is_contained() {
        let runner = ScriptedCommandRunner::new().with_panic("bash", "runner exploded");

        let result = executor_with(Arc::new(runner)).execute(Path::new("boom.sh")).await;

        assert_eq!(result.exit_code, None);
        assert!(result.error.unwrap().contains("runner exploded"));
    }
}
