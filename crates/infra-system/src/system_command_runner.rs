// System command runner
// reason: tokio::process so a blocked child only parks its own worker task
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use workbench_core::port::{CommandError, CommandOutput, CommandRunner};

/// Runs commands as real child processes
///
/// Without a timeout the call waits for the child however long it takes.
/// With one, the child is killed when it expires.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    timeout: Option<Duration>,
}

impl SystemCommandRunner {
    /// Create a new runner
    ///
    /// # Example
    /// ```ignore
    /// let runner = SystemCommandRunner::new(Some(Duration::from_secs(30)));
    /// ```
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<std::process::Output, CommandError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::LaunchFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(CommandError::Io(e.to_string())),
                Err(_) => {
                    warn!(program = %program, timeout_ms = limit.as_millis() as u64, "Command timed out, killing child");
                    Err(CommandError::Timeout(limit.as_millis() as u64))
                }
            },
            None => child
                .wait_with_output()
                .await
                .map_err(|e| CommandError::Io(e.to_string())),
        }
    }

    /// Build command output from process output (text, lossy UTF-8)
    fn build_output(output: std::process::Output) -> CommandOutput {
        CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, CommandError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| CommandError::InvalidCommand("empty argument vector".to_string()))?;

        debug!(program = %program, args = ?args, timeout = ?self.timeout, "Starting command");

        let output = self.spawn_and_wait(program, args).await?;
        let output = Self::build_output(output);

        info!(
            program = %program,
            exit_code = ?output.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Command completed"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_argv_is_invalid() {
        let runner = SystemCommandRunner::default();

        let err = runner.run(&[]).await.unwrap_err();

        assert!(matches!(err, CommandError::InvalidCommand(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_failure() {
        let runner = SystemCommandRunner::default();

        let err = runner
            .run(&argv(&["workbench-definitely-not-installed-xyz"]))
            .await
            .unwrap_err();

        assert!(err.is_launch_failure());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let runner = SystemCommandRunner::default();

        let output = runner
            .run(&argv(&["sh", "-c", "echo hello; echo oops >&2"]))
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let runner = SystemCommandRunner::default();

        let output = runner.run(&argv(&["sh", "-c", "exit 3"])).await.unwrap();

        assert_eq!(output.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let runner = SystemCommandRunner::new(Some(Duration::from_millis(100)));

        let err = runner.run(&argv(&["sleep", "10"])).await.unwrap_err();

        assert_eq!(err, CommandError::Timeout(100));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_has_no_exit_code() {
        let runner = SystemCommandRunner::default();

        let output = runner.run(&argv(&["sh", "-c", "kill -9 $$"])).await.unwrap();

        assert_eq!(output.exit_code, None);
    }
}
