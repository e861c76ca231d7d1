// Command Runner Port
// Abstraction over running an external command to completion

use async_trait::async_trait;
use thiserror::Error;

/// Captured result of a process that ran to termination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// None when the process was terminated without an exit status (signal)
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// stdout and stderr joined by a newline.
    ///
    /// Diagnostic tools print the interesting part on either stream depending
    /// on the platform, so parsers scan both.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Failures where no exit status exists.
///
/// A nonzero exit code is NOT an error: it is returned as `CommandOutput`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Program could not be found or started
    #[error("Failed to launch '{program}': {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("Command timed out after {0}ms")]
    Timeout(u64),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl CommandError {
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, CommandError::LaunchFailed { .. })
    }
}

/// Command Runner trait
///
/// Implementations:
/// - SystemCommandRunner (infra-system): spawns a real child process
/// - mocks::ScriptedCommandRunner: canned outputs for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `argv[0]` with `argv[1..]` and wait for it to exit
    ///
    /// # Errors
    /// - CommandError::InvalidCommand if `argv` is empty
    /// - CommandError::LaunchFailed if the program cannot be started
    /// - CommandError::Timeout if a configured timeout elapses
    async fn run(&self, argv: &[String]) -> Result<CommandOutput, CommandError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock runner behavior for one program
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        Output(CommandOutput),
        Error(CommandError),
        Panic(String),
    }

    /// Mock Command Runner keyed by program name (`argv[0]`)
    ///
    /// Programs without a registered response fail to launch, like a
    /// binary missing from PATH.
    #[derive(Clone, Default)]
    pub struct ScriptedCommandRunner {
        responses: Arc<Mutex<HashMap<String, MockResponse>>>,
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        delay: Option<Duration>,
    }

    impl ScriptedCommandRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_output(self, program: &str, output: CommandOutput) -> Self {
            self.respond(program, MockResponse::Output(output))
        }

        pub fn with_stdout(self, program: &str, stdout: &str) -> Self {
            self.with_output(program, CommandOutput::new(0, stdout, ""))
        }

        pub fn with_error(self, program: &str, error: CommandError) -> Self {
            self.respond(program, MockResponse::Error(error))
        }

        pub fn with_panic(self, program: &str, message: &str) -> Self {
            self.respond(program, MockResponse::Panic(message.to_string()))
        }

        /// Sleep this long before answering each call
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn respond(self, program: &str, response: MockResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(program.to_string(), response);
            self
        }

        /// Every argv received so far, in call order
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedCommandRunner {
        async fn run(&self, argv: &[String]) -> Result<CommandOutput, CommandError> {
            let program = argv
                .first()
                .ok_or_else(|| CommandError::InvalidCommand("empty argument vector".to_string()))?
                .clone();
            self.calls.lock().unwrap().push(argv.to_vec());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let response = self.responses.lock().unwrap().get(&program).cloned();
            match response {
                Some(MockResponse::Output(output)) => Ok(output),
                Some(MockResponse::Error(error)) => Err(error),
                Some(MockResponse::Panic(message)) => panic!("{}", message),
                None => Err(CommandError::LaunchFailed {
                    program,
                    reason: "No such file or directory (os error 2)".to_string(),
                }),
            }
        }
    }
}
