// Script Execution Result

use serde::{Deserialize, Serialize};

/// Outcome of running one script.
///
/// `error` set means the process never produced exit semantics (unsupported
/// extension, platform mismatch, missing interpreter). `exit_code` set means
/// the process ran to completion, whatever the code. Constructors guarantee
/// at least one of the two is present; `error` wins when interpreting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub error: Option<String>,
}

impl ExecutionResult {
    /// The process ran and exited with `exit_code`
    pub fn completed(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: None,
        }
    }

    /// The process never ran (or never produced an exit code)
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Ran to completion with exit code 0
    pub fn is_success(&self) -> bool {
        !self.is_error() && self.exit_code == Some(0)
    }
}
