// Orchestrator constants (transcript markers, observer cadence)
use std::time::Duration;

/// Foreground drain cadence for the event channel (200ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// First line of every script transcript, followed by the path
pub const RUN_START_PREFIX: &str = ">>> Running: ";

/// Prefix for the trimmed stderr block
pub const STDERR_PREFIX: &str = "[stderr] ";

/// Prefix for the single line emitted when a script never ran
pub const ERROR_PREFIX: &str = "[error] ";

/// Last line of a completed script transcript, followed by the exit code
pub const EXIT_CODE_PREFIX: &str = "<<< Exit code: ";

/// Emitted by run_all when there is nothing to run
pub const EMPTY_QUEUE_MESSAGE: &str = "Script queue is empty; add scripts first";
