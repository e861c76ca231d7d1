// Runtime configuration shared by the composition root and the services

use crate::application::orchestrator::constants::DEFAULT_POLL_INTERVAL;
use crate::domain::PlatformFamily;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Program used to run `.py` scripts
    pub python_interpreter: String,
    /// Upper bound for any external command; None waits forever
    pub command_timeout: Option<Duration>,
    /// How often the foreground observer drains the event channel
    pub poll_interval: Duration,
}

impl WorkbenchConfig {
    pub fn for_platform(platform: PlatformFamily) -> Self {
        Self {
            python_interpreter: platform.default_python().to_string(),
            command_timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self::for_platform(PlatformFamily::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_wait_forever() {
        let config = WorkbenchConfig::for_platform(PlatformFamily::Posix);

        assert_eq!(config.python_interpreter, "python3");
        assert_eq!(config.command_timeout, None);
        assert_eq!(config.poll_interval, Duration::from_millis(200));
    }

    #[test]
    fn test_windows_python() {
        let config = WorkbenchConfig::for_platform(PlatformFamily::Windows);
        assert_eq!(config.python_interpreter, "python");
    }
}
