// Platform family, resolved once at startup and injected where commands differ

use serde::{Deserialize, Serialize};

/// Which family of diagnostic commands and script runners the host speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformFamily {
    Windows,
    Posix,
}

impl PlatformFamily {
    /// Platform family of the running binary.
    pub fn current() -> Self {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else {
            PlatformFamily::Posix
        }
    }

    /// Argument vector that prints the routing table.
    pub fn route_table_command(&self) -> Vec<String> {
        let argv: &[&str] = match self {
            PlatformFamily::Windows => &["route", "print", "0.0.0.0"],
            PlatformFamily::Posix => &["ip", "route"],
        };
        argv.iter().map(|s| s.to_string()).collect()
    }

    /// Argument vector that prints the ARP/neighbor cache (same on both families).
    pub fn neighbor_table_command(&self) -> Vec<String> {
        vec!["arp".to_string(), "-a".to_string()]
    }

    /// Python interpreter used when none is configured.
    pub fn default_python(&self) -> &'static str {
        match self {
            PlatformFamily::Windows => "python",
            PlatformFamily::Posix => "python3",
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformFamily::Windows => write!(f, "WINDOWS"),
            PlatformFamily::Posix => write!(f, "POSIX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_command_per_family() {
        assert_eq!(
            PlatformFamily::Windows.route_table_command(),
            vec!["route", "print", "0.0.0.0"]
        );
        assert_eq!(PlatformFamily::Posix.route_table_command(), vec!["ip", "route"]);
    }

    #[test]
    fn test_neighbor_table_command_is_shared() {
        assert_eq!(
            PlatformFamily::Windows.neighbor_table_command(),
            PlatformFamily::Posix.neighbor_table_command()
        );
    }

    #[test]
    fn test_current_matches_target() {
        let expected = if cfg!(windows) {
            PlatformFamily::Windows
        } else {
            PlatformFamily::Posix
        };
        assert_eq!(PlatformFamily::current(), expected);
    }
}
