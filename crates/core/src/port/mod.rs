// Port Layer - Interfaces for external dependencies

pub mod command_runner;
pub mod ip_lookup;

// Re-exports
pub use command_runner::{CommandError, CommandOutput, CommandRunner};
pub use ip_lookup::{IpDetails, IpLookup, LookupError};
