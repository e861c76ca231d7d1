// Network Workbench Infrastructure - System Adapters
// Implements: CommandRunner (tokio::process), IpLookup (reqwest)

pub mod ip_api_lookup;
pub mod system_command_runner;

pub use ip_api_lookup::{IpApiLookup, DEFAULT_LOOKUP_URL};
pub use system_command_runner::SystemCommandRunner;
