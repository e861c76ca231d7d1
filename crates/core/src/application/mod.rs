// Application Layer - Use Cases

pub mod config;
pub mod discovery;
pub mod orchestrator;
pub mod panic_guard;
pub mod scripts;

// Re-exports
pub use config::WorkbenchConfig;
pub use discovery::{GatewayResolver, NeighborTableReader};
pub use orchestrator::{event_channel, EventReceiver, EventSender, Orchestrator, WorkbenchEvent};
pub use scripts::{ScriptCommandBuilder, ScriptExecutor, UnsupportedScript};
