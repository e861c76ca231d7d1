// Domain Layer - Pure data and invariants

pub mod device;
pub mod error;
pub mod execution;
pub mod platform;
pub mod queue;

// Re-exports
pub use device::{DeviceRecord, ScanReport, DEFAULT_GATEWAY_NOTE, UNKNOWN_HARDWARE_ADDRESS};
pub use error::DomainError;
pub use execution::ExecutionResult;
pub use platform::PlatformFamily;
pub use queue::ScriptQueue;
