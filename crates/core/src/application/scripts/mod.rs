// Scripts - extension-driven command construction and uniform execution results

pub mod command_builder;
pub mod executor;

pub use command_builder::{ScriptCommandBuilder, UnsupportedScript};
pub use executor::ScriptExecutor;
