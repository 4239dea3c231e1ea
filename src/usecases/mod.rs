//! Use case layer: command interpretation and the console state machines.

pub mod bootstrap;
pub mod client_console;
pub mod context;
pub mod contracts;
pub mod interpreter;
pub mod server_console;
pub mod startup;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
