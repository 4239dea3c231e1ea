//! Domain layer: console commands, endpoint state, and control flow.

pub mod command;
pub mod connection;
pub mod flow;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
