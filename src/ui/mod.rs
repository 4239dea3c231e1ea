//! UI layer: operator console I/O and the command loop.

mod console;
pub mod shell;

pub(crate) use console::{StdinLineSource, StdoutDisplay};

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
