/// Exit code for a normal `#quit` or end of console input.
pub const EXIT_OK: u8 = 0;
/// Exit code when the initial connection or listen cannot be established.
pub const EXIT_SETUP_FAILED: u8 = 1;

/// What the console loop does after a command has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Shutdown { exit_code: u8 },
}

impl Flow {
    pub fn quit() -> Self {
        Self::Shutdown { exit_code: EXIT_OK }
    }
}
