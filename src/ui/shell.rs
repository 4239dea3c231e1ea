use crate::{
    domain::flow::{Flow, EXIT_OK},
    usecases::{
        contracts::{ConsoleController, DisplaySink, LineSource},
        interpreter::interpret,
    },
};

pub const CONSOLE_READ_FAILED: &str = "Unexpected error while reading from console!";

/// Runs the console loop: one line is read, interpreted, and fully applied
/// before the next one. Returns the process exit code.
pub fn run(
    source: &mut dyn LineSource,
    controller: &mut dyn ConsoleController,
    display: &dyn DisplaySink,
) -> u8 {
    tracing::info!(role = controller.role().as_label(), "console ready");

    loop {
        let line = match source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("console input closed");
                controller.shutdown();
                return EXIT_OK;
            }
            Err(error) => {
                tracing::error!(error = %error, "console read failed");
                display.display(CONSOLE_READ_FAILED);
                controller.shutdown();
                return EXIT_OK;
            }
        };

        let command = match interpret(controller.role(), &line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                display.display(&error.to_string());
                continue;
            }
        };

        let word = command.word().to_owned();
        if let Flow::Shutdown { exit_code } = controller.apply(command) {
            return exit_code;
        }
        tracing::debug!(
            word = %word,
            state = controller.state().as_label(),
            "command applied"
        );
    }
}
