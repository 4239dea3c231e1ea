use std::io::{self, BufRead, Write};

use crate::usecases::contracts::{DisplaySink, LineSource};

pub struct StdinLineSource {
    stdin: io::Stdin,
}

impl StdinLineSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl LineSource for StdinLineSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(trim_line_ending(line)))
    }
}

fn trim_line_ending(mut line: String) -> String {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
    line
}

/// Writes each message as one stdout line. Safe to call from network tasks.
#[derive(Debug, Default)]
pub struct StdoutDisplay;

impl DisplaySink for StdoutDisplay {
    fn display(&self, message: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(error) = writeln!(stdout, "{message}").and_then(|()| stdout.flush()) {
            tracing::warn!(error = %error, "failed to write to console");
        }
    }
}
