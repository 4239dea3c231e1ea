use std::sync::Arc;

use crate::{
    domain::{
        command::{Command, Role},
        connection::ConnectionState,
        flow::Flow,
    },
    usecases::contracts::{ChatServer, ConsoleController, DisplaySink},
};

pub const STOP_WARNING: &str = "WARNING! Server will stop listening for connections";
pub const STOPPED_LISTENING: &str = "Server has stopped listening for connections.";
pub const ALREADY_NOT_LISTENING: &str = "Server already not listening";
pub const PORT_LOCKED: &str = "Server is still listening. You must close the server first.";
pub const CONNECTIONS_CLOSED: &str = "All client connections closed";
pub const LISTEN_FAILED: &str = "ERROR - Could not listen for clients!";
pub const SERVER_MESSAGE_PREFIX: &str = "SERVER MSG> ";

pub fn listening_message(port: u16) -> String {
    format!("Server listening for connections on port {port}")
}

/// Console state machine for the server endpoint.
pub struct ServerConsole<S: ChatServer> {
    server: S,
    display: Arc<dyn DisplaySink>,
}

impl<S: ChatServer> ServerConsole<S> {
    pub fn new(server: S, display: Arc<dyn DisplaySink>) -> Self {
        Self { server, display }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn server(&self) -> &S {
        &self.server
    }

    fn show(&self, message: &str) {
        self.display.display(message);
    }

    fn stop(&mut self) {
        if !self.server.is_listening() {
            self.show(ALREADY_NOT_LISTENING);
            return;
        }

        self.server.send_to_all(STOP_WARNING);
        self.server.stop_listening();
        tracing::info!(port = self.server.port(), "stopped listening");
        self.show(STOPPED_LISTENING);
    }

    fn set_port(&mut self, port: u16) {
        if self.server.is_listening() {
            self.show(PORT_LOCKED);
            return;
        }

        self.server.set_port(port);
        self.show(&format!("Server port has been set to {port}"));
    }

    fn start(&mut self) {
        match self.server.listen() {
            Ok(()) => self.show(&listening_message(self.server.port())),
            Err(error) => {
                tracing::warn!(error = %error, "listen failed");
                self.show(LISTEN_FAILED);
            }
        }
    }

    fn broadcast(&self, message: &str) {
        let line = format!("{SERVER_MESSAGE_PREFIX}{message}");
        self.server.send_to_all(&line);
        self.show(&line);
    }
}

impl<S: ChatServer> ConsoleController for ServerConsole<S> {
    fn role(&self) -> Role {
        Role::Server
    }

    fn state(&self) -> ConnectionState {
        if self.server.is_listening() {
            ConnectionState::Listening
        } else {
            ConnectionState::Disconnected
        }
    }

    fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => {
                self.server.close_all_connections();
                return Flow::quit();
            }
            Command::Stop => self.stop(),
            Command::Logoff => {
                self.server.close_all_connections();
                self.show(CONNECTIONS_CLOSED);
            }
            Command::SetPort(port) => self.set_port(port),
            Command::Start => self.start(),
            Command::GetPort => self.show(&self.server.port().to_string()),
            Command::PlainMessage(message) => self.broadcast(&message),
            Command::SetHost(_)
            | Command::Login(_)
            | Command::GetHost
            | Command::Unrecognized(_) => {
                tracing::debug!(word = command.word(), "ignoring command");
            }
        }

        Flow::Continue
    }

    fn shutdown(&mut self) {
        self.server.close_all_connections();
        if self.server.is_listening() {
            self.server.stop_listening();
        }
    }
}
