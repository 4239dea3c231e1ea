use std::io;

use thiserror::Error;

use crate::domain::{
    command::{Command, Role},
    connection::{ConnectionState, EndpointAddress},
    flow::Flow,
};

/// Renders text to the operator. Shared with network tasks, so `&self`.
pub trait DisplaySink: Send + Sync {
    fn display(&self, message: &str);
}

/// Source of operator input lines. `Ok(None)` means input is exhausted.
pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("cannot establish {address}: {source}")]
    ConnectionSetup {
        address: EndpointAddress,
        #[source]
        source: io::Error,
    },
    #[error("not connected")]
    NotConnected,
}

/// Client side of the chat connection. Owns the socket and its address.
pub trait ChatClient {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn set_host(&mut self, host: &str);
    fn set_port(&mut self, port: u16);
    fn is_connected(&self) -> bool;
    /// Connects to the stored address, replacing any previous connection.
    fn open_connection(&mut self) -> Result<(), EndpointError>;
    fn close_connection(&mut self);
    fn send(&mut self, message: &str) -> Result<(), EndpointError>;
}

/// Server side of the chat connection. Owns the listener and client sockets.
pub trait ChatServer {
    fn port(&self) -> u16;
    fn set_port(&mut self, port: u16);
    fn is_listening(&self) -> bool;
    /// Starts accepting connections. Succeeds without effect when already listening.
    fn listen(&mut self) -> Result<(), EndpointError>;
    fn stop_listening(&mut self);
    fn close_all_connections(&mut self);
    fn send_to_all(&self, message: &str);
}

/// One console per endpoint role, driven by the shell loop.
pub trait ConsoleController {
    fn role(&self) -> Role;
    fn state(&self) -> ConnectionState;
    fn apply(&mut self, command: Command) -> Flow;
    /// Releases the endpoint when the console ends without `#quit`.
    fn shutdown(&mut self);
}
