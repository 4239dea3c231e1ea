//! Network layer: line-framed TCP chat endpoints running on tokio.

mod client;
mod lines;
mod server;

pub use client::TcpChatClient;
pub use server::TcpChatServer;

/// Returns the net module name for smoke checks.
pub fn module_name() -> &'static str {
    "net"
}
