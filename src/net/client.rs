use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::{tcp::OwnedReadHalf, TcpStream},
    runtime::Handle,
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    domain::connection::EndpointAddress,
    usecases::contracts::{ChatClient, DisplaySink, EndpointError},
};

use super::lines::{drain_writers, spawn_writer};

pub const SERVER_CLOSED: &str = "The server has closed the connection.";

struct Connection {
    outbound: UnboundedSender<String>,
    open: Arc<AtomicBool>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Connection {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

/// Chat client over one TCP connection. Received lines go straight to the
/// display sink from a runtime task.
pub struct TcpChatClient {
    handle: Handle,
    address: EndpointAddress,
    display: Arc<dyn DisplaySink>,
    connection: Option<Connection>,
}

impl TcpChatClient {
    pub fn new(handle: Handle, address: EndpointAddress, display: Arc<dyn DisplaySink>) -> Self {
        Self {
            handle,
            address,
            display,
            connection: None,
        }
    }
}

impl ChatClient for TcpChatClient {
    fn host(&self) -> &str {
        &self.address.host
    }

    fn port(&self) -> u16 {
        self.address.port
    }

    fn set_host(&mut self, host: &str) {
        self.address.host = host.to_owned();
    }

    fn set_port(&mut self, port: u16) {
        self.address.port = port;
    }

    fn is_connected(&self) -> bool {
        self.connection.as_ref().is_some_and(Connection::is_open)
    }

    fn open_connection(&mut self) -> Result<(), EndpointError> {
        self.close_connection();

        let address = self.address.clone();
        let stream = self
            .handle
            .block_on(TcpStream::connect((address.host.as_str(), address.port)))
            .map_err(|source| EndpointError::ConnectionSetup {
                address: address.clone(),
                source,
            })?;

        let (read_half, write_half) = stream.into_split();
        let (outbound, queued) = mpsc::unbounded_channel();
        let open = Arc::new(AtomicBool::new(true));

        let writer = spawn_writer(&self.handle, write_half, queued);
        let reader = self.handle.spawn(read_from_server(
            read_half,
            Arc::clone(&self.display),
            Arc::clone(&open),
        ));

        self.connection = Some(Connection {
            outbound,
            open,
            reader,
            writer,
        });
        tracing::info!(%address, "connection opened");
        Ok(())
    }

    fn close_connection(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        let Connection {
            outbound,
            open,
            reader,
            writer,
        } = connection;
        open.store(false, Ordering::Release);
        reader.abort();

        // Queued lines reach the server before the socket is shut down.
        drop(outbound);
        drain_writers(&self.handle, vec![writer]);
        tracing::info!(address = %self.address, "connection closed");
    }

    fn send(&mut self, message: &str) -> Result<(), EndpointError> {
        let connection = self
            .connection
            .as_ref()
            .filter(|connection| connection.is_open())
            .ok_or(EndpointError::NotConnected)?;

        connection
            .outbound
            .send(message.to_owned())
            .map_err(|_| EndpointError::NotConnected)
    }
}

impl Drop for TcpChatClient {
    fn drop(&mut self) {
        self.close_connection();
    }
}

async fn read_from_server(
    read_half: OwnedReadHalf,
    display: Arc<dyn DisplaySink>,
    open: Arc<AtomicBool>,
) {
    let mut lines = BufReader::new(read_half).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => display.display(&line),
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(error = %error, "reading from server failed");
                break;
            }
        }
    }

    display.display(SERVER_CLOSED);
    open.store(false, Ordering::Release);
}
