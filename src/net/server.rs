use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::{tcp::OwnedReadHalf, TcpListener, TcpStream},
    runtime::Handle,
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    domain::connection::EndpointAddress,
    usecases::contracts::{ChatServer, DisplaySink, EndpointError},
};

use super::lines::{drain_writers, spawn_writer};

const LISTEN_HOST: &str = "0.0.0.0";
const LOGIN_PREFIX: &str = "#login ";
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub const MUST_LOG_IN: &str = "ERROR - You must log in first.";
pub const ALREADY_LOGGED_IN: &str = "ERROR - Already logged in.";

struct ConnectedClient {
    outbound: UnboundedSender<String>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

#[derive(Default)]
struct ClientRegistry {
    next_id: u64,
    clients: HashMap<u64, ConnectedClient>,
}

type SharedRegistry = Arc<Mutex<ClientRegistry>>;

fn lock(registry: &Mutex<ClientRegistry>) -> MutexGuard<'_, ClientRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

fn broadcast(registry: &Mutex<ClientRegistry>, line: &str) {
    for client in lock(registry).clients.values() {
        let _ = client.outbound.send(line.to_owned());
    }
}

/// Echo-style chat server: every client line is relayed to all clients,
/// prefixed with the sender's login id.
pub struct TcpChatServer {
    handle: Handle,
    port: u16,
    display: Arc<dyn DisplaySink>,
    registry: SharedRegistry,
    acceptor: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl TcpChatServer {
    pub fn new(handle: Handle, port: u16, display: Arc<dyn DisplaySink>) -> Self {
        Self {
            handle,
            port,
            display,
            registry: SharedRegistry::default(),
            acceptor: None,
            local_addr: None,
        }
    }

    /// Port actually bound by the last successful `listen`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn local_port(&self) -> Option<u16> {
        self.local_addr.map(|addr| addr.port())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn client_count(&self) -> usize {
        lock(&self.registry).clients.len()
    }
}

impl ChatServer for TcpChatServer {
    fn port(&self) -> u16 {
        self.port
    }

    fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    fn is_listening(&self) -> bool {
        self.acceptor
            .as_ref()
            .is_some_and(|acceptor| !acceptor.is_finished())
    }

    fn listen(&mut self) -> Result<(), EndpointError> {
        if self.is_listening() {
            return Ok(());
        }

        let listener = self
            .handle
            .block_on(TcpListener::bind((LISTEN_HOST, self.port)))
            .map_err(|source| EndpointError::ConnectionSetup {
                address: EndpointAddress::new(LISTEN_HOST, self.port),
                source,
            })?;
        self.local_addr = listener.local_addr().ok();

        self.acceptor = Some(self.handle.spawn(accept_clients(
            listener,
            Arc::clone(&self.registry),
            Arc::clone(&self.display),
        )));
        tracing::info!(port = self.port, local_addr = ?self.local_addr, "listening");
        Ok(())
    }

    fn stop_listening(&mut self) {
        let Some(acceptor) = self.acceptor.take() else {
            return;
        };

        acceptor.abort();
        // Wait for the listener to be dropped so the port can be bound again.
        let _ = self.handle.block_on(acceptor);
        tracing::info!(port = self.port, "stopped listening");
    }

    fn close_all_connections(&mut self) {
        let clients: Vec<ConnectedClient> =
            lock(&self.registry).clients.drain().map(|(_, client)| client).collect();

        let closed = clients.len();
        let writers = clients
            .into_iter()
            .map(|client| {
                client.reader.abort();
                client.writer
            })
            .collect();

        // Senders are gone once readers stop; pending broadcasts still go out.
        drain_writers(&self.handle, writers);
        tracing::info!(closed, "closed client connections");
    }

    fn send_to_all(&self, message: &str) {
        broadcast(&self.registry, message);
    }
}

impl Drop for TcpChatServer {
    fn drop(&mut self) {
        self.close_all_connections();
        if let Some(acceptor) = self.acceptor.take() {
            acceptor.abort();
        }
    }
}

async fn accept_clients(
    listener: TcpListener,
    registry: SharedRegistry,
    display: Arc<dyn DisplaySink>,
) {
    let handle = Handle::current();

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                register(&handle, stream, peer, &registry, &display);
                display.display(&format!("Client connected from {peer}"));
            }
            Err(error) => {
                tracing::warn!(error = %error, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

fn register(
    handle: &Handle,
    stream: TcpStream,
    peer: SocketAddr,
    registry: &SharedRegistry,
    display: &Arc<dyn DisplaySink>,
) {
    let (read_half, write_half) = stream.into_split();
    let (outbound, queued) = mpsc::unbounded_channel();
    let writer = spawn_writer(handle, write_half, queued);

    // Held across the spawn so the session cannot deregister before it is inserted.
    let mut guard = lock(registry);
    let id = guard.next_id;
    guard.next_id += 1;

    let session = ClientSession {
        id,
        peer,
        login: None,
        outbound: outbound.clone(),
        registry: Arc::clone(registry),
        display: Arc::clone(display),
    };
    let reader = handle.spawn(session.serve(read_half));

    guard
        .clients
        .insert(
            id,
            ConnectedClient {
                outbound,
                reader,
                writer,
            },
        );
    tracing::info!(%peer, id, "client connected");
}

struct ClientSession {
    id: u64,
    peer: SocketAddr,
    login: Option<String>,
    outbound: UnboundedSender<String>,
    registry: SharedRegistry,
    display: Arc<dyn DisplaySink>,
}

impl ClientSession {
    async fn serve(mut self, read_half: OwnedReadHalf) {
        let mut lines = BufReader::new(read_half).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    tracing::warn!(peer = %self.peer, error = %error, "reading from client failed");
                    break;
                }
            }
        }

        lock(&self.registry).clients.remove(&self.id);
        let name = self.login.unwrap_or_else(|| self.peer.to_string());
        self.display.display(&format!("{name} has disconnected."));
    }

    /// Returns `false` when the connection must be dropped.
    fn handle_line(&mut self, line: &str) -> bool {
        let login = line
            .strip_prefix(LOGIN_PREFIX)
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(id) = &self.login {
            if login.is_some() {
                let _ = self.outbound.send(ALREADY_LOGGED_IN.to_owned());
                return true;
            }

            self.display
                .display(&format!("Message received: {line} from {id}"));
            broadcast(&self.registry, &format!("{id}> {line}"));
            return true;
        }

        let Some(id) = login else {
            let _ = self.outbound.send(MUST_LOG_IN.to_owned());
            return false;
        };

        self.display.display(&format!("{id} has logged on."));
        self.login = Some(id.to_owned());
        true
    }
}
