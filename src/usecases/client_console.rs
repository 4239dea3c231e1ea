use std::sync::Arc;

use crate::{
    domain::{
        command::{Command, Role},
        connection::{ConnectionState, LoginIdentity},
        flow::Flow,
    },
    usecases::{
        contracts::{ChatClient, ConsoleController, DisplaySink, EndpointError},
        interpreter::CommandError,
    },
};

pub const ALREADY_DISCONNECTED: &str = "Already disconnected";
pub const ALREADY_CONNECTED: &str = "Already connected";
pub const CONNECTION_CLOSED: &str = "Connection closed";
pub const HOST_LOCKED: &str = "Cannot change host while connected";
pub const PORT_LOCKED: &str = "Cannot change port while connected";
pub const NOT_SENT: &str = "Not connected; message not sent";

/// Console state machine for the client endpoint.
pub struct ClientConsole<C: ChatClient> {
    client: C,
    display: Arc<dyn DisplaySink>,
    identity: Option<LoginIdentity>,
}

impl<C: ChatClient> ClientConsole<C> {
    pub fn new(client: C, display: Arc<dyn DisplaySink>) -> Self {
        Self {
            client,
            display,
            identity: None,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn identity(&self) -> Option<&LoginIdentity> {
        self.identity.as_ref()
    }

    /// Opens a connection to the stored address and sends the login line.
    pub fn login(&mut self, identity: LoginIdentity) -> Result<(), EndpointError> {
        self.client.open_connection()?;
        self.client.send(&identity.login_line())?;

        tracing::info!(
            login = identity.as_str(),
            host = self.client.host(),
            port = self.client.port(),
            "logged in"
        );
        self.identity = Some(identity);
        Ok(())
    }

    fn show(&self, message: &str) {
        self.display.display(message);
    }

    fn logoff(&mut self) {
        if !self.client.is_connected() {
            self.show(ALREADY_DISCONNECTED);
            return;
        }

        self.client.close_connection();
        self.show(CONNECTION_CLOSED);
    }

    fn set_host(&mut self, host: &str) {
        if self.client.is_connected() {
            self.show(HOST_LOCKED);
            return;
        }

        self.client.set_host(host);
        self.show(&format!("Host set to {}", self.client.host()));
    }

    fn set_port(&mut self, port: u16) {
        if self.client.is_connected() {
            self.show(PORT_LOCKED);
            return;
        }

        self.client.set_port(port);
        self.show(&format!("Port set to {}", self.client.port()));
    }

    fn relogin(&mut self, id: String) {
        if self.client.is_connected() {
            self.show(ALREADY_CONNECTED);
            return;
        }

        let Some(identity) = LoginIdentity::new(id) else {
            self.show(&CommandError::ArgumentMissing { command: "#login" }.to_string());
            return;
        };

        if let Err(error) = self.login(identity) {
            tracing::warn!(error = %error, "login failed");
            self.show(&format!("Cannot open connection: {error}"));
        }
    }

    fn send(&mut self, message: &str) {
        // Attempted whatever the state; the endpoint refuses when disconnected.
        match self.client.send(message) {
            Ok(()) => {}
            Err(EndpointError::NotConnected) => self.show(NOT_SENT),
            Err(error) => self.show(&error.to_string()),
        }
    }
}

impl<C: ChatClient> ConsoleController for ClientConsole<C> {
    fn role(&self) -> Role {
        Role::Client
    }

    fn state(&self) -> ConnectionState {
        if self.client.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => {
                self.shutdown();
                return Flow::quit();
            }
            Command::Logoff => self.logoff(),
            Command::SetHost(host) => self.set_host(&host),
            Command::SetPort(port) => self.set_port(port),
            Command::Login(id) => self.relogin(id),
            Command::GetHost => self.show(self.client.host()),
            Command::GetPort => self.show(&self.client.port().to_string()),
            Command::PlainMessage(message) => self.send(&message),
            Command::Stop | Command::Start | Command::Unrecognized(_) => {
                tracing::debug!(word = command.word(), "ignoring command");
            }
        }

        Flow::Continue
    }

    fn shutdown(&mut self) {
        if self.client.is_connected() {
            self.client.close_connection();
        }
    }
}
