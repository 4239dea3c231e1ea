use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5555;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    /// Server only: accepting new connections.
    Listening,
}

impl ConnectionState {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Disconnected => "DISCONNECTED",
            Self::Connected => "CONNECTED",
            Self::Listening => "LISTENING",
        }
    }
}

/// Host and port an endpoint connects to or listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAddress {
    pub host: String,
    pub port: u16,
}

impl EndpointAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for EndpointAddress {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Login token forwarded to the server as the first line of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentity(String);

impl LoginIdentity {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return None;
        }

        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn login_line(&self) -> String {
        format!("#login {}", self.0)
    }
}
