//! Operator commands produced by the interpreter, one per input line.

/// Prefix that marks a console line as a command instead of a chat payload.
pub const COMMAND_SIGIL: char = '#';

/// Which endpoint a console drives. Each role accepts its own command words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// `#logoff` on the client, `#close` on the server.
    Logoff,
    SetHost(String),
    SetPort(u16),
    Login(String),
    GetHost,
    GetPort,
    Stop,
    Start,
    PlainMessage(String),
    /// Sigil-prefixed word the role does not know. Handled as a no-op.
    Unrecognized(String),
}

impl Command {
    /// The console word that produces this command, used in diagnostics.
    pub fn word(&self) -> &str {
        match self {
            Self::Quit => "#quit",
            Self::Logoff => "#logoff",
            Self::SetHost(_) => "#sethost",
            Self::SetPort(_) => "#setport",
            Self::Login(_) => "#login",
            Self::GetHost => "#gethost",
            Self::GetPort => "#getport",
            Self::Stop => "#stop",
            Self::Start => "#start",
            Self::PlainMessage(_) => "",
            Self::Unrecognized(word) => word,
        }
    }
}
