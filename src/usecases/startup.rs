//! One-time setup before the console loop starts.
//!
//! The client must log in before anything else: either the login came from
//! the command line, or the first console line has to be `#login <id>`.
//! Failing to reach the server or to bind the listener ends the process.

use thiserror::Error;

use crate::{
    domain::{
        command::{Command, Role},
        connection::LoginIdentity,
        flow::{Flow, EXIT_OK, EXIT_SETUP_FAILED},
    },
    usecases::{
        client_console::ClientConsole,
        contracts::{ChatClient, ChatServer, DisplaySink, EndpointError, LineSource},
        interpreter::interpret,
        server_console::listening_message,
    },
};

pub const CONNECTION_OPEN: &str = "Connection open. Awaiting command";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("ERROR - No login ID specified.  Connection aborted.")]
    MissingLogin,
    #[error("Error: Can't setup connection! Terminating client.")]
    ConnectionSetup(#[source] EndpointError),
    #[error("ERROR - Could not listen for clients!")]
    Listen(#[source] EndpointError),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            // Matches the long-standing console behaviour: a missing login is
            // an operator mistake, not a failed setup.
            Self::MissingLogin => EXIT_OK,
            Self::ConnectionSetup(_) | Self::Listen(_) => EXIT_SETUP_FAILED,
        }
    }
}

/// Logs the client in. `Flow::Continue` means the console loop may start.
pub fn start_client<C: ChatClient>(
    console: &mut ClientConsole<C>,
    source: &mut dyn LineSource,
    display: &dyn DisplaySink,
    login_arg: Option<&str>,
) -> Flow {
    let result = resolve_login(source, login_arg).and_then(|identity| {
        console
            .login(identity)
            .map_err(StartupError::ConnectionSetup)
    });

    match result {
        Ok(()) => {
            display.display(CONNECTION_OPEN);
            Flow::Continue
        }
        Err(error) => abort(error, display),
    }
}

/// Binds the listener. `Flow::Continue` means the console loop may start.
pub fn start_server(server: &mut dyn ChatServer, display: &dyn DisplaySink) -> Flow {
    match server.listen() {
        Ok(()) => {
            display.display(&listening_message(server.port()));
            Flow::Continue
        }
        Err(error) => abort(StartupError::Listen(error), display),
    }
}

fn resolve_login(
    source: &mut dyn LineSource,
    login_arg: Option<&str>,
) -> Result<LoginIdentity, StartupError> {
    if let Some(id) = login_arg {
        return LoginIdentity::new(id).ok_or(StartupError::MissingLogin);
    }

    let line = match source.next_line() {
        Ok(Some(line)) => line,
        Ok(None) => return Err(StartupError::MissingLogin),
        Err(error) => {
            tracing::warn!(error = %error, "console read failed before login");
            return Err(StartupError::MissingLogin);
        }
    };

    match interpret(Role::Client, &line) {
        Ok(Some(Command::Login(id))) => LoginIdentity::new(id).ok_or(StartupError::MissingLogin),
        _ => Err(StartupError::MissingLogin),
    }
}

fn abort(error: StartupError, display: &dyn DisplaySink) -> Flow {
    tracing::error!(error = ?error, "startup aborted");
    display.display(&error.to_string());

    Flow::Shutdown {
        exit_code: error.exit_code(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::connection::ConnectionState,
        infra::stubs::{RecordingDisplay, ScriptedLines, StubChatClient, StubChatServer},
        usecases::contracts::ConsoleController,
    };

    fn client_console(client: StubChatClient) -> (ClientConsole<StubChatClient>, Arc<RecordingDisplay>) {
        let display = Arc::new(RecordingDisplay::default());
        (ClientConsole::new(client, display.clone()), display)
    }

    #[test]
    fn first_line_login_connects_and_sends_login_line() {
        let (mut console, display) = client_console(StubChatClient::default());
        let mut source = ScriptedLines::from(&["#login alice"]);

        let flow = start_client(&mut console, &mut source, display.as_ref(), None);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(console.state(), ConnectionState::Connected);
        assert_eq!(console.client().sent, vec!["#login alice"]);
        assert_eq!(display.lines(), vec![CONNECTION_OPEN]);
    }

    #[test]
    fn login_argument_skips_the_first_console_line() {
        let (mut console, display) = client_console(StubChatClient::default());
        let mut source = ScriptedLines::from(&["hello"]);

        let flow = start_client(&mut console, &mut source, display.as_ref(), Some("bob"));

        assert_eq!(flow, Flow::Continue);
        assert_eq!(console.client().sent, vec!["#login bob"]);
        assert_eq!(source.next_line().expect("scripted line"), Some("hello".to_owned()));
    }

    #[test]
    fn first_line_without_login_aborts_with_exit_zero() {
        let (mut console, display) = client_console(StubChatClient::default());
        let mut source = ScriptedLines::from(&["notacommand"]);

        let flow = start_client(&mut console, &mut source, display.as_ref(), None);

        assert_eq!(flow, Flow::Shutdown { exit_code: EXIT_OK });
        assert_eq!(console.client().opened, 0);
        assert_eq!(
            display.lines(),
            vec!["ERROR - No login ID specified.  Connection aborted."]
        );
    }

    #[test]
    fn login_without_id_or_empty_input_aborts() {
        for lines in [&["#login"][..], &[][..]] {
            let (mut console, display) = client_console(StubChatClient::default());
            let mut source = ScriptedLines::from(lines);

            let flow = start_client(&mut console, &mut source, display.as_ref(), None);

            assert_eq!(flow, Flow::Shutdown { exit_code: EXIT_OK });
        }
    }

    #[test]
    fn unreachable_server_aborts_with_exit_one() {
        let (mut console, display) = client_console(StubChatClient::refusing());
        let mut source = ScriptedLines::from(&["#login alice"]);

        let flow = start_client(&mut console, &mut source, display.as_ref(), None);

        assert_eq!(
            flow,
            Flow::Shutdown {
                exit_code: EXIT_SETUP_FAILED
            }
        );
        assert_eq!(
            display.lines(),
            vec!["Error: Can't setup connection! Terminating client."]
        );
    }

    #[test]
    fn server_start_listens_on_configured_port() {
        let mut server = StubChatServer {
            port: 6000,
            ..StubChatServer::default()
        };
        let display = RecordingDisplay::default();

        let flow = start_server(&mut server, &display);

        assert_eq!(flow, Flow::Continue);
        assert!(server.listening);
        assert_eq!(
            display.lines(),
            vec!["Server listening for connections on port 6000"]
        );
    }

    #[test]
    fn server_listen_failure_aborts_with_exit_one() {
        let mut server = StubChatServer {
            refuse_listen: true,
            ..StubChatServer::default()
        };
        let display = RecordingDisplay::default();

        let flow = start_server(&mut server, &display);

        assert_eq!(
            flow,
            Flow::Shutdown {
                exit_code: EXIT_SETUP_FAILED
            }
        );
        assert_eq!(display.lines(), vec!["ERROR - Could not listen for clients!"]);
    }
}
