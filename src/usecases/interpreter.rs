//! Turns one line of operator input into a [`Command`].
//!
//! A line whose first token starts with [`COMMAND_SIGIL`] is a command; the
//! token must match one of the role's command words exactly. Anything else is
//! sent as a chat message verbatim. Arguments are positional and checked
//! before use, so `#setport` with no port is an error, not a panic.

use thiserror::Error;

use crate::domain::command::{Command, Role, COMMAND_SIGIL};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Missing argument for {command}")]
    ArgumentMissing { command: &'static str },
    #[error("Invalid port: {value}")]
    MalformedPort { value: String },
}

/// Returns `Ok(None)` for a blank line.
pub fn interpret(role: Role, line: &str) -> Result<Option<Command>, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(word) = tokens.next() else {
        return Ok(None);
    };

    if !word.starts_with(COMMAND_SIGIL) {
        return Ok(Some(Command::PlainMessage(line.to_owned())));
    }

    let command = match (role, word) {
        (_, "#quit") => Command::Quit,
        (_, "#getport") => Command::GetPort,
        (_, "#setport") => Command::SetPort(parse_port(argument("#setport", tokens.next())?)?),
        (Role::Client, "#logoff") | (Role::Server, "#close") => Command::Logoff,
        (Role::Client, "#sethost") => {
            Command::SetHost(argument("#sethost", tokens.next())?.to_owned())
        }
        (Role::Client, "#login") => Command::Login(argument("#login", tokens.next())?.to_owned()),
        (Role::Client, "#gethost") => Command::GetHost,
        (Role::Server, "#stop") => Command::Stop,
        (Role::Server, "#start") => Command::Start,
        (_, other) => Command::Unrecognized(other.to_owned()),
    };

    Ok(Some(command))
}

fn argument<'a>(command: &'static str, token: Option<&'a str>) -> Result<&'a str, CommandError> {
    token.ok_or(CommandError::ArgumentMissing { command })
}

fn parse_port(value: &str) -> Result<u16, CommandError> {
    value.parse().map_err(|_| CommandError::MalformedPort {
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(line: &str) -> Result<Option<Command>, CommandError> {
        interpret(Role::Client, line)
    }

    fn server(line: &str) -> Result<Option<Command>, CommandError> {
        interpret(Role::Server, line)
    }

    #[test]
    fn blank_lines_produce_no_command() {
        assert_eq!(client(""), Ok(None));
        assert_eq!(server("   \t"), Ok(None));
    }

    #[test]
    fn non_sigil_line_is_forwarded_verbatim() {
        assert_eq!(
            client("hello  there"),
            Ok(Some(Command::PlainMessage("hello  there".to_owned())))
        );
    }

    #[test]
    fn sigil_inside_a_message_does_not_make_it_a_command() {
        assert_eq!(
            client("see #quit"),
            Ok(Some(Command::PlainMessage("see #quit".to_owned())))
        );
    }

    #[test]
    fn parses_client_command_words() {
        assert_eq!(client("#quit"), Ok(Some(Command::Quit)));
        assert_eq!(client("#logoff"), Ok(Some(Command::Logoff)));
        assert_eq!(client("#gethost"), Ok(Some(Command::GetHost)));
        assert_eq!(client("#getport"), Ok(Some(Command::GetPort)));
        assert_eq!(
            client("#sethost example.org"),
            Ok(Some(Command::SetHost("example.org".to_owned())))
        );
        assert_eq!(client("#setport 6000"), Ok(Some(Command::SetPort(6000))));
        assert_eq!(
            client("#login alice"),
            Ok(Some(Command::Login("alice".to_owned())))
        );
    }

    #[test]
    fn parses_server_command_words() {
        assert_eq!(server("#quit"), Ok(Some(Command::Quit)));
        assert_eq!(server("#stop"), Ok(Some(Command::Stop)));
        assert_eq!(server("#close"), Ok(Some(Command::Logoff)));
        assert_eq!(server("#start"), Ok(Some(Command::Start)));
        assert_eq!(server("#getport"), Ok(Some(Command::GetPort)));
        assert_eq!(server("#setport 6000"), Ok(Some(Command::SetPort(6000))));
    }

    #[test]
    fn words_of_the_other_role_are_unrecognized() {
        assert_eq!(
            client("#stop"),
            Ok(Some(Command::Unrecognized("#stop".to_owned())))
        );
        assert_eq!(
            server("#login alice"),
            Ok(Some(Command::Unrecognized("#login".to_owned())))
        );
    }

    #[test]
    fn unknown_sigil_word_is_unrecognized_not_an_error() {
        assert_eq!(
            client("#dance now"),
            Ok(Some(Command::Unrecognized("#dance".to_owned())))
        );
        assert_eq!(
            client("#QUIT"),
            Ok(Some(Command::Unrecognized("#QUIT".to_owned())))
        );
    }

    #[test]
    fn missing_argument_is_reported_with_the_command_word() {
        assert_eq!(
            client("#login"),
            Err(CommandError::ArgumentMissing { command: "#login" })
        );
        assert_eq!(
            client("#sethost   "),
            Err(CommandError::ArgumentMissing {
                command: "#sethost"
            })
        );
        assert_eq!(
            server("#setport"),
            Err(CommandError::ArgumentMissing {
                command: "#setport"
            })
        );
    }

    #[test]
    fn non_numeric_or_out_of_range_port_is_malformed() {
        assert_eq!(
            server("#setport abc"),
            Err(CommandError::MalformedPort {
                value: "abc".to_owned()
            })
        );
        assert_eq!(
            client("#setport 65536"),
            Err(CommandError::MalformedPort {
                value: "65536".to_owned()
            })
        );
        assert_eq!(
            client("#setport -1"),
            Err(CommandError::MalformedPort {
                value: "-1".to_owned()
            })
        );
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(
            client("#login alice extra"),
            Ok(Some(Command::Login("alice".to_owned())))
        );
    }

    #[test]
    fn error_messages_are_operator_readable() {
        assert_eq!(
            CommandError::ArgumentMissing { command: "#login" }.to_string(),
            "Missing argument for #login"
        );
        assert_eq!(
            CommandError::MalformedPort {
                value: "x".to_owned()
            }
            .to_string(),
            "Invalid port: x"
        );
    }
}
