use std::{collections::VecDeque, io, sync::Mutex};

use crate::{
    domain::connection::EndpointAddress,
    usecases::contracts::{ChatClient, ChatServer, DisplaySink, EndpointError, LineSource},
};

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    lines: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("display lock").clone()
    }

    pub fn last(&self) -> Option<String> {
        self.lines().last().cloned()
    }
}

impl DisplaySink for RecordingDisplay {
    fn display(&self, message: &str) {
        self.lines
            .lock()
            .expect("display lock")
            .push(message.to_owned());
    }
}

pub struct ScriptedLines {
    queue: VecDeque<io::Result<Option<String>>>,
}

impl ScriptedLines {
    pub fn from(lines: &[&str]) -> Self {
        Self {
            queue: lines
                .iter()
                .map(|line| Ok(Some((*line).to_owned())))
                .collect(),
        }
    }

    pub fn failing_after(lines: &[&str]) -> Self {
        let mut source = Self::from(lines);
        source
            .queue
            .push_back(Err(io::Error::new(io::ErrorKind::InvalidData, "bad input")));
        source
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.queue.pop_front().unwrap_or(Ok(None))
    }
}

#[derive(Debug, Default)]
pub struct StubChatClient {
    pub address: EndpointAddress,
    pub connected: bool,
    pub refuse_connections: bool,
    pub opened: usize,
    pub closed: usize,
    pub sent: Vec<String>,
}

impl StubChatClient {
    pub fn refusing() -> Self {
        Self {
            refuse_connections: true,
            ..Self::default()
        }
    }
}

impl ChatClient for StubChatClient {
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
        self.connected
    }

    fn open_connection(&mut self) -> Result<(), EndpointError> {
        if self.refuse_connections {
            return Err(EndpointError::ConnectionSetup {
                address: self.address.clone(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            });
        }

        self.opened += 1;
        self.connected = true;
        Ok(())
    }

    fn close_connection(&mut self) {
        self.closed += 1;
        self.connected = false;
    }

    fn send(&mut self, message: &str) -> Result<(), EndpointError> {
        if !self.connected {
            return Err(EndpointError::NotConnected);
        }

        self.sent.push(message.to_owned());
        Ok(())
    }
}

#[derive(Debug)]
pub struct StubChatServer {
    pub port: u16,
    pub listening: bool,
    pub refuse_listen: bool,
    pub listen_calls: usize,
    pub stop_calls: usize,
    pub close_calls: usize,
    pub broadcasts: Mutex<Vec<String>>,
}

impl Default for StubChatServer {
    fn default() -> Self {
        Self {
            port: EndpointAddress::default().port,
            listening: false,
            refuse_listen: false,
            listen_calls: 0,
            stop_calls: 0,
            close_calls: 0,
            broadcasts: Mutex::new(Vec::new()),
        }
    }
}

impl StubChatServer {
    pub fn listening_on(port: u16) -> Self {
        Self {
            port,
            listening: true,
            ..Self::default()
        }
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.broadcasts.lock().expect("broadcast lock").clone()
    }
}

impl ChatServer for StubChatServer {
    fn port(&self) -> u16 {
        self.port
    }

    fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn listen(&mut self) -> Result<(), EndpointError> {
        self.listen_calls += 1;
        if self.refuse_listen {
            return Err(EndpointError::ConnectionSetup {
                address: EndpointAddress::new("0.0.0.0", self.port),
                source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
            });
        }

        self.listening = true;
        Ok(())
    }

    fn stop_listening(&mut self) {
        self.stop_calls += 1;
        self.listening = false;
    }

    fn close_all_connections(&mut self) {
        self.close_calls += 1;
    }

    fn send_to_all(&self, message: &str) {
        self.broadcasts
            .lock()
            .expect("broadcast lock")
            .push(message.to_owned());
    }
}
