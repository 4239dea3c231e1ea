use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, ClientConfig, LogConfig, ServerConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub client: Option<FileClientConfig>,
    pub server: Option<FileServerConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(client) = self.client {
            client.merge_into(&mut config.client);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileClientConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileClientConfig {
    fn merge_into(self, config: &mut ClientConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }

        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub port: Option<u16>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}
