//! Command-line interface for the server binary

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, LogFormat, ServerConfig, StorageBackend};

/// Contact intake HTTP server
#[derive(Parser, Debug)]
#[command(name = "contact-intake-server")]
#[command(about = "Contact Intake Server - Accept and store contact form submissions", long_about = None)]
#[command(version)]
pub struct ServerCli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CONTACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CONTACT_HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long, env = "CONTACT_PORT")]
    pub port: Option<u16>,

    /// Storage backend
    #[arg(long, value_enum, env = "CONTACT_STORAGE")]
    pub storage: Option<StorageBackend>,

    /// Database directory for the sled backend
    #[arg(long, env = "CONTACT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[arg(long, env = "CONTACT_MAX_BODY_SIZE")]
    pub max_body_size: Option<usize>,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    pub cors_allow_any_origin: bool,

    /// Log output format
    #[arg(long, value_enum, env = "CONTACT_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl ServerCli {
    /// Build the effective configuration: file (or defaults), then overrides
    pub fn resolve(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(max_body_size) = self.max_body_size {
            config.max_body_size = max_body_size;
        }
        if self.cors_allow_any_origin {
            config.cors_allow_any_origin = true;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        ServerCli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\nstorage = \"sled\"").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = ServerCli::try_parse_from([
            "contact-intake-server",
            "--config",
            path.as_str(),
            "--port",
            "9090",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.storage, StorageBackend::Sled);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = ServerCli::try_parse_from([
            "contact-intake-server",
            "--host",
            "not an address",
        ])
        .unwrap();
        assert!(matches!(cli.resolve(), Err(ConfigError::Invalid(_))));
    }
}
