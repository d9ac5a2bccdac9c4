use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "matic-admin", about = "Admin console for donations and supporters")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the donations backend
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Path prefix the console is served under (e.g. "/console")
    #[arg(long)]
    pub hosting_prefix: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub console: ConsoleConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Name of the backend's session cookie, forwarded on every call
    pub session_cookie: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    pub hosting_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            session_cookie: "session_token".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Join the hosting prefix and a console path.
    pub fn link(&self, path: &str) -> String {
        format!("{}{}", self.hosting_prefix, path)
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref url) = cli.backend_url {
            config.backend.base_url = url.clone();
        }
        if let Some(ref prefix) = cli.hosting_prefix {
            config.console.hosting_prefix = prefix.clone();
        }

        config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();
        config.console.hosting_prefix = normalize_prefix(&config.console.hosting_prefix);

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".matic-admin")
        })
    }
}

/// "" and "/" mean no prefix; anything else gets exactly one leading slash
/// and no trailing slash.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
