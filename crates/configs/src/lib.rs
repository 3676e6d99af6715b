use std::io::ErrorKind;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const DEFAULT_TODOS_PATH: &str = "data/todos.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            worker_threads: Some(DEFAULT_WORKER_THREADS),
        }
    }
}

/// Where the todo collection lives on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_todos_path")]
    pub todos_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { todos_path: DEFAULT_TODOS_PATH.into() }
    }
}

fn default_host() -> String { DEFAULT_HOST.into() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_todos_path() -> String { DEFAULT_TODOS_PATH.into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = load_from_file(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from `SERVER_HOST`, `SERVER_PORT`,
    /// `TOKIO_WORKER_THREADS` and `TODOS_PATH`, used when no file exists.
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_PORT);
        let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        let todos_path = std::env::var("TODOS_PATH").unwrap_or_default();
        let mut cfg = Self {
            server: ServerConfig { host, port, worker_threads },
            storage: StorageConfig { todos_path },
        };
        // port is already non-zero, so this only fills blanks
        let _ = cfg.normalize_and_validate();
        cfg
    }

    /// Prefer the TOML file; fall back to environment variables.
    pub fn resolve() -> Self {
        Self::resolve_from(&config_path())
    }

    /// A missing file falls back quietly; a file that exists but cannot be
    /// read, parsed or validated is logged before falling back.
    pub fn resolve_from(path: &str) -> Self {
        match Self::load_and_validate_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if !is_missing_file(&e) {
                    warn!(%path, error = %e, "config file unusable; falling back to environment");
                }
                Self::from_env()
            }
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.server.normalize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.todos_path.trim().is_empty() {
            self.todos_path = std::env::var("TODOS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TODOS_PATH.to_string());
        }
    }
}
