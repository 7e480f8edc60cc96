use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Postgres connection string. Without one the service keeps transactions in memory.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// `None` allows any origin.
    pub cors_allowed_origins: Option<Vec<String>>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match non_empty("SERVER_PORT") {
            Some(raw) => raw.trim().parse().context("SERVER_PORT must be a port number")?,
            None => DEFAULT_SERVER_PORT,
        };
        if server_port == 0 {
            anyhow::bail!("SERVER_PORT must be greater than 0");
        }

        let database_max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_format = match non_empty("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Config {
            server_port,
            database_url: non_empty("DATABASE_URL"),
            database_max_connections,
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .and_then(|raw| parse_allowed_origins(&raw)),
            log_format,
        })
    }
}

fn parse_allowed_origins(raw: &str) -> Option<Vec<String>> {
    let value = raw.trim();
    if value == "*" {
        return None;
    }

    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        None
    } else {
        Some(origins)
    }
}

/// Hides the password part of a connection string.
pub fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(slash_pos) = url[..at_pos].find("//") {
            let credentials = &url[slash_pos + 2..at_pos];
            if let Some(colon_pos) = credentials.find(':') {
                let user = &credentials[..colon_pos];
                return format!("{}{}:****{}", &url[..slash_pos + 2], user, &url[at_pos..]);
            }
        }
    }
    url.to_string()
}
