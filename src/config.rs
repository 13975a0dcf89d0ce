// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Length of one exam, in seconds (60 minutes).
pub const EXAM_TIME_SECONDS: u32 = 60 * 60;

/// Minimum percentage for an attempt to count as passed.
pub const PASSING_SCORE_PERCENTAGE: i32 = 70;

/// Below this many seconds remaining the countdown is flagged as low.
pub const TIME_LOW_THRESHOLD_SECONDS: u32 = 5 * 60;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// JSON file of questions loaded into an empty bank at startup.
    pub question_seed_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|addr| match addr.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    eprintln!("Ignoring invalid BIND_ADDR '{}': {}", addr, e);
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let question_seed_path = env::var("QUESTION_SEED_PATH").ok().map(PathBuf::from);

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Self {
            database_url,
            rust_log,
            bind_addr,
            question_seed_path,
            cors_origins,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            rust_log: "info".to_string(),
            bind_addr: default_bind_addr(),
            question_seed_path: None,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_comma_separated_origins() {
        let origins = parse_origins(" http://a.test , ,http://b.test");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_default_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.database_url.is_none());
    }
}
