use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8000";
const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to the router state; nothing reads the
/// environment after that.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub project_name: String,
    pub cors_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub max_resume_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => compose_database_url(
                &env_or("POSTGRES_SERVER", "localhost"),
                parse_env("POSTGRES_PORT", 5432u16)?,
                &env_or("POSTGRES_USER", "postgres"),
                &env_or("POSTGRES_PASSWORD", "postgres"),
                &env_or("POSTGRES_DB", "intake"),
            ),
        };

        Ok(Config {
            database_url,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10u32)?,
            port: parse_env("PORT", 8000u16)?,
            rust_log: env_or("RUST_LOG", "info"),
            project_name: env_or("PROJECT_NAME", "Intake API"),
            cors_origins: parse_cors_origins(&env_or("BACKEND_CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads/resumes")),
            max_resume_bytes: parse_env("MAX_RESUME_BYTES", DEFAULT_MAX_RESUME_BYTES)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Builds a PostgreSQL URL from its parts when `DATABASE_URL` is not given.
pub fn compose_database_url(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    database: &str,
) -> String {
    format!("postgres://{user}:{password}@{host}:{port}/{database}")
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
