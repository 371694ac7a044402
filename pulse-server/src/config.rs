use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
}

impl Settings {
    /// Load settings: defaults, then an optional `settings.toml`, then
    /// environment variables (highest priority).
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.path", "pulse.db")?;

        for candidate in [
            PathBuf::from("settings.toml"),
            PathBuf::from("pulse-server").join("settings.toml"),
        ] {
            if candidate.exists() {
                builder = builder.add_source(File::from(candidate).required(false));
            }
        }

        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
