use std::env;
use std::path::PathBuf;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            seed_path: None,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads settings from the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset values fall back to the
    /// defaults; an unparsable `PORT` is logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse() {
                Ok(port) => port,
                Err(e) => {
                    warn!(
                        "Invalid PORT '{}': {}. Using default {}",
                        raw, e, defaults.port
                    );
                    defaults.port
                }
            },
            None => defaults.port,
        };
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let seed_path = lookup("ACTIVITIES_SEED_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            static_dir,
            seed_path,
        }
    }
}
