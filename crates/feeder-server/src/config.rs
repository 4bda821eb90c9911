use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub database_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3001)),
            database_path: PathBuf::from("leaderboard.db"),
            config_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("FEEDER_BIND") {
            if let Ok(addr) = v.parse() {
                cfg.bind = addr;
            }
        }
        if let Ok(v) = env::var("DATABASE_PATH") {
            if !v.is_empty() {
                cfg.database_path = PathBuf::from(v);
            }
        }
        if let Ok(v) = env::var("FEEDER_CONFIG") {
            if !v.is_empty() {
                cfg.config_path = Some(PathBuf::from(v));
            }
        }
        if let Ok(v) = env::var("FEEDER_LOG") {
            cfg.log_level = v;
        }
        cfg
    }
}
