use std::env;

/// Server configuration, loaded once at startup from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage_backend: String,
    /// Base URL prepended to generated codes in shorten responses
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let storage_backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

        Config {
            server_host,
            server_port,
            storage_backend,
            public_base_url,
        }
    }
}
