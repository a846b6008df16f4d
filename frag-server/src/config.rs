use std::path::PathBuf;

/// Server configuration, read from the environment (and `.env` when
/// present): `PORT`, `API_URL`, `HTPASSWD_FILE`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL clients reach the service at; used for `Location` headers.
    pub api_url: String,
    /// Credential file with one `email:bcrypt-hash` per line.
    pub htpasswd_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => 8080,
        };
        let api_url =
            std::env::var("API_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
        let htpasswd_file = std::env::var("HTPASSWD_FILE").ok().map(PathBuf::from);

        Ok(Self {
            port,
            api_url,
            htpasswd_file,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    raw.parse::<u16>()
        .map_err(|_| format!("PORT must be a port number, got {raw:?}"))
}
