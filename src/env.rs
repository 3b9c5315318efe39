use super::*;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_CORS_FILE: &str = ".env_cors";
/// Same as actix-web's own default body limit.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 262_144;

pub fn load_env_file() {
    // A missing .env is normal; everything has a default.
    match dotenv() {
        Ok(env_path) => info!(".env loading at: {}", env_path.display()),
        Err(e) if e.not_found() => {
            let current_dir =
                stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
            info!(
                "No .env file in {} or its parents, using process environment",
                current_dir.display()
            );
        }
        Err(e) => warn!("Failed to load .env: {}", e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
    pub workers: Option<usize>,
    pub max_payload_bytes: usize,
    pub cors_file: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| stdenv::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable numbers fall back
    /// to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let workers = lookup("WORKERS").and_then(|raw| match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                warn!("Ignoring invalid WORKERS value: {:?}", raw);
                None
            }
        });
        let max_payload_bytes = lookup("MAX_PAYLOAD_BYTES")
            .and_then(|raw| match raw.trim().parse::<usize>() {
                Ok(n) => Some(n),
                Err(e) => {
                    warn!("Ignoring invalid MAX_PAYLOAD_BYTES value {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES);

        Self {
            host: get("HOST", DEFAULT_HOST),
            port: get("PORT", DEFAULT_PORT),
            workers,
            max_payload_bytes,
            cors_file: get("CORS_FILE", DEFAULT_CORS_FILE),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
