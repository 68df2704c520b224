use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Default cap on multipart upload bodies (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front-end origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Directory uploaded model pictures are written to and served from.
    pub images_dir: PathBuf,
    /// Maximum accepted request body size for `/uploadImage`.
    pub max_upload_bytes: usize,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `IMAGES_DIR`            | `images`                |
    /// | `MAX_UPLOAD_BYTES`      | `10485760`              |
    ///
    /// Token settings come from [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on a value that does not parse, so a bad deployment fails at
    /// startup rather than on first use.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            images_dir: env_or("IMAGES_DIR", PathBuf::from("images")),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `name` from the environment, falling back to `default` when unset.
pub(crate) fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        let port: u16 = env_or("SIMS_TEST_SURELY_UNSET_PORT", 3000);
        assert_eq!(port, 3000);
    }

    #[test]
    fn path_default_is_kept_verbatim() {
        let dir = env_or("SIMS_TEST_SURELY_UNSET_DIR", PathBuf::from("images"));
        assert_eq!(dir, PathBuf::from("images"));
    }
}
