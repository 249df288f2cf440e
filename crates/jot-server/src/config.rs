use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Basic-auth credentials guarding the write route.
#[derive(Clone, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    /// Read credentials from the `API_USER` / `API_PASS` environment
    /// variables. Returns `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("API_USER").ok().filter(|s| !s.is_empty())?;
        let password = std::env::var("API_PASS").ok().filter(|s| !s.is_empty())?;
        Some(Self { username, password })
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the password.
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Key family the value routes read and write.
    pub family: String,
    /// Credentials for `POST /input/{value}`. `None` leaves it open.
    pub auth: Option<BasicAuth>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            family: "values".to_string(),
            auth: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.family, "values");
        assert!(c.auth.is_none());
    }

    #[test]
    fn auth_debug_hides_password() {
        let auth = BasicAuth {
            username: "api".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{auth:?}");
        assert!(debug.contains("api"));
        assert!(!debug.contains("hunter2"));
    }
}
