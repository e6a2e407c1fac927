//! Server configuration, read once at startup.

/// Name this service reports in health responses and startup logs.
pub const SERVICE_NAME: &str = "shifa-setu-api";

/// Bind address for the server.
///
/// `HOST` and `PORT` override the defaults. The default port matches the
/// portal client's `NODE_API_BASE` default, so a freshly started pair finds
/// each other without any configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads the bind address from the environment, falling back to
    /// `0.0.0.0:4000`. An unparsable `PORT` falls back too.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(4000),
        }
    }

    /// Returns the `host:port` string handed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_matches_the_portal_client_default() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:4000");
    }

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
