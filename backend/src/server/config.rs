//! Service configuration read from the environment.

use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "testdb";

/// Settings the server needs before it can accept requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl AppConfig {
    /// Read configuration from `BIND_ADDR`, `MONGODB_URI`, and
    /// `MONGODB_DATABASE`, falling back to development defaults.
    pub fn from_env() -> std::io::Result<Self> {
        Self::from_vars(
            env::var("BIND_ADDR").ok(),
            env::var("MONGODB_URI").ok(),
            env::var("MONGODB_DATABASE").ok(),
        )
    }

    fn from_vars(
        bind_addr: Option<String>,
        mongodb_uri: Option<String>,
        mongodb_database: Option<String>,
    ) -> std::io::Result<Self> {
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR `{bind_addr}`: {err}")))?;

        Ok(Self {
            bind_addr,
            mongodb_uri: mongodb_uri.unwrap_or_else(|| DEFAULT_MONGODB_URI.to_owned()),
            mongodb_database: mongodb_database
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_owned()),
        })
    }
}
