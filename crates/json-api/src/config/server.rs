//! Listener Config

use clap::Args;

/// Where the HTTP listener binds.
#[derive(Debug, Args)]
pub struct ListenConfig {
    #[arg(long = "host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long = "port", env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port`, as accepted by `TcpListener::new`.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
