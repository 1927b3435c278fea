//! Storage Config

use clap::Args;

#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` URL; migrations run against it at startup
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}
