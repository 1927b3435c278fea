//! Session & Account Config

use clap::Args;
use storefront_app::auth::DEFAULT_STARTING_WALLET;

/// Minimum key length accepted by the cookie session store.
pub(crate) const MIN_SESSION_SECRET_LEN: usize = 64;

/// Session and account settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Key used to sign and encrypt session cookies (at least 64 bytes)
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true, value_parser = parse_session_secret)]
    pub session_secret: String,

    /// Wallet balance granted to newly registered users
    #[arg(
        long,
        env = "STARTING_WALLET",
        default_value_t = DEFAULT_STARTING_WALLET,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub starting_wallet: i64,
}

fn parse_session_secret(value: &str) -> Result<String, String> {
    if value.len() < MIN_SESSION_SECRET_LEN {
        return Err(format!(
            "session secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
        ));
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_secret_length_boundary() {
        assert!(parse_session_secret(&"x".repeat(MIN_SESSION_SECRET_LEN - 1)).is_err());
        assert!(parse_session_secret(&"x".repeat(MIN_SESSION_SECRET_LEN)).is_ok());
    }
}
