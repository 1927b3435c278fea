use clap::Args;
use storefront_app::{
    auth::{Credentials, DEFAULT_STARTING_WALLET},
    context::{AppContext, AppSettings},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login name
    #[arg(long)]
    username: String,

    /// Plaintext secret; stored hashed
    #[arg(long, env = "USER_SECRET", hide_env_values = true)]
    secret: String,

    /// Initial wallet balance
    #[arg(long, default_value_t = DEFAULT_STARTING_WALLET, value_parser = clap::value_parser!(i64).range(0..))]
    wallet: i64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.username.trim().is_empty() {
        return Err("username cannot be empty".to_string());
    }

    let settings = AppSettings {
        starting_wallet: args.wallet,
    };

    let context = AppContext::from_database_url(&args.database_url, settings)
        .await
        .map_err(|error| format!("failed to initialize: {error}"))?;

    let user = context
        .auth
        .register(Credentials::new(args.username, args.secret))
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("username: {}", user.name);
    println!("wallet: {}", user.wallet);

    Ok(())
}
