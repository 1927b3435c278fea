use clap::Args;
use storefront_app::{
    context::{AppContext, AppSettings},
    domain::products::models::NewProduct,
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product title
    #[arg(long)]
    title: String,

    /// Product type, e.g. "drink"
    #[arg(long = "type")]
    kind: String,

    /// Price in the smallest currency unit
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    price: i64,

    /// Units in stock
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    quantity: i64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url, AppSettings::default())
        .await
        .map_err(|error| format!("failed to initialize: {error}"))?;

    let product = context
        .products
        .create_product(NewProduct {
            title: args.title,
            kind: args.kind,
            price: args.price,
            quantity: args.quantity,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_pk: {}", product.pk);
    println!("product_title: {}", product.title);

    Ok(())
}
