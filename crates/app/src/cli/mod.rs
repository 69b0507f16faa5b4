use clap::{Parser, Subcommand};
use iara_app::{config::AppConfig, context::AppContext, observability::init_logging};

mod address;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "iara-app", about = "Iara Games storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the game catalog
    Catalog(catalog::CatalogCommand),

    /// Manage the shopping cart
    Cart(cart::CartCommand),

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Pending order and purchase history
    Orders(orders::OrdersCommand),

    /// Look up addresses by postal code
    Address(address::AddressCommand),

    /// Sign in, register and sign out
    Auth(auth::AuthCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_logging(&self.config.logging).map_err(|error| error.to_string())?;

        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Catalog(command) => catalog::run(&context, command).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Checkout(args) => checkout::run(&context, args).await,
            Commands::Orders(command) => orders::run(&context, command),
            Commands::Address(command) => address::run(&context, command).await,
            Commands::Auth(command) => auth::run(&context, command).await,
        }
    }
}

/// Render an error with its source chain, e.g. `cart storage error: failed to write ...`.
fn describe(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
