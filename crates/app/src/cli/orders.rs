use clap::{Args, Subcommand};
use iara::{
    orders::{Order, OrderId},
    pricing::brl,
};
use iara_app::context::AppContext;
use jiff::tz::TimeZone;

use super::{
    checkout::{print_artifact, print_order},
    describe,
};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List past orders, newest first
    List,

    /// Show one past order
    Show(ShowArgs),

    /// Show the order awaiting payment
    Pending,

    /// Mark the pending order as paid
    Confirm,

    /// Show the PIX charge or boleto for the pending order
    Artifact,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Order id, e.g. ORDER-1718000000123
    id: String,
}

pub(crate) fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List => list(context),
        OrdersSubcommand::Show(args) => {
            let order = context
                .orders()
                .find(&OrderId::from(args.id))
                .map_err(|error| describe(&error))?;

            print_order(&order)
        }
        OrdersSubcommand::Pending => {
            let Some(order) = pending(context)? else {
                println!("no order awaiting payment");
                return Ok(());
            };

            print_order(&order)?;
            print_artifact(&context.checkout(), &order)
        }
        OrdersSubcommand::Confirm => {
            let order = context
                .checkout()
                .confirm_payment()
                .map_err(|error| format!("failed to confirm payment: {}", describe(&error)))?;

            println!("payment for order {} confirmed", order.id);

            Ok(())
        }
        OrdersSubcommand::Artifact => {
            let order = pending(context)?.ok_or_else(|| "no order awaiting payment".to_string())?;

            print_artifact(&context.checkout(), &order)
        }
    }
}

fn pending(context: &AppContext) -> Result<Option<Order>, String> {
    context
        .orders()
        .pending()
        .map_err(|error| format!("failed to read pending order: {}", describe(&error)))
}

fn list(context: &AppContext) -> Result<(), String> {
    let store = context.orders();

    let orders = store
        .history_newest_first()
        .map_err(|error| format!("failed to read order history: {}", describe(&error)))?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    let tz = TimeZone::system();

    for order in &orders {
        println!(
            "{}  {}  {:<6}  {} item(s)  {}",
            order.id,
            order.date.to_zoned(tz.clone()).strftime("%d/%m/%Y %H:%M"),
            order.payment_method.label(),
            order.items.len(),
            brl(order.total)
        );
    }

    let summary = store
        .summary()
        .map_err(|error| format!("failed to summarise orders: {}", describe(&error)))?;

    println!();
    println!(
        "{} order(s) · {} game(s) · {} spent",
        summary.orders,
        summary.items,
        brl(summary.spent)
    );

    Ok(())
}
