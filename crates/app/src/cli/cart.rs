use std::{io, sync::Arc};

use clap::{Args, Subcommand};
use iara::{
    cart::{CartChange, CartEvent, CartManager},
    pricing::brl,
    receipt::write_cart,
};
use iara_app::context::AppContext;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its total
    List,

    /// Add a game by catalog id
    Add(GameArgs),

    /// Remove a game by id
    Remove(GameArgs),

    /// Add the game if absent, remove it otherwise
    Toggle(GameArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct GameArgs {
    /// Game id
    id: u64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let mut cart = context
        .cart()
        .map_err(|error| format!("failed to load cart: {}", describe(&error)))?;

    cart.subscribe(Arc::new(|event: &CartEvent| print_badge(event)));

    match command.command {
        CartSubcommand::List => write_cart(io::stdout().lock(), cart.items())
            .map_err(|error| format!("failed to print cart: {error}")),
        CartSubcommand::Add(args) => add(context, &mut cart, args.id).await,
        CartSubcommand::Remove(args) => {
            let removed = cart
                .remove(args.id)
                .map_err(|error| format!("failed to update cart: {}", describe(&error)))?;

            if !removed {
                println!("game {} is not in the cart", args.id);
            }

            Ok(())
        }
        CartSubcommand::Toggle(args) => toggle(context, &mut cart, args.id).await,
        CartSubcommand::Clear => cart
            .clear()
            .map_err(|error| format!("failed to clear cart: {}", describe(&error))),
    }
}

async fn add(context: &AppContext, cart: &mut CartManager, id: u64) -> Result<(), String> {
    if cart.is_in_cart(id) {
        println!("game {id} is already in the cart");
        return Ok(());
    }

    let game = context
        .catalog
        .game(id)
        .await
        .map_err(|error| format!("failed to load game {id}: {}", describe(&error)))?;

    cart.add(game.to_cart_item())
        .map_err(|error| format!("failed to update cart: {}", describe(&error)))?;

    Ok(())
}

async fn toggle(context: &AppContext, cart: &mut CartManager, id: u64) -> Result<(), String> {
    // Removing needs no catalog round trip.
    if cart.is_in_cart(id) {
        cart.remove(id)
            .map_err(|error| format!("failed to update cart: {}", describe(&error)))?;

        return Ok(());
    }

    let game = context
        .catalog
        .game(id)
        .await
        .map_err(|error| format!("failed to load game {id}: {}", describe(&error)))?;

    cart.toggle(game.to_cart_item())
        .map_err(|error| format!("failed to update cart: {}", describe(&error)))?;

    Ok(())
}

fn print_badge(event: &CartEvent) {
    match &event.change {
        CartChange::Added(item) => println!("added {}", item.name),
        CartChange::Removed(item) => println!("removed {}", item.name),
        CartChange::Cleared => println!("cart cleared"),
    }

    println!("cart: {} item(s) · {}", event.len, brl(event.total));
}
