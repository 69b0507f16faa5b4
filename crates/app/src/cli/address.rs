use clap::{Args, Subcommand};
use iara_app::context::AppContext;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// Resolve a postal code (CEP)
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Postal code, digits or `00000-000`
    cep: String,
}

pub(crate) async fn run(context: &AppContext, command: AddressCommand) -> Result<(), String> {
    match command.command {
        AddressSubcommand::Lookup(args) => {
            let address = context
                .address
                .lookup(&args.cep)
                .await
                .map_err(|error| describe(&error))?;

            println!("cep: {}", address.postal_code);
            println!("street: {}", address.fields.street);

            if !address.fields.complement.is_empty() {
                println!("complement: {}", address.fields.complement);
            }

            println!("neighborhood: {}", address.fields.neighborhood);
            println!("city: {}", address.fields.city);
            println!("state: {}", address.fields.state);

            Ok(())
        }
    }
}
