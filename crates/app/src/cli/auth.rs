use clap::{Args, Subcommand};
use iara::{masks::format_cep, validation::RegistrationForm};
use iara_app::{address::autofill, auth::Credentials, context::AppContext};

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show who is signed in
    Status,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "IARA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Password, at least 6 characters
    #[arg(long, env = "IARA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again
    #[arg(long)]
    confirm_password: String,

    /// Postal code, digits or `00000-000`
    #[arg(long)]
    cep: String,

    /// Fill street, neighborhood, city and state from the postal code
    #[arg(long)]
    autofill: bool,

    /// Street
    #[arg(long)]
    address: Option<String>,

    /// House number
    #[arg(long)]
    number: String,

    /// Complement, e.g. apartment
    #[arg(long, default_value = "")]
    complement: String,

    /// Neighborhood
    #[arg(long)]
    neighborhood: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// Two-letter state code
    #[arg(long)]
    state: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: AuthCommand) -> Result<(), String> {
    match command.command {
        AuthSubcommand::Login(args) => {
            context
                .auth
                .login(&Credentials::new(args.email.clone(), args.password))
                .await
                .map_err(|error| format!("login failed: {}", describe(&error)))?;

            println!("signed in as {}", args.email);

            Ok(())
        }
        AuthSubcommand::Register(args) => register(context, args).await,
        AuthSubcommand::Logout => {
            context
                .auth
                .logout()
                .map_err(|error| format!("logout failed: {}", describe(&error)))?;

            println!("signed out");

            Ok(())
        }
        AuthSubcommand::Status => status(context),
    }
}

async fn register(context: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let mut form = RegistrationForm {
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        cep: format_cep(&args.cep),
        number: args.number,
        complement: args.complement,
        ..RegistrationForm::default()
    };

    if args.autofill {
        autofill(context.address.as_ref(), &mut form)
            .await
            .map_err(|error| format!("address lookup failed: {}", describe(&error)))?;
    }

    // Explicit flags win over the lookup.
    if let Some(address) = args.address {
        form.address = address;
    }
    if let Some(neighborhood) = args.neighborhood {
        form.neighborhood = neighborhood;
    }
    if let Some(city) = args.city {
        form.city = city;
    }
    if let Some(state) = args.state {
        form.state = state.to_uppercase();
    }

    context
        .auth
        .register(&form)
        .await
        .map_err(|error| format!("registration failed: {}", describe(&error)))?;

    println!("registered and signed in as {}", form.email);

    Ok(())
}

fn status(context: &AppContext) -> Result<(), String> {
    let Some(email) = context
        .auth
        .current_user()
        .map_err(|error| describe(&error))?
    else {
        println!("not signed in");
        return Ok(());
    };

    println!("signed in as {email}");

    let address = context
        .session()
        .address()
        .map_err(|error| describe(&error))?;

    if let Some(address) = address {
        println!(
            "address: {}, {} - {}, {}/{} ({})",
            address.address,
            address.number,
            address.neighborhood,
            address.city,
            address.state,
            address.cep
        );
    }

    Ok(())
}
