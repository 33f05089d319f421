//! Realty console CLI binary entry point.

use clap::Parser;
use realty_console::cli::commands::{self, connect, load_config};
use realty_console::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let api = match load_config(cli.backend_url.clone()).and_then(connect) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login => commands::handle_login(&api, &cli.credentials).await,
        Commands::Logout => commands::handle_logout(&api).await,
        Commands::Properties(args) => commands::handle_properties(&api, args).await,
        Commands::Owners(owners) => {
            commands::handle_owners(&api, &cli.credentials, owners.command).await
        }
        Commands::Users(args) => commands::handle_users(&api, &cli.credentials, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
