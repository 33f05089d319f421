//! CLI entry point for the console client.

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// Real-estate console CLI
#[derive(Parser, Debug)]
#[command(name = "realty", version, about = "Real-estate console client")]
pub struct Cli {
    /// Backend origin; overrides REALTY_BACKEND_URL and the config file
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials used by `login` and by commands that need a session.
#[derive(Args, Debug, Clone, Default)]
pub struct Credentials {
    /// Account email
    #[arg(long, env = "REALTY_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "REALTY_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and print the session identity
    Login,
    /// End the server session
    Logout,
    /// Browse the public property listing
    Properties(PropertiesArgs),
    /// Manage owners (requires credentials)
    Owners(OwnersArgs),
    /// List users (requires credentials)
    Users(UsersArgs),
}

/// Arguments for `realty properties`.
#[derive(Parser, Debug)]
pub struct PropertiesArgs {
    /// Name contains
    #[arg(long)]
    pub name: Option<String>,

    /// Address contains
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Keep loading pages until the listing is exhausted
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `owners` subcommand group.
#[derive(Parser, Debug)]
pub struct OwnersArgs {
    #[command(subcommand)]
    pub command: OwnerCommands,
}

/// Owner subcommands.
#[derive(Subcommand, Debug)]
pub enum OwnerCommands {
    /// List every owner
    List,
    /// Delete an owner by id
    Delete {
        /// Owner id
        id: String,
    },
}

/// Arguments for `realty users`.
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email_filter: Option<String>,

    #[arg(long, default_value = "1")]
    pub page: u32,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_login_with_credentials() {
        let cli = Cli::try_parse_from([
            "realty",
            "login",
            "--email",
            "admin@example.com",
            "--password",
            "secret1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Login));
        assert_eq!(cli.credentials.email.as_deref(), Some("admin@example.com"));
        assert_eq!(cli.credentials.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn parse_properties_with_filters() {
        let cli = Cli::try_parse_from([
            "realty",
            "--backend-url",
            "http://localhost:5000",
            "properties",
            "--name",
            "house",
            "--min-price",
            "1000",
            "--all",
        ])
        .unwrap();
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:5000"));
        match cli.command {
            Commands::Properties(args) => {
                assert_eq!(args.name.as_deref(), Some("house"));
                assert_eq!(args.min_price, Some(1000.0));
                assert!(args.max_price.is_none());
                assert!(args.all);
            }
            other => panic!("expected Properties, got {other:?}"),
        }
    }

    #[test]
    fn parse_owner_delete() {
        let cli = Cli::try_parse_from(["realty", "owners", "delete", "2"]).unwrap();
        match cli.command {
            Commands::Owners(owners) => match owners.command {
                OwnerCommands::Delete { id } => assert_eq!(id, "2"),
                other => panic!("expected Delete, got {other:?}"),
            },
            other => panic!("expected Owners, got {other:?}"),
        }
    }

    #[test]
    fn parse_users_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["realty", "users"]).unwrap();
        match cli.command {
            Commands::Users(args) => {
                assert_eq!(args.page, 1);
                assert!(args.name.is_none());
            }
            other => panic!("expected Users, got {other:?}"),
        }
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["realty"]).is_err());
    }

    #[test]
    fn parse_owner_delete_missing_id_is_error() {
        assert!(Cli::try_parse_from(["realty", "owners", "delete"]).is_err());
    }
}
