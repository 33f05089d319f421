//! CLI command handlers.

use crate::api::{is_owner_in_use, ConsoleApi, UserSearch};
use crate::config::{ClientConfig, ConfigFile};
use crate::error::ConsoleError;
use crate::feed::{PropertyFeed, PropertyFilters};
use crate::http::HttpClient;
use crate::session::{Identity, SessionStore};
use crate::validation::LoginForm;

use super::{Credentials, OwnerCommands, PropertiesArgs, UsersArgs};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve configuration like [`ClientConfig::from_env`], with the
/// `--backend-url` flag taking precedence.
pub fn load_config(backend_url: Option<String>) -> Result<ClientConfig, ConsoleError> {
    let mut file = ConfigFile::discover()?;
    if backend_url.is_some() {
        file.backend_url = backend_url;
    }
    file.resolve()
}

/// Build the resource clients over a fresh session.
pub fn connect(config: ClientConfig) -> Result<ConsoleApi, ConsoleError> {
    let client = HttpClient::new(config, SessionStore::new())?;
    Ok(ConsoleApi::new(client))
}

async fn sign_in(api: &ConsoleApi, credentials: &Credentials) -> Result<Identity, ConsoleError> {
    let (Some(email), Some(password)) = (&credentials.email, &credentials.password) else {
        return Err(ConsoleError::InvalidArgument(
            "this command needs --email and --password (or REALTY_EMAIL / REALTY_PASSWORD)".into(),
        ));
    };
    api.auth
        .login_form(&LoginForm::new(email.clone(), password.clone()))
        .await
}

/// Handle `realty login`.
pub async fn handle_login(api: &ConsoleApi, credentials: &Credentials) -> CliResult {
    let identity = sign_in(api, credentials).await?;
    println!("Logged in as {} <{}>", identity.name, identity.email);
    Ok(())
}

/// Handle `realty logout`.
pub async fn handle_logout(api: &ConsoleApi) -> CliResult {
    api.auth.logout().await?;
    println!("Logged out");
    Ok(())
}

/// Handle `realty properties`.
pub async fn handle_properties(api: &ConsoleApi, args: PropertiesArgs) -> CliResult {
    let filters = PropertyFilters {
        name: args.name,
        address: args.address,
        min_price: args.min_price,
        max_price: args.max_price,
    };
    let mut feed = PropertyFeed::new(api.properties.clone(), filters);
    if args.all {
        feed.load_all().await?;
    } else {
        feed.load_next().await?;
    }

    for property in feed.properties() {
        println!(
            "{}\t{}\t{}\t{:.2}\t{}",
            property.id, property.name, property.address, property.price, property.owner_name
        );
    }
    println!(
        "Showing {} of {} properties",
        feed.properties().count(),
        feed.total_count()
    );
    Ok(())
}

/// Handle `realty owners ...`.
pub async fn handle_owners(
    api: &ConsoleApi,
    credentials: &Credentials,
    command: OwnerCommands,
) -> CliResult {
    sign_in(api, credentials).await?;
    match command {
        OwnerCommands::List => {
            for owner in api.owners.list().await? {
                println!(
                    "{}\t{}\t{}",
                    owner.id,
                    owner.name,
                    owner.address.as_deref().unwrap_or("-")
                );
            }
        }
        OwnerCommands::Delete { id } => match api.owners.delete(&id).await {
            Ok(()) => println!("Owner {id} deleted"),
            Err(err) if is_owner_in_use(&err) => {
                return Err(format!(
                    "Owner {id} still has properties; reassign or delete them first"
                )
                .into());
            }
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

/// Handle `realty users`.
pub async fn handle_users(api: &ConsoleApi, credentials: &Credentials, args: UsersArgs) -> CliResult {
    sign_in(api, credentials).await?;
    let search = UserSearch {
        name: args.name,
        email: args.email_filter,
        page: args.page,
        ..Default::default()
    };
    let page = api.users.search(&search).await?;
    for user in &page.data {
        println!("{}\t{}\t{}", user.id, user.name, user.email);
    }
    println!(
        "Page {} of {} ({} users)",
        page.page, page.total_pages, page.total_count
    );
    Ok(())
}
