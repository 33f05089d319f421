//! Typed clients for the console's REST resources.

pub mod auth;
pub mod owners;
pub mod properties;
pub mod types;
pub mod users;

pub use auth::AuthApi;
pub use owners::{is_owner_in_use, OwnersApi, OWNER_HAS_PROPERTIES};
pub use properties::PropertiesApi;
pub use types::*;
pub use users::UsersApi;

use crate::http::HttpClient;

/// All resource clients over one shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ConsoleApi {
    pub auth: AuthApi,
    pub owners: OwnersApi,
    pub properties: PropertiesApi,
    pub users: UsersApi,
}

impl ConsoleApi {
    pub fn new(client: HttpClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            owners: OwnersApi::new(client.clone()),
            properties: PropertiesApi::new(client.clone()),
            users: UsersApi::new(client),
        }
    }
}

/// Percent-encode a record id for use as a path segment.
pub(crate) fn id_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
