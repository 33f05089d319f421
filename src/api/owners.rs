//! `/api/Owners`.

use serde::de::IgnoredAny;

use super::id_segment;
use super::types::{CreateOwner, Owner, UpdateOwner};
use crate::error::{ConsoleError, Result};
use crate::http::{HttpClient, RequestOptions};

const OWNERS_PATH: &str = "/api/Owners";

/// Error code returned when deleting an owner that still has properties.
pub const OWNER_HAS_PROPERTIES: &str = "Owner.HasAssociatedProperties";

#[derive(Debug, Clone)]
pub struct OwnersApi {
    client: HttpClient,
}

impl OwnersApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Every owner. The collection is not paged.
    pub async fn list(&self) -> Result<Vec<Owner>> {
        self.client.get(OWNERS_PATH, RequestOptions::new()).await
    }

    pub async fn create(&self, owner: &CreateOwner) -> Result<Owner> {
        self.client
            .post(OWNERS_PATH, owner, RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, owner: &UpdateOwner) -> Result<Owner> {
        self.client
            .put(&item_path(id), owner, RequestOptions::new())
            .await
    }

    /// Delete an owner. Fails with [`OWNER_HAS_PROPERTIES`] while the owner
    /// still has properties; see [`is_owner_in_use`].
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<IgnoredAny>(&item_path(id), RequestOptions::new())
            .await
            .map(|_| ())
    }
}

fn item_path(id: &str) -> String {
    format!("{OWNERS_PATH}/{}", id_segment(id))
}

/// Whether a delete failed because the owner still has properties.
pub fn is_owner_in_use(err: &ConsoleError) -> bool {
    err.api_code() == Some(OWNER_HAS_PROPERTIES)
}
