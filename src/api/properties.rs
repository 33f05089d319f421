//! `/api/Properties`.

use serde::de::IgnoredAny;

use super::id_segment;
use super::types::{CreateProperty, PagedResult, Property, PropertySearch, UpdateProperty};
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};

const PROPERTIES_PATH: &str = "/api/Properties";

#[derive(Debug, Clone)]
pub struct PropertiesApi {
    client: HttpClient,
}

impl PropertiesApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// One page of properties matching `search`.
    pub async fn search(&self, search: &PropertySearch) -> Result<PagedResult<Property>> {
        let options = RequestOptions::new().queries(search.to_query());
        self.client.get(PROPERTIES_PATH, options).await
    }

    pub async fn create(&self, property: &CreateProperty) -> Result<Property> {
        self.client
            .post(PROPERTIES_PATH, property, RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, property: &UpdateProperty) -> Result<Property> {
        self.client
            .put(&item_path(id), property, RequestOptions::new())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<IgnoredAny>(&item_path(id), RequestOptions::new())
            .await
            .map(|_| ())
    }
}

fn item_path(id: &str) -> String {
    format!("{PROPERTIES_PATH}/{}", id_segment(id))
}
