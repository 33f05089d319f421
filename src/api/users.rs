//! `/api/User`.

use serde::de::IgnoredAny;

use super::id_segment;
use super::types::{CreateUser, PagedResult, UpdateUser, User, UserSearch};
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};

const USERS_PATH: &str = "/api/User";

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: HttpClient,
}

impl UsersApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, search: &UserSearch) -> Result<PagedResult<User>> {
        let options = RequestOptions::new().queries(search.to_query());
        self.client.get(USERS_PATH, options).await
    }

    pub async fn create(&self, user: &CreateUser) -> Result<User> {
        self.client
            .post(USERS_PATH, user, RequestOptions::new())
            .await
    }

    pub async fn update(&self, id: &str, user: &UpdateUser) -> Result<User> {
        self.client
            .put(&item_path(id), user, RequestOptions::new())
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
    format!("{USERS_PATH}/{}", id_segment(id))
}
