//! Wire types for the console's REST resources.

use serde::{Deserialize, Serialize};

use crate::session::Identity;

/// Property owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOwner {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub birthday: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// A listed property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub owner_name: String,
    pub id_owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    pub name: String,
    pub address: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub id_owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_owner: Option<String>,
}

/// Console user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub birthday: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub address: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub birthday: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. Accepts both a bare identity and one wrapped in `user`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LoginResponse {
    Wrapped { user: Identity },
    Bare(Identity),
}

impl LoginResponse {
    pub(crate) fn into_identity(self) -> Identity {
        match self {
            Self::Wrapped { user } => user,
            Self::Bare(identity) => identity,
        }
    }
}

/// Paged-result envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    /// Page number that follows this one, if the collection has more.
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }
}

type Query = Vec<(String, String)>;

fn push_text(query: &mut Query, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        query.push((key.to_string(), value.to_string()));
    }
}

fn push_price(query: &mut Query, key: &str, value: Option<f64>) {
    if let Some(value) = value.filter(|v| *v > 0.0) {
        query.push((key.to_string(), value.to_string()));
    }
}

/// Property collection filters plus paging.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySearch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for PropertySearch {
    fn default() -> Self {
        Self {
            name: None,
            address: None,
            min_price: None,
            max_price: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl PropertySearch {
    /// Query pairs; empty text filters and non-positive prices are omitted.
    pub fn to_query(&self) -> Query {
        let mut query = vec![
            ("Page".to_string(), self.page.to_string()),
            ("PageSize".to_string(), self.page_size.to_string()),
        ];
        push_text(&mut query, "Name", &self.name);
        push_text(&mut query, "Address", &self.address);
        push_price(&mut query, "MinPrice", self.min_price);
        push_price(&mut query, "MaxPrice", self.max_price);
        query
    }
}

/// User collection filters plus paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for UserSearch {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl UserSearch {
    pub fn to_query(&self) -> Query {
        let mut query = vec![
            ("Page".to_string(), self.page.to_string()),
            ("PageSize".to_string(), self.page_size.to_string()),
        ];
        push_text(&mut query, "Name", &self.name);
        push_text(&mut query, "Email", &self.email);
        query
    }
}
