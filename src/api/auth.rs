//! Login, logout and session refresh.

use serde::de::IgnoredAny;

use super::types::{LoginRequest, LoginResponse};
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::session::Identity;
use crate::validation::LoginForm;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: HttpClient,
}

impl AuthApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Validate the form, then log in.
    pub async fn login_form(&self, form: &LoginForm) -> Result<Identity> {
        let request = form.validate()?;
        self.login(&request).await
    }

    /// Log in and start the session with the returned identity.
    pub async fn login(&self, request: &LoginRequest) -> Result<Identity> {
        let response: LoginResponse = self
            .client
            .post(LOGIN_PATH, request, RequestOptions::new())
            .await?;
        let identity = response.into_identity();
        self.client.session().login(identity.clone());
        Ok(identity)
    }

    /// Log out on the server. The local session is cleared whether or not
    /// the call succeeds.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .client
            .post_empty::<IgnoredAny>(LOGOUT_PATH, RequestOptions::new())
            .await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Logout call failed, clearing session anyway");
        }
        self.client.session().logout();
        result.map(|_| ())
    }

    /// Extend the session. Returns `false` and clears the session when the
    /// refresh is rejected.
    pub async fn refresh_token(&self) -> bool {
        match self.client.refresh_session().await {
            Ok(()) => true,
            Err(failure) => {
                tracing::warn!(error = %failure, "Token refresh rejected");
                self.client.session().logout();
                false
            }
        }
    }
}
