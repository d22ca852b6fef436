use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::client::auth_api;
use crate::core::client::backend_client::BackendClient;
use crate::core::envelope;
use crate::core::state::session::session_state::SessionState;
use crate::domain::auth::dto::signed_in_user::SignedInUser;

pub struct AuthService {
    client: Arc<BackendClient>,
    session: Arc<SessionState>,
}

impl AuthService {
    pub fn new(client: Arc<BackendClient>, session: Arc<SessionState>) -> Self {
        Self { client, session }
    }

    /// Exchange credentials for a bearer token and open the session.
    pub async fn sign_in(&self, user_id: &str, user_password: &str) -> Result<SignedInUser> {
        let raw = auth_api::sign_in_request(&self.client, user_id, user_password)
            .await
            .context("Sign-in request failed")?;
        envelope::require_success(&raw)?;

        let token = token_from_response(&raw)?;
        let user = SignedInUser::new(user_id, token);
        self.session.store(user.clone()).await;

        info!(user_id, "Signed in");
        Ok(user)
    }

    /// Pull profile fields from `GET /user` into the stored session.
    pub async fn refresh_profile(&self) -> Result<SignedInUser> {
        let mut user = self
            .session
            .current()
            .await
            .ok_or_else(|| anyhow!("No active session"))?;

        let raw = auth_api::fetch_signed_in_user(&self.client, &user.token)
            .await
            .context("Profile request failed")?;
        envelope::require_success(&raw)?;

        apply_profile(&mut user, &raw);
        self.session.store(user.clone()).await;

        debug!(user_id = %user.user_id, "Profile refreshed");
        Ok(user)
    }

    pub async fn sign_out(&self) {
        self.session.clear().await;
        info!("Signed out");
    }

    pub async fn current_user(&self) -> Option<SignedInUser> {
        self.session.current().await
    }
}

/// The token arrives at the top level or under `data`, depending on
/// the backend build.
fn token_from_response(raw: &Value) -> Result<&str> {
    raw.get("token")
        .or_else(|| raw.get("data").and_then(|data| data.get("token")))
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Sign-in response carried no token"))
}

/// Merge whatever profile fields the endpoint returned, either under
/// `data` or at the top level.
fn apply_profile(user: &mut SignedInUser, raw: &Value) {
    let profile = raw.get("data").filter(|d| d.is_object()).unwrap_or(raw);

    if let Some(id) = profile.get("userId").and_then(Value::as_str) {
        user.user_id = id.to_string();
    }
    if let Some(name) = profile.get("userName").and_then(Value::as_str) {
        user.user_name = Some(name.to_string());
    }
    if let Some(auth) = profile.get("auth").and_then(Value::as_str) {
        user.auth = Some(auth.to_string());
    }
}
