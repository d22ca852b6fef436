//! Auth endpoints: sign-in and the signed-in user lookup.

use serde_json::{json, Value};

use crate::core::client::backend_client::BackendClient;
use crate::errors::AppError;

/// POST /auth/sign-in with raw credentials. Public endpoint, no token.
pub async fn sign_in_request(
    client: &BackendClient,
    user_id: &str,
    user_password: &str,
) -> Result<Value, AppError> {
    let body = json!({
        "userId": user_id,
        "userPassword": user_password,
    });
    client.post_json(None, "/auth/sign-in", &body).await
}

/// GET /user — profile of the signed-in user.
pub async fn fetch_signed_in_user(client: &BackendClient, token: &str) -> Result<Value, AppError> {
    client.get_json(token, "/user", &[]).await
}
