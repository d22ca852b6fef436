//! Thin reqwest wrapper around the plant backend REST API.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::envelope::ResponseEnvelope;
use crate::errors::{transport_error, AppError};

/// HTTP client for the plant backend. Cheap to clone; holds the base URL
/// and a pooled reqwest client.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    api_base: String,
}

impl BackendClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET with query parameters, bearer-authorized.
    pub async fn get_json(
        &self,
        token: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, AppError> {
        let request = self
            .http
            .get(self.url(path))
            .header("Authorization", bearer_value(token))
            .query(params);
        self.execute("GET", path, request).await
    }

    /// POST a JSON body. `token` is `None` for the public auth endpoints.
    pub async fn post_json(
        &self,
        token: Option<&str>,
        path: &str,
        body: &Value,
    ) -> Result<Value, AppError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header("Authorization", bearer_value(token));
        }
        self.execute("POST", path, request).await
    }

    pub async fn put_json(&self, token: &str, path: &str, body: &Value) -> Result<Value, AppError> {
        let request = self
            .http
            .put(self.url(path))
            .header("Authorization", bearer_value(token))
            .json(body);
        self.execute("PUT", path, request).await
    }

    pub async fn delete_json(&self, token: &str, path: &str) -> Result<Value, AppError> {
        let request = self
            .http
            .delete(self.url(path))
            .header("Authorization", bearer_value(token));
        self.execute("DELETE", path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Send the request and map the response:
    /// - 2xx with a JSON body: body returned as-is
    /// - non-2xx with a readable envelope body: body returned as-is, so the
    ///   caller can inspect the application code and message
    /// - anything else: `Transport`
    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, AppError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, method, path, "Backend request");

        let response = request.send().await.map_err(|err| {
            warn!(%request_id, %err, "❌ Backend request could not be sent");
            transport_error(err)
        })?;

        let status = response.status();
        let body = response.json::<Value>().await;

        if status.is_success() {
            let value = body.map_err(transport_error)?;
            debug!(%request_id, %status, "Backend response");
            return Ok(value);
        }

        match body
            .ok()
            .filter(|value| ResponseEnvelope::from_value(value).is_some())
        {
            Some(value) => {
                debug!(%request_id, %status, "Backend rejection envelope");
                Ok(value)
            }
            None => {
                warn!(%request_id, %status, "❌ Backend response had no readable envelope");
                Err(transport_error(format!("HTTP {status}")))
            }
        }
    }
}

/// Build the `Authorization` header value. Tokens that already carry a
/// `Bearer ` prefix are accepted without double-prefixing.
pub fn bearer_value(token: &str) -> String {
    let token = token
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or(token);
    format!("Bearer {token}")
}
