use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::auth::dto::signed_in_user::SignedInUser;

/// Shared holder for the signed-in user, if any.
///
/// Every fetch reads the bearer token from here at call time, so a
/// re-login or sign-out takes effect on the next refresh without
/// touching the table coordinators.
pub struct SessionState {
    user: RwLock<Option<SignedInUser>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            user: RwLock::new(None),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Current session snapshot.
    pub async fn current(&self) -> Option<SignedInUser> {
        self.user.read().await.clone()
    }

    /// Token for request headers, without the `Bearer ` prefix.
    pub async fn token(&self) -> Option<String> {
        self.user.read().await.as_ref().map(|u| u.token.clone())
    }

    /// Replace the session wholesale after a successful sign-in.
    pub async fn store(&self, user: SignedInUser) {
        let mut guard = self.user.write().await;
        *guard = Some(user);
    }

    /// Drop the session on sign-out or auth failure.
    pub async fn clear(&self) {
        let mut guard = self.user.write().await;
        *guard = None;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
