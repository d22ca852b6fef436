use serde::{Deserialize, Serialize};

/// Authenticated session holder: the bearer token plus whatever profile
/// fields the sign-in endpoints returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignedInUser {
    pub user_id: String,
    pub token: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub auth: Option<String>,
}

impl SignedInUser {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            user_name: None,
            auth: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_identity_only() {
        let user = SignedInUser::new("ops01", "tok-123");
        assert_eq!(user.user_id, "ops01");
        assert_eq!(user.token, "tok-123");
        assert!(user.user_name.is_none());
    }
}
