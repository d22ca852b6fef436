use serde::{Deserialize, Serialize};
use validator::Validate;

/// Admin update payload for a user account.
///
/// The password is only sent when the operator sets a new one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_name: String,
    pub memo: String,
    #[validate(length(min = 1, max = 30))]
    pub phone: String,
    pub auth: String,
    pub email: String,

    #[validate(length(min = 6))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
