use serde::{Deserialize, Serialize};

/// One account from the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Authorization level code, backend-defined.
    #[serde(default)]
    pub auth: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
