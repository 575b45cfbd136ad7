use serde::{Deserialize, Serialize};

/// Record a sign-in for one user on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSignInCommand {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSignInResult {
    pub user_id: String,
    /// YYYY-MM-DD
    pub date: String,
    pub storage_key: String,
}
