use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub email: String,
    pub name: String,

    // Pending passcode, cleared once consumed
    pub otp: Option<String>,
    pub otp_issued_at: Option<Datetime>,

    pub last_login: Option<Datetime>,
}

/// Identity handed back after a successful passcode check.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub user_name: String,
}
