use serde::{Deserialize, Serialize};

/// An account as exposed to callers.
///
/// The password column is intentionally absent: it is write-only from the
/// point of view of the API and never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    /// Original casing as created. Lookups compare case-insensitively.
    pub username: String,
    pub is_blocked: bool,
    /// Stored as given; the format is not validated.
    pub renewal_date: String,
    pub ip: Option<String>,
    /// Referral counter ("indicação").
    pub indicacao: i32,
}

/// Values for a freshly created account. The store assigns the id and the
/// remaining columns start at their defaults (unblocked, no IP, zero
/// referrals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub username: String,
    pub password: String,
    pub renewal_date: String,
}

/// A single-column overwrite applied to the account whose username matches
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Password(String),
    Blocked(bool),
    RenewalDate(String),
    ReferralCount(i32),
    Ip(String),
}

impl FieldUpdate {
    pub fn column(&self) -> &'static str {
        match self {
            FieldUpdate::Password(_) => "password",
            FieldUpdate::Blocked(_) => "is_blocked",
            FieldUpdate::RenewalDate(_) => "renewal_date",
            FieldUpdate::ReferralCount(_) => "indicacao",
            FieldUpdate::Ip(_) => "ip",
        }
    }
}
