use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Institute,
    Donor,
    Shopkeeper,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Institute => "institute",
            UserRole::Donor => "donor",
            UserRole::Shopkeeper => "shopkeeper",
        }
    }
}

/// Account state shared by users and the shopkeeper records derived from them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Pending,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Pending => "pending",
            AccountStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    Block,
    Unblock,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Block => "block",
            ModerationAction::Unblock => "unblock",
        }
    }

    /// Status an account moves to, if the action applies to `from`.
    pub fn apply(&self, from: AccountStatus) -> Option<AccountStatus> {
        match (self, from) {
            (ModerationAction::Approve, AccountStatus::Pending) => Some(AccountStatus::Active),
            (ModerationAction::Block, AccountStatus::Active) => Some(AccountStatus::Blocked),
            (ModerationAction::Unblock, AccountStatus::Blocked) => Some(AccountStatus::Active),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
