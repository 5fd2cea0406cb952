use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ========== ROLE ==========
/// Access role carried by every provisioned account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    MidLevel,
    LowLevel,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::MidLevel, Role::LowLevel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::MidLevel => "mid_level",
            Role::LowLevel => "low_level",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact, case-sensitive match against the stored role names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// ========== CALLER ==========
/// Authenticated invoker, as supplied by the API Gateway authorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub subject_id: String,
}

// ========== PROFILE ==========
/// Profile item stored in DynamoDB under PK=USER#<subject_id>.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub subject_id: String,
    pub email: Option<String>,
    pub role: String, // raw stored value; admin | mid_level | low_level
    pub created_at: Option<String>,
}

impl ProfileRecord {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

/// Fields written for a freshly provisioned account. The store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub email: String,
    pub role: Role,
}

// ========== ACCOUNT ==========
/// Account handed to the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub disabled: bool,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("email_verified", &self.email_verified)
            .field("disabled", &self.disabled)
            .finish()
    }
}

// ========== REQUEST / RESPONSE ==========
/// Request body for POST /createUserWithRole. Every field is optional on the wire.
#[derive(Default, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateUserWithRoleRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl fmt::Debug for CreateUserWithRoleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserWithRoleRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CreateUserWithRoleResponse {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub success: bool,
}
