use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
    Courier,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
            Role::Courier => "COURIER",
        }
    }

    /// Case-insensitive parse; `None` for anything outside the three roles.
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_uppercase().as_str() {
            "CUSTOMER" => Some(Role::Customer),
            "ADMIN" => Some(Role::Admin),
            "COURIER" => Some(Role::Courier),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted identity. `password_hash` never leaves the auth path.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration input, already hashed.
#[derive(Debug, Clone)]
pub struct NewActor {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

/// The authenticated caller, resolved from a bearer token and passed
/// explicitly into every core operation.
#[derive(Debug, Clone, Copy)]
pub struct ActorRef {
    pub id: Uuid,
    pub role: Role,
}
