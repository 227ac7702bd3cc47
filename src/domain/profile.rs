use std::fmt;

/// Capability attached to a profile. Anything the system does not know is
/// kept verbatim so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Client,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "client" => Role::Client,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile record linked to an identity. `id` equals the identity's user id.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Payload for creating a profile at signup.
#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Payload for updating an existing profile. The role is not patchable.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
}
