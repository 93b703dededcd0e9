use std::fmt;

use serde::{Deserialize, Serialize};

pub type UserId = u64;

/// Account role. The backend calls job seekers `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user", alias = "seeker")]
    Seeker,
    #[serde(rename = "employer")]
    Employer,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Lenient parse used for login responses: unknown roles fall back to seeker.
    pub fn from_login(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("employer") => Role::Employer,
            Some("admin") => Role::Admin,
            _ => Role::Seeker,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "user",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is signed in. These are the only flags the client persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub role: Role,
    pub display_name: String,
}

impl SessionIdentity {
    pub fn is_employer(&self) -> bool {
        self.role == Role::Employer
    }
}
