use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Role {
    #[default]
    Viewer,
    Streamer,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Role::Viewer => "viewer",
            Role::Streamer => "streamer",
            Role::Admin => "admin",
        };
        write!(f, "{}", role)
    }
}

impl Role {
    pub fn from_str(value: &str) -> Self {
        match value {
            "streamer" => Role::Streamer,
            "admin" => Role::Admin,
            _ => Role::Viewer,
        }
    }

    /// Gifts and level thresholds are managed by streamers and admins.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Streamer | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
