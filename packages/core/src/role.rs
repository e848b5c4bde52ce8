use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Closed set of account roles. Each people-management screen is the
/// shared `/user` collection filtered by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Vendor,
    Breeder,
    Admin,
    Veterinary,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::Vendor,
        Role::Breeder,
        Role::Admin,
        Role::Veterinary,
    ];

    /// Wire value sent as the `role` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Vendor => "Vendor",
            Role::Breeder => "Breeder",
            Role::Admin => "Admin",
            Role::Veterinary => "Veterinary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "vendor" => Ok(Role::Vendor),
            "breeder" => Ok(Role::Breeder),
            "admin" => Ok(Role::Admin),
            "veterinary" => Ok(Role::Veterinary),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("breeder".parse::<Role>().unwrap(), Role::Breeder);
        assert_eq!("Veterinary".parse::<Role>().unwrap(), Role::Veterinary);
    }

    #[test]
    fn rejects_unknown_roles() {
        assert!("Superuser".parse::<Role>().is_err());
    }

    #[test]
    fn round_trips_through_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
