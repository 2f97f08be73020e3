/**
 * Roles
 *
 * The platform has exactly two authorization tiers. A role is attached to a user
 * at registration and copied into every session token minted for that user.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Authorization tier of a user
///
/// Serialized in lowercase (`"user"`, `"practitioner"`), which is also the
/// representation stored in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member reading content
    #[default]
    User,
    /// Practitioner publishing content
    Practitioner,
}

impl Role {
    /// All roles, in declaration order
    pub const ALL: [Role; 2] = [Role::User, Role::Practitioner];

    /// Lowercase wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Practitioner => "practitioner",
        }
    }

    /// Parse an optional role field from a request body.
    ///
    /// `None` and blank strings mean "not given"; anything else must name a role.
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Role>, SharedError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "practitioner" => Ok(Role::Practitioner),
            _ => Err(SharedError::unknown_role(s)),
        }
    }
}
