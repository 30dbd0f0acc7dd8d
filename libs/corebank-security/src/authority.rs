use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::Role;

/// Prefix prepended to a role's canonical name to form its authority label.
pub const ROLE_PREFIX: &str = "ROLE_";

/// String-labelled capability consumed by access-control checks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Authority label for a role, e.g. `ROLE_ADMIN`.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self(format!("{ROLE_PREFIX}{}", role.as_str()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The role this authority was derived from, if it is a role label.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.0.strip_prefix(ROLE_PREFIX)?.parse().ok()
    }
}

impl From<Role> for Authority {
    fn from(role: Role) -> Self {
        Self::for_role(role)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Authority {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Authority {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
