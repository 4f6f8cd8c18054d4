//! User role chosen during onboarding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The side of the marketplace a user signed up for.
///
/// Once stored for a user the role is never changed by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Investor,
    Entrepreneur,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Investor => "investor",
            Role::Entrepreneur => "entrepreneur",
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

    /// Accepts the canonical names plus the Spanish values persisted by
    /// older releases (`inversionista`, `emprendedor`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "investor" | "inversionista" => Ok(Role::Investor),
            "entrepreneur" | "emprendedor" => Ok(Role::Entrepreneur),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_legacy_names() {
        assert_eq!("investor".parse::<Role>().unwrap(), Role::Investor);
        assert_eq!("Inversionista".parse::<Role>().unwrap(), Role::Investor);
        assert_eq!(" emprendedor ".parse::<Role>().unwrap(), Role::Entrepreneur);
        assert_eq!("entrepreneur".parse::<Role>().unwrap(), Role::Entrepreneur);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("admin".to_string()));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Entrepreneur).unwrap(), "\"entrepreneur\"");
    }
}
