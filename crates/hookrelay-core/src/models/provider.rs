//! Git hosting provider identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::RelayError;

/// Supported webhook vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    GitHub,
    GitLab,
}

impl ProviderKind {
    /// Returns the identifier used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = RelayError;

    /// Matching is exact: `"GitHub"` is not a known provider.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(ProviderKind::GitHub),
            "gitlab" => Ok(ProviderKind::GitLab),
            _ => Err(RelayError::UnknownProvider(s.to_string())),
        }
    }
}
