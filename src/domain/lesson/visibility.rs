//! Lesson visibility and access tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who can see a lesson in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    #[serde(alias = "Public")]
    Public,
    #[serde(alias = "Private")]
    Private,
}

/// Whether a lesson requires a premium account to read in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    #[serde(alias = "Free")]
    Free,
    #[serde(alias = "Premium")]
    Premium,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Private => "private",
        }
    }
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Free => "free",
            AccessLevel::Premium => "premium",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_public_and_free() {
        assert_eq!(Privacy::default(), Privacy::Public);
        assert_eq!(AccessLevel::default(), AccessLevel::Free);
    }

    #[test]
    fn accepts_capitalized_values() {
        let privacy: Privacy = serde_json::from_str("\"Private\"").unwrap();
        let access: AccessLevel = serde_json::from_str("\"Premium\"").unwrap();
        assert_eq!(privacy, Privacy::Private);
        assert_eq!(access, AccessLevel::Premium);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccessLevel::Premium).unwrap(), "\"premium\"");
    }
}
