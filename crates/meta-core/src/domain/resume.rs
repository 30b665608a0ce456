//! Resume token: `<action>[<index>]`

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<action>[^\[\]\s]+)\[(?P<index>\d+)\]\s*$").expect("valid resume token pattern")
});

/// Cursor letting a validator chain continue after an acknowledged alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResumeToken {
    pub action: String,
    pub index: usize,
}

impl ResumeToken {
    pub fn new(action: &str, index: usize) -> Self {
        Self {
            action: action.to_string(),
            index,
        }
    }

    /// Action names must be usable inside a token.
    pub fn is_valid_action_name(name: &str) -> bool {
        !name.is_empty() && !name.contains(&['[', ']'][..]) && !name.contains(char::is_whitespace)
    }
}

impl fmt::Display for ResumeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.action, self.index)
    }
}

impl FromStr for ResumeToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = TOKEN_PATTERN
            .captures(s)
            .ok_or_else(|| DomainError::InvalidResumeToken(s.to_string()))?;

        let index = caps["index"]
            .parse::<usize>()
            .map_err(|_| DomainError::InvalidResumeToken(s.to_string()))?;

        Ok(Self {
            action: caps["action"].to_string(),
            index,
        })
    }
}

impl Serialize for ResumeToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResumeToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(ResumeToken::new("action-check-order", 2).to_string(), "action-check-order[2]");
    }

    #[test]
    fn test_parse() {
        let token: ResumeToken = "action-check-order[12]".parse().unwrap();
        assert_eq!(token, ResumeToken::new("action-check-order", 12));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "action", "action[]", "action[-1]", "[3]", "a[1][2]", "a b[1]"] {
            assert!(
                matches!(raw.parse::<ResumeToken>(), Err(DomainError::InvalidResumeToken(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        let token = ResumeToken::new("action-a", 1);
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"action-a[1]\"");
        let back: ResumeToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn test_action_name_check() {
        assert!(ResumeToken::is_valid_action_name("action-validate-order"));
        assert!(!ResumeToken::is_valid_action_name("bad[name"));
        assert!(!ResumeToken::is_valid_action_name("with space"));
        assert!(!ResumeToken::is_valid_action_name(""));
    }
}
