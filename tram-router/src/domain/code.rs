//! Stop and route code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::DomainError;

/// Longest code accepted for stops and routes.
pub const MAX_CODE_LEN: usize = 32;

fn validate(s: &str) -> Result<(), DomainError> {
    if s.is_empty() {
        return Err(DomainError::InvalidCode {
            code: s.to_string(),
            reason: "must not be empty",
        });
    }

    if s.len() > MAX_CODE_LEN {
        return Err(DomainError::InvalidCode {
            code: s.to_string(),
            reason: "must be at most 32 characters",
        });
    }

    if !s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
    {
        return Err(DomainError::InvalidCode {
            code: s.to_string(),
            reason: "must be ASCII letters, digits, '-', '_' or '.'",
        });
    }

    Ok(())
}

/// A validated stop code, e.g. `1140439`.
///
/// Stop codes are short ASCII identifiers. This type guarantees that any
/// `StopCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use tram_router::domain::StopCode;
///
/// let code = StopCode::parse("1140439").unwrap();
/// assert_eq!(code.as_str(), "1140439");
///
/// assert!(StopCode::parse("").is_err());
/// assert!(StopCode::parse("has space").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code from a string.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StopCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StopCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StopCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated route code, e.g. `4T`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteCode(String);

impl RouteCode {
    /// Parse a route code from a string.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteCode({})", self.0)
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RouteCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RouteCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RouteCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StopCode::parse("1140439").is_ok());
        assert!(StopCode::parse("A").is_ok());
        assert!(StopCode::parse("stop-1_b.2").is_ok());
        assert!(RouteCode::parse("4T").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopCode::parse("").is_err());
        assert!(RouteCode::parse("").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "A".repeat(MAX_CODE_LEN + 1);
        assert!(StopCode::parse(&long).is_err());
        assert!(StopCode::parse(&"A".repeat(MAX_CODE_LEN)).is_ok());
    }

    #[test]
    fn reject_invalid_characters() {
        assert!(StopCode::parse("A B").is_err());
        assert!(StopCode::parse("A/B").is_err());
        assert!(StopCode::parse("Töölö").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StopCode::parse("1140439").unwrap();
        assert_eq!(format!("{}", code), "1140439");
        assert_eq!(format!("{:?}", code), "StopCode(1140439)");

        let route = RouteCode::parse("4T").unwrap();
        assert_eq!(format!("{:?}", route), "RouteCode(4T)");
    }

    #[test]
    fn deserialize_validates() {
        let ok: StopCode = serde_json::from_str("\"1140439\"").unwrap();
        assert_eq!(ok.as_str(), "1140439");

        let err = serde_json::from_str::<StopCode>("\"bad code\"");
        assert!(err.is_err());
    }

    #[test]
    fn serialize_as_plain_string() {
        let code = RouteCode::parse("4T").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"4T\"");
    }
}
