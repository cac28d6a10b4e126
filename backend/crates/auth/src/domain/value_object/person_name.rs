//! Person Name Value Object
//!
//! First or last name: 2 to 15 characters after trimming.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Minimum name length
const NAME_MIN_LENGTH: usize = 2;

/// Maximum name length
const NAME_MAX_LENGTH: usize = 15;

/// First/last name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Create a new name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        let char_count = name.chars().count();
        if char_count < NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at least {} characters",
                NAME_MIN_LENGTH
            )));
        }
        if char_count > NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_valid() {
        assert!(PersonName::new("Ayo").is_ok());
        assert!(PersonName::new("Akin").is_ok());
        assert!(PersonName::new("  Ayo  ").is_ok()); // trimmed
    }

    #[test]
    fn test_name_too_short() {
        assert!(PersonName::new("").is_err());
        assert!(PersonName::new("A").is_err());
        assert!(PersonName::new("   ").is_err());
    }

    #[test]
    fn test_name_too_long() {
        assert!(PersonName::new("a".repeat(16)).is_err());
        assert!(PersonName::new("a".repeat(15)).is_ok());
    }
}
