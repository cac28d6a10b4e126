//! Signup Validation
//!
//! Explicit validator functions per entity. Each returns the first
//! violation's fixed human-readable label, never a list of errors.

use platform::password::ClearTextPassword;

use crate::application::sign_up::SignUpInput;
use crate::domain::value_object::{email::Email, person_name::PersonName};

pub const FIRST_NAME_LABEL: &str = "A valid firstName is required";
pub const LAST_NAME_LABEL: &str = "A valid lastName is required";
pub const EMAIL_LABEL: &str = "A valid email address is required";
pub const PASSWORD_LABEL: &str = "A valid password of atleast 8 characters is required";

/// Validate a signup body, producing typed input for the use case.
///
/// Fields are checked in schema order; the first violation wins.
pub fn sign_up(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: String,
) -> Result<SignUpInput, String> {
    let first_name = PersonName::new(first_name).map_err(|_| FIRST_NAME_LABEL.to_string())?;
    let last_name = PersonName::new(last_name).map_err(|_| LAST_NAME_LABEL.to_string())?;
    let email = Email::new(email).map_err(|_| EMAIL_LABEL.to_string())?;
    let password = ClearTextPassword::new(password).map_err(|_| PASSWORD_LABEL.to_string())?;

    Ok(SignUpInput {
        first_name,
        last_name,
        email,
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup() {
        let result = sign_up("Ayo", "Akin", "daylay10@yahoo.com", "daylayayo1".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        // Both the first name and the email are bad; the schema-order
        // first label is returned
        let result = sign_up("A", "Akin", "not-an-email", "daylayayo1".to_string());
        assert_eq!(result.unwrap_err(), FIRST_NAME_LABEL);
    }

    #[test]
    fn test_invalid_email_label() {
        let result = sign_up("Ayo", "Akin", "daylay10yahoo.com", "daylayayo1".to_string());
        assert_eq!(result.unwrap_err(), EMAIL_LABEL);
    }

    #[test]
    fn test_short_password_label() {
        let result = sign_up("Ayo", "Akin", "daylay10@yahoo.com", "short".to_string());
        assert_eq!(result.unwrap_err(), PASSWORD_LABEL);
    }

    #[test]
    fn test_missing_fields_report_schema_order() {
        let result = sign_up("", "", "", String::new());
        assert_eq!(result.unwrap_err(), FIRST_NAME_LABEL);
    }

    #[test]
    fn test_long_name_label() {
        let result = sign_up(
            "Ayoooooooooooooooo",
            "Akin",
            "daylay10@yahoo.com",
            "daylayayo1".to_string(),
        );
        assert_eq!(result.unwrap_err(), FIRST_NAME_LABEL);
    }
}
