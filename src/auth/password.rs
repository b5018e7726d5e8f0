//! Password policy enforcement for account registration.
//!
//! Checks run in a fixed order and the first failure wins: length bounds,
//! then leading/trailing spaces, then character-class complexity. Callers
//! rely on that order, so it is part of the contract, not an implementation
//! detail.

use crate::types::AppError;

/// Passwords shorter than this are rejected.
const MIN_LENGTH: usize = 8;
/// Passwords longer than this are rejected.
const MAX_LENGTH: usize = 72;

/// Validate a candidate password against the registration policy.
///
/// Pure function of the input; returns the first rule violation or `Ok(())`.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();
    if length < MIN_LENGTH {
        return Err(AppError::PasswordTooShort);
    }
    if length > MAX_LENGTH {
        return Err(AppError::PasswordTooLong);
    }
    if password.starts_with(' ') || password.ends_with(' ') {
        return Err(AppError::PasswordPaddedWithSpaces);
    }
    if !is_complex(password) {
        return Err(AppError::PasswordNotComplex);
    }
    Ok(())
}

/// At least one lowercase letter, one uppercase letter, one digit, and one
/// character outside the alphanumerics.
fn is_complex(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut special = false;

    for c in password.chars() {
        if c.is_ascii_lowercase() {
            lower = true;
        } else if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else {
            special = true;
        }
    }

    lower && upper && digit && special
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_a_compliant_password() {
        assert!(validate_password("aaAA11@@").is_ok());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(matches!(
            validate_password("1234567"),
            Err(AppError::PasswordTooShort)
        ));
    }

    #[test]
    fn rejects_long_passwords() {
        let password = "*".repeat(73);
        assert!(matches!(
            validate_password(&password),
            Err(AppError::PasswordTooLong)
        ));
    }

    #[test]
    fn length_is_checked_before_complexity() {
        // "1234567" is both too short and not complex; length must win.
        assert!(matches!(
            validate_password("1234567"),
            Err(AppError::PasswordTooShort)
        ));
        let long = "a".repeat(80);
        assert!(matches!(
            validate_password(&long),
            Err(AppError::PasswordTooLong)
        ));
    }

    #[rstest]
    #[case(" 1AB!cD@")]
    #[case("1AB!cD@ ")]
    #[case(" 1AB!cD@ ")]
    fn rejects_padded_passwords(#[case] password: &str) {
        assert!(matches!(
            validate_password(password),
            Err(AppError::PasswordPaddedWithSpaces)
        ));
    }

    #[test]
    fn padding_is_checked_before_complexity() {
        // Padded and missing a digit; the padding error must win.
        assert!(matches!(
            validate_password(" aaAABB@@ "),
            Err(AppError::PasswordPaddedWithSpaces)
        ));
    }

    #[rstest]
    #[case::no_lowercase("AAA111@@@")]
    #[case::no_uppercase("aaa111@@@")]
    #[case::no_digit("aaaAAA@@@")]
    #[case::no_special("aaaAAA111")]
    fn rejects_passwords_missing_a_character_class(#[case] password: &str) {
        assert!(matches!(
            validate_password(password),
            Err(AppError::PasswordNotComplex)
        ));
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        // Exactly 8 and exactly 72 characters are both inside the bounds.
        assert!(validate_password("aaAA11@@").is_ok());
        let mut long = "aA1@".repeat(17);
        long.push_str("aA1@");
        assert_eq!(long.chars().count(), 72);
        assert!(validate_password(&long).is_ok());
    }
}
