//! Input checks shared by the HTTP layer and services
//!
//! Lengths are counted in characters, not bytes.

use crate::error::AppError;

/// Longest accepted message text
pub const MAX_MESSAGE_CHARS: usize = 255;

/// Shortest accepted password
pub const MIN_PASSWORD_CHARS: usize = 4;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a registration request before it reaches the store.
pub fn validate_registration(username: &str, password: &str) -> Result<(), AppError> {
    if is_blank(username) {
        return Err(AppError::Validation("username cannot be blank".to_string()));
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }

    Ok(())
}

/// Check the text of a new or edited message.
pub fn validate_message_text(text: &str) -> Result<(), AppError> {
    if is_blank(text) {
        return Err(AppError::Validation(
            "message text cannot be blank".to_string(),
        ));
    }

    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "message text cannot exceed {MAX_MESSAGE_CHARS} characters"
        )));
    }

    Ok(())
}
