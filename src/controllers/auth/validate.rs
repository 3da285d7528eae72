use secrecy::ExposeSecret;
use validator::ValidationError;

use crate::auth::password::Password;
use crate::i18n::{Language, Message};

pub const PASSWORD_MIN_LENGTH: usize = 6;
/// bcrypt ignores everything past 72 bytes.
pub const PASSWORD_MAX_LENGTH: usize = 72;

fn error(code: &'static str, message: Message) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.text(Language::English).into());
    error
}

#[tracing::instrument]
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(error("username_empty", Message::UsernameEmpty));
    }

    if !username.chars().all(char::is_alphanumeric) {
        return Err(error(
            "username_not_alphanumeric",
            Message::UsernameNotAlphanumeric,
        ));
    }

    Ok(())
}

#[tracing::instrument(skip(password))]
pub fn validate_password(password: &Password) -> Result<(), ValidationError> {
    let secret = password.expose_secret();

    if secret.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(error("password_too_short", Message::PasswordTooShort));
    }

    if secret.len() > PASSWORD_MAX_LENGTH {
        return Err(error("password_too_long", Message::PasswordTooLong));
    }

    if secret.chars().all(char::is_numeric) {
        return Err(error("password_numeric", Message::PasswordNumeric));
    }

    Ok(())
}
