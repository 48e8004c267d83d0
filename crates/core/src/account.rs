//! Demo login.
//!
//! There are no accounts. A single configured credential pair unlocks the
//! "logged in" flag in the shopper's storage; the email is remembered so the
//! checkout form can be pre-filled.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::storage::{Storage, keys};
use crate::types::{Email, EmailError};

/// Reasons a login attempt fails.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Email or password left blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// Email is not shaped like an address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Well-formed input that does not match the demo credentials.
    #[error("no match for email and/or password")]
    InvalidCredentials,
}

/// The one credential pair the demo store accepts.
///
/// `Debug` never prints the password.
#[derive(Clone)]
pub struct DemoCredentials {
    username: Email,
    password: SecretString,
}

impl std::fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl DemoCredentials {
    #[must_use]
    pub const fn new(username: Email, password: SecretString) -> Self {
        Self { username, password }
    }

    #[must_use]
    pub const fn username(&self) -> &Email {
        &self.username
    }

    /// Check a login attempt.
    ///
    /// The email comparison ignores case; the password is compared exactly.
    ///
    /// # Errors
    ///
    /// See [`LoginError`].
    pub fn verify(&self, email: &str, password: &str) -> Result<Email, LoginError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let email = Email::parse(email)?;
        if !email.matches(&self.username) || password != self.password.expose_secret() {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(email)
    }
}

/// Mark the shopper as logged in and remember their email.
pub fn log_in<S: Storage + ?Sized>(storage: &mut S, email: &Email) {
    storage.set_item(keys::LOGGED_IN, "true".to_owned());
    storage.set_item(keys::USER_EMAIL, email.as_str().to_owned());
}

/// Forget the login flag and email.
pub fn log_out<S: Storage + ?Sized>(storage: &mut S) {
    storage.remove_item(keys::LOGGED_IN);
    storage.remove_item(keys::USER_EMAIL);
}

/// Whether the login flag is set.
#[must_use]
pub fn is_logged_in<S: Storage + ?Sized>(storage: &S) -> bool {
    storage.get_item(keys::LOGGED_IN).as_deref() == Some("true")
}

/// Email remembered from the last login.
#[must_use]
pub fn user_email<S: Storage + ?Sized>(storage: &S) -> Option<String> {
    storage.get_item(keys::USER_EMAIL)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn credentials() -> DemoCredentials {
        DemoCredentials::new(
            Email::parse("test@example.com").unwrap(),
            SecretString::from("test123"),
        )
    }

    #[test]
    fn test_verify_accepts_demo_credentials() {
        let email = credentials().verify("Test@Example.com", "test123").unwrap();
        assert_eq!(email.as_str(), "Test@Example.com");
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        assert!(matches!(
            credentials().verify("test@example.com", "wrongpassword123"),
            Err(LoginError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_email() {
        assert!(matches!(
            credentials().verify("invalid-email", "test123"),
            Err(LoginError::InvalidEmail(EmailError::InvalidAtSymbol))
        ));
    }

    #[test]
    fn test_verify_rejects_blank_fields() {
        assert!(matches!(
            credentials().verify("", ""),
            Err(LoginError::MissingCredentials)
        ));
        assert!(matches!(
            credentials().verify("test@example.com", ""),
            Err(LoginError::MissingCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_special_characters() {
        assert!(
            credentials()
                .verify("test<script>@example.com", "test123")
                .is_err()
        );
    }

    #[test]
    fn test_log_in_and_out() {
        let mut storage = MemoryStorage::new();
        assert!(!is_logged_in(&storage));

        log_in(&mut storage, credentials().username());
        assert!(is_logged_in(&storage));
        assert_eq!(user_email(&storage).as_deref(), Some("test@example.com"));

        log_out(&mut storage);
        assert!(!is_logged_in(&storage));
        assert!(user_email(&storage).is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", credentials());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test123"));
    }
}
