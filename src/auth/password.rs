use anyhow::{anyhow, Error};
use bcrypt::{hash, verify, DEFAULT_COST};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Deserialize)]
pub struct Password(SecretString);

impl Password {
    pub fn hash(&self) -> Result<String, Error> {
        hash(self.expose_secret(), DEFAULT_COST).map_err(|_| anyhow!("Could not hash password."))
    }

    pub fn new(secret: String) -> Self {
        Self(SecretString::new(secret))
    }

    /// Checks the password against a stored bcrypt hash. Malformed hashes never match.
    pub fn matches(&self, password_hash: &str) -> bool {
        verify(self.expose_secret(), password_hash).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.expose_secret().is_empty()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Eq for Password {}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl ExposeSecret<String> for Password {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

impl Serialize for Password {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.expose_secret().serialize(serializer)
    }
}
