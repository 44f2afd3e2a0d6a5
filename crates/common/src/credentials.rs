//! Account credentials used by both signers.
//!
//! A [`CredentialProvider`] hands out the owner id and secret key. The
//! signers call [`require`] before every signature, so an empty value is
//! reported as [`SignError::MissingCredentials`] instead of producing a
//! request signed with a blank key.

use std::fmt;

use crate::error::SignError;

/// Environment variable holding the account owner id.
pub const OWNER_ID_ENV: &str = "LPL_OWNER_ID";
/// Environment variable holding the API secret key.
pub const SECRET_KEY_ENV: &str = "LPL_SECRET_KEY";

/// Source of the account identity and signing secret.
///
/// Implementations may read from static values, the environment, a config
/// file or a secret manager; they only need to be cheap to read repeatedly.
pub trait CredentialProvider: Send + Sync {
    /// The account owner id, injected into every signed message as `_owner`.
    fn owner_id(&self) -> &str;

    /// The raw HMAC key bytes.
    fn secret_key(&self) -> &[u8];
}

/// Borrow the owner id and secret from `provider`, rejecting empty values.
pub fn require(provider: &dyn CredentialProvider) -> Result<(&str, &[u8]), SignError> {
    let owner_id = provider.owner_id();
    if owner_id.is_empty() {
        return Err(SignError::MissingCredentials("owner id"));
    }
    let secret_key = provider.secret_key();
    if secret_key.is_empty() {
        return Err(SignError::MissingCredentials("secret key"));
    }
    Ok((owner_id, secret_key))
}

/// Owner id and secret key held in memory.
///
/// The secret never shows up in `Debug` output and the type is
/// not `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    owner_id: String,
    secret_key: Vec<u8>,
}

impl Credentials {
    pub fn new(owner_id: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Self {
        Self {
            owner_id: owner_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials from [`OWNER_ID_ENV`] and [`SECRET_KEY_ENV`].
    ///
    /// Unset variables become empty values, which are rejected at signing time.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(OWNER_ID_ENV).unwrap_or_default(),
            std::env::var(SECRET_KEY_ENV).unwrap_or_default(),
        )
    }

    /// Replace each field with the one from `other` when that one is non-empty.
    pub fn overlay(self, other: Credentials) -> Self {
        Self {
            owner_id: if other.owner_id.is_empty() {
                self.owner_id
            } else {
                other.owner_id
            },
            secret_key: if other.secret_key.is_empty() {
                self.secret_key
            } else {
                other.secret_key
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.owner_id.is_empty() && !self.secret_key.is_empty()
    }
}

impl CredentialProvider for Credentials {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("owner_id", &self.owner_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
