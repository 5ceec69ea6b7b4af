//! Admission credentials: the one-time token and its issuer.
//!
//! The token is the sole credential presented at the gate — there is no
//! secondary authentication at the scanner — so it must be unguessable
//! across the event's lifetime. Tokens carry 128 bits of CSPRNG entropy,
//! making collisions and brute-force guessing negligible over the code
//! budget of a single event.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of random bytes behind each token (hex-encoded on the wire).
const TOKEN_BYTES: usize = 16;

/// Opaque one-time admission token.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
///
/// # Examples
/// ```
/// use guichet::domain::Token;
///
/// let token = Token::new("3f7a1c9e").expect("valid token");
/// assert_eq!(token.as_str(), "3f7a1c9e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

/// Validation errors returned by [`Token::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenValidationError {
    /// Token is empty after trimming whitespace.
    #[error("admission token must not be empty")]
    Empty,
    /// Token contains leading or trailing whitespace.
    #[error("admission token must not contain surrounding whitespace")]
    ContainsWhitespace,
}

impl Token {
    /// Validate and construct a [`Token`] from caller-supplied input.
    pub fn new(value: impl Into<String>) -> Result<Self, TokenValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TokenValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(TokenValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Draw a fresh token from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Borrow the underlying token as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Token {
    type Error = TokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Token> for String {
    fn from(value: Token) -> Self {
        value.0
    }
}

/// Identifier and credential pair issued once per registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    /// Stable internal identifier, never reused.
    pub id: Uuid,
    /// One-time redemption credential.
    pub token: Token,
}

impl IssuedCredentials {
    /// Issue a fresh identifier/token pair from cryptographically strong
    /// randomness.
    pub fn issue() -> Self {
        Self {
            id: Uuid::new_v4(),
            token: Token::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_tokens_are_hex_of_expected_length() {
        let token = Token::generate();
        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn issued_credentials_do_not_repeat() {
        let mut tokens = HashSet::new();
        let mut ids = HashSet::new();
        for _ in 0..64 {
            let creds = IssuedCredentials::issue();
            assert!(tokens.insert(creds.token));
            assert!(ids.insert(creds.id));
        }
    }

    #[test]
    fn rejects_empty_and_padded_tokens() {
        assert_eq!(Token::new(""), Err(TokenValidationError::Empty));
        assert_eq!(Token::new("  "), Err(TokenValidationError::Empty));
        assert_eq!(
            Token::new(" abc123 "),
            Err(TokenValidationError::ContainsWhitespace)
        );
    }

    #[test]
    fn round_trips_through_serde() {
        let token = Token::generate();
        let raw = serde_json::to_string(&token).expect("serializes");
        let back: Token = serde_json::from_str(&raw).expect("deserializes");
        assert_eq!(back, token);
    }
}
