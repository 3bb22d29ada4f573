//! Bearer-token capability.
//!
//! The pipeline never acquires or refreshes credentials itself; it is
//! handed an already-valid token through the environment and presents it
//! on every billing API call. The token is an explicit capability object
//! passed into [`crate::RestClient`], not process-global state.

use std::fmt;

use crate::error::BillingError;

/// Environment variable the token is read from.
pub const TOKEN_ENV_VAR: &str = "CLOUDSPEND_BILLING_TOKEN";

/// An opaque bearer token for the billing API.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Wraps an explicit token value.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Authorization`] when the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, BillingError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BillingError::Authorization(
                "Empty bearer token".to_string(),
            ));
        }
        Ok(Self { token })
    }

    /// Reads the token from [`TOKEN_ENV_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Authorization`] when the variable is unset
    /// or empty.
    pub fn from_env() -> Result<Self, BillingError> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(value) => Self::new(value),
            Err(_) => Err(BillingError::Authorization(format!(
                "{TOKEN_ENV_VAR} is not set"
            ))),
        }
    }

    /// Returns the value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// The token must never end up in logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let token = BearerToken::new("abc123").unwrap();
        assert_eq!(token.header_value(), "Bearer abc123");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(BearerToken::new("").is_err());
        assert!(BearerToken::new("   ").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = BearerToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
