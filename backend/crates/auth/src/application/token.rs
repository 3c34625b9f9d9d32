//! Token Issuer
//!
//! Signs and verifies HS256 session tokens carrying `{email, role, issued_at}`.
//! Tokens have no expiry claim and there is no revocation list.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use platform::secrets::SecretKeyProvider;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    account_role::AccountRole, email::Email, session_token::SessionToken,
};
use crate::error::AuthResult;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub role: AccountRole,
    pub issued_at: DateTime<Utc>,
}

pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Build from the provider's key for `purpose`
    pub fn from_provider(provider: &dyn SecretKeyProvider, purpose: &str) -> AuthResult<Self> {
        let key = provider.secret_key(purpose)?;
        Ok(Self::new(key.as_bytes()))
    }

    pub fn issue(
        &self,
        email: &Email,
        role: AccountRole,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<SessionToken> {
        let claims = SessionClaims {
            email: email.as_str().to_string(),
            role,
            issued_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(SessionToken::new(token))
    }

    /// Check the signature, then return the claims
    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        let data = decode::<SessionClaims>(token.trim(), &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}
