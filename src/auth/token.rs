use std::fmt;

use crate::auth::claims::TokenClaims;

/// Bearer token returned by the client-credentials grant.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_type: None,
            expires_in: None,
        }
    }

    pub fn with_metadata(mut self, token_type: Option<String>, expires_in: Option<u64>) -> Self {
        self.token_type = token_type;
        self.expires_in = expires_in;
        self
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn len(&self) -> usize {
        self.secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// Decodes the unverified JWT payload, if the token is a JWT.
    pub fn claims(&self) -> Option<TokenClaims> {
        TokenClaims::decode(&self.secret)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
