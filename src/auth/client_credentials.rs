use reqwest::StatusCode;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::{Credentials, TokenEndpoint};
use crate::error::{AppError, AppResult};

use super::token::AccessToken;

const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Acquires app-only tokens from the Microsoft identity platform.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    endpoint: TokenEndpoint,
}

impl Default for TokenClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenClient {
    pub fn new() -> Self {
        Self::with_endpoint(TokenEndpoint::default())
    }

    pub fn with_endpoint(endpoint: TokenEndpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Points the client at another authority, e.g. a local test listener.
    pub fn with_authority(authority: impl Into<String>) -> Self {
        Self::with_endpoint(TokenEndpoint {
            authority: authority.into(),
            ..TokenEndpoint::default()
        })
    }

    /// `{authority}/{tenant}/oauth2/v2.0/token`, with the tenant percent-encoded.
    pub fn token_url(&self, tenant_id: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.endpoint.authority)?;
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Token(format!(
                    "authority {} cannot carry a tenant path",
                    self.endpoint.authority
                ))
            })?
            .pop_if_empty()
            .extend([tenant_id, "oauth2", "v2.0", "token"]);
        Ok(url)
    }

    /// Runs the client-credentials grant and returns the access token.
    ///
    /// Any transport failure, non-2xx status, malformed body, or missing
    /// `access_token` is an error. Nothing is retried.
    pub async fn acquire_token(&self, credentials: &Credentials) -> AppResult<AccessToken> {
        let url = self.token_url(&credentials.tenant_id)?;
        debug!(
            %url,
            client_id = %credentials.client_id,
            scope = %self.endpoint.scope,
            "requesting client-credentials token"
        );

        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", self.endpoint.scope.as_str()),
            ("grant_type", CLIENT_CREDENTIALS_GRANT),
        ];

        let response = self
            .http
            .post(url)
            .header(CACHE_CONTROL, "no-cache")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "token endpoint responded");

        parse_token_body(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

fn parse_token_body(status: StatusCode, body: &str) -> AppResult<AccessToken> {
    if !status.is_success() {
        return Err(describe_failure(status, body));
    }

    let payload: OAuthTokenResponse = serde_json::from_str(body)?;
    match payload.access_token {
        Some(token) if !token.is_empty() => {
            let expires_in = payload.expires_in.as_ref().and_then(seconds);
            Ok(AccessToken::new(token).with_metadata(payload.token_type, expires_in))
        }
        Some(_) => Err(AppError::Token(
            "token endpoint returned an empty access_token".to_string(),
        )),
        None => match payload.error {
            Some(error) => Err(oauth_error(status, &error, payload.error_description)),
            None => Err(AppError::Token(
                "token response did not include an access_token".to_string(),
            )),
        },
    }
}

fn describe_failure(status: StatusCode, body: &str) -> AppError {
    if let Ok(OAuthErrorResponse {
        error: Some(error),
        error_description,
    }) = serde_json::from_str::<OAuthErrorResponse>(body)
    {
        return oauth_error(status, &error, error_description);
    }

    AppError::Token(format!("token request failed ({status}): {}", body.trim()))
}

fn oauth_error(status: StatusCode, error: &str, description: Option<String>) -> AppError {
    let description = description.unwrap_or_else(|| "no description".to_string());
    AppError::Token(format!(
        "token request failed ({status}): {error} ({description})"
    ))
}

// expires_in arrives as a number from v2.0 endpoints and as a string from v1.0.
fn seconds(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
