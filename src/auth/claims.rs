//! Diagnostics over the access token's JWT payload.
//!
//! The signature is not verified: the values are only reported to help
//! diagnose app registrations that lack SMTP permissions.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::token::AccessToken;

pub const OUTLOOK_AUDIENCE: &str = "https://outlook.office365.com";
pub const SMTP_SEND_AS_APP_ROLE: &str = "SMTP.SendAsApp";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub appid: Option<String>,
    #[serde(default)]
    pub app_displayname: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub exp: Option<u64>,
}

impl TokenClaims {
    pub fn decode(token: &str) -> Option<Self> {
        let mut parts = token.split('.');
        let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn has_smtp_role(&self) -> bool {
        self.roles.iter().any(|role| role == SMTP_SEND_AS_APP_ROLE)
    }

    pub fn targets_outlook(&self) -> bool {
        self.aud
            .as_deref()
            .is_some_and(|aud| aud.trim_end_matches('/') == OUTLOOK_AUDIENCE)
    }

    pub fn expires_in(&self, now: SystemTime) -> Option<Duration> {
        let exp = UNIX_EPOCH.checked_add(Duration::from_secs(self.exp?))?;
        exp.duration_since(now).ok()
    }
}

/// Logs what the token grants. Never fails: opaque tokens are skipped.
pub fn inspect(token: &AccessToken) {
    let Some(claims) = token.claims() else {
        info!(length = token.len(), "access token acquired (opaque)");
        return;
    };

    info!(
        length = token.len(),
        aud = claims.aud.as_deref().unwrap_or("-"),
        tid = claims.tid.as_deref().unwrap_or("-"),
        appid = claims.appid.as_deref().unwrap_or("-"),
        app = claims.app_displayname.as_deref().unwrap_or("-"),
        roles = %claims.roles.join(","),
        expires_in_secs = claims.expires_in(SystemTime::now()).map(|left| left.as_secs()),
        "access token acquired"
    );

    if !claims.targets_outlook() {
        warn!(
            aud = claims.aud.as_deref().unwrap_or("-"),
            "access token audience is not {OUTLOOK_AUDIENCE}"
        );
    }
    if !claims.has_smtp_role() {
        warn!("access token has no {SMTP_SEND_AS_APP_ROLE} role; SMTP authentication will likely fail");
    }
}
