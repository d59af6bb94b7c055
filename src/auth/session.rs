//! Session marker validation and secret token generation.

use base64::{Engine as _, engine::general_purpose};
use rand::Rng;
use serde::Serialize;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

/// Sessions older than this are expired: 24 hours in milliseconds.
pub const SESSION_MAX_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// An authenticated admin session as minted by the login handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub issued_at: i64,
    pub token_value: String,
}

/// Raw session marker cookie values as read from a request.
///
/// `None` means the cookie was missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMarker {
    pub token: Option<String>,
    pub issued_at: Option<String>,
}

impl SessionMarker {
    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.issued_at.is_some()
    }
}

impl From<&Session> for SessionMarker {
    fn from(session: &Session) -> Self {
        SessionMarker {
            token: Some(session.token_value.clone()),
            issued_at: Some(session.issued_at.to_string()),
        }
    }
}

/// Outcome of one session check.
///
/// `Expired` is transient: whoever receives it must clear both cookies so the
/// next check reports `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Unauthenticated,
    Valid,
    Expired,
}

/// Judges session markers against the configured secret.
#[derive(Debug, Clone)]
pub struct SessionValidator {
    secret: String,
    max_age_ms: i64,
}

impl SessionValidator {
    pub fn new(secret: impl Into<String>) -> Self {
        SessionValidator {
            secret: secret.into(),
            max_age_ms: SESSION_MAX_AGE_MS,
        }
    }

    /// Classify a marker at time `now_ms`.
    ///
    /// The age check runs before the token check, so a stale marker is always
    /// reported (and cleared) even if its token is wrong. An issued-at value
    /// that is not an integer fails the age check. A timestamp in the future
    /// counts as age zero.
    pub fn validate(&self, marker: &SessionMarker, now_ms: i64) -> SessionStatus {
        let (Some(token), Some(issued_at)) = (&marker.token, &marker.issued_at) else {
            return SessionStatus::Unauthenticated;
        };

        let fresh = issued_at
            .parse::<i64>()
            .map(|issued_at| now_ms.saturating_sub(issued_at).max(0) < self.max_age_ms)
            .unwrap_or(false);
        if !fresh {
            return SessionStatus::Expired;
        }

        if *token != self.secret {
            return SessionStatus::Unauthenticated;
        }

        SessionStatus::Valid
    }

    /// Build the session for a successful login at `now_ms`.
    pub fn mint(&self, now_ms: i64) -> Session {
        Session {
            issued_at: now_ms,
            token_value: self.secret.clone(),
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> Result<i64, SystemTimeError> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

/// Generate a cryptographically random secret token.
///
/// Returns URL-safe base64 without padding (43 characters) from 32 random
/// bytes, so the value can be stored in a cookie as-is.
pub fn generate_secret_token() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "demo-token";
    const NOW: i64 = 1_760_000_000_000;
    const MINUTE_MS: i64 = 60 * 1000;
    const HOUR_MS: i64 = 60 * MINUTE_MS;

    fn marker(token: &str, issued_at: i64) -> SessionMarker {
        SessionMarker {
            token: Some(token.to_string()),
            issued_at: Some(issued_at.to_string()),
        }
    }

    #[test]
    fn test_no_cookies_is_unauthenticated() {
        let validator = SessionValidator::new(SECRET);
        assert_eq!(
            validator.validate(&SessionMarker::default(), NOW),
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn test_one_cookie_missing_is_unauthenticated() {
        let validator = SessionValidator::new(SECRET);
        let only_token = SessionMarker {
            token: Some(SECRET.to_string()),
            issued_at: None,
        };
        let only_issued = SessionMarker {
            token: None,
            issued_at: Some(NOW.to_string()),
        };
        assert_eq!(
            validator.validate(&only_token, NOW),
            SessionStatus::Unauthenticated
        );
        assert_eq!(
            validator.validate(&only_issued, NOW),
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn test_issued_one_minute_ago_is_valid() {
        let validator = SessionValidator::new(SECRET);
        let status = validator.validate(&marker(SECRET, NOW - MINUTE_MS), NOW);
        assert_eq!(status, SessionStatus::Valid);
    }

    #[test]
    fn test_issued_25_hours_ago_is_expired() {
        let validator = SessionValidator::new(SECRET);
        let status = validator.validate(&marker(SECRET, NOW - 25 * HOUR_MS), NOW);
        assert_eq!(status, SessionStatus::Expired);
    }

    #[test]
    fn test_expiry_boundary() {
        let validator = SessionValidator::new(SECRET);
        assert_eq!(
            validator.validate(&marker(SECRET, NOW - SESSION_MAX_AGE_MS + 1), NOW),
            SessionStatus::Valid
        );
        assert_eq!(
            validator.validate(&marker(SECRET, NOW - SESSION_MAX_AGE_MS), NOW),
            SessionStatus::Expired
        );
    }

    #[test]
    fn test_wrong_token_never_valid() {
        let validator = SessionValidator::new(SECRET);
        for age in [0, MINUTE_MS, HOUR_MS, 23 * HOUR_MS, 24 * HOUR_MS, 48 * HOUR_MS] {
            let status = validator.validate(&marker("forged-token", NOW - age), NOW);
            assert_ne!(status, SessionStatus::Valid, "age {} ms", age);
        }
        assert_eq!(
            validator.validate(&marker("forged-token", NOW - MINUTE_MS), NOW),
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn test_unparsable_issued_at_is_expired() {
        let validator = SessionValidator::new(SECRET);
        let garbage = SessionMarker {
            token: Some(SECRET.to_string()),
            issued_at: Some("yesterday".to_string()),
        };
        assert_eq!(validator.validate(&garbage, NOW), SessionStatus::Expired);
    }

    #[test]
    fn test_future_issued_at_counts_as_fresh() {
        let validator = SessionValidator::new(SECRET);
        let status = validator.validate(&marker(SECRET, NOW + HOUR_MS), NOW);
        assert_eq!(status, SessionStatus::Valid);
    }

    #[test]
    fn test_valid_session_is_idempotent() {
        let validator = SessionValidator::new(SECRET);
        let session = marker(SECRET, NOW - MINUTE_MS);
        assert_eq!(validator.validate(&session, NOW), SessionStatus::Valid);
        assert_eq!(validator.validate(&session, NOW), SessionStatus::Valid);
        assert_eq!(session, marker(SECRET, NOW - MINUTE_MS));
    }

    #[test]
    fn test_minted_session_validates() {
        let validator = SessionValidator::new(SECRET);
        let session = validator.mint(NOW);
        assert_eq!(session.token_value, SECRET);
        assert_eq!(session.issued_at, NOW);
        assert_eq!(
            validator.validate(&SessionMarker::from(&session), NOW + MINUTE_MS),
            SessionStatus::Valid
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Unauthenticated).unwrap(),
            "\"unauthenticated\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Valid).unwrap(),
            "\"valid\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Expired).unwrap(),
            "\"expired\""
        );
    }

    #[test]
    fn test_now_millis_is_after_2020() {
        assert!(now_millis().unwrap() > 1_577_836_800_000);
    }

    #[test]
    fn test_generate_secret_token() {
        let token = generate_secret_token();

        // URL-safe base64 of 32 bytes without padding is 43 characters
        assert_eq!(token.len(), 43);

        let decoded = general_purpose::URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(decoded.len(), 32);

        // Safe to use as a cookie value
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_secret_token(), generate_secret_token());
    }
}
