//! Delegated credential handling

use chrono::{DateTime, Utc};
use std::fmt;

/// Short-lived access token set scoped to one target-account role
///
/// Owned exclusively by the stage that requested it and passed explicitly to
/// the remote-call client. Deliberately not `Clone` and not serializable: the
/// secret material must not outlive the stage that acquired it. The secret
/// fields are overwritten in place when the value is dropped, on every exit
/// path.
pub struct DelegatedCredential {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
    expires_at: DateTime<Utc>,
}

impl DelegatedCredential {
    pub fn new(
        access_key_id: String,
        secret_access_key: String,
        session_token: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            session_token,
            expires_at,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn scrub(&mut self) {
        for field in [
            &mut self.access_key_id,
            &mut self.secret_access_key,
            &mut self.session_token,
        ] {
            let blank = "\0".repeat(field.len());
            field.replace_range(.., &blank);
        }
    }
}

impl Drop for DelegatedCredential {
    fn drop(&mut self) {
        self.scrub();
    }
}

impl fmt::Debug for DelegatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedCredential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential() -> DelegatedCredential {
        DelegatedCredential::new(
            "AKIDEXAMPLE".to_string(),
            "secret".to_string(),
            "token".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = credential();
        let rendered = format!("{:?}", cred);
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("token"));
    }

    #[test]
    fn test_scrub_overwrites_in_place() {
        let mut cred = credential();
        cred.scrub();
        assert_eq!(cred.secret_access_key(), "\0".repeat(6));
        assert_eq!(cred.session_token(), "\0".repeat(5));
    }

    #[test]
    fn test_expiry() {
        let cred = credential();
        assert!(!cred.is_expired(Utc::now()));
        assert!(cred.is_expired(Utc::now() + Duration::hours(2)));
    }
}
