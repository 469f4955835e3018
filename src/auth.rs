//! Bearer-token gate in front of the JSON-RPC dispatcher.
//!
//! `initialize` and anything under `notifications/` pass without a token.
//! Every other method, including unrecognized ones, needs
//! `Authorization: Bearer <token>`.

use crate::error::{AppError, Result};
use crate::protocol::methods;
use axum::http::HeaderValue;
use sha2::{Digest, Sha256};

pub struct AuthGate {
    /// SHA-256 of the full expected header value.
    expected: [u8; 32],
}

impl AuthGate {
    pub fn new(token: &str) -> Self {
        Self {
            expected: digest(format!("Bearer {}", token).as_bytes()),
        }
    }

    pub fn requires_auth(method: &str) -> bool {
        method != methods::INITIALIZE && !method.starts_with(methods::NOTIFICATION_PREFIX)
    }

    /// Exact match of the header against `Bearer <token>`.
    ///
    /// Compares fixed-length digests so the time taken does not depend on
    /// where the first differing byte is.
    pub fn verify(&self, header: Option<&str>) -> bool {
        let Some(header) = header else {
            return false;
        };
        let presented = digest(header.as_bytes());
        presented
            .iter()
            .zip(self.expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    pub fn authorize(&self, method: &str, header: Option<&HeaderValue>) -> Result<()> {
        if !Self::requires_auth(method) {
            return Ok(());
        }
        let header = header.and_then(|h| h.to_str().ok());
        if self.verify(header) {
            Ok(())
        } else {
            tracing::debug!(method, "Authorization failed");
            Err(AppError::Unauthorized)
        }
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_methods() {
        assert!(!AuthGate::requires_auth("initialize"));
        assert!(!AuthGate::requires_auth("notifications/initialized"));
        assert!(!AuthGate::requires_auth("notifications/cancelled"));
        assert!(AuthGate::requires_auth("tools/list"));
        assert!(AuthGate::requires_auth("tools/call"));
        assert!(AuthGate::requires_auth("resources/list"));
        assert!(AuthGate::requires_auth("notifications"));
    }

    #[test]
    fn test_verify_exact_match() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.verify(Some("Bearer s3cret")));
        assert!(!gate.verify(Some("Bearer s3cret ")));
        assert!(!gate.verify(Some("bearer s3cret")));
        assert!(!gate.verify(Some("s3cret")));
        assert!(!gate.verify(Some("Bearer other")));
        assert!(!gate.verify(Some("")));
        assert!(!gate.verify(None));
    }

    #[test]
    fn test_authorize_bypass_and_reject() {
        let gate = AuthGate::new("tok");
        let good = HeaderValue::from_static("Bearer tok");
        let bad = HeaderValue::from_static("Bearer nope");

        assert!(gate.authorize("initialize", None).is_ok());
        assert!(gate.authorize("notifications/initialized", Some(&bad)).is_ok());
        assert!(gate.authorize("tools/list", Some(&good)).is_ok());
        assert!(matches!(
            gate.authorize("tools/list", None),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            gate.authorize("tools/call", Some(&bad)),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            gate.authorize("bogus/method", None),
            Err(AppError::Unauthorized)
        ));
    }
}
