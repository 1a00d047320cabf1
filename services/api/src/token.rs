//! services/api/src/token.rs
//!
//! Issues and verifies the signed, self-contained session tokens.
//!
//! A token is an HS256 JWT carrying the holder's identity and an absolute
//! expiry exactly one hour after issuance. There is no server-side session
//! table and no revocation list: logout only discards the client's copy, and
//! a copied token stays valid until its natural expiry. The short TTL is what
//! makes that acceptable.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mindgarden_core::domain::Identity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed token validity window: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The user id.
    sub: Uuid,
    username: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a process-wide shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The default 60s leeway would blur the expiry boundary.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a token for `identity`, expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    fn issue_at(
        &self,
        identity: &Identity,
        issued_at: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verifies signature and expiry, failing closed.
    ///
    /// Structural corruption, a signature mismatch, and an expired token all
    /// collapse to `None`; the caller cannot tell them apart and does not
    /// need to.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).ok()?;
        Some(Identity {
            id: data.claims.sub,
            username: data.claims.username,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
        }
    }

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn issued_token_verifies_to_the_same_identity() {
        let svc = service();
        let who = identity();
        let token = svc.issue(&who).unwrap();
        assert_eq!(svc.verify(&token), Some(who));
    }

    #[test]
    fn token_is_valid_just_before_expiry_and_dead_just_after() {
        let svc = service();
        let who = identity();

        let fifty_nine_min_ago = Utc::now().timestamp() - 59 * 60;
        let token = svc.issue_at(&who, fifty_nine_min_ago).unwrap();
        assert!(svc.verify(&token).is_some());

        let sixty_one_min_ago = Utc::now().timestamp() - 61 * 60;
        let token = svc.issue_at(&who, sixty_one_min_ago).unwrap();
        assert!(svc.verify(&token).is_none());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let token = svc.issue(&identity()).unwrap();

        // Flip a character in the payload segment.
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert!(svc.verify(&tampered).is_none());
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let token = TokenService::new("other-secret").issue(&identity()).unwrap();
        assert!(service().verify(&token).is_none());
    }

    #[test]
    fn garbage_is_rejected_without_panicking() {
        assert!(service().verify("not.a.token").is_none());
        assert!(service().verify("").is_none());
    }
}
