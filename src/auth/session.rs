use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::Claims;
use crate::config::JwtConfig;
use crate::error::{RepoError, RepoResult};

/// The authenticated identity that scopes favorites and profile data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    pub owner_id: Uuid,
}

impl Session {
    pub fn new(owner_id: Uuid) -> Self {
        Self { owner_id }
    }

    /// Establishes the owner from an access token handed over by the sign-in flow.
    pub fn from_access_token(token: &str, cfg: &JwtConfig) -> RepoResult<Self> {
        let token = token
            .strip_prefix("Bearer ")
            .or_else(|| token.strip_prefix("bearer "))
            .unwrap_or(token);

        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&cfg.audience));
        validation.set_issuer(std::slice::from_ref(&cfg.issuer));
        let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());

        let data = decode::<Claims>(token, &decoding, &validation).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            RepoError::Unauthenticated("invalid or expired token".into())
        })?;

        if !data.claims.grants_session() {
            return Err(RepoError::Unauthenticated("access token required".into()));
        }

        let owner_id = data.claims.owner_id();
        debug!(%owner_id, "session established");
        Ok(Self::new(owner_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKind;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::{Duration, OffsetDateTime};

    fn cfg(issuer: &str, audience: &str) -> JwtConfig {
        JwtConfig {
            secret: "dev-secret".into(),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    fn sign(cfg: &JwtConfig, sub: Uuid, kind: TokenKind) -> String {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub,
            iat: now.unix_timestamp(),
            exp: (now + Duration::minutes(5)).unix_timestamp(),
            iss: cfg.issuer.clone(),
            aud: cfg.audience.clone(),
            kind,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .expect("sign token")
    }

    #[test]
    fn access_token_yields_owner() {
        let cfg = cfg("iss", "aud");
        let owner = Uuid::new_v4();
        let token = sign(&cfg, owner, TokenKind::Access);
        let session = Session::from_access_token(&token, &cfg).expect("valid token");
        assert_eq!(session.owner_id, owner);
    }

    #[test]
    fn accepts_bearer_prefix() {
        let cfg = cfg("iss", "aud");
        let owner = Uuid::new_v4();
        let token = format!("Bearer {}", sign(&cfg, owner, TokenKind::Access));
        assert_eq!(Session::from_access_token(&token, &cfg).unwrap().owner_id, owner);
    }

    #[test]
    fn rejects_refresh_token() {
        let cfg = cfg("iss", "aud");
        let token = sign(&cfg, Uuid::new_v4(), TokenKind::Refresh);
        let err = Session::from_access_token(&token, &cfg).unwrap_err();
        assert!(matches!(err, RepoError::Unauthenticated(_)));
    }

    #[test]
    fn rejects_wrong_issuer_or_audience() {
        let good = cfg("good-iss", "good-aud");
        let bad = cfg("bad-iss", "bad-aud");
        let token = sign(&good, Uuid::new_v4(), TokenKind::Access);
        let err = Session::from_access_token(&token, &bad).unwrap_err();
        assert!(matches!(err, RepoError::Unauthenticated(_)));
    }

    #[test]
    fn rejects_garbage() {
        let err = Session::from_access_token("not-a-jwt", &cfg("iss", "aud")).unwrap_err();
        assert!(matches!(err, RepoError::Unauthenticated(_)));
    }
}
