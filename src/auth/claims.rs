use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

/// Payload of a token minted by the identity provider. `sub` is the owner
/// whose favorites and profile the session may touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

impl Claims {
    pub fn owner_id(&self) -> Uuid {
        self.sub
    }

    /// Refresh tokens must never open a session.
    pub fn grants_session(&self) -> bool {
        self.kind == TokenKind::Access
    }
}
