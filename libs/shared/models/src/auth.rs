use serde::{Deserialize, Serialize};

/// Claims carried by a Firebase ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseClaims {
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub exp: u64,
    pub iat: Option<u64>,
    pub auth_time: Option<u64>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

/// A principal whose token has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Per-request verification outcome attached by the identity middleware.
///
/// The middleware inserts this on every request it sees, so handlers behind
/// it can extract it unconditionally and decide what absence means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity(pub Option<Identity>);

impl RequestIdentity {
    pub fn email(&self) -> Option<&str> {
        self.0.as_ref().map(|identity| identity.email.as_str())
    }
}
