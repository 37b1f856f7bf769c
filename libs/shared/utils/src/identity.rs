use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::{header::CACHE_CONTROL, Client};
use tokio::sync::RwLock;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{FirebaseClaims, Identity};

const DEFAULT_KEY_TTL: Duration = Duration::from_secs(60 * 60);

/// Turns a bearer token into a verified principal.
///
/// Implementations swallow the failure reason: callers only learn whether an
/// identity is present.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Option<Identity>;
}

struct CachedKeys {
    keys: JwkSet,
    expires_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now()
    }

    fn key(&self, kid: &str) -> Result<DecodingKey, String> {
        let jwk = self
            .keys
            .find(kid)
            .ok_or_else(|| format!("No signing key with id {}", kid))?;
        DecodingKey::from_jwk(jwk).map_err(|e| format!("Unusable signing key: {}", e))
    }
}

/// Verifies Firebase ID tokens against Google's published signing keys.
pub struct FirebaseVerifier {
    client: Client,
    project_id: String,
    jwks_url: String,
    cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_jwks_url(&config.firebase.project_id, &config.firebase_jwks_url)
    }

    pub fn with_jwks_url(project_id: &str, jwks_url: &str) -> Self {
        Self {
            client: Client::new(),
            project_id: project_id.to_string(),
            jwks_url: jwks_url.to_string(),
            cache: RwLock::new(None),
        }
    }

    pub async fn verify_token(&self, token: &str) -> Result<Identity, String> {
        if self.project_id.is_empty() {
            return Err("Firebase project is not configured".to_string());
        }

        let header = decode_header(token).map_err(|e| format!("Invalid token header: {}", e))?;
        if header.alg != Algorithm::RS256 {
            return Err(format!("Unexpected signing algorithm {:?}", header.alg));
        }
        let kid = header.kid.ok_or_else(|| "Token has no key id".to_string())?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", self.project_id)]);

        let claims = decode::<FirebaseClaims>(token, &key, &validation)
            .map_err(|e| format!("Token rejected: {}", e))?
            .claims;

        if claims.sub.is_empty() {
            return Err("Token has an empty subject".to_string());
        }

        let email = claims
            .email
            .ok_or_else(|| "Token carries no email claim".to_string())?;

        debug!("Token verified for user: {}", claims.sub);
        Ok(Identity {
            uid: claims.sub,
            email,
        })
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|cached| cached.is_fresh()) {
                return cached.key(kid);
            }
        }

        // Keys are only refetched once the published max-age has run out.
        let fresh = self.fetch_keys().await?;
        let key = fresh.key(kid);

        *self.cache.write().await = Some(fresh);
        key
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, String> {
        debug!("Fetching signing keys from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| format!("Key endpoint unreachable: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Key endpoint returned {}", response.status()));
        }

        let ttl = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let keys = response
            .json::<JwkSet>()
            .await
            .map_err(|e| format!("Invalid key set: {}", e))?;

        Ok(CachedKeys {
            keys,
            expires_at: Instant::now() + ttl,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Option<Identity> {
        match self.verify_token(token).await {
            Ok(identity) => Some(identity),
            Err(reason) => {
                debug!("Bearer token not accepted: {}", reason);
                None
            }
        }
    }
}

fn max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|seconds| seconds.parse().ok())
        .map(Duration::from_secs)
}
