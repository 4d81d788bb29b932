use std::collections::HashMap;

use jsonwebtoken::{Algorithm, DecodingKey};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::gate::AuthErrorKind;
use crate::config::AuthConfig;

/// A verification key resolved for one token
#[derive(Clone)]
pub struct ResolvedKey {
    pub key: DecodingKey,
    pub algorithm: Algorithm,
}

/// Identity-provider seam: resolves the key id in a token header to a
/// verification key.
///
/// With a JWKS URL configured, keys come from the provider's published
/// key set (RS256) and are cached after the first fetch. Otherwise a
/// single shared HS256 secret is used, which is the dev and test mode.
pub enum KeyProvider {
    Local {
        key_id: String,
        key: DecodingKey,
    },
    Remote {
        jwks_url: String,
        http: reqwest::Client,
        cache: RwLock<HashMap<String, DecodingKey>>,
    },
}

/// One entry of a JWKS document
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

impl KeyProvider {
    pub fn from_config(auth: &AuthConfig) -> Self {
        match &auth.jwks_url {
            Some(url) => KeyProvider::Remote {
                jwks_url: url.clone(),
                http: reqwest::Client::new(),
                cache: RwLock::new(HashMap::new()),
            },
            None => KeyProvider::Local {
                key_id: auth.key_id.clone(),
                key: DecodingKey::from_secret(auth.secret.as_bytes()),
            },
        }
    }

    /// Resolve the key for a token's `kid`. A token without a kid matches
    /// the local key; remote tokens must name one.
    pub async fn resolve(&self, kid: Option<&str>) -> Result<ResolvedKey, AuthErrorKind> {
        match self {
            KeyProvider::Local { key_id, key } => match kid {
                None => Ok(ResolvedKey { key: key.clone(), algorithm: Algorithm::HS256 }),
                Some(k) if k == key_id => {
                    Ok(ResolvedKey { key: key.clone(), algorithm: Algorithm::HS256 })
                }
                Some(_) => Err(AuthErrorKind::SigningKeyNotFound),
            },
            KeyProvider::Remote { jwks_url, http, cache } => {
                let kid = kid.ok_or(AuthErrorKind::SigningKeyNotFound)?;

                if let Some(key) = cache.read().await.get(kid) {
                    return Ok(ResolvedKey { key: key.clone(), algorithm: Algorithm::RS256 });
                }

                // Cache miss: refresh the whole set once, then retry the lookup
                let fetched = fetch_jwks(http, jwks_url).await?;
                let mut cache = cache.write().await;
                cache.extend(fetched);
                cache
                    .get(kid)
                    .map(|key| ResolvedKey { key: key.clone(), algorithm: Algorithm::RS256 })
                    .ok_or(AuthErrorKind::SigningKeyNotFound)
            }
        }
    }
}

async fn fetch_jwks(
    http: &reqwest::Client,
    url: &str,
) -> Result<HashMap<String, DecodingKey>, AuthErrorKind> {
    let set: JwkSet = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            tracing::error!("JWKS fetch from {} failed: {}", url, e);
            AuthErrorKind::SigningKeyNotFound
        })?
        .json()
        .await
        .map_err(|e| {
            tracing::error!("JWKS document from {} unparseable: {}", url, e);
            AuthErrorKind::SigningKeyNotFound
        })?;

    let mut keys = HashMap::new();
    for jwk in set.keys {
        if jwk.kty != "RSA" {
            continue;
        }
        let (Some(n), Some(e)) = (&jwk.n, &jwk.e) else { continue };
        match DecodingKey::from_rsa_components(n, e) {
            Ok(key) => {
                keys.insert(jwk.kid, key);
            }
            Err(err) => tracing::error!("skipping malformed JWK {}: {}", jwk.kid, err),
        }
    }
    Ok(keys)
}
