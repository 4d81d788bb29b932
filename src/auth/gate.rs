use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Validation};

use crate::auth::keys::KeyProvider;
use crate::auth::Claims;
use crate::config;

/// Terminal outcomes of the authorization check, one per failure path.
///
/// Every kind renders as HTTP 401; the code lets clients branch without
/// string-matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    AuthHeaderMissing,
    AuthHeaderMalformed,
    SigningKeyNotFound,
    TokenInvalid,
    TokenExpired,
    PermissionsClaimMissing,
    PermissionDenied,
}

impl AuthErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            AuthErrorKind::AuthHeaderMissing => "AUTH_HEADER_MISSING",
            AuthErrorKind::AuthHeaderMalformed => "AUTH_HEADER_MALFORMED",
            AuthErrorKind::SigningKeyNotFound => "SIGNING_KEY_NOT_FOUND",
            AuthErrorKind::TokenInvalid => "TOKEN_INVALID",
            AuthErrorKind::TokenExpired => "TOKEN_EXPIRED",
            AuthErrorKind::PermissionsClaimMissing => "PERMISSIONS_CLAIM_MISSING",
            AuthErrorKind::PermissionDenied => "PERMISSION_DENIED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorKind::AuthHeaderMissing => "authorization header is expected",
            AuthErrorKind::AuthHeaderMalformed => {
                "authorization header must be of the form 'Bearer <token>'"
            }
            AuthErrorKind::SigningKeyNotFound => "no signing key matches the token",
            AuthErrorKind::TokenInvalid => "token signature or claims are invalid",
            AuthErrorKind::TokenExpired => "token is expired",
            AuthErrorKind::PermissionsClaimMissing => "permissions claim missing from token",
            AuthErrorKind::PermissionDenied => "permission not granted",
        }
    }
}

/// Run the full authorization check for one request, in order: header
/// presence, bearer shape, key lookup, signature and claim validation,
/// permissions claim presence, required permission membership.
///
/// Single pass, no retries. Returns the decoded claims on success.
pub async fn authorize(
    headers: &HeaderMap,
    required_permission: &str,
    keys: &KeyProvider,
) -> Result<Claims, AuthErrorKind> {
    let token = bearer_token(headers)?;

    let header = decode_header(token).map_err(|_| AuthErrorKind::TokenInvalid)?;
    let resolved = keys.resolve(header.kid.as_deref()).await?;

    let mut validation = Validation::new(resolved.algorithm);
    let auth = &config::config().auth;
    if let Some(iss) = &auth.issuer {
        validation.set_issuer(&[iss]);
    }
    if let Some(aud) = &auth.audience {
        validation.set_audience(&[aud]);
    }

    let claims = decode::<Claims>(token, &resolved.key, &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthErrorKind::TokenExpired,
            _ => AuthErrorKind::TokenInvalid,
        })?
        .claims;

    let permissions =
        claims.permissions.as_ref().ok_or(AuthErrorKind::PermissionsClaimMissing)?;

    if !permissions.iter().any(|p| p == required_permission) {
        return Err(AuthErrorKind::PermissionDenied);
    }

    Ok(claims)
}

/// Header presence is checked strictly before token content: an absent
/// header is always `AuthHeaderMissing`, whatever the token would have been.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthErrorKind> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthErrorKind::AuthHeaderMissing)?;
    let value = header.to_str().map_err(|_| AuthErrorKind::AuthHeaderMalformed)?;

    // Exactly two space-separated parts, the first literally "Bearer"
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AuthErrorKind::AuthHeaderMalformed);
    }
    Ok(parts[1])
}
