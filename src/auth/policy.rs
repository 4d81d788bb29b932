use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::auth::gate;
use crate::error::ApiError;
use crate::state::AppState;

/// Declarative route policy: (method, route pattern) -> required permission.
///
/// Routes with no entry are public. The patterns are axum route templates,
/// matched against `MatchedPath` so path parameters compare correctly.
const POLICY: &[(&str, &str, &str)] = &[
    ("GET", "/bar/drinks-detail", "get:drinks-detail"),
    ("POST", "/bar/drinks", "post:drinks"),
    ("PATCH", "/bar/drinks/:id", "patch:drinks"),
    ("DELETE", "/bar/drinks/:id", "delete:drinks"),
];

pub fn required_permission(method: &Method, route: &str) -> Option<&'static str> {
    POLICY
        .iter()
        .find(|(m, r, _)| *m == method.as_str() && *r == route)
        .map(|(_, _, permission)| *permission)
}

/// Runs the auth gate before any protected bar handler executes. Decoded
/// claims are stashed in request extensions for handlers that want them.
pub async fn bar_policy_middleware(
    State(state): State<AppState>,
    matched_path: MatchedPath,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(permission) = required_permission(request.method(), matched_path.as_str()) {
        let claims = gate::authorize(request.headers(), permission, &state.keys).await?;
        request.extensions_mut().insert(claims);
    }

    Ok(next.run(request).await)
}
