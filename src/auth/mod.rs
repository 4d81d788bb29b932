pub mod gate;
pub mod keys;
pub mod policy;

use serde::{Deserialize, Serialize};

pub use gate::{authorize, AuthErrorKind};
pub use keys::KeyProvider;
pub use policy::{bar_policy_middleware, required_permission};

/// Decoded payload of a bearer token.
///
/// Issuer/audience/expiry are validated by `jsonwebtoken` during decode;
/// only the fields the handlers read are kept here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    /// Permission strings granted by the identity provider. Absence of the
    /// claim itself is a token misconfiguration, not a denial.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}
