use rocket::request::{FromRequest, Outcome, Request};

use crate::config::AppConfig;

/// Captures the `X-Admin-Key` header. The guard itself never fails —
/// validation happens in the handler via [`check_key`] so the response
/// can distinguish "no key configured" from "wrong key".
pub struct AdminKey(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminKey {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let key = request
            .headers()
            .get_one("X-Admin-Key")
            .unwrap_or("")
            .to_string();
        Outcome::Success(AdminKey(key))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GateError {
    /// The server has no expected key at all. Nothing the client sends
    /// can succeed until the operator sets one.
    Unconfigured,
    /// Key absent or mismatched.
    Unauthorized,
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateError::Unconfigured => write!(f, "ADMIN_KEY is not configured"),
            GateError::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

/// Pure gate check: no side effects, no sessions, no rate limiting.
/// A deliberate single-shared-secret design — documented limitation.
pub fn check_key(config: &AppConfig, supplied: &str) -> Result<(), GateError> {
    if config.admin_key.is_empty() {
        return Err(GateError::Unconfigured);
    }
    if !constant_time_eq(supplied.as_bytes(), config.admin_key.as_bytes()) {
        return Err(GateError::Unauthorized);
    }
    Ok(())
}

/// Constant-time comparison to prevent timing attacks on the admin key.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
