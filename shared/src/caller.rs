use lambda_http::{Request, RequestExt};

use crate::types::Caller;

/// Resolve the authenticated caller from the JWT authorizer `sub` claim.
/// API Gateway has already validated the token; an absent or blank claim means unauthenticated.
/// With `allow_header_override`, an X-User-Id header takes precedence (local development).
pub fn from_request(event: &Request, allow_header_override: bool) -> Option<Caller> {
    let from_header = allow_header_override
        .then(|| {
            event
                .headers()
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .flatten();

    let subject_id = from_header
        .or_else(|| {
            event
                .request_context_ref()
                .and_then(|ctx| ctx.authorizer())
                .and_then(|auth| auth.jwt.as_ref())
                .and_then(|jwt| jwt.claims.get("sub"))
                .map(|s| s.trim().to_string())
        })
        .filter(|s| !s.is_empty())?;

    Some(Caller { subject_id })
}
