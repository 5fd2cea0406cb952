use lambda_http::{http::StatusCode, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use crate::caller;
use crate::error::ProvisionError;
use crate::types::CreateUserWithRoleRequest;
use crate::AppState;

// Callable clients send {"data": {...}}; plain JSON clients send the fields directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum CallableBody {
    Wrapped { data: CreateUserWithRoleRequest },
    Bare(CreateUserWithRoleRequest),
}

/// Lenient body parsing: anything unreadable becomes an empty request so the
/// auth gates still run first and validation reports the missing fields.
pub(crate) fn parse_request(body: &Body) -> CreateUserWithRoleRequest {
    let body_str = match body {
        Body::Text(text) => text.as_str(),
        Body::Binary(bytes) => std::str::from_utf8(bytes).unwrap_or(""),
        Body::Empty => "",
    };

    if body_str.trim().is_empty() {
        return CreateUserWithRoleRequest::default();
    }

    match serde_json::from_str::<CallableBody>(body_str) {
        Ok(CallableBody::Wrapped { data }) => data,
        Ok(CallableBody::Bare(req)) => req,
        Err(e) => {
            tracing::warn!("Failed to parse request body: {}", e);
            CreateUserWithRoleRequest::default()
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(payload)?.into())
        .map_err(Box::new)?)
}

/// POST /createUserWithRole
pub async fn create_user_with_role(event: &Request, state: &AppState) -> Result<Response<Body>, Error> {
    tracing::info!("createUserWithRole invoked");

    let caller = caller::from_request(event, state.config.allow_user_id_header);
    let request = parse_request(event.body());

    match state.provisioning.provision_user(caller.as_ref(), request).await {
        Ok(created) => json_response(StatusCode::OK, &created),
        Err(e) => error_response(&e),
    }
}

pub fn error_response(err: &ProvisionError) -> Result<Response<Body>, Error> {
    json_response(err.status(), &err.to_response_body())
}
