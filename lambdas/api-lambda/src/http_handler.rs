use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use rolegate_shared::{callable, AppState};
use std::sync::Arc;

/// Main Lambda handler - routes requests to the provisioning endpoint
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("API Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        return Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST,OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type,Authorization,X-User-Id")
            .body(Body::Empty)
            .map_err(Box::new)?);
    }

    match (method, path.trim_end_matches('/')) {
        (&Method::POST, "/createUserWithRole") => {
            callable::create_user_with_role(&event, &state).await
        }
        (_, "/createUserWithRole") => json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        _ => json_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn json_error(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::json!({ "error": message }).to_string().into())
        .map_err(Box::new)?)
}
