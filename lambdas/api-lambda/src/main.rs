use lambda_http::{run, service_fn, tracing, Error, Request};
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoClient;
use rolegate_shared::{config::Config, AppState};
use std::sync::Arc;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Initialize configuration and AWS clients once at startup
    let app_config = Config::from_env()?;
    let config = aws_config::load_from_env().await;

    tracing::info!(
        "Starting with table {} and user pool {}",
        app_config.table_name,
        app_config.user_pool_id
    );
    if app_config.allow_user_id_header {
        tracing::warn!("X-User-Id header override is enabled; do not use in production");
    }

    let state = AppState::from_clients(
        app_config,
        CognitoClient::new(&config),
        DynamoClient::new(&config),
    );

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
