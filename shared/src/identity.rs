use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::types::{AttributeType, MessageActionType};
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;

use crate::error::IdentityProviderError;
use crate::types::NewAccount;

/// Creates email/password accounts and hands back their subject id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<String, IdentityProviderError>;
}

/// Cognito user pool backed identity provider. Accounts use the email as username.
pub struct CognitoIdentityProvider {
    client: CognitoClient,
    user_pool_id: String,
}

impl CognitoIdentityProvider {
    pub fn new(client: CognitoClient, user_pool_id: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_id: user_pool_id.into(),
        }
    }

    /// Remove a user created earlier in the same call so the email stays free.
    async fn roll_back(&self, username: &str) {
        match self
            .client
            .admin_delete_user()
            .user_pool_id(&self.user_pool_id)
            .username(username)
            .send()
            .await
        {
            Ok(_) => tracing::warn!("Rolled back Cognito user {}", username),
            Err(e) => tracing::error!(
                "Failed to roll back Cognito user {}; account left behind: {}",
                username,
                DisplayErrorContext(&e)
            ),
        }
    }

    /// Steps after AdminCreateUser. Any failure here is followed by a rollback.
    async fn finish_account(&self, account: &NewAccount) -> Result<(), IdentityProviderError> {
        // AdminCreateUser leaves the user in FORCE_CHANGE_PASSWORD; make the password usable now.
        self.client
            .admin_set_user_password()
            .user_pool_id(&self.user_pool_id)
            .username(&account.email)
            .password(&account.password)
            .permanent(true)
            .send()
            .await
            .map_err(|e| provider_error("AdminSetUserPassword", e))?;

        if account.disabled {
            self.client
                .admin_disable_user()
                .user_pool_id(&self.user_pool_id)
                .username(&account.email)
                .send()
                .await
                .map_err(|e| provider_error("AdminDisableUser", e))?;
        }

        Ok(())
    }
}

fn attribute(name: &str, value: &str) -> Result<AttributeType, IdentityProviderError> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| IdentityProviderError::Provider(e.to_string()))
}

/// Log the full error chain; keep only the service message for the caller.
fn provider_error<E, R>(operation: &str, e: SdkError<E, R>) -> IdentityProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    tracing::error!("Cognito {} failed: {}", operation, DisplayErrorContext(&e));
    let message = match e.as_service_error() {
        Some(se) => se.message().or_else(|| se.code()).unwrap_or("service error").to_string(),
        None => e.to_string(),
    };
    IdentityProviderError::Provider(message)
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn create_account(&self, account: NewAccount) -> Result<String, IdentityProviderError> {
        tracing::info!("Creating Cognito user: {}", account.email);

        // Suppress the invitation email; the admin hands out credentials
        let created = self
            .client
            .admin_create_user()
            .user_pool_id(&self.user_pool_id)
            .username(&account.email)
            .user_attributes(attribute("email", &account.email)?)
            .user_attributes(attribute(
                "email_verified",
                if account.email_verified { "true" } else { "false" },
            )?)
            .message_action(MessageActionType::Suppress)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_username_exists_exception())
                {
                    IdentityProviderError::EmailAlreadyExists
                } else {
                    provider_error("AdminCreateUser", e)
                }
            })?;

        let subject_id = created
            .user()
            .and_then(|user| user.attributes().iter().find(|attr| attr.name() == "sub"))
            .and_then(|attr| attr.value())
            .map(|s| s.to_string());

        let result = match subject_id {
            Some(subject_id) => self.finish_account(&account).await.map(|_| subject_id),
            None => {
                tracing::error!("AdminCreateUser returned no sub for {}", account.email);
                Err(IdentityProviderError::Provider(
                    "created user has no sub attribute".to_string(),
                ))
            }
        };

        match result {
            Ok(subject_id) => {
                tracing::info!("Cognito user created: {} ({})", account.email, subject_id);
                Ok(subject_id)
            }
            Err(e) => {
                self.roll_back(&account.email).await;
                Err(e)
            }
        }
    }
}
