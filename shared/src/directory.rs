use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;

use crate::error::DirectoryError;
use crate::types::{NewProfile, ProfileRecord};

/// Document store of role-bearing profiles, keyed by subject id.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn get_profile(&self, subject_id: &str) -> Result<Option<ProfileRecord>, DirectoryError>;

    /// Writes (or overwrites) the profile; the store assigns `created_at`.
    async fn set_profile(&self, subject_id: &str, profile: NewProfile) -> Result<(), DirectoryError>;
}

pub struct DynamoRoleDirectory {
    client: DynamoClient,
    table_name: String,
}

impl DynamoRoleDirectory {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn user_key(subject_id: &str) -> String {
    format!("USER#{}", subject_id)
}

/// Log the full error chain; keep only the service message for the caller.
fn request_error<E, R>(operation: &str, e: SdkError<E, R>) -> DirectoryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    tracing::error!("DynamoDB {} failed: {}", operation, DisplayErrorContext(&e));
    let message = match e.as_service_error() {
        Some(se) => se.message().or_else(|| se.code()).unwrap_or("service error").to_string(),
        None => e.to_string(),
    };
    DirectoryError::Request(message)
}

#[async_trait]
impl RoleDirectory for DynamoRoleDirectory {
    async fn get_profile(&self, subject_id: &str) -> Result<Option<ProfileRecord>, DirectoryError> {
        let pk = user_key(subject_id);

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk.clone()))
            .key("SK", AttributeValue::S(pk))
            .send()
            .await
            .map_err(|e| request_error("GetItem", e))?;

        let Some(item) = result.item() else {
            return Ok(None);
        };

        let string_attr = |name: &str| {
            item.get(name)
                .and_then(|v| v.as_s().ok())
                .map(|s| s.to_string())
        };

        Ok(Some(ProfileRecord {
            subject_id: subject_id.to_string(),
            email: string_attr("email"),
            role: string_attr("role").unwrap_or_default(),
            created_at: string_attr("created_at"),
        }))
    }

    async fn set_profile(&self, subject_id: &str, profile: NewProfile) -> Result<(), DirectoryError> {
        let pk = user_key(subject_id);
        let now = chrono::Utc::now().to_rfc3339();

        // PK=USER#<sub>, SK=USER#<sub>
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(pk.clone()))
            .item("SK", AttributeValue::S(pk))
            .item("email", AttributeValue::S(profile.email))
            .item("role", AttributeValue::S(profile.role.as_str().to_string()))
            .item("created_at", AttributeValue::S(now))
            .send()
            .await
            .map_err(|e| request_error("PutItem", e))?;

        Ok(())
    }
}
