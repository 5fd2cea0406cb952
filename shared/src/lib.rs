pub mod types;
pub mod error;
pub mod config;
pub mod caller;
pub mod identity;
pub mod directory;
pub mod provisioning;
pub mod callable;

#[cfg(test)]
mod testing;

pub use provisioning::ProvisioningHandler;

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoClient;
use config::Config;
use directory::DynamoRoleDirectory;
use identity::CognitoIdentityProvider;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub provisioning: ProvisioningHandler,
}

impl AppState {
    pub fn new(config: Config, provisioning: ProvisioningHandler) -> Arc<Self> {
        Arc::new(Self {
            config,
            provisioning,
        })
    }

    /// Wire the Cognito and DynamoDB adapters into the provisioning handler.
    pub fn from_clients(
        config: Config,
        cognito_client: CognitoClient,
        dynamo_client: DynamoClient,
    ) -> Arc<Self> {
        let identity = Arc::new(CognitoIdentityProvider::new(
            cognito_client,
            config.user_pool_id.clone(),
        ));
        let directory = Arc::new(DynamoRoleDirectory::new(
            dynamo_client,
            config.table_name.clone(),
        ));
        Self::new(config, ProvisioningHandler::new(identity, directory))
    }
}
