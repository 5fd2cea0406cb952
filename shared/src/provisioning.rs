use std::sync::Arc;

use crate::directory::RoleDirectory;
use crate::error::{IdentityProviderError, ProvisionError};
use crate::identity::IdentityProvider;
use crate::types::{
    Caller, CreateUserWithRoleRequest, CreateUserWithRoleResponse, NewAccount, NewProfile, Role,
};

const CREATE_FAILED: &str = "An error occurred while creating the user.";

/// Admin-only account provisioning: authenticate, authorize, validate, create, persist.
pub struct ProvisioningHandler {
    identity: Arc<dyn IdentityProvider>,
    directory: Arc<dyn RoleDirectory>,
}

impl ProvisioningHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, directory: Arc<dyn RoleDirectory>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Provision a new account with a role. Each gate short-circuits the ones after it.
    ///
    /// Account creation and the profile write are not atomic: if the write fails the
    /// provider account is left in place without a profile and `Internal` is returned.
    pub async fn provision_user(
        &self,
        caller: Option<&Caller>,
        request: CreateUserWithRoleRequest,
    ) -> Result<CreateUserWithRoleResponse, ProvisionError> {
        let caller = caller.ok_or(ProvisionError::Unauthenticated)?;

        self.authorize(caller).await?;

        let (email, password, role) = validate(request)?;

        let account = NewAccount {
            email: email.clone(),
            password,
            email_verified: false,
            disabled: false,
        };

        let uid = match self.identity.create_account(account).await {
            Ok(uid) => uid,
            Err(IdentityProviderError::EmailAlreadyExists) => {
                tracing::warn!("Email already registered: {}", email);
                return Err(ProvisionError::AlreadyExists);
            }
            Err(e) => {
                tracing::error!("Error creating user {}: {:?}", email, e);
                return Err(ProvisionError::internal(CREATE_FAILED, e.to_string()));
            }
        };

        let profile = NewProfile {
            email: email.clone(),
            role,
        };
        if let Err(e) = self.directory.set_profile(&uid, profile).await {
            tracing::error!(
                "Error creating user {}: account {} created but role record not written: {:?}",
                email,
                uid,
                e
            );
            return Err(ProvisionError::internal(CREATE_FAILED, e.to_string()));
        }

        tracing::info!(
            "User {} ({}) created with role {} by {}",
            email,
            uid,
            role,
            caller.subject_id
        );

        Ok(CreateUserWithRoleResponse {
            uid,
            email,
            role,
            success: true,
        })
    }

    /// Missing profile and non-admin profile are both PermissionDenied.
    async fn authorize(&self, caller: &Caller) -> Result<(), ProvisionError> {
        let profile = self
            .directory
            .get_profile(&caller.subject_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load caller profile {}: {:?}", caller.subject_id, e);
                ProvisionError::internal("An error occurred while checking permissions.", e.to_string())
            })?;

        match profile {
            Some(profile) if profile.is_admin() => Ok(()),
            _ => {
                tracing::warn!("Caller {} is not an admin", caller.subject_id);
                Err(ProvisionError::PermissionDenied)
            }
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn validate(request: CreateUserWithRoleRequest) -> Result<(String, String, Role), ProvisionError> {
    let (Some(email), Some(password), Some(role)) = (
        present(request.email),
        present(request.password),
        present(request.role),
    ) else {
        return Err(ProvisionError::InvalidArgument(
            "The function must be called with email, password, and role.".to_string(),
        ));
    };

    let role = role
        .parse::<Role>()
        .map_err(|_| ProvisionError::InvalidArgument("Invalid role specified.".to_string()))?;

    Ok((email, password, role))
}
