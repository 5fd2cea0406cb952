use std::env;

const DEFAULT_TABLE_NAME: &str = "rolegate-users";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Settings read from the Lambda environment at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub user_pool_id: String,
    /// Accept an X-User-Id header in place of the JWT `sub` claim. Local development only.
    pub allow_user_id_header: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup("TABLE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let user_pool_id = lookup("COGNITO_USER_POOL_ID")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("COGNITO_USER_POOL_ID"))?;

        let allow_user_id_header = lookup("ALLOW_USER_ID_HEADER")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        Ok(Self {
            table_name,
            user_pool_id,
            allow_user_id_header,
        })
    }
}
