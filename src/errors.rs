use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    /// Insert attempted with a device code or user code that already exists.
    #[error("device grant already exists for device code {device_code} or user code {user_code}")]
    #[diagnostic(code(apsis::conflict))]
    Conflict {
        device_code: String,
        user_code: String,
    },

    /// Update targeted a user code with no backing record.
    #[error("no device grant found for user code {user_code}")]
    #[diagnostic(code(apsis::not_found))]
    NotFound { user_code: String },

    #[error("Serialization error: {0}")]
    #[diagnostic(code(apsis::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    #[diagnostic(code(apsis::db))]
    Db(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    #[diagnostic(code(apsis::config))]
    Config(#[from] config::ConfigError),
}
