pub mod config;
pub mod gateway;
pub mod keyword_store;
pub mod validation;

pub use config::ConfigError;
pub use gateway::GatewayError;
pub use keyword_store::KeywordStoreError;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    KeywordStore(#[from] KeywordStoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
