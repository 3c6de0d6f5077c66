use thiserror::Error;

use crate::config::ConfigError;
use crate::utils::messages::CatalogError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Translation catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
