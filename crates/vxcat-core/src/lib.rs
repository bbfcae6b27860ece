pub mod app_config;
pub mod brands;
pub mod config;
pub mod families;
pub mod specs;

pub use app_config::AppConfig;
pub use brands::{default_brands, load_brands, parse_brands, BrandsFile, CompatBrand};
pub use config::{load_app_config, load_app_config_from_env};
pub use families::{
    default_cable_lengths, load_families, parse_families, FamiliesFile, FamilyConfig, FamilyOptions,
};
pub use specs::{FormFactor, Media, SpecRecord, Speed, Technology, VariantOption};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[source] serde_yaml::Error),

    #[error("failed to read families file {path}: {source}")]
    FamiliesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse families file: {0}")]
    FamiliesFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
