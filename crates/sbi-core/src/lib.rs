pub mod app_config;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod records;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, parse_country_list};
pub use error::ConfigError;
pub use reconcile::{load_reconcile_config, ReconcileConfig, SpecialBrand};
pub use records::BrandRecord;
