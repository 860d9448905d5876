//! Configuration for the schema collector.
//!
//! ```
//! use graphql_config::{load_config_from_str, CollectorConfig};
//! use std::path::Path;
//!
//! let config = load_config_from_str("start: 10\nend: 20\n", Path::new("c.yml")).unwrap();
//! assert_eq!(config.start, 10);
//! assert_eq!(config.records, CollectorConfig::default().records);
//! ```

mod config;
mod error;
mod loader;

pub use config::{CollectorConfig, MergeConfig};
pub use error::{ConfigError, Result};
pub use graphql_merge::PoolPolicy;
pub use loader::{find_config, load_config, load_config_from_str, validate_config, CONFIG_FILES};
