pub mod aggregator;
pub mod config_parser;
pub mod report;
pub mod settings_store;
pub mod upload_db;

pub use aggregator::SupportAggregator;
pub use config_parser::{parse_configuration, ConfigValue, ParsedConfig};
