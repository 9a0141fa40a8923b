//! Configuration loading and management for the Practice Engine.
//!
//! This module loads the country invoice rules and practice-wide defaults
//! from YAML files, or from the copies embedded in the crate.
//!
//! # Example
//!
//! ```no_run
//! use practice_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Supported countries: {}", config.countries().rules().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CountriesConfig, CountryInvoiceRule, CountryRuleConfig, CountryRuleTable, InvoicingConfig,
    PracticeConfig, ReminderConfig, VideoConfig,
};
