//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the practice
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::WeeklySchedule;

use super::types::{CountriesConfig, CountryRuleTable, PracticeConfig};

const BUILTIN_COUNTRIES: &str = include_str!("../../config/countries.yaml");
const BUILTIN_PRACTICE: &str = include_str!("../../config/practice.yaml");

/// Loads and provides access to the practice configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── countries.yaml   # Country invoice rules and language map
/// └── practice.yaml    # Default schedule, invoicing, reminders, video links
/// ```
///
/// # Example
///
/// ```no_run
/// use practice_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Default country: {}", loader.countries().default_rule().name);
/// # Ok::<(), practice_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    practice: PracticeConfig,
    countries: CountryRuleTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A country rule does not compile
    /// - The default schedule violates its invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let countries = Self::load_yaml::<CountriesConfig>(&path.join("countries.yaml"))?;
        let practice = Self::load_yaml::<PracticeConfig>(&path.join("practice.yaml"))?;

        Self::from_parts(practice, countries)
    }

    /// Builds the configuration shipped with the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use practice_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.countries().default_rule().code, "SI");
    /// assert_eq!(loader.practice().invoicing.number_prefix, "INV");
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        let countries = Self::parse_yaml::<CountriesConfig>(BUILTIN_COUNTRIES, "<builtin>/countries.yaml")?;
        let practice = Self::parse_yaml::<PracticeConfig>(BUILTIN_PRACTICE, "<builtin>/practice.yaml")?;

        Self::from_parts(practice, countries)
    }

    fn from_parts(practice: PracticeConfig, countries: CountriesConfig) -> EngineResult<Self> {
        practice.default_schedule.validate()?;
        practice.reminders.validate()?;
        let countries = CountryRuleTable::from_config(countries)?;
        Ok(Self {
            practice,
            countries,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the practice-wide settings.
    pub fn practice(&self) -> &PracticeConfig {
        &self.practice
    }

    /// Returns the country invoice rules.
    pub fn countries(&self) -> &CountryRuleTable {
        &self.countries
    }

    /// Returns the schedule for providers who have not configured one.
    pub fn default_schedule(&self) -> &WeeklySchedule {
        &self.practice.default_schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.countries().rules().len(), 8);
        assert_eq!(loader.countries().default_rule().name, "Slovenia");
    }

    #[test]
    fn test_builtin_matches_directory() {
        let builtin = ConfigLoader::builtin().unwrap();
        let loaded = ConfigLoader::load(config_path()).unwrap();

        let codes = |l: &ConfigLoader| -> Vec<String> {
            l.countries().rules().iter().map(|r| r.code.clone()).collect()
        };
        assert_eq!(codes(&builtin), codes(&loaded));
        assert_eq!(builtin.default_schedule(), loaded.default_schedule());
    }

    #[test]
    fn test_supported_countries_and_vat_rates() {
        let loader = ConfigLoader::builtin().unwrap();
        let expected = [
            ("DE", "Germany", 19),
            ("ES", "Spain", 21),
            ("FR", "France", 20),
            ("IT", "Italy", 22),
            ("NL", "Netherlands", 21),
            ("PT", "Portugal", 23),
            ("SI", "Slovenia", 22),
            ("UK", "United Kingdom", 20),
        ];
        for (code, name, rate) in expected {
            let rule = loader.countries().get(code).unwrap();
            assert_eq!(rule.name, name);
            assert_eq!(rule.vat_rate, Decimal::from(rate), "VAT rate for {}", code);
        }
    }

    #[test]
    fn test_language_map_loaded() {
        let loader = ConfigLoader::builtin().unwrap();
        let countries = loader.countries();
        assert_eq!(countries.country_for_language("en").code, "UK");
        assert_eq!(countries.country_for_language("sl").code, "SI");
        assert_eq!(countries.country_for_language("DE").code, "DE");
        assert_eq!(countries.country_for_language("ja").code, "SI");
    }

    #[test]
    fn test_default_schedule_loaded() {
        let loader = ConfigLoader::builtin().unwrap();
        assert_eq!(loader.default_schedule(), &WeeklySchedule::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("countries.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_parse_error_reports_path() {
        let result = ConfigLoader::parse_yaml::<CountriesConfig>("countries: [", "bad.yaml");
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "bad.yaml"),
            _ => panic!("Expected ConfigParseError"),
        }
    }

    #[test]
    fn test_invalid_default_schedule_rejected() {
        let practice: PracticeConfig = serde_yaml::from_str(
            r#"
default_schedule:
  slotDurationMinutes: 0
  monday:    { enabled: true,  startTime: "09:00", endTime: "17:00" }
  tuesday:   { enabled: true,  startTime: "09:00", endTime: "17:00" }
  wednesday: { enabled: true,  startTime: "09:00", endTime: "17:00" }
  thursday:  { enabled: true,  startTime: "09:00", endTime: "17:00" }
  friday:    { enabled: true,  startTime: "09:00", endTime: "17:00" }
  saturday:  { enabled: false, startTime: "09:00", endTime: "17:00" }
  sunday:    { enabled: false, startTime: "09:00", endTime: "17:00" }
"#,
        )
        .unwrap();
        let countries: CountriesConfig = serde_yaml::from_str(BUILTIN_COUNTRIES).unwrap();

        let result = ConfigLoader::from_parts(practice, countries);
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_out_of_range_reminder_lead_rejected() {
        let practice: PracticeConfig =
            serde_yaml::from_str("reminders:\n  lead_hours: 9223372036854775807\n  interval_seconds: 3600\n")
                .unwrap();
        let countries: CountriesConfig = serde_yaml::from_str(BUILTIN_COUNTRIES).unwrap();

        let result = ConfigLoader::from_parts(practice, countries);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }
}
