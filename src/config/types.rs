//! Configuration types for the practice engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the compiled
//! [`CountryRuleTable`] built from them.

use std::collections::BTreeMap;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::WeeklySchedule;

/// Generic IBAN shape: country, check digits, then the account part.
const IBAN_SHAPE: &str = "^[A-Z]{2}[0-9]{2}[A-Z0-9]+$";

/// BIC shape: institution, country, location, optional branch.
const BIC_SHAPE: &str = "^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}(?:[A-Z0-9]{3})?$";

/// A country entry as written in `countries.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRuleConfig {
    /// Display name of the country.
    pub name: String,
    /// Marks the fallback country for unsupported codes.
    #[serde(default)]
    pub default: bool,
    /// Tax number label.
    pub tax_label: String,
    /// Tax number pattern (unanchored).
    pub tax_pattern: String,
    /// Tax number example.
    pub tax_example: String,
    /// VAT number label.
    pub vat_label: String,
    /// VAT number pattern (unanchored).
    pub vat_pattern: String,
    /// VAT number example.
    pub vat_example: String,
    /// Country-specific IBAN pattern (unanchored).
    #[serde(default)]
    pub iban_pattern: Option<String>,
    /// IBAN example.
    pub iban_example: String,
    /// Default VAT rate in percent.
    pub vat_rate: Decimal,
}

/// `countries.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CountriesConfig {
    /// Map of country code to rule.
    pub countries: BTreeMap<String, CountryRuleConfig>,
    /// Map of interface language code to country code.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

/// Invoice number settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoicingConfig {
    /// Prefix of issued invoice numbers.
    pub number_prefix: String,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            number_prefix: "INV".to_string(),
        }
    }
}

/// Appointment reminder settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReminderConfig {
    /// How far ahead of an appointment the reminder goes out.
    pub lead_hours: i64,
    /// Polling interval of the reminder loop.
    pub interval_seconds: u64,
}

impl ReminderConfig {
    /// Longest supported reminder lead time, one year.
    pub const MAX_LEAD_HOURS: i64 = 8760;
    /// Longest supported polling interval, one day.
    pub const MAX_INTERVAL_SECONDS: u64 = 86_400;

    /// Checks that the lead time and polling interval are in range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(0..=Self::MAX_LEAD_HOURS).contains(&self.lead_hours) {
            return Err(EngineError::InvalidConfig {
                field: "reminders.lead_hours".to_string(),
                message: format!("must be between 0 and {}", Self::MAX_LEAD_HOURS),
            });
        }
        if !(1..=Self::MAX_INTERVAL_SECONDS).contains(&self.interval_seconds) {
            return Err(EngineError::InvalidConfig {
                field: "reminders.interval_seconds".to_string(),
                message: format!("must be between 1 and {}", Self::MAX_INTERVAL_SECONDS),
            });
        }
        Ok(())
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            lead_hours: 24,
            interval_seconds: 3600,
        }
    }
}

/// Video-call link settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoConfig {
    /// Base URL of generated meeting links.
    pub base_url: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://meet.google.com".to_string(),
        }
    }
}

/// `practice.yaml` file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PracticeConfig {
    /// Schedule used for providers who have not configured one.
    #[serde(default)]
    pub default_schedule: WeeklySchedule,
    /// Invoice numbering.
    #[serde(default)]
    pub invoicing: InvoicingConfig,
    /// Reminder loop.
    #[serde(default)]
    pub reminders: ReminderConfig,
    /// Meeting links.
    #[serde(default)]
    pub video: VideoConfig,
}

/// A compiled, immutable invoice rule for one country.
#[derive(Debug, Clone)]
pub struct CountryInvoiceRule {
    /// Upper-case country code, e.g. "SI".
    pub code: String,
    /// Display name.
    pub name: String,
    /// Tax number label.
    pub tax_label: String,
    /// Tax number example.
    pub tax_example: String,
    /// VAT number label.
    pub vat_label: String,
    /// VAT number example.
    pub vat_example: String,
    /// IBAN example.
    pub iban_example: String,
    /// Default VAT rate in percent.
    pub vat_rate: Decimal,
    tax_pattern: Regex,
    vat_pattern: Regex,
    iban_pattern: Option<Regex>,
}

impl CountryInvoiceRule {
    fn compile(code: &str, config: CountryRuleConfig) -> EngineResult<Self> {
        let iban_pattern = config
            .iban_pattern
            .as_deref()
            .map(|pattern| compile_full_match(code, "iban_pattern", pattern))
            .transpose()?;

        Ok(Self {
            code: code.to_string(),
            tax_pattern: compile_full_match(code, "tax_pattern", &config.tax_pattern)?,
            vat_pattern: compile_full_match(code, "vat_pattern", &config.vat_pattern)?,
            iban_pattern,
            name: config.name,
            tax_label: config.tax_label,
            tax_example: config.tax_example,
            vat_label: config.vat_label,
            vat_example: config.vat_example,
            iban_example: config.iban_example,
            vat_rate: config.vat_rate,
        })
    }

    /// Whether a normalized tax number has this country's format.
    pub fn tax_number_matches(&self, normalized: &str) -> bool {
        self.tax_pattern.is_match(normalized)
    }

    /// Whether a normalized VAT number has this country's format.
    pub fn vat_number_matches(&self, normalized: &str) -> bool {
        self.vat_pattern.is_match(normalized)
    }

    /// Whether a normalized IBAN has this country's format. `None` when the
    /// country defines no IBAN pattern.
    pub fn iban_matches(&self, normalized: &str) -> Option<bool> {
        self.iban_pattern
            .as_ref()
            .map(|pattern| pattern.is_match(normalized))
    }
}

fn compile_full_match(code: &str, field: &str, pattern: &str) -> EngineResult<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| EngineError::InvalidCountryRule {
        code: code.to_string(),
        message: format!("{}: {}", field, e),
    })
}

/// The immutable set of supported countries.
///
/// Built once from [`CountriesConfig`] and shared read-only. Exactly one
/// country is the default; lookups of unsupported codes resolve to it.
#[derive(Debug, Clone)]
pub struct CountryRuleTable {
    /// Rules sorted by country code.
    rules: Vec<CountryInvoiceRule>,
    default_index: usize,
    languages: BTreeMap<String, String>,
    iban_shape: Regex,
    bic_shape: Regex,
}

impl CountryRuleTable {
    /// Compiles a rule table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCountryRule`] when a pattern does not
    /// compile, when there is not exactly one default country, or when the
    /// language map names an unknown country.
    pub fn from_config(config: CountriesConfig) -> EngineResult<Self> {
        let defaults: Vec<&String> = config
            .countries
            .iter()
            .filter(|(_, rule)| rule.default)
            .map(|(code, _)| code)
            .collect();
        if defaults.len() != 1 {
            return Err(EngineError::InvalidCountryRule {
                code: "*".to_string(),
                message: format!(
                    "exactly one default country required, found {}",
                    defaults.len()
                ),
            });
        }
        let default_code = defaults[0].to_uppercase();

        let mut rules = Vec::with_capacity(config.countries.len());
        for (code, rule) in config.countries {
            rules.push(CountryInvoiceRule::compile(&code.to_uppercase(), rule)?);
        }
        rules.sort_by(|a, b| a.code.cmp(&b.code));
        if let Some(pair) = rules.windows(2).find(|pair| pair[0].code == pair[1].code) {
            return Err(EngineError::InvalidCountryRule {
                code: pair[0].code.clone(),
                message: "country defined twice".to_string(),
            });
        }
        let default_index = rules
            .binary_search_by(|rule| rule.code.cmp(&default_code))
            .map_err(|_| EngineError::InvalidCountryRule {
                code: default_code.clone(),
                message: "default country missing".to_string(),
            })?;

        let mut languages = BTreeMap::new();
        for (language, code) in config.languages {
            let code = code.to_uppercase();
            if rules.binary_search_by(|rule| rule.code.cmp(&code)).is_err() {
                return Err(EngineError::InvalidCountryRule {
                    code,
                    message: format!("language '{}' maps to an unsupported country", language),
                });
            }
            languages.insert(language.to_lowercase(), code);
        }

        Ok(Self {
            rules,
            default_index,
            languages,
            iban_shape: compile_shape(IBAN_SHAPE)?,
            bic_shape: compile_shape(BIC_SHAPE)?,
        })
    }

    /// Looks up a supported country by code, case-insensitively.
    pub fn get(&self, code: &str) -> Option<&CountryInvoiceRule> {
        let code = code.trim().to_uppercase();
        self.rules
            .binary_search_by(|rule| rule.code.cmp(&code))
            .ok()
            .map(|index| &self.rules[index])
    }

    /// Looks up a country, falling back to the default for unsupported codes.
    pub fn resolve(&self, code: &str) -> &CountryInvoiceRule {
        self.get(code).unwrap_or_else(|| self.default_rule())
    }

    /// The fallback country.
    pub fn default_rule(&self) -> &CountryInvoiceRule {
        &self.rules[self.default_index]
    }

    /// All supported countries, sorted by code.
    pub fn rules(&self) -> &[CountryInvoiceRule] {
        &self.rules
    }

    /// Maps an interface language to its invoicing country, falling back to
    /// the default country.
    pub fn country_for_language(&self, language: &str) -> &CountryInvoiceRule {
        self.languages
            .get(&language.trim().to_lowercase())
            .map(|code| self.resolve(code))
            .unwrap_or_else(|| self.default_rule())
    }

    /// Whether an IBAN has the generic two letters, two digits shape.
    pub fn iban_shape_matches(&self, normalized: &str) -> bool {
        self.iban_shape.is_match(normalized)
    }

    /// Whether a BIC has the SWIFT shape.
    pub fn bic_shape_matches(&self, normalized: &str) -> bool {
        self.bic_shape.is_match(normalized)
    }
}

fn compile_shape(pattern: &str) -> EngineResult<Regex> {
    Regex::new(pattern).map_err(|e| EngineError::InvalidCountryRule {
        code: "*".to_string(),
        message: e.to_string(),
    })
}
