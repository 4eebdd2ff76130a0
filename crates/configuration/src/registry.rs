use crate::error::{ConfigError, RegistryError};
use core_types::{Cadence, Indicator, IndicatorFamily};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider codes and cadences for one tracked economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomySeriesConfig {
    /// Lookup key, matched case-insensitively (e.g. "us").
    pub id: String,
    /// Display name (e.g. "United States").
    pub label: String,
    pub cpi: String,
    pub real_gdp: String,
    pub nominal_gdp: String,
    pub unemployment_rate: String,
    pub cpi_cadence: Cadence,
    pub gdp_cadence: Cadence,
    pub unemployment_cadence: Cadence,
}

impl EconomySeriesConfig {
    pub fn provider_code(&self, indicator: Indicator) -> &str {
        match indicator {
            Indicator::Cpi => &self.cpi,
            Indicator::RealGdp => &self.real_gdp,
            Indicator::NominalGdp => &self.nominal_gdp,
            Indicator::UnemploymentRate => &self.unemployment_rate,
        }
    }

    pub fn cadence(&self, indicator: Indicator) -> Cadence {
        match indicator.family() {
            IndicatorFamily::Prices => self.cpi_cadence,
            IndicatorFamily::Output => self.gdp_cadence,
            IndicatorFamily::Labour => self.unemployment_cadence,
        }
    }
}

/// The result of a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRef {
    pub provider_code: String,
    pub cadence: Cadence,
}

/// Immutable table of tracked economies, built once at start-up.
#[derive(Debug, Clone)]
pub struct SeriesRegistry {
    economies: Vec<EconomySeriesConfig>,
    index: HashMap<String, usize>,
}

impl SeriesRegistry {
    /// Builds a registry, rejecting an empty table, blank codes and duplicate ids.
    pub fn new(economies: Vec<EconomySeriesConfig>) -> Result<Self, ConfigError> {
        if economies.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one economy must be configured".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(economies.len());
        for (position, economy) in economies.iter().enumerate() {
            let key = normalize_id(&economy.id);
            if key.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "economy '{}' has an empty id",
                    economy.label
                )));
            }
            if let Some(indicator) = Indicator::ALL
                .into_iter()
                .find(|i| economy.provider_code(*i).trim().is_empty())
            {
                return Err(ConfigError::ValidationError(format!(
                    "economy '{}' has no provider code for {}",
                    economy.id, indicator
                )));
            }
            if index.insert(key, position).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate economy id '{}'",
                    economy.id
                )));
            }
        }

        Ok(Self { economies, index })
    }

    /// The registry of the eight economies tracked by default.
    pub fn builtin() -> Self {
        let economies = builtin_economies();
        let index = economies
            .iter()
            .enumerate()
            .map(|(position, e)| (normalize_id(&e.id), position))
            .collect();
        Self { economies, index }
    }

    /// Economies in configured order.
    pub fn economies(&self) -> impl Iterator<Item = &EconomySeriesConfig> {
        self.economies.iter()
    }

    pub fn len(&self) -> usize {
        self.economies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.economies.is_empty()
    }

    pub fn get(&self, economy_id: &str) -> Result<&EconomySeriesConfig, RegistryError> {
        self.index
            .get(&normalize_id(economy_id))
            .map(|&position| &self.economies[position])
            .ok_or_else(|| RegistryError::UnknownEconomy(economy_id.to_string()))
    }

    /// Resolves an economy and an indicator name to a provider code and cadence.
    pub fn lookup(&self, economy_id: &str, indicator: &str) -> Result<SeriesRef, RegistryError> {
        let economy = self.get(economy_id)?;
        let indicator = indicator
            .parse::<Indicator>()
            .map_err(|_| RegistryError::UnknownIndicator(indicator.to_string()))?;
        Ok(series_ref(economy, indicator))
    }

    pub fn series_ref(
        &self,
        economy_id: &str,
        indicator: Indicator,
    ) -> Result<SeriesRef, RegistryError> {
        Ok(series_ref(self.get(economy_id)?, indicator))
    }
}

fn series_ref(economy: &EconomySeriesConfig, indicator: Indicator) -> SeriesRef {
    SeriesRef {
        provider_code: economy.provider_code(indicator).to_string(),
        cadence: economy.cadence(indicator),
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// FRED series codes for the default set of economies.
pub fn builtin_economies() -> Vec<EconomySeriesConfig> {
    // (id, label, cpi, real gdp, nominal gdp, unemployment)
    const TABLE: [(&str, &str, &str, &str, &str, &str); 8] = [
        ("us", "United States", "CPIAUCSL", "GDPC1", "GDP", "UNRATE"),
        (
            "ea",
            "Euro Area",
            "CP0000EZ20M086NEST",
            "CLVMNACSCAB1GQEZ20",
            "CPMNACSCAB1GQEZ20",
            "LRHUTTTTEZM156S",
        ),
        (
            "jp",
            "Japan",
            "JPNCPIALLMINMEI",
            "JPNRGDPEXP",
            "JPNNGDPEXP",
            "LRUNTTTTJPM156S",
        ),
        (
            "gb",
            "United Kingdom",
            "GBRCPIALLMINMEI",
            "CLVMNACSCAB1GQGB",
            "CPMNACSCAB1GQGB",
            "LMUNRRTTGBM156S",
        ),
        (
            "ca",
            "Canada",
            "CANCPIALLMINMEI",
            "NAEXKP01CAQ189S",
            "CANNGDPNQDSMEI",
            "LRUNTTTTCAM156S",
        ),
        (
            "au",
            "Australia",
            "AUSCPIALLMINMEI",
            "RGDPMLAUA",
            "NGDPSAXDCAUQ",
            "LRUNTTTTAUM156S",
        ),
        (
            "ch",
            "Switzerland",
            "CHECPIALLMINMEI",
            "NAEXKP01CHQ189S",
            "CHENNGDPNQDSMEI",
            "LRUNTTTTCHM156S",
        ),
        (
            "nz",
            "New Zealand",
            "NZLCPIALLMINMEI",
            "MKTGDPRNZQ",
            "MKTGDPNZQ",
            "LRUNTTTTNZM156S",
        ),
    ];

    TABLE
        .iter()
        .map(
            |&(id, label, cpi, real_gdp, nominal_gdp, unemployment_rate)| EconomySeriesConfig {
                id: id.to_string(),
                label: label.to_string(),
                cpi: cpi.to_string(),
                real_gdp: real_gdp.to_string(),
                nominal_gdp: nominal_gdp.to_string(),
                unemployment_rate: unemployment_rate.to_string(),
                cpi_cadence: Cadence::Monthly,
                gdp_cadence: Cadence::Quarterly,
                unemployment_cadence: Cadence::Monthly,
            },
        )
        .collect()
}
