use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The native reporting cadence of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[serde(alias = "M")]
    Monthly,
    #[serde(alias = "Q")]
    Quarterly,
    #[serde(alias = "A")]
    Annual,
}

impl Cadence {
    /// Number of observations between a period and the same period one year earlier.
    pub fn yoy_lag(&self) -> usize {
        match self {
            Cadence::Monthly => 12,
            Cadence::Quarterly => 4,
            Cadence::Annual => 1,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
            Cadence::Annual => "annual",
        };
        f.write_str(s)
    }
}

impl FromStr for Cadence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "monthly" => Ok(Cadence::Monthly),
            "q" | "quarterly" => Ok(Cadence::Quarterly),
            "a" | "annual" => Ok(Cadence::Annual),
            _ => Err(CoreError::UnknownCadence(s.to_string())),
        }
    }
}

/// Groups of indicators that share a reporting cadence within one economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorFamily {
    Prices,
    Output,
    Labour,
}

/// The macroeconomic indicators tracked for every economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    Cpi,
    RealGdp,
    NominalGdp,
    UnemploymentRate,
}

impl Indicator {
    /// All indicators, in the order a single-economy report shows them.
    pub const ALL: [Indicator; 4] = [
        Indicator::Cpi,
        Indicator::RealGdp,
        Indicator::NominalGdp,
        Indicator::UnemploymentRate,
    ];

    /// Human-readable name, also used as the cache key's indicator name.
    pub fn name(&self) -> &'static str {
        match self {
            Indicator::Cpi => "CPI",
            Indicator::RealGdp => "Real GDP",
            Indicator::NominalGdp => "Nominal GDP",
            Indicator::UnemploymentRate => "Unemployment Rate",
        }
    }

    pub fn family(&self) -> IndicatorFamily {
        match self {
            Indicator::Cpi => IndicatorFamily::Prices,
            Indicator::RealGdp | Indicator::NominalGdp => IndicatorFamily::Output,
            Indicator::UnemploymentRate => IndicatorFamily::Labour,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = CoreError;

    /// Accepts the display name (`"Real GDP"`) or a slug (`real-gdp`, `real_gdp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "cpi" => Ok(Indicator::Cpi),
            "realgdp" => Ok(Indicator::RealGdp),
            "nominalgdp" | "gdp" => Ok(Indicator::NominalGdp),
            "unemploymentrate" | "unemployment" | "unrate" => Ok(Indicator::UnemploymentRate),
            _ => Err(CoreError::UnknownIndicator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_follows_cadence() {
        assert_eq!(Cadence::Monthly.yoy_lag(), 12);
        assert_eq!(Cadence::Quarterly.yoy_lag(), 4);
        assert_eq!(Cadence::Annual.yoy_lag(), 1);
    }

    #[test]
    fn cadence_accepts_single_letter_codes() {
        assert_eq!("M".parse::<Cadence>().unwrap(), Cadence::Monthly);
        assert_eq!("q".parse::<Cadence>().unwrap(), Cadence::Quarterly);
        assert!("weekly".parse::<Cadence>().is_err());

        let parsed: Cadence = serde_json::from_str("\"Q\"").unwrap();
        assert_eq!(parsed, Cadence::Quarterly);
    }

    #[test]
    fn indicator_parses_names_and_slugs() {
        assert_eq!("Real GDP".parse::<Indicator>().unwrap(), Indicator::RealGdp);
        assert_eq!("real-gdp".parse::<Indicator>().unwrap(), Indicator::RealGdp);
        assert_eq!("CPI".parse::<Indicator>().unwrap(), Indicator::Cpi);
        assert_eq!(
            "Unemployment Rate".parse::<Indicator>().unwrap(),
            Indicator::UnemploymentRate
        );

        let err = "Housing Starts".parse::<Indicator>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownIndicator(name) if name == "Housing Starts"));
    }

    #[test]
    fn gdp_series_share_a_family() {
        assert_eq!(Indicator::RealGdp.family(), Indicator::NominalGdp.family());
        assert_ne!(Indicator::Cpi.family(), Indicator::UnemploymentRate.family());
    }
}
