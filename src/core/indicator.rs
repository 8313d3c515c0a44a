//! Indicator catalog types and data source abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Measurement category of an indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Pesos,
    Percentage,
    ForeignCurrency,
    Generic,
}

impl UnitKind {
    /// Maps a published unit label (`"Pesos"`, `"Porcentaje"`, `"Dólar"`) to a unit.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "pesos" => UnitKind::Pesos,
            "porcentaje" => UnitKind::Percentage,
            "dólar" | "dolar" => UnitKind::ForeignCurrency,
            _ => UnitKind::Generic,
        }
    }
}

impl Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UnitKind::Pesos => "Pesos",
                UnitKind::Percentage => "Percentage",
                UnitKind::ForeignCurrency => "Foreign currency",
                UnitKind::Generic => "Number",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub code: String,
    pub name: String,
    pub unit: UnitKind,
    /// Unit label exactly as the source publishes it.
    pub unit_label: String,
    pub current_value: f64,
}

impl Indicator {
    /// Only peso-denominated indicators convert a monetary amount.
    pub fn requires_amount(&self) -> bool {
        self.unit == UnitKind::Pesos
    }

    pub fn has_usable_value(&self) -> bool {
        is_usable_value(self.current_value)
    }

    /// Label used when listing indicators, e.g. `Dólar observado (dolar)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// A value can seed a series or act as a divisor only when finite and positive.
pub fn is_usable_value(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Full set of indicators keyed by code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    indicators: BTreeMap<String, Indicator>,
}

impl Catalog {
    pub fn new(indicators: impl IntoIterator<Item = Indicator>) -> Self {
        Self {
            indicators: indicators
                .into_iter()
                .map(|i| (i.code.clone(), i))
                .collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Indicator> {
        self.indicators.get(code)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Indicators ordered by their display label, ignoring case.
    pub fn sorted_by_label(&self) -> Vec<&Indicator> {
        let mut indicators: Vec<&Indicator> = self.indicators.values().collect();
        indicators.sort_by_cached_key(|i| i.label().to_lowercase());
        indicators
    }
}

/// Which tier served the most recent fetches of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceState {
    pub catalog_is_local_fallback: bool,
    pub series_is_synthetic: bool,
}

impl SourceState {
    pub fn using_local_catalog(&self) -> bool {
        self.catalog_is_local_fallback
    }

    pub fn using_local_series(&self) -> bool {
        self.series_is_synthetic
    }

    pub fn is_live(&self) -> bool {
        !self.catalog_is_local_fallback && !self.series_is_synthetic
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog>;
}

#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Returns the series for `code`, most recent point first.
    async fn fetch_series(&self, code: &str) -> Result<Vec<SeriesPoint>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(code: &str, name: &str, unit: &str, value: f64) -> Indicator {
        Indicator {
            code: code.to_string(),
            name: name.to_string(),
            unit: UnitKind::from_label(unit),
            unit_label: unit.to_string(),
            current_value: value,
        }
    }

    #[test]
    fn test_unit_from_label() {
        assert_eq!(UnitKind::from_label("Pesos"), UnitKind::Pesos);
        assert_eq!(UnitKind::from_label("Porcentaje"), UnitKind::Percentage);
        assert_eq!(UnitKind::from_label("Dólar"), UnitKind::ForeignCurrency);
        assert_eq!(UnitKind::from_label("dolar"), UnitKind::ForeignCurrency);
        assert_eq!(UnitKind::from_label("Toneladas"), UnitKind::Generic);
        assert_eq!(UnitKind::from_label(""), UnitKind::Generic);
    }

    #[test]
    fn test_requires_amount_only_for_pesos() {
        assert!(indicator("dolar", "Dólar", "Pesos", 950.0).requires_amount());
        assert!(!indicator("ipc", "IPC", "Porcentaje", 0.4).requires_amount());
        assert!(!indicator("libra_cobre", "Cobre", "Dólar", 4.1).requires_amount());
    }

    #[test]
    fn test_usable_value() {
        assert!(is_usable_value(1050.5));
        assert!(!is_usable_value(0.0));
        assert!(!is_usable_value(-1.0));
        assert!(!is_usable_value(f64::NAN));
        assert!(!is_usable_value(f64::INFINITY));
    }

    #[test]
    fn test_catalog_sorted_by_label() {
        let catalog = Catalog::new(vec![
            indicator("uf", "Unidad de fomento (UF)", "Pesos", 37000.0),
            indicator("dolar", "Dólar observado", "Pesos", 950.0),
            indicator("bitcoin", "bitcoin", "Dólar", 60000.0),
        ]);

        let codes: Vec<&str> = catalog
            .sorted_by_label()
            .iter()
            .map(|i| i.code.as_str())
            .collect();
        assert_eq!(codes, vec!["bitcoin", "dolar", "uf"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("euro").is_none());
    }

    #[test]
    fn test_source_state_signal() {
        let mut state = SourceState::default();
        assert!(state.is_live());
        state.series_is_synthetic = true;
        assert!(state.using_local_series());
        assert!(!state.using_local_catalog());
        assert!(!state.is_live());
    }
}
