//! Per-session state: the cached catalog and which tier served each fetch.

use super::chart::{self, ChartDataset};
use super::conversion::{self, DisplayResult};
use super::error::IndicatorError;
use super::fallback::{Tiered, attempt};
use super::indicator::{Catalog, CatalogSource, Indicator, SeriesPoint, SeriesSource, SourceState};
use super::synthetic;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a front end needs to render one conversion request.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub indicator: Indicator,
    pub display: DisplayResult,
    pub series: Vec<SeriesPoint>,
}

impl Conversion {
    pub fn chart(&self) -> ChartDataset {
        chart::build(&self.series, &self.indicator.name, self.indicator.unit)
    }
}

pub struct Session {
    live_catalog: Box<dyn CatalogSource>,
    local_catalog: Box<dyn CatalogSource>,
    live_series: Box<dyn SeriesSource>,
    catalog: Option<Arc<Catalog>>,
    state: SourceState,
}

impl Session {
    pub fn new(
        live_catalog: Box<dyn CatalogSource>,
        local_catalog: Box<dyn CatalogSource>,
        live_series: Box<dyn SeriesSource>,
    ) -> Self {
        Self {
            live_catalog,
            local_catalog,
            live_series,
            catalog: None,
            state: SourceState::default(),
        }
    }

    pub fn source_state(&self) -> SourceState {
        self.state
    }

    /// Returns the cached catalog, loading it on first use.
    pub async fn load_catalog(&mut self) -> Result<Arc<Catalog>, IndicatorError> {
        if let Some(catalog) = &self.catalog {
            debug!("Catalog cache HIT");
            return Ok(Arc::clone(catalog));
        }
        self.reload_catalog().await
    }

    /// Fetches the catalog again and replaces the cache on success.
    pub async fn reload_catalog(&mut self) -> Result<Arc<Catalog>, IndicatorError> {
        let previous = self.state.catalog_is_local_fallback;
        self.state.catalog_is_local_fallback = false;

        let local = &self.local_catalog;
        let outcome = attempt("catalog", self.live_catalog.fetch_catalog(), move || async move {
            local
                .fetch_catalog()
                .await
                .map_err(|e| IndicatorError::CatalogUnavailable(format!("{e:#}")))
        })
        .await;

        self.state.catalog_is_local_fallback = !outcome.is_live();
        let catalog = match outcome {
            Tiered::Live(catalog) | Tiered::Fallback(catalog) => Arc::new(catalog),
            Tiered::Failed(e) => {
                // A kept cache keeps describing the tier it came from.
                if self.catalog.is_some() {
                    self.state.catalog_is_local_fallback = previous;
                }
                return Err(e);
            }
        };
        info!(
            indicators = catalog.len(),
            local = self.state.catalog_is_local_fallback,
            "Catalog loaded"
        );
        self.catalog = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Loads the series for `code`, newest first, synthesizing a flat one
    /// from the catalog when the live source fails.
    pub async fn load_series(&mut self, code: &str) -> Result<Vec<SeriesPoint>, IndicatorError> {
        let catalog = self.load_catalog().await?;
        self.state.series_is_synthetic = false;

        let catalog = catalog.as_ref();
        let outcome: Tiered<Vec<SeriesPoint>> =
            attempt("series", self.live_series.fetch_series(code), move || async move {
                synthetic::flat_series(code, catalog, Utc::now())
            })
            .await;

        self.state.series_is_synthetic = !outcome.is_live();
        outcome.into_result()
    }

    /// Resolves `code`, validates the raw amount when the indicator needs one,
    /// and computes the display result from the freshly loaded series.
    pub async fn evaluate_conversion(
        &mut self,
        code: &str,
        raw_amount: Option<&str>,
    ) -> Result<Conversion, IndicatorError> {
        let catalog = self.load_catalog().await?;
        let indicator = catalog
            .get(code)
            .cloned()
            .ok_or_else(|| IndicatorError::UnknownIndicator(code.to_string()))?;

        let amount = if indicator.requires_amount() {
            let raw = raw_amount.ok_or_else(|| {
                IndicatorError::InvalidAmount(format!("{code} requires an amount in CLP"))
            })?;
            Some(conversion::parse_amount(raw)?)
        } else {
            if raw_amount.is_some() {
                info!(code, "Indicator does not take an amount, ignoring it");
            }
            None
        };

        let series = self.load_series(code).await?;
        let display = conversion::evaluate(&indicator, amount, &series)?;

        Ok(Conversion {
            indicator,
            display,
            series,
        })
    }
}
