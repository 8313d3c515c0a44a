use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::indicator::{
    Catalog, CatalogSource, Indicator, SeriesPoint, SeriesSource, UnitKind,
};

#[derive(Debug, Deserialize)]
struct IndicatorEntry {
    codigo: String,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    unidad_medida: Option<String>,
    valor: f64,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    serie: Vec<SeriesEntry>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    fecha: DateTime<Utc>,
    valor: f64,
}

/// Parses a catalog body. Members that are not indicator objects (`version`,
/// `autor`, `fecha`) are skipped.
pub(crate) fn parse_catalog(body: &str) -> Result<Catalog> {
    let members: HashMap<String, serde_json::Value> =
        serde_json::from_str(body).context("Failed to parse indicator catalog JSON")?;

    let indicators: Vec<Indicator> = members
        .into_iter()
        .filter(|(_, value)| value.get("codigo").is_some() && value.get("valor").is_some())
        .filter_map(|(key, value)| match serde_json::from_value::<IndicatorEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(key = %key, error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .map(|entry| {
            let unit_label = entry.unidad_medida.unwrap_or_default();
            Indicator {
                name: entry.nombre.unwrap_or_else(|| entry.codigo.clone()),
                code: entry.codigo,
                unit: UnitKind::from_label(&unit_label),
                unit_label,
                current_value: entry.valor,
            }
        })
        .collect();

    if indicators.is_empty() {
        return Err(anyhow!("Catalog contains no indicators"));
    }
    Ok(Catalog::new(indicators))
}

/// Live source for both the catalog (`<base>`) and series (`<base>/<code>`).
pub struct MindicadorProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MindicadorProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("indicador/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))
    }
}

#[async_trait]
impl CatalogSource for MindicadorProvider {
    #[instrument(name = "LiveCatalogFetch", skip(self))]
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let body = self.get_text(&self.base_url).await?;
        let catalog = parse_catalog(&body)?;
        debug!(indicators = catalog.len(), "Parsed live catalog");
        Ok(catalog)
    }
}

#[async_trait]
impl SeriesSource for MindicadorProvider {
    #[instrument(name = "LiveSeriesFetch", skip(self), fields(code = %code))]
    async fn fetch_series(&self, code: &str) -> Result<Vec<SeriesPoint>> {
        let url = format!("{}/{}", self.base_url, code);
        let body = self.get_text(&url).await?;

        let data: SeriesResponse = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse series response for {code}"))?;

        if data.serie.is_empty() {
            return Err(anyhow!("Empty series for indicator: {}", code));
        }

        Ok(data
            .serie
            .into_iter()
            .map(|entry| SeriesPoint {
                timestamp: entry.fecha,
                value: entry.valor,
            })
            .collect())
    }
}
