use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::mindicador::parse_catalog;
use crate::core::indicator::{Catalog, CatalogSource};

/// Catalog snapshot compiled into the binary.
pub const EMBEDDED_SNAPSHOT: &str = include_str!("../../assets/mindicador.json");

/// Local catalog tier: a snapshot file when configured, the embedded copy otherwise.
pub struct BundledCatalog {
    path: Option<PathBuf>,
}

impl BundledCatalog {
    pub fn embedded() -> Self {
        Self { path: None }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        match &self.path {
            Some(path) => {
                debug!("Reading catalog snapshot from {}", path.display());
                let body = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read catalog snapshot: {}", path.display()))?;
                parse_catalog(&body)
                    .with_context(|| format!("Invalid catalog snapshot: {}", path.display()))
            }
            None => parse_catalog(EMBEDDED_SNAPSHOT).context("Invalid embedded catalog snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::indicator::UnitKind;
    use std::io::Write;

    #[tokio::test]
    async fn test_embedded_snapshot_parses() {
        let catalog = BundledCatalog::embedded().fetch_catalog().await.unwrap();

        for code in ["uf", "dolar", "euro", "ipc", "utm", "bitcoin"] {
            assert!(catalog.get(code).is_some(), "missing {code}");
        }
        assert_eq!(catalog.get("dolar").unwrap().unit, UnitKind::Pesos);
        assert_eq!(
            catalog.get("libra_cobre").unwrap().unit,
            UnitKind::ForeignCurrency
        );
        assert!(catalog.get("uf").unwrap().has_usable_value());
    }

    #[tokio::test]
    async fn test_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tpm": {{"codigo": "tpm", "nombre": "Tasa Política Monetaria (TPM)", "unidad_medida": "Porcentaje", "valor": 5}}}}"#
        )
        .unwrap();

        let catalog = BundledCatalog::from_path(file.path())
            .fetch_catalog()
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("tpm").unwrap().current_value, 5.0);
    }

    #[tokio::test]
    async fn test_missing_snapshot_file() {
        let result = BundledCatalog::from_path("/nonexistent/mindicador.json")
            .fetch_catalog()
            .await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read catalog snapshot")
        );
    }
}
