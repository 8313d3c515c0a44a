//! Two-tier acquisition: a live attempt, then a local one.

use super::error::IndicatorError;
use std::future::Future;
use tracing::{debug, warn};

/// Outcome of a two-tier fetch, tagged with the tier that produced it.
#[derive(Debug)]
pub enum Tiered<T> {
    Live(T),
    Fallback(T),
    Failed(IndicatorError),
}

impl<T> Tiered<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, Tiered::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Tiered::Fallback(_))
    }

    pub fn into_result(self) -> Result<T, IndicatorError> {
        match self {
            Tiered::Live(value) | Tiered::Fallback(value) => Ok(value),
            Tiered::Failed(e) => Err(e),
        }
    }
}

/// Runs `live`; when it fails, logs the cause and runs `fallback` exactly once.
pub async fn attempt<T, L, F, Fut>(what: &str, live: L, fallback: F) -> Tiered<T>
where
    L: Future<Output = anyhow::Result<T>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, IndicatorError>>,
{
    match live.await {
        Ok(value) => {
            debug!("Live {} fetched", what);
            Tiered::Live(value)
        }
        Err(e) => {
            warn!(error = %e, "Live {} unavailable, using local data", what);
            match fallback().await {
                Ok(value) => Tiered::Fallback(value),
                Err(e) => Tiered::Failed(e),
            }
        }
    }
}
