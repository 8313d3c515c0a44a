//! Flat series built from the catalog when no history can be fetched.

use super::error::IndicatorError;
use super::indicator::{Catalog, SeriesPoint};
use chrono::{DateTime, Duration, Utc};

pub const SYNTHETIC_POINTS: usize = 10;

/// Builds a flat daily series from the catalog value of `code`, newest first,
/// so a chart keeps its shape when no history is available.
///
/// Points are `now` minus whole days. Front ends render them in local time,
/// so the newest point is dated today wherever the user is.
pub fn flat_series(
    code: &str,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> Result<Vec<SeriesPoint>, IndicatorError> {
    let value = catalog
        .get(code)
        .filter(|indicator| indicator.has_usable_value())
        .map(|indicator| indicator.current_value)
        .ok_or_else(|| {
            IndicatorError::series_unavailable(code, "no valid local value to build series")
        })?;

    Ok((0..SYNTHETIC_POINTS)
        .map(|days_back| SeriesPoint {
            timestamp: now - Duration::days(days_back as i64),
            value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::indicator::{Indicator, UnitKind};
    use chrono::Local;

    fn catalog_with(code: &str, value: f64) -> Catalog {
        Catalog::new(vec![Indicator {
            code: code.to_string(),
            name: code.to_string(),
            unit: UnitKind::Pesos,
            unit_label: "Pesos".to_string(),
            current_value: value,
        }])
    }

    #[test]
    fn test_flat_series_from_catalog_value() {
        let now = Utc::now();
        let series = flat_series("dolar", &catalog_with("dolar", 1050.5), now).unwrap();

        assert_eq!(series.len(), 10);
        assert!(series.iter().all(|p| p.value == 1050.5));
        assert_eq!(
            series[0].timestamp.with_timezone(&Local).date_naive(),
            now.with_timezone(&Local).date_naive()
        );
        assert!(
            series
                .windows(2)
                .all(|w| w[0].timestamp.date_naive() - w[1].timestamp.date_naive()
                    == Duration::days(1))
        );
    }

    #[test]
    fn test_flat_series_requires_usable_value() {
        for value in [0.0, -3.0, f64::NAN] {
            let result = flat_series("uf", &catalog_with("uf", value), Utc::now());
            assert_eq!(
                result,
                Err(IndicatorError::series_unavailable(
                    "uf",
                    "no valid local value to build series"
                ))
            );
        }
    }

    #[test]
    fn test_flat_series_unknown_code() {
        let result = flat_series("euro", &catalog_with("uf", 37000.0), Utc::now());
        assert!(matches!(
            result,
            Err(IndicatorError::SeriesUnavailable { .. })
        ));
    }
}
