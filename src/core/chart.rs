//! Chart-ready view over the most recent points of a series.

use super::format::format_value;
use super::indicator::{SeriesPoint, UnitKind};
use chrono::Local;

pub const CHART_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub title: String,
    pub unit: UnitKind,
    /// Oldest first.
    pub labels: Vec<String>,
    pub points: Vec<f64>,
}

impl ChartDataset {
    /// Text for a value axis tick.
    pub fn axis_label(&self, value: f64) -> String {
        format_value(self.unit, value)
    }

    /// Text shown when hovering the point at `index`.
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        self.points.get(index).map(|v| format_value(self.unit, *v))
    }

    /// (label, value) pairs in chronological order. Can be called repeatedly.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.points.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Builds the dataset from a most-recent-first series. Labels are local dates.
pub fn build(series: &[SeriesPoint], indicator_name: &str, unit: UnitKind) -> ChartDataset {
    let recent: Vec<&SeriesPoint> = series.iter().take(CHART_POINTS).rev().collect();

    ChartDataset {
        title: format!("{indicator_name} (last {CHART_POINTS})"),
        unit,
        labels: recent
            .iter()
            .map(|p| {
                p.timestamp
                    .with_timezone(&Local)
                    .format("%d-%m-%Y")
                    .to_string()
            })
            .collect(),
        points: recent.iter().map(|p| p.value).collect(),
    }
}
