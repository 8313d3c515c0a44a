//! Core business logic: indicator acquisition, conversion and formatting

pub mod chart;
pub mod config;
pub mod conversion;
pub mod error;
pub mod fallback;
pub mod format;
pub mod indicator;
pub mod log;
pub mod session;
pub mod synthetic;

// Re-export main types for cleaner imports
pub use error::IndicatorError;
pub use indicator::{
    Catalog, CatalogSource, Indicator, SeriesPoint, SeriesSource, SourceState, UnitKind,
};
pub use session::{Conversion, Session};
