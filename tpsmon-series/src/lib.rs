//! Core pipeline for tpsmon: period lookup, rate aggregation, and series storage

pub mod aggregate;
pub mod catalog;
pub mod source;
pub mod store;

pub use aggregate::aggregate;
pub use catalog::PeriodCatalog;
pub use source::{EventSource, PgEventSource};
pub use store::SeriesStore;
