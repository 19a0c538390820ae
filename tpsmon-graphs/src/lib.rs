//! Chart rendering for tpsmon per-minute TPS series

pub mod renderer;
pub mod types;

pub use renderer::{ChartRenderer, TpsChart};
pub use types::{ChartConfig, MarginConfig};
