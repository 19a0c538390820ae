//! Common types, errors, and logging for the tpsmon telemetry tools

pub mod clock;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use error::{Result, TpsError};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
