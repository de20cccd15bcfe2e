pub mod config;
pub mod context;
pub mod error;
pub mod hardening;
pub mod limits;
pub mod svg;
pub mod util;

// Convenient re-exports (so call sites can do `svg_gate::validate_svg`, etc.)
pub use config::Config;
pub use context::{LogSink, TracingLog, ValidationContext};
pub use error::{SvgValidationError, ValidationResult};
pub use svg::validate_svg;
