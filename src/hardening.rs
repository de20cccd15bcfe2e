/// Default maximum size of an SVG in bytes
pub const SVG_SIZE_LIMIT: u64 = 40 * 1024;               // 40 KB per SVG
/// Tolerance applied to limits to absorb format overhead (10% over the documented limit)
pub const LIMIT_BUFFER_FACTOR: f64 = 1.1;

/// Property under `limits.preview` holding the SVG size limit
pub const MAX_SVG_SIZE_PROPERTY: &str = "maxSVGSize";
/// Environment variable overriding the SVG size limit
pub const MAX_SVG_SIZE_ENV: &str = "SVG_MAX_SIZE";

/// Tag name of the document root we accept (after lowercasing)
pub const SVG_ROOT_TAG: &str = "svg";
/// Child element that marks its parent as carrying executable content
pub const SCRIPT_TAG: &str = "script";
/// Attribute prefix of inline event handlers (compared case-insensitively)
pub const EVENT_HANDLER_PREFIX: &str = "on";
