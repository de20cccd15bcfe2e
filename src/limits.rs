use crate::context::ValidationContext;
use crate::error::{SvgValidationError, ValidationResult};
use crate::hardening::LIMIT_BUFFER_FACTOR;

/// Resolves `limits.preview.<property>` to a byte limit.
///
/// Absent, malformed and negative values all fall back to `default` silently.
pub fn resolve_limit(ctx: &ValidationContext, property: &str, default: u64) -> u64 {
    ctx.config
        .preview_limit(property)
        .and_then(|v| v.as_integer())
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(default)
}

/// Largest accepted size for `limit`, i.e. `ceil(limit * 1.1)`.
pub fn size_threshold(limit: u64) -> u64 {
    (limit as f64 * LIMIT_BUFFER_FACTOR).ceil() as u64
}

/// Rejects `size` bytes when they exceed the buffered `limit`.
pub fn check_size(size: u64, limit: u64) -> ValidationResult<()> {
    let threshold = size_threshold(limit);
    if size > threshold {
        tracing::debug!(size, limit, threshold, "svg exceeds size limit");
        return Err(SvgValidationError::TooLarge { limit, actual: size });
    }
    Ok(())
}
