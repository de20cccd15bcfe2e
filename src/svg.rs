pub mod parser;
pub mod scanner;
pub mod tree;

use crate::context::ValidationContext;
use crate::error::{SvgValidationError, ValidationResult};
use crate::hardening::{MAX_SVG_SIZE_PROPERTY, SVG_ROOT_TAG, SVG_SIZE_LIMIT};
use crate::limits::{check_size, resolve_limit};
use parser::parse_svg;
use tree::SvgTree;

/// Validates an uploaded SVG: size first, then structure.
///
/// Succeeds silently. Fails with the first problem found: the buffer exceeds
/// the configured `maxSVGSize` (plus 10%), it is not parseable XML, its root
/// is not `<svg>`, or it contains a `<script>` element or an `on*` event
/// handler attribute.
///
/// Parsing runs on tokio's blocking pool, so this must be awaited from within
/// a tokio runtime.
pub async fn validate_svg(ctx: &ValidationContext, buf: &[u8]) -> ValidationResult<()> {
    let limit = resolve_limit(ctx, MAX_SVG_SIZE_PROPERTY, SVG_SIZE_LIMIT);
    check_size(buf.len() as u64, limit)?;

    let tree = parse(ctx, buf).await?;
    let root = tree
        .root()
        .filter(|id| tree.get(*id).name == SVG_ROOT_TAG)
        .ok_or(SvgValidationError::MissingSvgRoot)?;

    scanner::scan(&tree, root)?;
    tracing::debug!(size = buf.len(), limit, elements = tree.len(), "svg accepted");
    Ok(())
}

async fn parse(ctx: &ValidationContext, buf: &[u8]) -> ValidationResult<SvgTree> {
    let text = String::from_utf8_lossy(buf).into_owned();

    let detail = match tokio::task::spawn_blocking(move || parse_svg(&text)).await {
        Ok(Ok(tree)) => return Ok(tree),
        Ok(Err(e)) => e.to_string(),
        Err(e) => e.to_string(),
    };

    ctx.log.info(&format!("Parsing SVG threw an error: {detail}"));
    Err(SvgValidationError::Unparseable)
}
