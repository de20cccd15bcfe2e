use super::tree::{NodeId, ParsedNode, SvgTree};
use crate::error::{SvgValidationError, ValidationResult};
use crate::hardening::{EVENT_HANDLER_PREFIX, SCRIPT_TAG};
use std::fmt::Write;

/// Tag name plus sibling index; the root has no index.
type Segment<'a> = (&'a str, Option<usize>);

/// Walks the tree below `root` depth first and fails on the first element
/// that holds a `<script>` child or carries an `on*` attribute.
///
/// The reported path starts at `/<root>` and adds `/<tag>[<n>]` per level,
/// where `n` counts same-named siblings in document order. Uses an explicit
/// stack, so nesting depth is bounded by memory rather than the call stack.
pub fn scan(tree: &SvgTree, root: NodeId) -> ValidationResult<()> {
    let mut stack: Vec<(NodeId, usize, Segment<'_>)> = vec![(root, 0, (tree.get(root).name.as_str(), None))];
    // segments of the node being visited and its ancestors
    let mut trail: Vec<Segment<'_>> = Vec::new();

    while let Some((id, depth, segment)) = stack.pop() {
        trail.truncate(depth);
        trail.push(segment);

        let node = tree.get(id);
        if has_executable_content(node) {
            let path = render_path(&trail);
            tracing::debug!(%path, "executable content in svg");
            return Err(SvgValidationError::ScriptDetected { path });
        }

        // pushed in reverse so groups and siblings pop in document order
        for group in node.children.iter().rev() {
            for (index, child) in group.nodes.iter().enumerate().rev() {
                stack.push((*child, depth + 1, (group.tag.as_str(), Some(index))));
            }
        }
    }

    Ok(())
}

fn render_path(trail: &[Segment<'_>]) -> String {
    let mut path = String::new();
    for (tag, index) in trail {
        match index {
            Some(i) => {
                let _ = write!(path, "/{tag}[{i}]");
            }
            None => {
                let _ = write!(path, "/{tag}");
            }
        }
    }
    path
}

fn has_executable_content(node: &ParsedNode) -> bool {
    !node.children_named(SCRIPT_TAG).is_empty()
        || node.attributes.iter().any(|(name, _)| is_event_handler(name))
}

pub fn is_event_handler(attr: &str) -> bool {
    attr.to_lowercase().starts_with(EVENT_HANDLER_PREFIX)
}
