/// Index of a node inside its [`SvgTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Children of one element that share a tag name, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildGroup {
    pub tag: String,
    pub nodes: Vec<NodeId>,
}

/// One parsed element.
///
/// `name` is lowercased; attribute names keep the case they were written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ChildGroup>,
}

impl ParsedNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Vec::new(), children: Vec::new() }
    }

    /// Sets an attribute; a repeated name overwrites the earlier value.
    pub fn set_attribute(&mut self, name: String, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    #[cfg(test)]
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Children named `tag`, empty when there are none.
    pub fn children_named(&self, tag: &str) -> &[NodeId] {
        self.children
            .iter()
            .find(|g| g.tag == tag)
            .map(|g| g.nodes.as_slice())
            .unwrap_or(&[])
    }

    fn push_child(&mut self, tag: &str, id: NodeId) {
        match self.children.iter_mut().find(|g| g.tag == tag) {
            Some(group) => group.nodes.push(id),
            None => self.children.push(ChildGroup { tag: tag.to_string(), nodes: vec![id] }),
        }
    }
}

/// Arena holding a parsed document. Nodes never own each other, so building
/// and dropping a tree is flat regardless of how deep the document nests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgTree {
    nodes: Vec<ParsedNode>,
    root: Option<NodeId>,
}

impl SvgTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &ParsedNode {
        &self.nodes[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Adds `node` under `parent`, or as the document root when `parent` is `None`.
    ///
    /// Returns `None` if a root already exists and `parent` is `None`.
    pub fn insert(&mut self, parent: Option<NodeId>, node: ParsedNode) -> Option<NodeId> {
        if parent.is_none() && self.root.is_some() {
            return None;
        }

        let id = NodeId(self.nodes.len());
        let tag = node.name.clone();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p.0].push_child(&tag, id),
            None => self.root = Some(id),
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_children_by_tag_in_document_order() {
        let mut tree = SvgTree::new();
        let root = tree.insert(None, ParsedNode::new("svg")).unwrap();
        let a = tree.insert(Some(root), ParsedNode::new("circle")).unwrap();
        let b = tree.insert(Some(root), ParsedNode::new("rect")).unwrap();
        let c = tree.insert(Some(root), ParsedNode::new("circle")).unwrap();

        let svg = tree.get(root);
        assert_eq!(svg.children_named("circle"), &[a, c]);
        assert_eq!(svg.children_named("rect"), &[b]);
        assert!(svg.children_named("script").is_empty());
        assert_eq!(svg.children.iter().map(|g| g.tag.as_str()).collect::<Vec<_>>(), ["circle", "rect"]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn single_root() {
        let mut tree = SvgTree::new();
        assert!(tree.insert(None, ParsedNode::new("svg")).is_some());
        assert!(tree.insert(None, ParsedNode::new("svg")).is_none());
    }

    #[test]
    fn attributes_last_write_wins() {
        let mut node = ParsedNode::new("rect");
        node.set_attribute("fill".into(), "red".into());
        node.set_attribute("Fill".into(), "green".into());
        node.set_attribute("fill".into(), "blue".into());
        assert_eq!(node.attribute("fill"), Some("blue"));
        assert_eq!(node.attribute("Fill"), Some("green"));
        assert_eq!(node.attributes.len(), 2);
    }
}
