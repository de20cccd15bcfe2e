use super::tree::{NodeId, ParsedNode, SvgTree};
use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Why a document could not be turned into a tree. Only ever logged.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("unexpected second root element <{0}>")]
    MultipleRoots(String),
}

/// Parses `text` into a tree, forgiving the mistakes hand-edited and
/// tool-exported SVGs tend to contain.
///
/// Tag names are lowercased, attribute names are kept as written. Undefined
/// entities are left unexpanded, attributes may be unquoted or lack a value,
/// end tags close the nearest open element of the same name (stray ones are
/// ignored) and elements left open at the end of input are closed. Input that
/// cannot be tokenized at all, such as an unterminated comment, is an error.
pub fn parse_svg(text: &str) -> Result<SvgTree, XmlError> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut tree = SvgTree::new();
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let id = insert_element(&mut tree, open.last().copied(), &e)?;
                open.push(id);
            }
            Event::Empty(e) => {
                insert_element(&mut tree, open.last().copied(), &e)?;
            }
            Event::End(e) => {
                let raw = e.name();
                let raw = raw.as_ref();
                let cut = raw.iter().position(|b| *b == b'/').unwrap_or(raw.len());
                let name = normalize_tag(&raw[..cut]);
                if let Some(pos) = open.iter().rposition(|id| tree.get(*id).name == name) {
                    open.truncate(pos);
                }
            }
            Event::Eof => break,
            // text, cdata, comments, PIs, declarations and doctypes carry no structure
            _ => {}
        }
    }

    Ok(tree)
}

fn insert_element(tree: &mut SvgTree, parent: Option<NodeId>, e: &BytesStart<'_>) -> Result<NodeId, XmlError> {
    let e = split_on_slashes(e);
    let mut node = ParsedNode::new(normalize_tag(e.name().as_ref()));

    let mut attrs = e.html_attributes();
    attrs.with_checks(false);
    for attr in attrs {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            // e.g. `&ns_extend;` from Illustrator exports
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        node.set_attribute(name, value);
    }

    let name = node.name.clone();
    tree.insert(parent, node).ok_or(XmlError::MultipleRoots(name))
}

/// Re-reads a start tag with every `/` outside attribute values taken as
/// whitespace, the way browsers do. quick-xml only ends a tag name at
/// whitespace, so `<rect/onclick="x">` would otherwise be one element named
/// `rect/onclick="x"` without attributes. Slashes in attribute values, quoted
/// or not, are kept.
fn split_on_slashes(e: &BytesStart<'_>) -> BytesStart<'static> {
    let content = String::from_utf8_lossy(&**e);
    let name_len = content
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(content.len());

    let mut fixed = String::with_capacity(content.len());
    fixed.push_str(&content[..name_len]);

    let mut quote: Option<char> = None;
    let mut after_eq = false;
    let mut in_unquoted = false;
    for c in content[name_len..].chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            fixed.push(c);
            continue;
        }
        if in_unquoted {
            in_unquoted = !c.is_ascii_whitespace();
            fixed.push(c);
            continue;
        }
        if after_eq {
            if c.is_ascii_whitespace() {
                fixed.push(c);
                continue;
            }
            after_eq = false;
            match c {
                '"' | '\'' => quote = Some(c),
                _ => in_unquoted = true,
            }
            fixed.push(c);
            continue;
        }
        match c {
            '=' => {
                after_eq = true;
                fixed.push(c);
            }
            '/' => fixed.push(' '),
            _ => fixed.push(c),
        }
    }

    BytesStart::from_content(fixed, name_len)
}

fn normalize_tag(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_lowercase()
}
