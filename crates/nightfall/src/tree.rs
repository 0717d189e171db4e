//! In-memory arena document.
//!
//! [`Tree`] is a minimal [`Document`] implementation: elements with a tag, an
//! inline style, attributes, classes, a fixed bounding box and optional text.
//! It is what the tests convert, and it is enough for hosts that build their
//! own element list from a parsed page.
//!
//! ```rust
//! use nightfall::{Document, Node, Rect, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.add_root(Node::element("body").style("background: #fff"));
//! let p = tree
//!     .append(body, Node::element("p").text("Hello").rect(Rect::vertical(10.0, 30.0)))
//!     .unwrap();
//!
//! assert_eq!(tree.tag_name(p).unwrap(), "P");
//! assert_eq!(tree.descendants(body).unwrap(), vec![p]);
//! ```

use crate::declaration::parse_declarations;
use crate::document::{Document, ElementId, ElementKind, Rect};
use crate::error::{ConvertError, Result};

/// Builder for one element.
#[derive(Debug, Clone, Default)]
pub struct Node {
    tag: String,
    kind: ElementKind,
    style: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    rect: Rect,
    text: Option<String>,
}

impl Node {
    /// An HTML element.
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    /// An SVG element.
    pub fn svg(tag: &str) -> Self {
        Self {
            kind: ElementKind::Svg,
            ..Self::element(tag)
        }
    }

    pub fn style(mut self, css: &str) -> Self {
        self.style = css.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Direct text content.
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    kind: ElementKind,
    style: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    rect: Rect,
    text: Option<String>,
    children: Vec<ElementId>,
}

impl From<Node> for NodeData {
    fn from(node: Node) -> Self {
        Self {
            style: parse_declarations(&node.style),
            tag: node.tag,
            kind: node.kind,
            attributes: node.attributes,
            classes: node.classes,
            rect: node.rect,
            text: node.text,
            children: Vec::new(),
        }
    }
}

/// Arena-backed element tree.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<NodeData>,
    roots: Vec<ElementId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level element.
    pub fn add_root(&mut self, node: Node) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(node.into());
        self.roots.push(id);
        id
    }

    /// Adds `node` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, node: Node) -> Result<ElementId> {
        let id = ElementId(self.nodes.len());
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(node.into());
        Ok(id)
    }

    /// Every element in document order.
    pub fn elements(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            out.push(root);
            self.collect_descendants(root, &mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Value of one inline property, as stored (including `!important`).
    pub fn style_property(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes.get(element.0).and_then(|node| {
            node.style
                .iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value.as_str())
        })
    }

    fn node(&self, element: ElementId) -> Result<&NodeData> {
        self.nodes
            .get(element.0)
            .ok_or(ConvertError::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(element.0)
            .ok_or(ConvertError::UnknownElement(element))
    }

    fn collect_descendants(&self, element: ElementId, out: &mut Vec<ElementId>) {
        if let Some(node) = self.nodes.get(element.0) {
            for &child in &node.children {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }
}

impl Document for Tree {
    fn kind(&self, element: ElementId) -> Result<ElementKind> {
        Ok(self.node(element)?.kind)
    }

    fn tag_name(&self, element: ElementId) -> Result<String> {
        Ok(self.node(element)?.tag.clone())
    }

    fn inline_style(&self, element: ElementId) -> Result<String> {
        let parts: Vec<String> = self
            .node(element)?
            .style
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        Ok(parts.join("; "))
    }

    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<()> {
        let property = property.to_ascii_lowercase();
        let style = &mut self.node_mut(element)?.style;
        match style.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => style.push((property, value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Result<Option<String>> {
        Ok(self
            .node(element)?
            .attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone()))
    }

    fn classes(&self, element: ElementId) -> Result<Vec<String>> {
        Ok(self.node(element)?.classes.clone())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        let classes = &mut self.node_mut(element)?.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        self.node_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn descendants(&self, element: ElementId) -> Result<Vec<ElementId>> {
        self.node(element)?;
        let mut out = Vec::new();
        self.collect_descendants(element, &mut out);
        Ok(out)
    }

    fn bounding_rect(&self, element: ElementId) -> Result<Rect> {
        Ok(self.node(element)?.rect)
    }

    fn has_text(&self, element: ElementId) -> Result<bool> {
        Ok(self
            .node(element)?
            .text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty()))
    }
}
