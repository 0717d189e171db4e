//! The document abstraction the engine converts.
//!
//! The engine never owns a page. It reads and annotates elements through the
//! [`Document`] trait, which a host implements over whatever tree it has (a
//! browser DOM bridge, an HTML parser's arena, a test fixture). The crate
//! ships one implementation, [`Tree`](crate::Tree), used by the tests.
//!
//! Elements are addressed by opaque [`ElementId`]s. Every method returns
//! [`Result`] so a host can report stale ids or refused mutations; the
//! scheduler turns those into per-element failures.

use std::fmt;

use crate::error::Result;

/// Opaque handle to an element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element #{}", self.0)
    }
}

/// Capability tag fixed when an element enters the document.
///
/// SVG elements get their colors adjusted but never take part in image
/// layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    #[default]
    Html,
    Svg,
}

/// Viewport-relative bounding box, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Full-width box spanning `top..bottom`, for layouts that only care
    /// about vertical position.
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(top, 0.0, bottom, f64::MAX)
    }

    /// Axis-aligned intersection test. Boxes that only touch along an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Read and annotate access to the elements of a page.
pub trait Document {
    /// Capability tag of the element.
    fn kind(&self, element: ElementId) -> Result<ElementKind>;

    /// Upper-case tag name (`DIV`, `TD`, ...).
    fn tag_name(&self, element: ElementId) -> Result<String>;

    /// The inline declaration list, as in the `style` attribute.
    fn inline_style(&self, element: ElementId) -> Result<String>;

    /// Replaces (or adds) one inline declaration. `value` never carries
    /// `!important`.
    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str)
        -> Result<()>;

    fn attribute(&self, element: ElementId, name: &str) -> Result<Option<String>>;

    fn classes(&self, element: ElementId) -> Result<Vec<String>>;

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    /// All descendants of the element in document order, excluding itself.
    fn descendants(&self, element: ElementId) -> Result<Vec<ElementId>>;

    fn bounding_rect(&self, element: ElementId) -> Result<Rect>;

    /// True when the element has a direct text child with non-whitespace
    /// content.
    fn has_text(&self, element: ElementId) -> Result<bool>;
}
