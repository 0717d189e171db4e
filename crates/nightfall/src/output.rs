//! Where converted CSS goes.

use crate::document::ElementId;

/// Which stylesheet a block of rules belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Rules for elements in the initial viewport, flushed once.
    FirstPaint,
    /// Everything else.
    Remaining,
}

/// Receives the engine's output.
///
/// The host inserts stylesheets into the page and makes first-paint elements
/// visible (hosts typically hide them until their rules are in place).
pub trait StyleSink {
    fn insert_stylesheet(&mut self, css: &str, partition: Partition);

    fn reveal(&mut self, elements: &[ElementId]);
}

/// A [`StyleSink`] that records everything it receives.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub stylesheets: Vec<(Partition, String)>,
    pub revealed: Vec<ElementId>,
    pub reveal_calls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stylesheets inserted for `partition`, in order.
    pub fn sheets(&self, partition: Partition) -> Vec<&str> {
        self.stylesheets
            .iter()
            .filter(|(p, _)| *p == partition)
            .map(|(_, css)| css.as_str())
            .collect()
    }

    /// All inserted CSS concatenated.
    pub fn all_css(&self) -> String {
        self.stylesheets
            .iter()
            .map(|(_, css)| css.as_str())
            .collect()
    }
}

impl StyleSink for MemorySink {
    fn insert_stylesheet(&mut self, css: &str, partition: Partition) {
        self.stylesheets.push((partition, css.to_string()));
    }

    fn reveal(&mut self, elements: &[ElementId]) {
        self.revealed.extend_from_slice(elements);
        self.reveal_calls += 1;
    }
}

/// Rule text accumulated during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Rules for elements above the viewport and, once first paint is
    /// flushed, for everything after.
    pub early: String,
    /// Rules for elements in the initial viewport.
    pub first_paint: String,
    /// Elements whose rules are in `first_paint`.
    pub first_paint_elements: Vec<ElementId>,
}

impl ConversionOutput {
    pub fn push(&mut self, css: &str, partition: Partition) {
        match partition {
            Partition::FirstPaint => self.first_paint.push_str(css),
            Partition::Remaining => self.early.push_str(css),
        }
    }

    pub fn has_pending_first_paint(&self) -> bool {
        !self.first_paint.is_empty() || !self.first_paint_elements.is_empty()
    }

    /// Takes the first-paint rules and elements, leaving them empty.
    pub fn take_first_paint(&mut self) -> (String, Vec<ElementId>) {
        (
            std::mem::take(&mut self.first_paint),
            std::mem::take(&mut self.first_paint_elements),
        )
    }
}
