//! Text-bearing elements waiting for a delayed background judgement.

use crate::document::ElementId;

/// FIFO of text-bearing elements.
///
/// Filled during conversion when background judging is delayed, drained by
/// [`Scheduler::convert_backgrounds`](crate::Scheduler::convert_backgrounds).
#[derive(Debug, Clone, Default)]
pub struct TextQueue {
    items: Vec<ElementId>,
}

impl TextQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ElementId) {
        self.items.push(element);
    }

    /// Removes and returns every queued element, oldest first.
    pub fn drain(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
