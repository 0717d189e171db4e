//! Deferred background layers.
//!
//! Image compensation layers and flattened gradients only matter where text
//! sits on top of them. They are parked here, each under its own scoped class,
//! and emitted when a text-bearing element is found to overlap the element
//! that owns them. Layers that never meet any text are never emitted.
//!
//! Matching is a linear scan with lazily cached geometry: each entry's
//! bounding box is read from the document the first time it is compared.
//! Geometry is read for every entry before any entry is consumed, so a failed
//! read leaves the stack as it was.

use crate::css;
use crate::document::{Document, ElementId, Rect};
use crate::error::Result;
use crate::sequence::ClassSequence;

/// One parked CSS fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLayer {
    pub element: ElementId,
    pub class_name: String,
    /// Declaration block without braces.
    pub css: String,
    /// Cached bounding box of `element`.
    pub rect: Option<Rect>,
}

impl PendingLayer {
    /// The layer as a class-scoped rule.
    pub fn rule(&self) -> String {
        css::rule(&self.class_name, &self.css)
    }
}

/// Stack of pending layers, in push order.
#[derive(Debug, Clone)]
pub struct PendingLayerStack {
    prefix: String,
    sequence: ClassSequence,
    entries: Vec<PendingLayer>,
}

impl PendingLayerStack {
    /// Layer classes are named `{class_prefix}bg__{n}`.
    pub fn new(class_prefix: &str) -> Self {
        Self {
            prefix: format!("{}bg__", class_prefix),
            sequence: ClassSequence::new(),
            entries: Vec::new(),
        }
    }

    /// Parks `css` for `element` under a fresh class, which is added to the
    /// element right away. Returns the class.
    pub fn push<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        css: String,
    ) -> Result<String> {
        let class_name = self.sequence.next_name(&self.prefix);
        doc.add_class(element, &class_name)?;
        self.entries.push(PendingLayer {
            element,
            class_name: class_name.clone(),
            css,
            rect: None,
        });
        Ok(class_name)
    }

    /// Drops the layers with the given classes without emitting them.
    ///
    /// Returns the number of layers dropped.
    pub fn discard(&mut self, class_names: &[String]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|layer| !class_names.contains(&layer.class_name));
        before - self.entries.len()
    }

    /// Emits and removes every layer overlapping `candidate`.
    ///
    /// Returns the number of layers matched.
    pub fn resolve<D, F>(&mut self, doc: &D, candidate: ElementId, mut on_match: F) -> Result<usize>
    where
        D: Document + ?Sized,
        F: FnMut(&PendingLayer),
    {
        if self.entries.is_empty() {
            return Ok(0);
        }

        let target = doc.bounding_rect(candidate)?;
        for layer in &mut self.entries {
            if layer.rect.is_none() {
                layer.rect = Some(doc.bounding_rect(layer.element)?);
            }
        }

        let mut matched = 0;
        let mut kept = Vec::with_capacity(self.entries.len());
        for layer in std::mem::take(&mut self.entries) {
            if layer.rect.is_some_and(|rect| rect.intersects(&target)) {
                on_match(&layer);
                matched += 1;
            } else {
                kept.push(layer);
            }
        }
        self.entries = kept;
        Ok(matched)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingLayer> {
        self.entries.iter()
    }

    /// Drops every pending layer and restarts class numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sequence.reset();
    }
}
