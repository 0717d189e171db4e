//! Inherited color context.
//!
//! When an element's background or text color is decided, every descendant
//! must see the new state before it is converted itself. Instead of writing
//! annotations into the document, the synthesizer returns the decisions as a
//! batch of [`ContextWrite`]s and the scheduler applies that batch to the
//! element's subtree in the [`ContextStore`] before moving on.

use std::collections::HashMap;

use nightfall_color::adjust::OPAQUE_ENOUGH_ALPHA;
use nightfall_color::Color;

use crate::document::ElementId;

/// Per-element inherited color state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementColorContext {
    /// Effective (adjusted) background behind the element.
    pub background: Option<Color>,
    /// Effective (adjusted) text color.
    pub text: Option<Color>,
    /// Background as authored, before adjustment.
    pub original_background: Option<Color>,
    /// Text color as authored, before adjustment.
    pub original_text: Option<Color>,
    /// The element or an ancestor paints a background image.
    pub has_background_image: bool,
}

/// One decision that flows down to a subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContextWrite {
    /// A background color was decided. An opaque-enough background also
    /// supersedes an inherited image.
    Background { color: Color, original: Color },
    /// A text color was decided.
    Text { color: Color, original: Color },
    /// Text color set without an authored original (image fallback text).
    InheritedText(Color),
    /// The subtree sits on a background image.
    BackgroundImage,
}

impl ContextWrite {
    pub fn apply(&self, ctx: &mut ElementColorContext) {
        match *self {
            ContextWrite::Background { color, original } => {
                ctx.background = Some(color);
                ctx.original_background = Some(original);
                if color.alpha() >= OPAQUE_ENOUGH_ALPHA {
                    ctx.has_background_image = false;
                }
            }
            ContextWrite::Text { color, original } => {
                ctx.text = Some(color);
                ctx.original_text = Some(original);
            }
            ContextWrite::InheritedText(color) => ctx.text = Some(color),
            ContextWrite::BackgroundImage => ctx.has_background_image = true,
        }
    }
}

/// Context of every element touched so far in a pass.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    contexts: HashMap<ElementId, ElementColorContext>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context of `element`; the default (dark canvas, no image) if nothing
    /// was inherited.
    pub fn get(&self, element: ElementId) -> ElementColorContext {
        self.contexts.get(&element).copied().unwrap_or_default()
    }

    pub fn set(&mut self, element: ElementId, ctx: ElementColorContext) {
        self.contexts.insert(element, ctx);
    }

    /// Applies a batch of writes, in order, to one element.
    pub fn apply(&mut self, element: ElementId, writes: &[ContextWrite]) {
        if writes.is_empty() {
            return;
        }
        let ctx = self.contexts.entry(element).or_default();
        for write in writes {
            write.apply(ctx);
        }
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contexts.clear();
    }
}
