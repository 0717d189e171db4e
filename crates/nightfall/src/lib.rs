//! # Nightfall - Dark Color Scheme Engine
//!
//! `nightfall` rewrites the colors of a light-themed page into class-scoped
//! dark-mode CSS rules. It walks elements in document order, reads their
//! inline styles, adjusts every color against what the element inherits, and
//! emits rules the host inserts as stylesheets.
//!
//! The color arithmetic lives in [`nightfall_color`]; this crate drives it
//! over a document.
//!
//! ## Core Concepts
//!
//! - [`Document`]: the host's element tree, behind a trait
//! - [`Tree`]: an in-memory [`Document`] for tests and offline conversion
//! - [`Scheduler`]: converts element lists and owns all conversion state
//! - [`StyleSink`]: receives stylesheets and first-paint reveal notifications
//! - [`Config`]: mode, whitelist, first-paint and background-judging options
//! - [`ColorMode`]: forced or detected light/dark preference
//!
//! ## Quick Start
//!
//! ```rust
//! use nightfall::{ColorMode, Config, MemorySink, Node, Scheduler, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.add_root(Node::element("body").style("background-color: #ffffff"));
//! let text = tree
//!     .append(body, Node::element("p").style("color: #333333").text("Hello"))
//!     .unwrap();
//!
//! let config = Config::new()
//!     .with_mode(ColorMode::Dark)
//!     .with_first_paint_judging(false);
//! let mut scheduler = Scheduler::new(config);
//! let mut sink = MemorySink::new();
//!
//! let summary = scheduler.convert(&mut tree, &[body, text], &mut sink);
//! assert_eq!(summary.converted, 2);
//! assert!(sink.all_css().contains(".js_darkmode__0{"));
//! ```
//!
//! ## Output
//!
//! Rules are wrapped in `@media (prefers-color-scheme: dark)` unless dark mode
//! is forced. With first-paint judging on, rules for elements in the initial
//! viewport are flushed once into their own stylesheet as soon as the first
//! element below the viewport is reached; see [`scheduler`] for details.
//!
//! Background images and gradients are not rewritten in place. Their
//! compensation layers wait in a [`PendingLayerStack`] and are only emitted
//! when text is found on top of them.

pub mod config;
pub mod context;
pub mod css;
pub mod declaration;
pub mod document;
mod error;
pub mod layers;
pub mod mode;
pub mod output;
pub mod scheduler;
pub mod sequence;
pub mod synthesizer;
pub mod text_queue;
pub mod tree;

pub use config::{Config, Whitelist};
pub use context::{ContextStore, ContextWrite, ElementColorContext};
pub use declaration::{Declaration, DeclarationRole, ExtractedStyle};
pub use document::{Document, ElementId, ElementKind, Rect};
pub use error::{ConvertError, Result};
pub use layers::{PendingLayer, PendingLayerStack};
pub use mode::{detect_color_mode, reset_mode_detector, set_mode_detector, ColorMode};
pub use output::{MemorySink, Partition, StyleSink};
pub use scheduler::{RunSummary, Scheduler};
pub use sequence::ClassSequence;
pub use synthesizer::{Committed, RuleSynthesizer, Synthesis};
pub use text_queue::TextQueue;
pub use tree::{Node, Tree};

pub use nightfall_color::{Color, Role};

/// Converts `elements` with a fresh [`Scheduler`].
///
/// Convenient for one-shot conversion. Keep a [`Scheduler`] around instead
/// when converting in several passes, so class names stay unique and pending
/// layers can still be matched by later text.
pub fn run<D, S>(doc: &mut D, elements: &[ElementId], config: Config, sink: &mut S) -> RunSummary
where
    D: Document + ?Sized,
    S: StyleSink + ?Sized,
{
    Scheduler::new(config).convert(doc, elements, sink)
}
