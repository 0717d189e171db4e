//! Conversion passes.
//!
//! The [`Scheduler`] drives a pass over an ordered element list. For each
//! element it:
//!
//! 1. strips classes left over from an earlier conversion (content copied out
//!    of a converted page must not carry stale rules),
//! 2. classifies the element against the initial viewport, while first-paint
//!    judging is on,
//! 3. synthesizes its scoped rule and applies the resulting context writes to
//!    the element's subtree,
//! 4. if the element carries text, matches it against pending layers (or
//!    queues it when background judging is delayed).
//!
//! # First paint
//!
//! Elements above the viewport go to the remaining buffer. Elements inside it
//! go to the first-paint buffer and are remembered. The first element found
//! below the viewport flushes the first-paint buffer, reveals the remembered
//! elements and ends first-paint judging for the scheduler's lifetime. If a
//! pass ends before any element is found below the viewport, the buffer is
//! flushed at the end of the pass.
//!
//! # Failures
//!
//! A failure on one element (usually the host's [`Document`] refusing an
//! operation) is logged, counted and reported to the error handler; the pass
//! continues with the next element. Everything the host can refuse is read
//! before the element is touched, and a refused write undoes the writes
//! before it, so a failed element keeps its original classes and inline
//! styles and leaves no pending layers behind.

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::context::{ContextStore, ElementColorContext};
use crate::css;
use crate::document::{Document, ElementId};
use crate::error::{ConvertError, Result};
use crate::layers::PendingLayerStack;
use crate::mode::{detect_color_mode, ColorMode};
use crate::output::{ConversionOutput, Partition, StyleSink};
use crate::sequence::ClassSequence;
use crate::synthesizer::RuleSynthesizer;
use crate::text_queue::TextQueue;

type ErrorHandler = Box<dyn FnMut(ElementId, &ConvertError)>;

/// Counters for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Mode the pass ran in. Nothing is converted in light mode.
    pub mode: ColorMode,
    pub converted: usize,
    /// Whitelisted elements.
    pub skipped: usize,
    pub failed: usize,
    /// Pending layers emitted because text overlapped them.
    pub layers_emitted: usize,
    pub first_paint_flushed: bool,
}

impl RunSummary {
    fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            converted: 0,
            skipped: 0,
            failed: 0,
            layers_emitted: 0,
            first_paint_flushed: false,
        }
    }
}

/// Owns all state of a conversion: layers, queues, contexts and class-name
/// sequences.
pub struct Scheduler {
    config: Config,
    synthesizer: RuleSynthesizer,
    layers: PendingLayerStack,
    text_queue: TextQueue,
    contexts: ContextStore,
    judge_first_paint: bool,
    delay_background_judge: bool,
    on_error: Option<ErrorHandler>,
}

impl Scheduler {
    pub fn new(config: Config) -> Self {
        Self {
            synthesizer: RuleSynthesizer::new(&config.class_prefix),
            layers: PendingLayerStack::new(&config.class_prefix),
            text_queue: TextQueue::new(),
            contexts: ContextStore::new(),
            judge_first_paint: config.judge_first_paint,
            delay_background_judge: config.delay_background_judge,
            on_error: None,
            config,
        }
    }

    /// Replaces the sequence behind element rule class names.
    pub fn with_class_sequence(mut self, sequence: ClassSequence) -> Self {
        self.synthesizer = self.synthesizer.with_sequence(sequence);
        self
    }

    /// Registers a callback for per-element failures.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: FnMut(ElementId, &ConvertError) + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pending_layers(&self) -> &PendingLayerStack {
        &self.layers
    }

    pub fn text_queue(&self) -> &TextQueue {
        &self.text_queue
    }

    /// Context recorded for `element` so far.
    pub fn context(&self, element: ElementId) -> ElementColorContext {
        self.contexts.get(element)
    }

    pub fn is_judging_first_paint(&self) -> bool {
        self.judge_first_paint
    }

    pub fn is_delaying_background_judge(&self) -> bool {
        self.delay_background_judge
    }

    /// The forced mode, or the detected one.
    pub fn resolve_mode(&self) -> ColorMode {
        self.config.mode.unwrap_or_else(detect_color_mode)
    }

    /// Converts `elements`, in order, writing stylesheets to `sink`.
    pub fn convert<D, S>(&mut self, doc: &mut D, elements: &[ElementId], sink: &mut S) -> RunSummary
    where
        D: Document + ?Sized,
        S: StyleSink + ?Sized,
    {
        let mode = self.resolve_mode();
        let mut summary = RunSummary::new(mode);
        if mode == ColorMode::Light {
            self.enter_light_mode();
            return summary;
        }

        let mut output = ConversionOutput::default();
        for &element in elements {
            match self.convert_element(doc, element, &mut output, sink, &mut summary) {
                Ok(true) => summary.converted += 1,
                Ok(false) => summary.skipped += 1,
                Err(err) => self.report(element, err, &mut summary),
            }
        }

        if output.has_pending_first_paint() {
            self.flush_first_paint(&mut output, sink);
            summary.first_paint_flushed = true;
        }
        self.write_remaining(&output.early, sink);

        debug!(
            converted = summary.converted,
            skipped = summary.skipped,
            failed = summary.failed,
            pending_layers = self.layers.len(),
            "conversion pass finished"
        );
        summary
    }

    /// Matches queued text-bearing elements against pending layers and writes
    /// every matched layer to the remaining partition.
    pub fn convert_backgrounds<D, S>(&mut self, doc: &D, sink: &mut S) -> RunSummary
    where
        D: Document + ?Sized,
        S: StyleSink + ?Sized,
    {
        let mode = self.resolve_mode();
        let mut summary = RunSummary::new(mode);
        if mode == ColorMode::Light {
            self.enter_light_mode();
            return summary;
        }

        let mut css = String::new();
        for element in self.text_queue.drain() {
            match self
                .layers
                .resolve(doc, element, |layer| css.push_str(&layer.rule()))
            {
                Ok(matched) => {
                    summary.converted += 1;
                    summary.layers_emitted += matched;
                }
                Err(err) => self.report(element, err, &mut summary),
            }
        }
        self.write_remaining(&css, sink);

        debug!(
            texts = summary.converted,
            layers = summary.layers_emitted,
            "background pass finished"
        );
        summary
    }

    /// Forgets all state: layers, queued text, contexts and class numbering.
    /// Judging flags return to their configured values.
    pub fn reset(&mut self) {
        self.synthesizer.reset_sequence();
        self.layers.clear();
        self.text_queue.clear();
        self.contexts.clear();
        self.judge_first_paint = self.config.judge_first_paint;
        self.delay_background_judge = self.config.delay_background_judge;
    }

    fn enter_light_mode(&mut self) {
        self.judge_first_paint = false;
        self.delay_background_judge = false;
        debug!("light color scheme, nothing to convert");
    }

    /// Returns `false` for whitelisted elements.
    fn convert_element<D, S>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        output: &mut ConversionOutput,
        sink: &mut S,
        summary: &mut RunSummary,
    ) -> Result<bool>
    where
        D: Document + ?Sized,
        S: StyleSink + ?Sized,
    {
        self.strip_classes(doc, element)?;

        let partition = if self.judge_first_paint {
            let rect = doc.bounding_rect(element)?;
            let height = self.config.viewport_height;
            if rect.top <= 0.0 && rect.bottom <= 0.0 {
                Partition::Remaining
            } else if (rect.top > 0.0 && rect.top < height)
                || (rect.bottom > 0.0 && rect.bottom < height)
            {
                output.first_paint_elements.push(element);
                Partition::FirstPaint
            } else {
                self.judge_first_paint = false;
                self.flush_first_paint(output, sink);
                summary.first_paint_flushed = true;
                Partition::Remaining
            }
        } else {
            Partition::Remaining
        };

        let tag = doc.tag_name(element)?;
        if self.config.whitelist.contains(&tag) {
            trace!(element = %element, tag = %tag, "whitelisted");
            return Ok(false);
        }

        let inherited = self.contexts.get(element);
        let synthesis = self.synthesizer.synthesize(&*doc, element, inherited)?;
        let descendants = if synthesis.writes.is_empty() {
            Vec::new()
        } else {
            doc.descendants(element)?
        };
        let has_text = doc.has_text(element)?;

        let committed = self
            .synthesizer
            .commit(doc, element, &synthesis, &mut self.layers)?;
        let mut css = committed.rule.clone();
        if has_text {
            if self.delay_background_judge {
                self.text_queue.push(element);
            } else {
                match self
                    .layers
                    .resolve(&*doc, element, |layer| css.push_str(&layer.rule()))
                {
                    Ok(emitted) => summary.layers_emitted += emitted,
                    Err(err) => {
                        if let Err(undo) =
                            self.synthesizer
                                .rollback(doc, element, &committed, &mut self.layers)
                        {
                            warn!(element = %element, error = %undo, "rollback incomplete");
                        }
                        return Err(err);
                    }
                }
            }
        }

        self.contexts.set(element, synthesis.context);
        for descendant in descendants {
            self.contexts.apply(descendant, &synthesis.writes);
        }

        trace!(element = %element, ?partition, bytes = css.len(), "element converted");
        output.push(&css, partition);
        Ok(true)
    }

    fn strip_classes<D: Document + ?Sized>(&self, doc: &mut D, element: ElementId) -> Result<()> {
        let prefix = &self.config.class_prefix;
        for class in doc.classes(element)? {
            if class.starts_with(prefix.as_str()) {
                doc.remove_class(element, &class)?;
            }
        }
        Ok(())
    }

    fn flush_first_paint<S: StyleSink + ?Sized>(&self, output: &mut ConversionOutput, sink: &mut S) {
        let (rules, elements) = output.take_first_paint();
        if !rules.is_empty() {
            sink.insert_stylesheet(
                &css::stylesheet(&rules, self.config.is_dark_forced()),
                Partition::FirstPaint,
            );
        }
        if !elements.is_empty() {
            sink.reveal(&elements);
        }
        debug!(elements = elements.len(), bytes = rules.len(), "first paint flushed");
    }

    fn write_remaining<S: StyleSink + ?Sized>(&self, rules: &str, sink: &mut S) {
        if !rules.is_empty() {
            sink.insert_stylesheet(
                &css::stylesheet(rules, self.config.is_dark_forced()),
                Partition::Remaining,
            );
        }
    }

    fn report(&mut self, element: ElementId, err: ConvertError, summary: &mut RunSummary) {
        warn!(element = %element, error = %err, "element conversion failed");
        summary.failed += 1;
        if let Some(handler) = self.on_error.as_mut() {
            handler(element, &err);
        }
    }
}
