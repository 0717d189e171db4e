//! Per-element rule synthesis.
//!
//! [`RuleSynthesizer::synthesize`] converts one element: it walks the
//! element's color-bearing inline declarations in processing order, runs
//! every embedded color through [`adjust`], and collects the rewritten
//! declarations into a single rule scoped to a freshly minted class.
//!
//! # Gradients
//!
//! A gradient's stops are reduced to one color by mixing the first stop with
//! the last remaining one until a single color is left. The adjusted mix
//! replaces the whole value as a flat color, and the declaration is parked on
//! the [`PendingLayerStack`] instead of the element's rule: like an image, a
//! gradient only needs dark treatment where text overlaps it.
//!
//! # Background images
//!
//! Images are never darkened directly. A translucent black overlay layer is
//! put in front of the image, and a pending layer repeats the image between
//! that overlay and a flat fallback of the authored background color, with
//! `background-position` and `background-size` lists realigned to the extra
//! layers. Text on an image keeps its light-mode color, since the image is
//! assumed to be light.
//!
//! # Context
//!
//! Every background or text decision is recorded as a [`ContextWrite`],
//! applied to the element's own context immediately and returned so the
//! scheduler can apply it to the subtree.
//!
//! # Committing
//!
//! [`RuleSynthesizer::synthesize`] only reads the document. Its document
//! writes (demoting inline `!important`, parking layers, adding classes) are
//! carried out by [`RuleSynthesizer::commit`], which undoes whatever it
//! already wrote if one of them fails. An element that fails leaves no
//! classes, layers or edited inline styles behind.

use nightfall_color::adjust::{LIGHT_MODE_BACKGROUND, LIGHT_MODE_TEXT};
use nightfall_color::{adjust, normalize_colors, AdjustContext, Color, Role};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use crate::context::{ContextWrite, ElementColorContext};
use crate::css;
use crate::declaration::{Declaration, ExtractedStyle};
use crate::document::{Document, ElementId, ElementKind};
use crate::error::Result;
use crate::layers::PendingLayerStack;
use crate::sequence::ClassSequence;

static COLOR_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)rgba?\([^)]+\)").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)url\([^)]*\)").unwrap());

/// Result of converting one element, not yet written to the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Synthesis {
    /// Declarations of the element's scoped rule, without braces. Empty when
    /// nothing changed.
    pub body: String,
    /// Fragments to park on the pending layer stack, in order.
    pub layers: Vec<String>,
    /// Inline `!important` declarations to demote so the scoped rule wins.
    pub demotions: Vec<Declaration>,
    /// The element's own context after its declarations were applied.
    pub context: ElementColorContext,
    /// Decisions to apply, in order, to every descendant.
    pub writes: Vec<ContextWrite>,
}

/// What [`RuleSynthesizer::commit`] wrote to the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Committed {
    /// The element's scoped rule, or empty when nothing changed.
    pub rule: String,
    /// Class added to the element for [`rule`](Self::rule).
    pub class_name: Option<String>,
    /// Classes of the pending layers parked for the element.
    pub layer_classes: Vec<String>,
    demoted: Vec<Declaration>,
}

/// Turns elements into scoped dark-mode rules.
#[derive(Debug, Clone)]
pub struct RuleSynthesizer {
    class_prefix: String,
    sequence: ClassSequence,
}

impl RuleSynthesizer {
    pub fn new(class_prefix: &str) -> Self {
        Self {
            class_prefix: class_prefix.to_string(),
            sequence: ClassSequence::new(),
        }
    }

    /// Replaces the class-name sequence.
    pub fn with_sequence(mut self, sequence: ClassSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn sequence(&self) -> &ClassSequence {
        &self.sequence
    }

    pub fn reset_sequence(&mut self) {
        self.sequence.reset();
    }

    /// Converts one element without touching the document.
    ///
    /// `inherited` is the context the element received from its ancestors.
    /// Deferred fragments (image layers, flattened gradients) are returned in
    /// [`Synthesis::layers`].
    pub fn synthesize<D: Document + ?Sized>(
        &self,
        doc: &D,
        element: ElementId,
        inherited: ElementColorContext,
    ) -> Result<Synthesis> {
        let style = ExtractedStyle::from_element(doc, element)?;
        let kind = doc.kind(element)?;
        trace!(
            element = %element,
            declarations = style.declarations.len(),
            "synthesizing rule"
        );

        let mut pass = ElementPass {
            kind,
            style: &style,
            ctx: inherited,
            out: Synthesis::default(),
        };
        for decl in &style.declarations {
            pass.convert(decl);
        }

        let ElementPass { ctx, mut out, .. } = pass;
        out.context = ctx;
        Ok(out)
    }

    /// Writes a synthesis to the document: demotes inline `!important`
    /// declarations, parks its layers and adds the rule's class.
    ///
    /// If any write fails, the ones already made are undone and the error is
    /// returned.
    pub fn commit<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        synthesis: &Synthesis,
        layers: &mut PendingLayerStack,
    ) -> Result<Committed> {
        let mut done = Committed::default();
        match self.write_all(doc, element, synthesis, layers, &mut done) {
            Ok(()) => Ok(done),
            Err(err) => {
                if let Err(undo) = self.rollback(doc, element, &done, layers) {
                    warn!(element = %element, error = %undo, "rollback incomplete");
                }
                Err(err)
            }
        }
    }

    /// Undoes a commit: drops its layers, removes its classes and restores
    /// demoted `!important` declarations.
    pub fn rollback<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        element: ElementId,
        committed: &Committed,
        layers: &mut PendingLayerStack,
    ) -> Result<()> {
        layers.discard(&committed.layer_classes);
        for class in committed
            .layer_classes
            .iter()
            .chain(committed.class_name.iter())
        {
            doc.remove_class(element, class)?;
        }
        for decl in &committed.demoted {
            doc.set_style_property(
                element,
                &decl.property,
                &format!("{} !important", decl.value),
            )?;
        }
        Ok(())
    }

    fn write_all<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        synthesis: &Synthesis,
        layers: &mut PendingLayerStack,
        done: &mut Committed,
    ) -> Result<()> {
        for decl in &synthesis.demotions {
            doc.set_style_property(element, &decl.property, &decl.value)?;
            done.demoted.push(decl.clone());
        }
        for fragment in &synthesis.layers {
            let class = layers.push(doc, element, fragment.clone())?;
            done.layer_classes.push(class);
        }
        if !synthesis.body.is_empty() {
            let class = self.sequence.next_name(&self.class_prefix);
            doc.add_class(element, &class)?;
            done.rule = css::rule(&class, &synthesis.body);
            done.class_name = Some(class);
        }
        Ok(())
    }
}

/// State of one element's conversion.
struct ElementPass<'s> {
    kind: ElementKind,
    style: &'s ExtractedStyle,
    ctx: ElementColorContext,
    out: Synthesis,
}

impl ElementPass<'_> {
    fn convert(&mut self, decl: &Declaration) {
        let mut value = normalize_colors(&decl.value);
        let is_gradient = value.contains("gradient");
        let mut changed = false;
        let mut flattened = None;

        if !self.style.has_background_image && COLOR_FUNCTION.is_match(&value) {
            if is_gradient {
                if let Some(mixed) = mix_stops(&value) {
                    flattened = Some(self.adjust_color(mixed, decl).unwrap_or(mixed));
                    changed = true;
                }
            } else if let Some(adjusted) = self.adjust_value(&value, decl) {
                value = adjusted;
                changed = true;
            }
        }

        if self.kind != ElementKind::Svg
            && (decl.is_background() || decl.is_border_image())
            && URL.is_match(&value)
        {
            value = self.layer_image(decl, value);
            changed = true;
        }

        if !changed {
            return;
        }

        if decl.important {
            self.out.demotions.push(decl.clone());
        }

        if is_gradient {
            let fragment = match flattened {
                Some(color) => flat_fragment(&decl.property, color),
                None => css::declaration(&decl.property, &value),
            };
            self.out.layers.push(fragment);
        } else {
            self.out
                .body
                .push_str(&css::declaration(&decl.property, &value));
        }
    }

    /// Adjusts every color function in `value`. `None` when nothing changed.
    fn adjust_value(&mut self, value: &str, decl: &Declaration) -> Option<String> {
        let mut out = String::with_capacity(value.len());
        let mut last = 0;
        let mut changed = false;

        for m in COLOR_FUNCTION.find_iter(value) {
            out.push_str(&value[last..m.start()]);
            let adjusted = Color::parse(m.as_str())
                .ok()
                .and_then(|color| self.adjust_color(color, decl));
            match adjusted {
                Some(color) => {
                    out.push_str(&color.to_css());
                    changed = true;
                }
                None => out.push_str(m.as_str()),
            }
            last = m.end();
        }
        out.push_str(&value[last..]);

        changed.then_some(out)
    }

    /// Adjusts one color and records the decision.
    fn adjust_color(&mut self, color: Color, decl: &Declaration) -> Option<Color> {
        let role = decl.color_role()?;
        let ctx = AdjustContext {
            parent_background: self.ctx.background,
            parent_text: self.ctx.text,
            has_background_image: self.ctx.has_background_image,
            has_explicit_text_color: self.style.has_inline_color,
        };
        let adjustment = adjust(color, role, &ctx);

        if let Some(text) = adjustment.text_color {
            self.out
                .body
                .push_str(&css::declaration("color", &text.to_css()));
        }
        if adjustment.clears_background_image {
            self.ctx.has_background_image = false;
        }

        let resolved = adjustment.resolve(color);
        match role {
            Role::Background => self.write(ContextWrite::Background {
                color: resolved,
                original: color,
            }),
            Role::Text => self.write(ContextWrite::Text {
                color: resolved,
                original: color,
            }),
            Role::Border => {}
        }

        adjustment.color
    }

    /// Layers an image declaration and returns the element's new value.
    fn layer_image(&mut self, decl: &Declaration, value: String) -> String {
        let fallback = css::flat_layer(
            &self
                .ctx
                .original_background
                .unwrap_or(LIGHT_MODE_BACKGROUND)
                .to_css(),
        );
        let overlay = css::flat_layer(css::IMAGE_OVERLAY);

        if !self.ctx.has_background_image {
            self.write(ContextWrite::BackgroundImage);
        }

        let mut value = value;
        if decl.is_background() {
            let layered = format!("{},{}", overlay, value);
            let mut pending =
                css::declaration(&decl.property, &format!("{},{}", layered, fallback));

            if let Some(position) = &self.style.background_position {
                self.out.body.push_str(&css::declaration(
                    "background-position",
                    &format!("top left,{}", position),
                ));
                pending.push_str(&css::declaration(
                    "background-position",
                    &format!("top left,{},top left", position),
                ));
            }
            if let Some(size) = &self.style.background_size {
                self.out.body.push_str(&css::declaration(
                    "background-size",
                    &format!("100%,{}", size),
                ));
                pending.push_str(&css::declaration(
                    "background-size",
                    &format!("100%,{},100%", size),
                ));
            }

            self.out.layers.push(pending);
            value = layered;
        } else if !self.style.has_inline_background {
            // Border images cannot take extra layers; compensate on the
            // element's own background instead.
            self.out.layers.push(css::declaration(
                "background-image",
                &format!("{},{}", overlay, fallback),
            ));
        }

        if !self.style.has_inline_color {
            let text = self.ctx.original_text.unwrap_or(LIGHT_MODE_TEXT);
            self.out
                .body
                .push_str(&css::declaration("color", &text.to_css()));
            self.write(ContextWrite::InheritedText(text));
        }

        value
    }

    fn write(&mut self, write: ContextWrite) {
        write.apply(&mut self.ctx);
        self.out.writes.push(write);
    }
}

/// Reduces a gradient's stops to one color: the first stop is mixed with the
/// last remaining stop until none are left.
fn mix_stops(value: &str) -> Option<Color> {
    let stops: Vec<Color> = COLOR_FUNCTION
        .find_iter(value)
        .filter_map(|m| Color::parse(m.as_str()).ok())
        .collect();
    let (first, rest) = stops.split_first()?;
    Some(rest.iter().rev().fold(*first, |acc, next| acc.mix(next, 0.5)))
}

/// Flat-color replacement for a gradient declaration.
fn flat_fragment(property: &str, color: Color) -> String {
    let color = color.to_css();
    match property {
        "background-color" => css::declaration("background-color", &color),
        "border-image" | "-webkit-border-image" => {
            css::declaration(property, "none") + &css::declaration("border-color", &color)
        }
        p if p.starts_with("background") => {
            css::declaration("background-image", "none")
                + &css::declaration("background-color", &color)
        }
        p if p.starts_with("border") => css::declaration("border-color", &color),
        _ => css::declaration(property, &color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Rect;
    use crate::tree::{Node, Tree};

    const PREFIX: &str = "nf__";

    struct Run {
        css: String,
        class_name: Option<String>,
        context: ElementColorContext,
        writes: Vec<ContextWrite>,
    }

    struct Fixture {
        tree: Tree,
        layers: PendingLayerStack,
        synth: RuleSynthesizer,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tree: Tree::new(),
                layers: PendingLayerStack::new(PREFIX),
                synth: RuleSynthesizer::new(PREFIX),
            }
        }

        fn run(&mut self, element: ElementId) -> Run {
            self.run_with(element, ElementColorContext::default())
        }

        /// Synthesizes and commits.
        fn run_with(&mut self, element: ElementId, ctx: ElementColorContext) -> Run {
            let synthesis = self.synth.synthesize(&self.tree, element, ctx).unwrap();
            let committed = self
                .synth
                .commit(&mut self.tree, element, &synthesis, &mut self.layers)
                .unwrap();
            Run {
                css: committed.rule,
                class_name: committed.class_name,
                context: synthesis.context,
                writes: synthesis.writes,
            }
        }

        fn layer_css(&self) -> Vec<String> {
            self.layers.iter().map(|l| l.css.clone()).collect()
        }
    }

    // =====================================================================
    // Plain colors
    // =====================================================================

    #[test]
    fn white_background_becomes_dark_rule() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(Node::element("div").style("background-color: #fff"));

        let out = fx.run(div);
        assert_eq!(out.class_name.as_deref(), Some("nf__0"));
        assert!(out.css.starts_with(".nf__0{"));
        assert!(out
            .css
            .contains("background-color: rgb(36, 36, 36) !important;"));
        // No inline color: a legible default text color is emitted too.
        assert!(out.css.contains("color: rgb("));
        assert_eq!(fx.tree.classes(div).unwrap(), vec!["nf__0".to_string()]);
    }

    #[test]
    fn background_decision_is_written_to_context() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(Node::element("div").style("background: white"));

        let out = fx.run(div);
        assert_eq!(out.writes.len(), 1);
        match out.writes[0] {
            ContextWrite::Background { color, original } => {
                assert_eq!(original, Color::WHITE);
                assert!((color.to_hsl().l - 14.0).abs() < 1e-9);
            }
            other => panic!("unexpected write {:?}", other),
        }
        assert_eq!(out.context.original_background, Some(Color::WHITE));
    }

    #[test]
    fn text_uses_background_from_same_element() {
        let mut fx = Fixture::new();
        // Background is processed first even though color is written first.
        let div = fx.tree.add_root(
            Node::element("div").style("color: rgb(100, 100, 100); background-color: rgb(200, 200, 200)"),
        );

        let out = fx.run(div);
        let ctx = out.context;
        let bg = ctx.background.unwrap();
        let text = ctx.text.unwrap();
        // Light gray is inverted before the text is judged against it.
        assert!(bg.perceived_brightness() < 100.0);
        assert!((bg.perceived_brightness() - text.perceived_brightness()).abs() >= 59.0);
    }

    #[test]
    fn bright_text_produces_no_rule() {
        let mut fx = Fixture::new();
        let p = fx.tree.add_root(Node::element("p").style("color: #fff"));

        let out = fx.run(p);
        assert!(out.css.is_empty());
        assert!(out.class_name.is_none());
        assert!(fx.tree.classes(p).unwrap().is_empty());
    }

    #[test]
    fn unparseable_color_is_left_verbatim() {
        let mut fx = Fixture::new();
        let p = fx.tree.add_root(Node::element("p").style("color: rgb(a, b, c)"));
        assert!(fx.run(p).css.is_empty());
    }

    #[test]
    fn dark_text_is_lifted() {
        let mut fx = Fixture::new();
        let p = fx.tree.add_root(Node::element("p").style("color: #111"));

        let out = fx.run(p);
        let text = out.context.text.unwrap();
        assert!(text.perceived_brightness() >= 75.0);
        assert_eq!(out.context.original_text, Some(Color::gray(17.0)));
        assert!(out.css.contains(&format!("color: {} !important;", text.to_css())));
    }

    #[test]
    fn border_colors_are_adjusted_in_place() {
        let mut fx = Fixture::new();
        let div = fx
            .tree
            .add_root(Node::element("div").style("border: 1px solid #000"));

        let out = fx.run(div);
        assert!(out.css.contains("border: 1px solid rgb("));
        assert!(!out.css.contains("rgb(0, 0, 0)"));
        assert!(out.writes.is_empty());
    }

    #[test]
    fn important_inline_declaration_is_relaxed() {
        let mut fx = Fixture::new();
        let p = fx
            .tree
            .add_root(Node::element("p").style("color: #000 !important"));

        fx.run(p);
        assert_eq!(fx.tree.style_property(p, "color"), Some("#000"));
    }

    #[test]
    fn synthesize_leaves_document_untouched() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(
            Node::element("div")
                .style("background: linear-gradient(#fff, #eee) !important; color: #000"),
        );

        let synthesis = fx
            .synth
            .synthesize(&fx.tree, div, ElementColorContext::default())
            .unwrap();
        assert!(!synthesis.body.is_empty());
        assert_eq!(synthesis.layers.len(), 1);
        assert_eq!(synthesis.demotions.len(), 1);

        assert!(fx.tree.classes(div).unwrap().is_empty());
        assert!(fx.layers.is_empty());
        assert_eq!(
            fx.tree.style_property(div, "background"),
            Some("linear-gradient(#fff, #eee) !important")
        );
        assert_eq!(fx.synth.sequence().peek(), 0);
    }

    #[test]
    fn rollback_undoes_a_commit() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(
            Node::element("div")
                .class("lead")
                .style("background: linear-gradient(#fff, #eee) !important; color: #000"),
        );

        let synthesis = fx
            .synth
            .synthesize(&fx.tree, div, ElementColorContext::default())
            .unwrap();
        let committed = fx
            .synth
            .commit(&mut fx.tree, div, &synthesis, &mut fx.layers)
            .unwrap();
        assert_eq!(committed.layer_classes, vec!["nf__bg__0".to_string()]);
        assert_eq!(committed.class_name.as_deref(), Some("nf__0"));
        assert_eq!(
            fx.tree.style_property(div, "background"),
            Some("linear-gradient(#fff, #eee)")
        );

        fx.synth
            .rollback(&mut fx.tree, div, &committed, &mut fx.layers)
            .unwrap();
        assert_eq!(fx.tree.classes(div).unwrap(), vec!["lead".to_string()]);
        assert!(fx.layers.is_empty());
        assert_eq!(
            fx.tree.style_property(div, "background"),
            Some("linear-gradient(#fff, #eee) !important")
        );
    }

    #[test]
    fn class_names_increase() {
        let mut fx = Fixture::new();
        let a = fx.tree.add_root(Node::element("p").style("color: #000"));
        let b = fx.tree.add_root(Node::element("p").style("color: #000"));

        assert_eq!(fx.run(a).class_name.as_deref(), Some("nf__0"));
        assert_eq!(fx.run(b).class_name.as_deref(), Some("nf__1"));
    }

    // =====================================================================
    // Gradients
    // =====================================================================

    #[test]
    fn stops_mix_first_with_last() {
        let mixed = mix_stops("linear-gradient(rgb(255, 0, 0), rgb(0, 128, 0), rgb(0, 0, 255))")
            .unwrap();
        // red + blue, then + green
        assert_eq!(mixed.channels(), [63.75, 64.0, 63.75]);
    }

    #[test]
    fn gradient_is_flattened_into_pending_layer() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(
            Node::element("div")
                .style("background-image: linear-gradient(to right, red, green, blue)"),
        );

        let out = fx.run(div);
        assert!(out.css.is_empty() || !out.css.contains("background-image"));

        let layers = fx.layer_css();
        assert_eq!(layers.len(), 1);
        let fragment = &layers[0];
        assert!(!fragment.contains("gradient("));
        assert_eq!(fragment.matches("rgb").count(), 1);
        assert!(fragment.starts_with("background-image: none !important;background-color: rgb("));
        assert!(fx.tree.classes(div).unwrap().contains(&"nf__bg__0".to_string()));
    }

    #[test]
    fn border_gradient_flattens_to_border_color() {
        assert_eq!(
            flat_fragment("border-image", Color::WHITE),
            "border-image: none !important;border-color: rgb(255, 255, 255) !important;"
        );
        assert_eq!(
            flat_fragment("border-top", Color::WHITE),
            "border-color: rgb(255, 255, 255) !important;"
        );
    }

    // =====================================================================
    // Images
    // =====================================================================

    #[test]
    fn background_image_gets_overlay_and_fallback_layers() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(Node::element("div").style(
            "background-image: url(a.png); background-position: center; background-size: cover",
        ));

        let out = fx.run(div);
        assert!(out.css.contains(
            "background-image: linear-gradient(rgba(0, 0, 0, 0.1), rgba(0, 0, 0, 0.1)),url(a.png) !important;"
        ));
        assert!(out
            .css
            .contains("background-position: top left,center !important;"));
        assert!(out.css.contains("background-size: 100%,cover !important;"));
        assert!(out.css.contains("color: rgb(25, 25, 25) !important;"));

        let layers = fx.layer_css();
        assert_eq!(layers.len(), 1);
        assert!(layers[0].contains(
            "url(a.png),linear-gradient(rgb(255, 255, 255), rgb(255, 255, 255)) !important;"
        ));
        assert!(layers[0].contains("top left,center,top left"));
        assert!(layers[0].contains("100%,cover,100%"));

        assert!(out.context.has_background_image);
        assert!(out.writes.contains(&ContextWrite::BackgroundImage));
        assert!(out
            .writes
            .contains(&ContextWrite::InheritedText(LIGHT_MODE_TEXT)));
    }

    #[test]
    fn image_fallback_uses_inherited_original_background() {
        let mut fx = Fixture::new();
        let div = fx
            .tree
            .add_root(Node::element("div").style("background-image: url(a.png)"));
        let inherited = ElementColorContext {
            original_background: Some(Color::rgb(255.0, 240.0, 200.0)),
            ..Default::default()
        };

        fx.run_with(div, inherited);
        assert!(fx.layer_css()[0].contains("linear-gradient(rgb(255, 240, 200), rgb(255, 240, 200))"));
    }

    #[test]
    fn colors_next_to_images_are_not_adjusted() {
        let mut fx = Fixture::new();
        let div = fx.tree.add_root(
            Node::element("div").style("background: #fff url(a.png); color: #000"),
        );

        let out = fx.run(div);
        assert!(out.css.contains("rgb(255, 255, 255) url(a.png)"));
        assert!(!out.css.contains("color: "));
    }

    #[test]
    fn border_image_compensates_on_background() {
        let mut fx = Fixture::new();
        let div = fx
            .tree
            .add_root(Node::element("div").style("border-image: url(frame.png) 30 round"));

        let out = fx.run(div);
        assert!(out
            .css
            .contains("border-image: url(frame.png) 30 round !important;"));
        assert_eq!(
            fx.layer_css(),
            vec![
                "background-image: linear-gradient(rgba(0, 0, 0, 0.1), rgba(0, 0, 0, 0.1)),\
                 linear-gradient(rgb(255, 255, 255), rgb(255, 255, 255)) !important;"
                    .to_string()
            ]
        );
    }

    #[test]
    fn svg_elements_skip_image_layering() {
        let mut fx = Fixture::new();
        let svg = fx.tree.add_root(
            Node::svg("rect")
                .style("background-image: url(a.png)")
                .rect(Rect::vertical(0.0, 10.0)),
        );

        let out = fx.run(svg);
        assert!(out.css.is_empty());
        assert!(fx.layers.is_empty());
    }
}
