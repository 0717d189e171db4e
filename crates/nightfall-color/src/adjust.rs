//! Brightness adjustment for dark color schemes.
//!
//! [`adjust`] decides, for one authored color, what it should become when the
//! page is rendered on a dark canvas. The decision depends on the color's
//! [`Role`] and on the inherited state in [`AdjustContext`].
//!
//! # Backgrounds
//!
//! White and light-gray backgrounds are inverted (a white page becomes a
//! near-black one), other bright backgrounds are capped at a perceived
//! brightness of 190, and very dark backgrounds are lifted to 26% lightness so
//! they stay distinguishable from the canvas. When the author did not set a
//! text color, a legible one is derived from the new background.
//!
//! # Text and Borders
//!
//! - Already bright colors (perceived brightness ≥ 250) are left alone.
//! - Colors over an image are left alone: the image luminance is unknown.
//! - Dark colors over a dark background are lifted to a brightness of 75.
//! - Otherwise the color is pushed until it is at least 60 brightness units
//!   away from its (alpha-blended) background.
//!
//! Alpha is preserved by every branch.
//!
//! # Example
//!
//! ```rust
//! use nightfall_color::{adjust, AdjustContext, Color, Role};
//!
//! let ctx = AdjustContext::default().with_explicit_text_color(true);
//! let out = adjust(Color::WHITE, Role::Background, &ctx);
//! let new_bg = out.color.unwrap();
//! assert!((new_bg.to_hsl().l - 14.0).abs() < 1e-9);
//! ```

use crate::color::{Color, LUMA_BLUE, LUMA_GREEN, LUMA_RED};

/// Perceived brightness at or above which a color counts as white.
pub const WHITE_BRIGHTNESS: f64 = 250.0;
/// Upper cap for background brightness.
pub const BACKGROUND_BRIGHTNESS_CAP: f64 = 190.0;
/// Lightness floor (percent) for backgrounds.
pub const BACKGROUND_LIGHTNESS_FLOOR: f64 = 26.0;
/// HSL lightness above which an achromatic background gets inverted.
pub const ACHROMATIC_INVERT_LIGHTNESS: f64 = 40.0;
/// Inversion axis: an inverted background gets lightness `114 - L`
/// (100 plus the 14% lightness of the dark canvas).
pub const INVERT_BASE_LIGHTNESS: f64 = 114.0;
/// Minimum brightness for text over a dark background.
pub const LOW_TEXT_BRIGHTNESS: f64 = 75.0;
/// Background brightness at or below which a background counts as dark.
pub const LOW_BACKGROUND_BRIGHTNESS: f64 = 60.0;
/// Minimum brightness gap between text and its background.
pub const OFFSET_BRIGHTNESS: f64 = 60.0;
/// Blended background brightness above which text is mirrored rather than lifted.
pub const MIRROR_BACKGROUND_BRIGHTNESS: f64 = 100.0;
/// Lightness mirror axis for text (`90 - L`).
pub const TEXT_MIRROR_LIGHTNESS: f64 = 90.0;
/// Lightness added to a dim parent background to get a text color.
pub const TEXT_LIGHTNESS_OFFSET: f64 = 40.0;
/// Brightness of the dark-mode page canvas.
pub const DARK_CANVAS_BRIGHTNESS: f64 = 25.0;
/// Minimum alpha for a background color to supersede an image.
pub const OPAQUE_ENOUGH_ALPHA: f64 = 0.05;

/// Dark-mode page canvas, `#191919`.
pub const DARK_CANVAS: Color = Color::gray(25.0);
/// Default text color of the light-mode page, `rgb(25, 25, 25)`.
pub const LIGHT_MODE_TEXT: Color = Color::gray(25.0);
/// Default background of the light-mode page.
pub const LIGHT_MODE_BACKGROUND: Color = Color::WHITE;

/// Which part of the box a color paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Text,
    Border,
}

/// Inherited state an adjustment depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjustContext {
    /// Effective background behind the color. `None` means the dark canvas.
    pub parent_background: Option<Color>,
    /// Inherited (already adjusted) text color.
    pub parent_text: Option<Color>,
    /// The element or an ancestor paints a background image.
    pub has_background_image: bool,
    /// The element sets its own `color`.
    pub has_explicit_text_color: bool,
}

impl AdjustContext {
    pub fn with_parent_background(mut self, color: Color) -> Self {
        self.parent_background = Some(color);
        self
    }

    pub fn with_parent_text(mut self, color: Color) -> Self {
        self.parent_text = Some(color);
        self
    }

    pub fn with_background_image(mut self, flag: bool) -> Self {
        self.has_background_image = flag;
        self
    }

    pub fn with_explicit_text_color(mut self, flag: bool) -> Self {
        self.has_explicit_text_color = flag;
        self
    }

    fn background(&self) -> Color {
        self.parent_background.unwrap_or(DARK_CANVAS)
    }
}

/// Outcome of [`adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustment {
    /// The replacement color, or `None` when the color stays as authored.
    pub color: Option<Color>,
    /// Text color to emit alongside a background, when the element has no
    /// explicit one.
    pub text_color: Option<Color>,
    /// The background is opaque enough to supersede an inherited image.
    pub clears_background_image: bool,
}

impl Adjustment {
    fn unchanged() -> Self {
        Self::default()
    }

    fn to(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// The adjusted color, or `original` when unchanged.
    pub fn resolve(&self, original: Color) -> Color {
        self.color.unwrap_or(original)
    }

    pub fn is_unchanged(&self) -> bool {
        self.color.is_none()
    }
}

/// Adjusts one color for a dark canvas.
pub fn adjust(color: Color, role: Role, ctx: &AdjustContext) -> Adjustment {
    let alpha = color.alpha();
    let mut out = match role {
        Role::Background => adjust_background(color, ctx),
        Role::Text | Role::Border => adjust_foreground(color, ctx),
    };
    out.color = out.color.map(|c| c.with_alpha(alpha));
    out
}

fn adjust_background(color: Color, ctx: &AdjustContext) -> Adjustment {
    let hsl = color.to_hsl();
    let brightness = color.perceived_brightness();

    let clears_background_image =
        ctx.has_background_image && color.alpha() >= OPAQUE_ENOUGH_ALPHA;

    let adjusted = if (hsl.s == 0.0 && hsl.l > ACHROMATIC_INVERT_LIGHTNESS)
        || brightness > WHITE_BRIGHTNESS
    {
        Some(color.with_lightness((INVERT_BASE_LIGHTNESS - hsl.l).min(100.0)))
    } else if brightness > BACKGROUND_BRIGHTNESS_CAP {
        let ratio = BACKGROUND_BRIGHTNESS_CAP * 1000.0 / color.weighted_sum();
        Some(Color::rgba(
            color.red() * ratio,
            color.green() * ratio,
            color.blue() * ratio,
            color.alpha(),
        ))
    } else if hsl.l < BACKGROUND_LIGHTNESS_FLOOR {
        Some(color.with_lightness(BACKGROUND_LIGHTNESS_FLOOR))
    } else {
        None
    };

    let text_color = if ctx.has_explicit_text_color {
        None
    } else {
        let parent_text = ctx.parent_text.unwrap_or(LIGHT_MODE_TEXT);
        let background = adjusted.unwrap_or(color).with_alpha(color.alpha());
        let text_ctx = AdjustContext {
            parent_background: Some(background),
            parent_text: ctx.parent_text,
            has_background_image: ctx.has_background_image && !clears_background_image,
            has_explicit_text_color: true,
        };
        Some(adjust(parent_text, Role::Text, &text_ctx).resolve(parent_text))
    };

    Adjustment {
        color: adjusted,
        text_color,
        clears_background_image,
    }
}

fn adjust_foreground(color: Color, ctx: &AdjustContext) -> Adjustment {
    if ctx.has_background_image {
        return Adjustment::unchanged();
    }

    let brightness = color.perceived_brightness();
    if brightness >= WHITE_BRIGHTNESS {
        return Adjustment::unchanged();
    }

    let parent = ctx.background();
    let blended = parent.perceived_brightness() * parent.alpha()
        + DARK_CANVAS_BRIGHTNESS * (1.0 - parent.alpha());

    if blended <= LOW_BACKGROUND_BRIGHTNESS && brightness < LOW_TEXT_BRIGHTNESS {
        let mut candidate = color;
        let hsl = color.to_hsl();
        if hsl.l <= ACHROMATIC_INVERT_LIGHTNESS {
            candidate = color.with_lightness(TEXT_MIRROR_LIGHTNESS - hsl.l);
        }

        if candidate.perceived_brightness() >= LOW_TEXT_BRIGHTNESS {
            return Adjustment::to(candidate);
        }
        return Adjustment::to(boost_to_brightness(candidate, LOW_TEXT_BRIGHTNESS));
    }

    let gap = (blended - brightness).abs();
    if gap >= OFFSET_BRIGHTNESS {
        return Adjustment::unchanged();
    }

    let hsl = color.to_hsl();
    if blended > MIRROR_BACKGROUND_BRIGHTNESS {
        let mirrored = color.with_lightness(TEXT_MIRROR_LIGHTNESS - hsl.l);
        // Mirroring alone can land on the wrong side of a mid-bright
        // background; fall back to solving for the exact target.
        if blended - mirrored.perceived_brightness() < OFFSET_BRIGHTNESS {
            Adjustment::to(boost_to_brightness(
                mirrored,
                blended - OFFSET_BRIGHTNESS,
            ))
        } else {
            Adjustment::to(mirrored)
        }
    } else {
        Adjustment::to(color.with_lightness(parent.to_hsl().l + TEXT_LIGHTNESS_OFFSET))
    }
}

/// Scales a color so its perceived brightness becomes `target`.
///
/// Channels are scaled uniformly and capped at 255. When a channel is zero or
/// was capped, uniform scaling cannot hit the target, so one remaining free
/// channel is solved from the luma equation instead. The priority order of
/// the checks is fixed: zero green, zero red, zero blue, capped red or blue
/// (solve green), capped green (solve blue). Black has no direction to scale
/// along and is returned unchanged.
pub fn boost_to_brightness(color: Color, target: f64) -> Color {
    let [r, g, b] = color.channels();
    if r == 0.0 && g == 0.0 && b == 0.0 {
        return color;
    }

    let goal = target * 1000.0;
    let ratio = goal / color.weighted_sum();
    let mut nr = (r * ratio).min(255.0);
    let mut ng = (g * ratio).min(255.0);
    let mut nb = (b * ratio).min(255.0);

    if ng == 0.0 {
        ng = (goal - nr * LUMA_RED - nb * LUMA_BLUE) / LUMA_GREEN;
    } else if nr == 0.0 {
        nr = (goal - ng * LUMA_GREEN - nb * LUMA_BLUE) / LUMA_RED;
    } else if nb == 0.0 {
        nb = (goal - nr * LUMA_RED - ng * LUMA_GREEN) / LUMA_BLUE;
    } else if nr == 255.0 || nb == 255.0 {
        ng = (goal - nr * LUMA_RED - nb * LUMA_BLUE) / LUMA_GREEN;
    } else if ng == 255.0 {
        nb = (goal - nr * LUMA_RED - ng * LUMA_GREEN) / LUMA_BLUE;
    }

    Color::rgba(nr, ng, nb, color.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;

    fn explicit() -> AdjustContext {
        AdjustContext::default().with_explicit_text_color(true)
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} ± {}, got {}",
            expected,
            tolerance,
            actual
        );
    }

    // =====================================================================
    // Background role
    // =====================================================================

    #[test]
    fn white_background_inverts_to_dark() {
        let out = adjust(Color::WHITE, Role::Background, &explicit());
        let c = out.color.unwrap();
        assert_close(c.to_hsl().l, 14.0, 1e-9);
        assert!(out.text_color.is_none());
    }

    #[test]
    fn light_gray_background_inverts() {
        // L = 80 → 114 - 80 = 34
        let gray = Color::from_hsl(Hsl::new(0.0, 0.0, 80.0));
        let c = adjust(gray, Role::Background, &explicit()).color.unwrap();
        assert_close(c.to_hsl().l, 34.0, 1e-9);
    }

    #[test]
    fn dark_gray_background_is_not_inverted() {
        // Achromatic but L = 30: only the floor check applies, and 30 ≥ 26.
        let gray = Color::from_hsl(Hsl::new(0.0, 0.0, 30.0));
        assert!(adjust(gray, Role::Background, &explicit()).is_unchanged());
    }

    #[test]
    fn near_white_chromatic_background_keeps_hue() {
        // Ivory: Y > 250 but saturated.
        let ivory = Color::rgb(255.0, 255.0, 240.0);
        let before = ivory.to_hsl();
        let after = adjust(ivory, Role::Background, &explicit())
            .color
            .unwrap()
            .to_hsl();
        assert_close(after.h, before.h, 1e-6);
        assert_close(after.s, before.s, 1e-6);
        assert_close(after.l, 114.0 - before.l, 1e-6);
    }

    #[test]
    fn bright_background_capped_at_190() {
        let yellowish = Color::rgb(255.0, 255.0, 100.0);
        assert!(yellowish.perceived_brightness() > 190.0);
        assert!(yellowish.perceived_brightness() <= 250.0);

        let c = adjust(yellowish, Role::Background, &explicit())
            .color
            .unwrap();
        assert_close(c.perceived_brightness(), 190.0, 1e-9);
        // Chroma ratio is preserved by uniform scaling.
        assert_close(c.red() / c.blue(), 2.55, 1e-9);
    }

    #[test]
    fn very_dark_background_lifted_to_floor() {
        let navy = Color::rgb(0.0, 0.0, 60.0);
        let c = adjust(navy, Role::Background, &explicit()).color.unwrap();
        assert_close(c.to_hsl().l, 26.0, 1e-9);
    }

    #[test]
    fn mid_background_unchanged() {
        // L ≈ 29.4, Y ≈ 65, saturated.
        let maroon = Color::rgb(100.0, 50.0, 50.0);
        let out = adjust(maroon, Role::Background, &explicit());
        assert!(out.is_unchanged());
        assert!(out.text_color.is_none());
    }

    #[test]
    fn background_clears_image_flag_when_opaque_enough() {
        let ctx = explicit().with_background_image(true);
        assert!(adjust(Color::WHITE, Role::Background, &ctx).clears_background_image);

        let faint = Color::rgba(255.0, 255.0, 255.0, 0.01);
        assert!(!adjust(faint, Role::Background, &ctx).clears_background_image);
    }

    #[test]
    fn background_without_text_color_derives_light_text() {
        let out = adjust(Color::WHITE, Role::Background, &AdjustContext::default());
        let text = out.text_color.unwrap();
        // Default dark text on the inverted (dark) background gets lifted.
        assert!(text.perceived_brightness() >= LOW_TEXT_BRIGHTNESS);
    }

    #[test]
    fn background_reuses_inherited_text_when_already_legible() {
        let light = Color::rgb(220.0, 220.0, 220.0);
        let ctx = AdjustContext::default().with_parent_text(light);
        // Dark background stays dark; light inherited text needs no change.
        let out = adjust(Color::rgb(40.0, 40.0, 90.0), Role::Background, &ctx);
        assert_eq!(out.text_color, Some(light));
    }

    #[test]
    fn background_preserves_alpha() {
        let c = Color::rgba(255.0, 255.0, 255.0, 0.3);
        let out = adjust(c, Role::Background, &explicit());
        assert_eq!(out.color.unwrap().alpha(), 0.3);
    }

    // =====================================================================
    // Text role
    // =====================================================================

    #[test]
    fn bright_text_is_left_alone() {
        assert!(adjust(Color::WHITE, Role::Text, &AdjustContext::default()).is_unchanged());
    }

    #[test]
    fn text_over_image_is_left_alone() {
        let ctx = AdjustContext::default().with_background_image(true);
        let dark = Color::rgb(10.0, 10.0, 10.0);
        assert!(adjust(dark, Role::Text, &ctx).is_unchanged());
    }

    #[test]
    fn dark_text_on_dark_canvas_is_mirrored() {
        let dark = Color::rgb(10.0, 10.0, 10.0);
        let c = adjust(dark, Role::Text, &AdjustContext::default())
            .color
            .unwrap();
        assert_close(c.to_hsl().l, 90.0 - dark.to_hsl().l, 1e-9);
        assert!(c.perceived_brightness() >= LOW_TEXT_BRIGHTNESS);
    }

    #[test]
    fn saturated_dim_text_is_solved_to_exact_floor() {
        // Pure blue: L = 50 so no mirror, Y ≈ 29 → scaled, blue clamps,
        // green (zero) is solved.
        let blue = Color::rgb(0.0, 0.0, 255.0);
        let c = adjust(blue, Role::Text, &AdjustContext::default())
            .color
            .unwrap();
        assert_close(c.perceived_brightness(), 75.0, 1e-9);
        assert_eq!(c.blue(), 255.0);
        assert_eq!(c.red(), 0.0);
    }

    #[test]
    fn text_with_enough_contrast_is_unchanged() {
        // Canvas 25, text ~ 160: gap > 60.
        let c = Color::rgb(160.0, 160.0, 160.0);
        assert!(adjust(c, Role::Text, &AdjustContext::default()).is_unchanged());
    }

    #[test]
    fn low_contrast_on_bright_background_is_pushed_away() {
        let bg = Color::rgb(180.0, 180.0, 180.0);
        let ctx = AdjustContext::default().with_parent_background(bg);
        let text = Color::rgb(170.0, 160.0, 150.0);
        let c = adjust(text, Role::Text, &ctx).color.unwrap();
        let gap = bg.perceived_brightness() - c.perceived_brightness();
        assert!(gap >= OFFSET_BRIGHTNESS - 1e-6, "gap was {}", gap);
    }

    #[test]
    fn mirror_that_stays_too_close_is_solved_to_offset() {
        // Yellow mirrors to rgb(204, 204, 0), still within 60 of the parent.
        let bg = Color::gray(200.0);
        let ctx = AdjustContext::default().with_parent_background(bg);
        let text = Color::rgb(255.0, 255.0, 0.0);
        let c = adjust(text, Role::Text, &ctx).color.unwrap();
        assert_close(c.perceived_brightness(), 140.0, 1e-6);
        assert_eq!(c.to_css(), "rgb(158, 158, 0)");
    }

    #[test]
    fn low_contrast_on_dim_background_lightens_relative_to_parent() {
        let bg = Color::rgb(90.0, 70.0, 70.0);
        let ctx = AdjustContext::default().with_parent_background(bg);
        let text = Color::rgb(100.0, 80.0, 80.0);
        let c = adjust(text, Role::Text, &ctx).color.unwrap();
        assert_close(c.to_hsl().l, bg.to_hsl().l + 40.0, 1e-9);
    }

    #[test]
    fn translucent_parent_blends_with_canvas() {
        // A fully transparent white parent behaves like the dark canvas.
        let bg = Color::rgba(255.0, 255.0, 255.0, 0.0);
        let ctx = AdjustContext::default().with_parent_background(bg);
        let dark = Color::rgb(10.0, 10.0, 10.0);
        let c = adjust(dark, Role::Text, &ctx).color.unwrap();
        assert!(c.perceived_brightness() >= LOW_TEXT_BRIGHTNESS);
    }

    #[test]
    fn border_follows_text_rules() {
        let dark = Color::rgb(10.0, 10.0, 10.0);
        let ctx = AdjustContext::default();
        assert_eq!(
            adjust(dark, Role::Border, &ctx),
            adjust(dark, Role::Text, &ctx)
        );
    }

    #[test]
    fn text_preserves_alpha() {
        let c = Color::rgba(0.0, 0.0, 255.0, 0.25);
        let out = adjust(c, Role::Text, &AdjustContext::default());
        assert_eq!(out.color.unwrap().alpha(), 0.25);
    }

    // =====================================================================
    // Boost routine
    // =====================================================================

    #[test]
    fn boost_leaves_black_alone() {
        assert_eq!(boost_to_brightness(Color::BLACK, 75.0), Color::BLACK);
    }

    #[test]
    fn boost_scales_uniformly_when_unclamped() {
        let c = boost_to_brightness(Color::rgb(20.0, 20.0, 20.0), 75.0);
        assert_close(c.red(), 75.0, 1e-9);
        assert_close(c.perceived_brightness(), 75.0, 1e-9);
    }

    #[test]
    fn boost_solves_red_when_red_is_zero() {
        let c = boost_to_brightness(Color::rgb(0.0, 1.0, 200.0), 75.0);
        assert_eq!(c.blue(), 255.0);
        assert!(c.red() > 0.0);
        assert_close(c.perceived_brightness(), 75.0, 1e-9);
    }
}
