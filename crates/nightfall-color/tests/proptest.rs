//! Property-based tests for the brightness adjuster using proptest.

use nightfall_color::{adjust, AdjustContext, Color, Hsl, Role};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn color_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>(), 0.0f64..=1.0).prop_map(|(r, g, b, a)| {
        Color::rgba(f64::from(r), f64::from(g), f64::from(b), a)
    })
}

fn opaque_color_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b)| Color::rgb(f64::from(r), f64::from(g), f64::from(b)))
}

/// Colors with perceived brightness below 75.
fn dim_color_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![
        (0u8..75, 0u8..75, 0u8..75),
        (0u8..=30, 0u8..=30, any::<u8>()),
    ]
    .prop_map(|(r, g, b)| Color::rgb(f64::from(r), f64::from(g), f64::from(b)))
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Background), Just(Role::Text), Just(Role::Border)]
}

fn context_strategy() -> impl Strategy<Value = AdjustContext> {
    (
        prop::option::of(color_strategy()),
        prop::option::of(opaque_color_strategy()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(bg, text, image, explicit)| AdjustContext {
            parent_background: bg,
            parent_text: text,
            has_background_image: image,
            has_explicit_text_color: explicit,
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every branch keeps the authored alpha.
    #[test]
    fn alpha_is_preserved(
        color in color_strategy(),
        role in role_strategy(),
        ctx in context_strategy(),
    ) {
        let out = adjust(color, role, &ctx);
        if let Some(adjusted) = out.color {
            prop_assert_eq!(adjusted.alpha(), color.alpha());
        }
    }

    /// Dim text on the dark canvas always reaches the low-text floor.
    #[test]
    fn dim_text_reaches_floor(color in dim_color_strategy()) {
        prop_assert!(color.perceived_brightness() < 75.0);

        let out = adjust(color, Role::Text, &AdjustContext::default());
        let adjusted = out.color.expect("dim text must be adjusted");
        prop_assert!(
            adjusted.perceived_brightness() >= 75.0 - 1e-6,
            "{:?} -> {:?} (Y = {})",
            color,
            adjusted,
            adjusted.perceived_brightness()
        );
    }

    /// Bright, non-white chromatic backgrounds are scaled exactly to the cap.
    #[test]
    fn bright_background_is_capped(r in 200u8..=255, g in 200u8..=255, b in 200u8..=255) {
        prop_assume!(!(r == g && g == b));
        let color = Color::rgb(f64::from(r), f64::from(g), f64::from(b));
        prop_assume!(color.perceived_brightness() <= 250.0);

        let ctx = AdjustContext::default().with_explicit_text_color(true);
        let adjusted = adjust(color, Role::Background, &ctx).color.expect("capped");
        prop_assert!((adjusted.perceived_brightness() - 190.0).abs() < 1e-6);
    }

    /// Backgrounds that are already dark enough and capped are left alone.
    #[test]
    fn settled_background_is_unchanged(
        h in 0.0f64..360.0,
        s in 5.0f64..=100.0,
        l in 27.0f64..=39.0,
    ) {
        let color = Color::from_hsl(Hsl::new(h, s, l));
        prop_assume!(!color.is_achromatic());
        prop_assume!(color.perceived_brightness() <= 190.0);

        let ctx = AdjustContext::default().with_explicit_text_color(true);
        prop_assert!(adjust(color, Role::Background, &ctx).is_unchanged());
    }

    /// Text that is already near white is never touched.
    #[test]
    fn white_text_is_never_touched(
        level in 250u8..=255,
        ctx in context_strategy(),
    ) {
        let c = Color::gray(f64::from(level));
        prop_assert!(adjust(c, Role::Text, &ctx).is_unchanged());
    }
}
