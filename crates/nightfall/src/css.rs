//! CSS text generation.
//!
//! Every generated declaration carries `!important`: the scoped rules have to
//! beat the author's inline styles, which they can only do from a stylesheet
//! when the inline declaration is not itself `!important`.

/// Media query dark-mode rules are scoped to when the mode is not forced.
pub const DARK_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

/// Fixed low-alpha overlay laid over background images.
pub const IMAGE_OVERLAY: &str = "rgba(0, 0, 0, 0.1)";

/// `property: value !important;`
pub fn declaration(property: &str, value: &str) -> String {
    format!("{}: {} !important;", property, value)
}

/// `.class{body}`
pub fn rule(class: &str, body: &str) -> String {
    format!(".{}{{{}}}", class, body)
}

/// Single-color gradient layer, `linear-gradient(c, c)`.
pub fn flat_layer(color: &str) -> String {
    format!("linear-gradient({}, {})", color, color)
}

/// Wraps rules for insertion. Rules are scoped to the dark media query unless
/// `forced` is set.
pub fn stylesheet(rules: &str, forced: bool) -> String {
    if forced {
        rules.to_string()
    } else {
        format!("@media {} {{{}}}", DARK_MEDIA_QUERY, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_is_important() {
        assert_eq!(declaration("color", "red"), "color: red !important;");
    }

    #[test]
    fn rule_is_class_scoped() {
        assert_eq!(
            rule("js_darkmode__0", "color: red !important;"),
            ".js_darkmode__0{color: red !important;}"
        );
    }

    #[test]
    fn stylesheet_wraps_in_media_query() {
        assert_eq!(
            stylesheet(".a{}", false),
            "@media (prefers-color-scheme: dark) {.a{}}"
        );
        assert_eq!(stylesheet(".a{}", true), ".a{}");
    }
}
