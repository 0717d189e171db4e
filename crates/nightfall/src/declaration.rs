//! Inline declaration extraction.
//!
//! Turns an element's `style` attribute into the ordered, role-tagged list of
//! declarations the synthesizer walks.
//!
//! # Parsing
//!
//! The declaration list is tokenised with `cssparser`'s [`RuleBodyParser`], so
//! semicolons inside `url(...)` or strings do not split declarations and
//! malformed entries are dropped instead of corrupting their neighbours. Values
//! are kept as the author wrote them; only a trailing `!important` is split off
//! into [`Declaration::important`].
//!
//! # Ordering
//!
//! Only color-bearing properties are kept for rewriting (see
//! [`is_color_property`]). After deduplication they are stably re-sorted so
//! that `background-image` comes after the other properties and `color` comes
//! last: text defaults and image layering both need the element's final
//! background first.
//!
//! # Legacy tables
//!
//! `TABLE`, `TR`, `TD` and `TH` elements without an inline background get a
//! synthesized leading `background-color` taken from a known editor table class
//! or from the `bgcolor` attribute, so old markup is converted like inline
//! styles.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use nightfall_color::{Color, Role};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, ElementId};
use crate::error::Result;

/// Tags that honour the legacy `bgcolor` attribute.
pub const TABLE_TAGS: [&str; 4] = ["TABLE", "TR", "TD", "TH"];

/// Editor table classes with a known light-mode background.
const TABLE_CLASS_COLORS: [(&str, &str); 2] = [
    ("ue-table-interlace-color-single", "#fcfcfc"),
    ("ue-table-interlace-color-double", "#f7faff"),
];

/// Properties whose values are rewritten.
const COLOR_PROPERTIES: [&str; 16] = [
    "-webkit-border-image",
    "border-image",
    "color",
    "background-color",
    "background-image",
    "background",
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
];

static IMPORTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*!\s*important\s*$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)url\([^)]*\)").unwrap());
static BORDER_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-webkit-)?border-image").unwrap());

/// What a declaration paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationRole {
    /// `background`, `background-color`.
    Background,
    /// `color`.
    Text,
    /// `border` and its longhands.
    Border,
    /// `background-image`, `border-image`, `-webkit-border-image`.
    Image,
    /// Anything else. Never rewritten.
    Other,
}

impl DeclarationRole {
    pub fn of(property: &str) -> Self {
        match property {
            "color" => Self::Text,
            "background-image" | "border-image" | "-webkit-border-image" => Self::Image,
            p if p.starts_with("background") => Self::Background,
            p if p.starts_with("border") => Self::Border,
            _ => Self::Other,
        }
    }
}

/// One inline declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name.
    pub property: String,
    /// Value without `!important`.
    pub value: String,
    pub role: DeclarationRole,
    pub important: bool,
}

impl Declaration {
    /// Builds a declaration from a property and its raw value, splitting off
    /// `!important`.
    pub fn new(property: &str, raw_value: &str) -> Self {
        let property = property.trim().to_ascii_lowercase();
        let trimmed = raw_value.trim();
        let (value, important) = match IMPORTANT.find(trimmed) {
            Some(m) => (trimmed[..m.start()].to_string(), true),
            None => (trimmed.to_string(), false),
        };
        let role = DeclarationRole::of(&property);
        Self {
            property,
            value,
            role,
            important,
        }
    }

    /// Adjustment role for colors found in this declaration's value.
    ///
    /// Every `background*` property adjusts as a background, `color` as text
    /// and `border*` as a border. `-webkit-border-image` has no role and its
    /// colors are left alone.
    pub fn color_role(&self) -> Option<Role> {
        if self.is_background() {
            Some(Role::Background)
        } else if self.property == "color" {
            Some(Role::Text)
        } else if self.property.starts_with("border") {
            Some(Role::Border)
        } else {
            None
        }
    }

    pub fn is_background(&self) -> bool {
        self.property.starts_with("background")
    }

    pub fn is_border_image(&self) -> bool {
        BORDER_IMAGE.is_match(&self.property)
    }

    /// True for background and border-image declarations referencing an image.
    pub fn has_image(&self) -> bool {
        (self.property.contains("background") || self.is_border_image())
            && URL.is_match(&self.value)
    }

    fn sort_key(&self) -> u8 {
        match self.property.as_str() {
            "color" => 2,
            "background-image" => 1,
            _ => 0,
        }
    }
}

/// Returns `true` if the property's value is rewritten by the engine.
pub fn is_color_property(property: &str) -> bool {
    COLOR_PROPERTIES.contains(&property)
}

/// The extracted inline style of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedStyle {
    /// Color-bearing declarations, deduplicated and in processing order.
    pub declarations: Vec<Declaration>,
    /// Every other declaration, in source order.
    pub passthrough: Vec<Declaration>,
    pub has_inline_color: bool,
    /// Any `background*` property is set inline.
    pub has_inline_background: bool,
    /// A background or border-image property references `url(...)`.
    pub has_background_image: bool,
    pub background_position: Option<String>,
    pub background_size: Option<String>,
}

impl ExtractedStyle {
    /// Extracts declarations from an inline declaration list.
    pub fn parse(css: &str) -> Self {
        let mut style = ExtractedStyle::default();
        let mut relevant: Vec<Declaration> = Vec::new();

        for (property, raw) in parse_declarations(css) {
            let decl = Declaration::new(&property, &raw);

            if decl.property == "color" {
                style.has_inline_color = true;
            } else if decl.property.contains("background") {
                style.has_inline_background = true;
                match decl.property.as_str() {
                    "background-position" => style.background_position = Some(decl.value.clone()),
                    "background-size" => style.background_size = Some(decl.value.clone()),
                    _ => {}
                }
            }

            if decl.has_image() {
                style.has_background_image = true;
            }

            if !is_color_property(&decl.property) {
                style.passthrough.push(Declaration {
                    role: DeclarationRole::Other,
                    ..decl
                });
                continue;
            }

            match relevant.iter().position(|d| d.property == decl.property) {
                Some(idx) if relevant[idx].important && !decl.important => {}
                Some(idx) => {
                    relevant.remove(idx);
                    relevant.push(decl);
                }
                None => relevant.push(decl),
            }
        }

        relevant.sort_by_key(Declaration::sort_key);
        style.declarations = relevant;
        style
    }

    /// Extracts the inline style of `element`, applying the legacy table
    /// background fallback.
    pub fn from_element<D: Document + ?Sized>(doc: &D, element: ElementId) -> Result<Self> {
        let mut style = Self::parse(&doc.inline_style(element)?);

        let tag = doc.tag_name(element)?;
        if !style.has_inline_background && TABLE_TAGS.contains(&tag.as_str()) {
            if let Some(color) = table_background(doc, element)? {
                style
                    .declarations
                    .insert(0, Declaration::new("background-color", &color.to_css()));
                style.has_inline_background = true;
            }
        }

        Ok(style)
    }
}

fn table_background<D: Document + ?Sized>(doc: &D, element: ElementId) -> Result<Option<Color>> {
    let classes = doc.classes(element)?;
    let from_class = TABLE_CLASS_COLORS
        .iter()
        .find(|(class, _)| classes.iter().any(|c| c == class))
        .and_then(|(_, color)| Color::parse(color).ok());
    if from_class.is_some() {
        return Ok(from_class);
    }

    Ok(doc
        .attribute(element, "bgcolor")?
        .and_then(|value| Color::parse(&value).ok()))
}

/// Splits an inline declaration list into `(property, raw value)` pairs.
///
/// Property names are lower-cased. Values are trimmed but otherwise verbatim,
/// including any `!important`. Entries without a colon are dropped.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut decl_parser = InlineDeclarationParser;
    let pairs: Vec<(String, String)> = RuleBodyParser::new(&mut parser, &mut decl_parser)
        .flatten()
        .collect();
    pairs
}

struct InlineDeclarationParser;

impl<'i> DeclarationParser<'i> for InlineDeclarationParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim();
        Ok((name.as_ref().to_ascii_lowercase(), value.to_string()))
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for InlineDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
