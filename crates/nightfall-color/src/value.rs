//! Color normalisation inside CSS property values.
//!
//! Authors write colors as names, hex codes, `hsl()` or `rgb()`. The rule
//! synthesizer only looks for `rgb()`/`rgba()` functions, so every other form
//! is rewritten first:
//!
//! ```rust
//! use nightfall_color::normalize_colors;
//!
//! assert_eq!(
//!     normalize_colors("1px solid #fff"),
//!     "1px solid rgb(255, 255, 255)"
//! );
//! assert_eq!(
//!     normalize_colors("url(red.png) no-repeat"),
//!     "url(red.png) no-repeat"
//! );
//! ```
//!
//! The value is tokenised with `cssparser`, so identifiers inside `url(...)`,
//! strings and unrelated keywords are never mistaken for color names. Tokens
//! that are not colors are copied from the source verbatim.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::color::Color;

/// Rewrites named, hex and `hsl()` colors in `value` into `rgb()`/`rgba()`.
///
/// Functions other than color functions and `url()` (gradients, mostly) are
/// descended into. Anything that does not parse is left as written.
pub fn normalize_colors(value: &str) -> String {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut out = String::with_capacity(value.len());
    normalize_block(&mut parser, &mut out);
    out
}

fn normalize_block<'i, 't>(input: &mut Parser<'i, 't>, out: &mut String) {
    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(ref name) => {
                let raw = input.slice_from(start);
                if is_adjustable_ident(name) {
                    push_color_or_raw(Color::parse(name), raw, out);
                } else {
                    out.push_str(raw);
                }
            }
            Token::Hash(ref hex) | Token::IDHash(ref hex) => {
                let raw = input.slice_from(start);
                push_color_or_raw(Color::parse(&format!("#{}", hex.as_ref())), raw, out);
            }
            Token::Function(ref name) => {
                let lower = name.to_ascii_lowercase();
                match lower.as_str() {
                    "hsl" | "hsla" => {
                        skip_block(input);
                        let raw = input.slice_from(start);
                        push_color_or_raw(Color::parse(raw), raw, out);
                    }
                    "rgb" | "rgba" | "url" | "var" | "calc" | "env" => {
                        skip_block(input);
                        out.push_str(input.slice_from(start));
                    }
                    _ => {
                        out.push_str(name.as_ref());
                        out.push('(');
                        let _ = input.parse_nested_block(|nested| {
                            normalize_block(nested, out);
                            Ok::<(), ParseError<'i, ()>>(())
                        });
                        out.push(')');
                    }
                }
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                skip_block(input);
                out.push_str(input.slice_from(start));
            }
            _ => out.push_str(input.slice_from(start)),
        }
    }
}

fn skip_block<'i, 't>(input: &mut Parser<'i, 't>) {
    let _ = input.parse_nested_block(|nested| {
        while nested.next_including_whitespace_and_comments().is_ok() {}
        Ok::<(), ParseError<'i, ()>>(())
    });
}

/// Identifiers worth trying as a color. `transparent` and `currentcolor` are
/// colors but must stay as written; anything else that fails to parse is
/// copied verbatim anyway.
fn is_adjustable_ident(name: &str) -> bool {
    !name.eq_ignore_ascii_case("transparent") && !name.eq_ignore_ascii_case("currentcolor")
}

fn push_color_or_raw<E>(parsed: Result<Color, E>, raw: &str, out: &mut String) {
    match parsed {
        Ok(color) => out.push_str(&color.to_css()),
        Err(_) => out.push_str(raw),
    }
}
