//! RGB/HSL color model with alpha and perceived brightness.
//!
//! # Perceived Brightness
//!
//! Brightness decisions in this crate use the luma approximation from the W3C
//! accessibility notes rather than a colorimetric lightness:
//!
//! ```text
//! Y = (299·r + 587·g + 114·b) / 1000        (range 0–255)
//! ```
//!
//! It is cheap, monotonic in every channel, and matches how authors intuitively
//! rank "bright" colors well enough to drive a light-to-dark remapping.
//!
//! # Channel Precision
//!
//! Channels are stored as `f64` in `0.0..=255.0`. Adjustments chain several
//! conversions (RGB → HSL → RGB, scaling, solving one channel from the luma
//! equation), and rounding between steps would drift the brightness targets.
//! Rounding happens once, when a color is serialized with [`Color::to_css`].
//!
//! # Example
//!
//! ```rust
//! use nightfall_color::Color;
//!
//! let white = Color::parse("#fff").unwrap();
//! assert_eq!(white.perceived_brightness(), 255.0);
//!
//! let hsl = white.to_hsl();
//! assert_eq!(hsl.l, 100.0);
//! assert_eq!(white.with_lightness(14.0).to_css(), "rgb(36, 36, 36)");
//! ```

use std::fmt;
use std::str::FromStr;

use cssparser::{parse_color_keyword, parse_hash_color, Color as CssColor};

use crate::error::{ColorParseError, Result};

/// Luma weight of the red channel (per mille).
pub const LUMA_RED: f64 = 299.0;
/// Luma weight of the green channel (per mille).
pub const LUMA_GREEN: f64 = 587.0;
/// Luma weight of the blue channel (per mille).
pub const LUMA_BLUE: f64 = 114.0;

// ─── HSL ────────────────────────────────────────────────────────────────────

/// Hue/saturation/lightness triplet.
///
/// `h` is in degrees (`0.0..360.0`), `s` and `l` are percentages (`0.0..=100.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

// ─── Color ──────────────────────────────────────────────────────────────────

/// An sRGB color with alpha.
///
/// Immutable value type: every operation returns a new color. Construction
/// clamps channels to `0.0..=255.0` and alpha to `0.0..=1.0`, so callers can
/// feed unchecked arithmetic results straight in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        alpha: 1.0,
    };

    pub const WHITE: Color = Color {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        alpha: 1.0,
    };

    /// Opaque gray with every channel at `level`.
    ///
    /// Usable in constants, so `level` is not clamped.
    pub const fn gray(level: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color with explicit alpha.
    pub fn rgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            alpha: clamp_unit(alpha),
        }
    }

    /// Creates an opaque color from HSL.
    pub fn from_hsl(hsl: Hsl) -> Self {
        Self::from_hsla(hsl, 1.0)
    }

    /// Creates a color from HSL with explicit alpha.
    ///
    /// Saturation and lightness are clamped to `0..=100`; hue wraps.
    pub fn from_hsla(hsl: Hsl, alpha: f64) -> Self {
        let h = hsl.h.rem_euclid(360.0) / 360.0;
        let s = clamp_percent(hsl.s) / 100.0;
        let l = clamp_percent(hsl.l) / 100.0;

        if s == 0.0 {
            let v = l * 255.0;
            return Self::rgba(v, v, v, alpha);
        }

        let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let t1 = 2.0 * l - t2;

        let mut out = [0.0; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let mut t3 = h + 1.0 / 3.0 * -(i as f64 - 1.0);
            if t3 < 0.0 {
                t3 += 1.0;
            }
            if t3 > 1.0 {
                t3 -= 1.0;
            }

            let v = if 6.0 * t3 < 1.0 {
                t1 + (t2 - t1) * 6.0 * t3
            } else if 2.0 * t3 < 1.0 {
                t2
            } else if 3.0 * t3 < 2.0 {
                t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
            } else {
                t1
            };
            *slot = v * 255.0;
        }

        Self::rgba(out[0], out[1], out[2], alpha)
    }

    pub fn red(&self) -> f64 {
        self.r
    }

    pub fn green(&self) -> f64 {
        self.g
    }

    pub fn blue(&self) -> f64 {
        self.b
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns `[r, g, b]`.
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: clamp_unit(alpha),
            ..self
        }
    }

    /// `299·r + 587·g + 114·b`, i.e. perceived brightness times 1000.
    pub fn weighted_sum(&self) -> f64 {
        self.r * LUMA_RED + self.g * LUMA_GREEN + self.b * LUMA_BLUE
    }

    /// Perceived brightness `Y` in `0.0..=255.0`. Alpha is ignored.
    pub fn perceived_brightness(&self) -> f64 {
        self.weighted_sum() / 1000.0
    }

    /// Converts to HSL.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let delta = max - min;

        let mut h = if max == min {
            0.0
        } else if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        h = (h * 60.0).min(360.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (min + max) / 2.0;
        let s = if max == min {
            0.0
        } else if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        Hsl::new(h, s * 100.0, l * 100.0)
    }

    /// True when the HSL saturation is exactly zero (black, white, grays).
    pub fn is_achromatic(&self) -> bool {
        self.to_hsl().s == 0.0
    }

    /// Returns the color with its HSL lightness replaced, keeping hue,
    /// saturation and alpha.
    pub fn with_lightness(&self, lightness: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.l = lightness;
        Self::from_hsla(hsl, self.alpha)
    }

    /// Mixes `other` into this color.
    ///
    /// `weight` is the share of `other` (`0.5` is an even mix). The channel
    /// weights are corrected for the alpha difference of the two colors, so a
    /// translucent color pulls the result less than an opaque one.
    pub fn mix(&self, other: &Color, weight: f64) -> Color {
        let p = clamp_unit(weight);
        let w = 2.0 * p - 1.0;
        let a = other.alpha - self.alpha;

        let w1 = (if w * a == -1.0 {
            w
        } else {
            (w + a) / (1.0 + w * a)
        } + 1.0)
            / 2.0;
        let w2 = 1.0 - w1;

        Color::rgba(
            w1 * other.r + w2 * self.r,
            w1 * other.g + w2 * self.g,
            w1 * other.b + w2 * self.b,
            other.alpha * p + self.alpha * (1.0 - p),
        )
    }

    /// Parses a CSS color.
    ///
    /// Supports:
    /// - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
    /// - `rgb()` / `rgba()` with commas or spaces, optional `/ alpha`, percentages
    /// - `hsl()` / `hsla()`
    /// - CSS named colors, plus the legacy `windowtext` keyword
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hash_color::<CssColor>(hex.as_bytes())
                .ok()
                .and_then(from_css_color)
                .ok_or_else(|| ColorParseError::InvalidHex(trimmed.to_string()));
        }

        if let Some(args) = function_args(&lower, &["rgb", "rgba"]) {
            return parse_rgb_args(args, trimmed);
        }

        if let Some(args) = function_args(&lower, &["hsl", "hsla"]) {
            return parse_hsl_args(args, trimmed);
        }

        if lower == "windowtext" {
            return Ok(Color::BLACK);
        }

        // `transparent` parses as a keyword too, but it is not a named color.
        parse_color_keyword::<CssColor>(&lower)
            .ok()
            .and_then(from_css_color)
            .filter(|color| color.alpha >= 1.0)
            .ok_or_else(|| ColorParseError::UnknownName(trimmed.to_string()))
    }

    /// Serializes as `rgb(r, g, b)` or `rgba(r, g, b, a)` with rounded channels.
    pub fn to_css(&self) -> String {
        let r = self.r.round() as u8;
        let g = self.g.round() as u8;
        let b = self.b.round() as u8;
        if self.alpha >= 1.0 {
            format!("rgb({}, {}, {})", r, g, b)
        } else {
            let alpha = (self.alpha * 1000.0).round() / 1000.0;
            format!("rgba({}, {}, {}, {})", r, g, b, alpha)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

// ─── Parsing helpers ────────────────────────────────────────────────────────

fn clamp_channel(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 255.0)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        1.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Returns the argument text of `name(...)` if `s` is a call to one of `names`.
fn function_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    let open = s.find('(')?;
    let name = s[..open].trim_end();
    if !names.contains(&name) {
        return None;
    }
    s[open + 1..].strip_suffix(')')
}

/// Splits color function arguments on commas, slashes and whitespace.
fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Converts a parsed sRGB color. Every other color space is rejected.
fn from_css_color(parsed: CssColor) -> Option<Color> {
    match parsed {
        CssColor::Rgba(rgba) => Some(Color::rgba(
            f64::from(rgba.red.unwrap_or(0)),
            f64::from(rgba.green.unwrap_or(0)),
            f64::from(rgba.blue.unwrap_or(0)),
            f64::from(rgba.alpha.unwrap_or(1.0)),
        )),
        _ => None,
    }
}

fn parse_number(part: &str, color: &str) -> Result<f64> {
    part.parse::<f64>()
        .map_err(|_| ColorParseError::InvalidComponent {
            component: part.to_string(),
            color: color.to_string(),
        })
}

fn parse_channel(part: &str, color: &str) -> Result<f64> {
    match part.strip_suffix('%') {
        Some(pct) => Ok(parse_number(pct, color)? / 100.0 * 255.0),
        None => parse_number(part, color),
    }
}

fn parse_alpha(part: Option<&&str>, color: &str) -> Result<f64> {
    match part {
        None => Ok(1.0),
        Some(p) => match p.strip_suffix('%') {
            Some(pct) => Ok(parse_number(pct, color)? / 100.0),
            None => parse_number(p, color),
        },
    }
}

fn parse_rgb_args(args: &str, color: &str) -> Result<Color> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::InvalidFunction(color.to_string()));
    }
    let r = parse_channel(parts[0], color)?;
    let g = parse_channel(parts[1], color)?;
    let b = parse_channel(parts[2], color)?;
    let a = parse_alpha(parts.get(3), color)?;
    Ok(Color::rgba(r, g, b, a))
}

fn parse_hsl_args(args: &str, color: &str) -> Result<Color> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::InvalidFunction(color.to_string()));
    }
    let hue = parts[0].strip_suffix("deg").unwrap_or(parts[0]);
    let h = parse_number(hue, color)?;
    let s = parse_number(parts[1].strip_suffix('%').unwrap_or(parts[1]), color)?;
    let l = parse_number(parts[2].strip_suffix('%').unwrap_or(parts[2]), color)?;
    let a = parse_alpha(parts.get(3), color)?;
    Ok(Color::from_hsla(Hsl::new(h, s, l), a))
}
