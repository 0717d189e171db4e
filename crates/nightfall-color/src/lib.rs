//! # Nightfall Color - Perceptual Color Model for Dark Schemes
//!
//! `nightfall-color` holds the arithmetic half of the `nightfall` dark-scheme
//! engine: a small sRGB/HSL color model, CSS color parsing, and the
//! brightness-adjustment algorithm that decides what an authored color should
//! become on a dark canvas.
//!
//! Everything here is pure. Nothing touches a document; the `nightfall` crate
//! drives these functions while walking elements.
//!
//! ## Core Concepts
//!
//! - [`Color`]: RGB + alpha value type with HSL and perceived brightness
//! - [`adjust`]: per-color decision for a [`Role`] (background, text, border)
//! - [`AdjustContext`]: inherited state the decision depends on
//! - [`normalize_colors`]: rewrite names/hex/hsl inside a CSS value to `rgb()`
//!
//! ## Quick Start
//!
//! ```rust
//! use nightfall_color::{adjust, AdjustContext, Color, Role};
//!
//! // Dark text on the default dark canvas gets lifted.
//! let text = Color::parse("#222").unwrap();
//! let out = adjust(text, Role::Text, &AdjustContext::default());
//! assert!(out.color.unwrap().perceived_brightness() >= 75.0);
//!
//! // Bright text is left alone.
//! let out = adjust(Color::WHITE, Role::Text, &AdjustContext::default());
//! assert!(out.is_unchanged());
//! ```

pub mod adjust;
pub mod color;
mod error;
pub mod value;

pub use adjust::{adjust, boost_to_brightness, AdjustContext, Adjustment, Role};
pub use color::{Color, Hsl};
pub use error::{ColorParseError, Result};
pub use value::normalize_colors;
