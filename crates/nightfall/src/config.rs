//! Engine configuration.
//!
//! Configuration can be built in code or loaded from YAML. All keys are
//! optional and kebab-case:
//!
//! ```yaml
//! mode: dark                  # force a mode; omit to follow the OS
//! whitelist:
//!   tag-names: [pre, code]    # merged with the defaults (MPCPS, IFRAME)
//! judge-first-paint: true
//! delay-background-judge: false
//! viewport-height: 800
//! class-prefix: js_darkmode__
//! ```
//!
//! Whitelisted tag names are upper-cased and appended to the defaults, never
//! replacing them.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::ColorMode;

/// Tags that are never converted.
pub const DEFAULT_WHITELIST: [&str; 2] = ["MPCPS", "IFRAME"];

/// Prefix of every generated class name.
pub const DEFAULT_CLASS_PREFIX: &str = "js_darkmode__";

pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Elements that are skipped by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Whitelist {
    pub tag_names: Vec<String>,
}

impl Default for Whitelist {
    fn default() -> Self {
        Self {
            tag_names: DEFAULT_WHITELIST.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Whitelist {
    /// Adds a tag name (case-insensitive) unless already present.
    pub fn add(&mut self, tag: &str) {
        let tag = tag.to_ascii_uppercase();
        if !self.tag_names.contains(&tag) {
            self.tag_names.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tag_names.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Forced color mode. `None` follows [`detect_color_mode`](crate::detect_color_mode).
    pub mode: Option<ColorMode>,
    pub whitelist: Whitelist,
    /// Split output into a first-paint stylesheet and the rest.
    pub judge_first_paint: bool,
    /// Queue text-bearing elements instead of matching pending layers right
    /// away; see [`Scheduler::convert_backgrounds`](crate::Scheduler::convert_backgrounds).
    pub delay_background_judge: bool,
    /// Height of the initial viewport, in CSS pixels.
    pub viewport_height: f64,
    pub class_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: None,
            whitelist: Whitelist::default(),
            judge_first_paint: true,
            delay_background_judge: false,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML document, merging whitelisted tags with the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.normalize();
        Ok(config)
    }

    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_whitelisted_tag(mut self, tag: &str) -> Self {
        self.whitelist.add(tag);
        self
    }

    pub fn with_first_paint_judging(mut self, enabled: bool) -> Self {
        self.judge_first_paint = enabled;
        self
    }

    pub fn with_delayed_background_judging(mut self, enabled: bool) -> Self {
        self.delay_background_judge = enabled;
        self
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn with_class_prefix(mut self, prefix: &str) -> Self {
        self.class_prefix = prefix.to_string();
        self
    }

    /// True when dark mode is forced, in which case stylesheets are not
    /// wrapped in the dark media query.
    pub fn is_dark_forced(&self) -> bool {
        self.mode == Some(ColorMode::Dark)
    }

    fn normalize(&mut self) {
        let mut whitelist = Whitelist::default();
        for tag in &self.whitelist.tag_names {
            whitelist.add(tag);
        }
        self.whitelist = whitelist;
    }
}
