//! Shared display configuration types for Hourglass
//!
//! This crate contains serializable presentation-facing types shared between
//! the engine (hourglass-core) and whatever frontend renders timer widgets.
//! The engine resolves these structures and hands them to consumers
//! unchanged; nothing in here is ever interpreted by the engine itself.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Default colors for timer widgets
pub mod widget_colors {
    use super::Color;

    pub const WHITE: Color = [255, 255, 255, 255];
    pub const BAR: Color = [100, 180, 220, 255]; // Light blue
    pub const WARN: Color = [220, 160, 60, 255]; // Amber
    pub const CRITICAL: Color = [200, 50, 50, 255]; // Red
    pub const BACKGROUND: Color = [40, 40, 40, 200]; // Widget backdrop
}

// ─────────────────────────────────────────────────────────────────────────────
// Cosmetic Effects
// ─────────────────────────────────────────────────────────────────────────────

/// Cosmetic effect families a widget can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Opacity ramp in or out
    Fade,
    /// Rhythmic scale change
    Pulse,
    /// Positional jitter
    Shake,
    /// One-shot particle burst
    Burst,
}

impl EffectKind {
    /// Display label for editors and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fade => "Fade",
            Self::Pulse => "Pulse",
            Self::Shake => "Shake",
            Self::Burst => "Burst",
        }
    }
}

/// Tuning knobs for a cosmetic effect, interpreted by the renderer only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectOptions {
    /// Effect strength in renderer-defined units
    #[serde(default = "default_magnitude")]
    pub magnitude: f32,

    /// Playback length (None = the effect's own default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f32>,

    /// Start only once remaining time drops below this (None = immediately)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at_secs: Option<f32>,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            magnitude: 1.0,
            duration_secs: None,
            start_at_secs: None,
        }
    }
}

/// One effect entry on a widget.
///
/// Serializes either as a bare tag (`"pulse"`) or as a tag with an options
/// table (`{ kind = "shake", config = { magnitude = 4.0 } }`), so simple
/// configs stay terse while tuned ones stay explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectSpec {
    /// Bare tag with default options
    Tag(EffectKind),
    /// Tag plus an options table
    Configured {
        kind: EffectKind,
        #[serde(default)]
        config: EffectOptions,
    },
}

impl EffectSpec {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Tag(kind) => *kind,
            Self::Configured { kind, .. } => *kind,
        }
    }

    /// Options for this effect (defaults for a bare tag).
    pub fn options(&self) -> EffectOptions {
        match self {
            Self::Tag(_) => EffectOptions::default(),
            Self::Configured { config, .. } => config.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timer Widget Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Partial widget appearance overrides.
/// All fields are optional - only set fields override the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerDisplayOptions {
    /// Override the widget label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Override the bar color [R, G, B, A]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<Color>,

    /// Override the font color [R, G, B, A]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,

    /// Override whether the numeric remaining time is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_remaining: Option<bool>,

    /// Override decimal places on the remaining readout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u8>,

    /// Override remaining-time sorting in stacked layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_remaining: Option<bool>,

    /// Override the cosmetic effect list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<EffectSpec>>,
}

impl TimerDisplayOptions {
    /// Check if this override set has any fields set
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.bar_color.is_none()
            && self.font_color.is_none()
            && self.show_remaining.is_none()
            && self.decimal_places.is_none()
            && self.sort_by_remaining.is_none()
            && self.effects.is_none()
    }
}

/// Fully-resolved widget appearance handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerDisplayConfig {
    /// Widget label (None = renderer falls back to the timer id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default = "default_bar_color")]
    pub bar_color: Color,

    #[serde(default = "default_font_color")]
    pub font_color: Color,

    /// Show the numeric remaining time next to the bar
    #[serde(default = "default_true")]
    pub show_remaining: bool,

    /// Decimal places on the remaining readout
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u8,

    /// Sort by remaining time (vs. creation order) in stacked layouts
    #[serde(default = "default_true")]
    pub sort_by_remaining: bool,

    /// Cosmetic effects to play on this widget
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectSpec>,
}

fn default_true() -> bool {
    true
}
fn default_magnitude() -> f32 {
    1.0
}
fn default_bar_color() -> Color {
    widget_colors::BAR
}
fn default_font_color() -> Color {
    widget_colors::WHITE
}
fn default_decimal_places() -> u8 {
    1
}

impl Default for TimerDisplayConfig {
    fn default() -> Self {
        Self {
            label: None,
            bar_color: widget_colors::BAR,
            font_color: widget_colors::WHITE,
            show_remaining: true,
            decimal_places: 1,
            sort_by_remaining: true,
            effects: Vec::new(),
        }
    }
}

impl TimerDisplayConfig {
    /// Merge partial options over the defaults, field by field.
    pub fn resolve(options: &TimerDisplayOptions) -> Self {
        let defaults = Self::default();
        Self {
            label: options.label.clone(),
            bar_color: options.bar_color.unwrap_or(defaults.bar_color),
            font_color: options.font_color.unwrap_or(defaults.font_color),
            show_remaining: options.show_remaining.unwrap_or(defaults.show_remaining),
            decimal_places: options.decimal_places.unwrap_or(defaults.decimal_places),
            sort_by_remaining: options
                .sort_by_remaining
                .unwrap_or(defaults.sort_by_remaining),
            effects: options.effects.clone().unwrap_or(defaults.effects),
        }
    }
}
