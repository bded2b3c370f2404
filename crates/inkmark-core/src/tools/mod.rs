//! Annotation tools and their rendering policy.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Black,
    Red,
    Blue,
    Highlight,
    /// Removes points instead of drawing; never produces a stroke.
    Erase,
}

impl ToolKind {
    /// Tools that produce strokes.
    pub const DRAWING: [ToolKind; 4] = [ToolKind::Black, ToolKind::Red, ToolKind::Blue, ToolKind::Highlight];

    pub fn is_erase(self) -> bool {
        self == ToolKind::Erase
    }

    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Black => "black",
            ToolKind::Red => "red",
            ToolKind::Blue => "blue",
            ToolKind::Highlight => "highlight",
            ToolKind::Erase => "erase",
        }
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range).and_then(|s| u8::from_str_radix(s, 16).ok())
        };

        match hex.len() {
            3 => Some(Self::rgb(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?)),
            _ => None,
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Color and base width of one drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStyle {
    pub color: SerializableColor,
    pub base_width: f64,
}

impl ToolStyle {
    pub const fn new(color: SerializableColor, base_width: f64) -> Self {
        Self { color, base_width }
    }
}

/// Maps tools to rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPalette {
    pub black: ToolStyle,
    pub red: ToolStyle,
    pub blue: ToolStyle,
    pub highlight: ToolStyle,
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self {
            black: ToolStyle::new(SerializableColor::rgb(0x00, 0x00, 0x00), 2.0),
            red: ToolStyle::new(SerializableColor::rgb(0xFF, 0x00, 0x00), 2.0),
            blue: ToolStyle::new(SerializableColor::rgb(0x00, 0x00, 0xFF), 2.0),
            highlight: ToolStyle::new(SerializableColor::rgb(0xFF, 0xFF, 0x00), 8.0),
        }
    }
}

impl ToolPalette {
    /// Style for a drawing tool; `None` for the eraser.
    pub fn style(&self, tool: ToolKind) -> Option<&ToolStyle> {
        match tool {
            ToolKind::Black => Some(&self.black),
            ToolKind::Red => Some(&self.red),
            ToolKind::Blue => Some(&self.blue),
            ToolKind::Highlight => Some(&self.highlight),
            ToolKind::Erase => None,
        }
    }

    pub fn color_of(&self, tool: ToolKind) -> Option<SerializableColor> {
        self.style(tool).map(|style| style.color)
    }

    /// Rendered width for a point drawn with `tool`.
    ///
    /// Harder presses widen the line up to 2x, faster motion thins it down
    /// to 0.7x. Never thinner than one pixel.
    pub fn width_of(&self, tool: ToolKind, pressure: f64, velocity: f64) -> f64 {
        let base = self.style(tool).unwrap_or(&self.black).base_width;
        let pressure_factor = pressure.clamp(0.5, 2.0);
        let velocity_factor = (1.0 - velocity * 0.05).clamp(0.7, 1.3);
        (base * pressure_factor * velocity_factor).max(1.0)
    }
}
