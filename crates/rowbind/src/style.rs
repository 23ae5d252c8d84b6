//! Presentation styling for cell ranges
//!
//! [`StyleOptions`] is the one configuration object the styling collaborator
//! consumes: every field is independently optional, and an absent field is a
//! no-op on application.

use std::fmt;

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// RGB color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create from a hex string (e.g. "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb { r, g, b })
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Auto => (0, 0, 0),
            Color::Rgb { r, g, b } => (*r, *g, *b),
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { .. } => write!(f, "#{}", self.to_hex()),
        }
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Top aligned
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned
    Bottom,
}

/// Styling directives for a cell range
///
/// Every field is independently optional; `None` leaves the corresponding
/// aspect of the range untouched. `auto_fit = Some(true)` additionally
/// enables text wrapping when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlignment>,
    /// Bold font
    pub bold: Option<bool>,
    /// Auto-fit column widths (implies wrap text)
    pub auto_fit: Option<bool>,
    /// Wrap text within cells
    pub wrap_text: Option<bool>,
    /// Font color
    pub text_color: Option<Color>,
    /// Solid background fill color
    pub background_color: Option<Color>,
    /// Thin border on all four edges, in this color
    pub border_color: Option<Color>,
}

impl StyleOptions {
    /// No directives; applying this is a no-op
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Set bold font
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Auto-fit column widths
    pub fn auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit = Some(auto_fit);
        self
    }

    /// Wrap text within cells
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Set font color
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Set solid background fill color
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set border color (thin border, all edges)
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Whether any directive is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether wrapping should be enabled, accounting for auto-fit
    pub fn effective_wrap_text(&self) -> Option<bool> {
        if self.auto_fit == Some(true) {
            Some(true)
        } else {
            self.wrap_text
        }
    }
}
