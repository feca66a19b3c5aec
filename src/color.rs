//! Color type and the default line palette.
//!
//! Series without an explicit color take their color from [`PALETTE`], and
//! rulers in dual/stacked layouts use the same table so a ruler and the first
//! series plotted against it share a color.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Dark green, second palette entry.
    pub const DARK_GREEN: Self = Self::rgb(0, 127, 0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Dark yellow (olive).
    pub const DARK_YELLOW: Self = Self::rgb(128, 128, 0);
    /// Violet.
    pub const VIOLET: Self = Self::rgb(128, 0, 128);
    /// Light gray used for the box outline.
    pub const LIGHT_GRAY: Self = Self::rgb(192, 192, 192);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS color string (`rgb(r,g,b)` or `rgba(r,g,b,a)` with alpha in 0-1).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Default series/ruler colors, cycled modulo its length.
pub const PALETTE: [Rgba; 5] = [
    Rgba::BLUE,
    Rgba::DARK_GREEN,
    Rgba::RED,
    Rgba::DARK_YELLOW,
    Rgba::VIOLET,
];

/// Palette entry for an index, wrapping around.
#[must_use]
pub const fn palette_color(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}
