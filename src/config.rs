//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Interface data width
///
/// Doubles as the function-set data-length parameter and the driver's current
/// interface mode: the controller powers on interpreting full 8-bit writes and
/// is switched to 4-bit interpretation exactly once, during initialization.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BitMode {
    /// 4-bit interface, one nibble per enable pulse
    #[default]
    FourBit,
    /// 8-bit interface; valid on the wire but unsupported by this driver
    /// (the expander only reaches D7..D4)
    EightBit,
}

impl BitMode {
    /// Function-set data-length bit for this width.
    pub fn to_mask(self) -> u8 {
        match self {
            BitMode::FourBit => 0b0000_0000,
            BitMode::EightBit => 0b0001_0000,
        }
    }
}

/// Number of display lines
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Lines {
    /// Single-line display
    One,
    /// Two-line display
    #[default]
    Two,
}

impl Lines {
    /// Function-set line-count bit for this setting.
    pub fn to_mask(self) -> u8 {
        match self {
            Lines::One => 0b0000_0000,
            Lines::Two => 0b0000_1000,
        }
    }
}

/// Character font
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Font {
    /// 5x8 dot characters
    #[default]
    Dots5x8,
    /// 5x10 dot characters (single-line displays only)
    Dots5x10,
}

impl Font {
    /// Function-set font bit for this setting.
    pub fn to_mask(self) -> u8 {
        match self {
            Font::Dots5x8 => 0b0000_0000,
            Font::Dots5x10 => 0b0000_0100,
        }
    }
}

/// Display configuration
///
/// Holds the parameters fixed at [`Lcd`](crate::lcd::Lcd) construction. Use
/// [`Builder`] to create a validated `Config`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Requested interface width (only [`BitMode::FourBit`] is supported)
    pub bit_mode: BitMode,
    /// Display line count
    pub lines: Lines,
    /// Character font
    pub font: Font,
    /// Initial backlight state
    pub backlight: bool,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hd44780_pcf8574::{Builder, Font, Lines};
///
/// let config = match Builder::new().lines(Lines::Two).font(Font::Dots5x8).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(config.backlight);
/// ```
#[must_use]
pub struct Builder {
    /// Requested interface width
    bit_mode: BitMode,
    /// Display line count
    lines: Lines,
    /// Character font
    font: Font,
    /// Initial backlight state
    backlight: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            bit_mode: BitMode::FourBit,
            lines: Lines::Two,
            font: Font::Dots5x8,
            backlight: true,
        }
    }
}

impl Builder {
    /// Create a builder with the default configuration: 4-bit interface, two
    /// lines, 5x8 font, backlight on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interface width.
    ///
    /// Only [`BitMode::FourBit`] passes [`build`](Self::build); the 8-bit
    /// width is accepted here so the rejection carries a precise error.
    pub fn bit_mode(mut self, bit_mode: BitMode) -> Self {
        self.bit_mode = bit_mode;
        self
    }

    /// Set the display line count.
    pub fn lines(mut self, lines: Lines) -> Self {
        self.lines = lines;
        self
    }

    /// Set the character font.
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the initial backlight state.
    pub fn backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - [`BuilderError::UnsupportedBitMode`] for an 8-bit interface request:
    ///   the expander wiring has no path for the low data nibble, so 8-bit
    ///   operation is permanently unimplemented.
    /// - [`BuilderError::InvalidConfiguration`] for two lines with the 5x10
    ///   font, which the controller cannot render.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.bit_mode == BitMode::EightBit {
            return Err(BuilderError::UnsupportedBitMode);
        }
        if self.lines == Lines::Two && self.font == Font::Dots5x10 {
            return Err(BuilderError::InvalidConfiguration {
                lines: self.lines,
                font: self.font,
            });
        }
        Ok(Config {
            bit_mode: self.bit_mode,
            lines: self.lines,
            font: self.font,
            backlight: self.backlight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.bit_mode, BitMode::FourBit);
        assert_eq!(config.lines, Lines::Two);
        assert_eq!(config.font, Font::Dots5x8);
        assert!(config.backlight);
    }

    #[test]
    fn test_builder_rejects_eight_bit_mode() {
        let result = Builder::new().bit_mode(BitMode::EightBit).build();
        assert!(matches!(result, Err(BuilderError::UnsupportedBitMode)));
    }

    #[test]
    fn test_builder_rejects_two_lines_with_5x10_font() {
        let result = Builder::new()
            .lines(Lines::Two)
            .font(Font::Dots5x10)
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_builder_accepts_single_line_5x10_font() {
        let config = Builder::new()
            .lines(Lines::One)
            .font(Font::Dots5x10)
            .backlight(false)
            .build()
            .unwrap();
        assert_eq!(config.lines, Lines::One);
        assert_eq!(config.font, Font::Dots5x10);
        assert!(!config.backlight);
    }

    #[test]
    fn test_function_set_masks() {
        assert_eq!(BitMode::EightBit.to_mask(), 0b0001_0000);
        assert_eq!(Lines::Two.to_mask(), 0b0000_1000);
        assert_eq!(Font::Dots5x10.to_mask(), 0b0000_0100);
        assert_eq!(
            BitMode::FourBit.to_mask() | Lines::One.to_mask() | Font::Dots5x8.to_mask(),
            0
        );
    }
}
