//! HD44780 instruction model
//!
//! This module defines the [`Instruction`] value type and one validated
//! constructor per instruction the HD44780 documents. An instruction knows its
//! own wire encoding (the high and low nibble bytes sent over the expander)
//! and the time the controller needs to complete it.
//!
//! ## Wire encoding
//!
//! The expander drives the controller's D7..D4 pins from bits 7..4 of each
//! byte written, so a full 8-bit instruction is split into two frames:
//!
//! - high nibble byte: `RS | RW | ((opcode | parameters) & 0xF0)`
//! - low nibble byte:  `RS | RW | (((opcode | parameters) & 0x0F) << 4)`
//!
//! ENABLE and backlight bits are not part of the instruction; the driver ORs
//! them in while clocking the frame out (see [`crate::lcd`]).
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{BitMode, Font, Instruction, Lines};
//!
//! let function_set = match Instruction::function_set(BitMode::FourBit, Lines::Two, Font::Dots5x8) {
//!     Ok(instruction) => instruction,
//!     Err(_) => return,
//! };
//! assert_eq!(function_set.high_byte(), 0b0010_0000);
//! assert_eq!(function_set.low_byte(), 0b1000_0000);
//! ```

use core::time::Duration;

use crate::config::{BitMode, Font, Lines};
use crate::error::InstructionError;

// Instruction opcodes (HD44780 datasheet, p24). Each opcode is the highest set
// bit of the instruction byte; the lower bits carry its parameters.

/// Write data to CGRAM or DDRAM (selected by the preceding address command)
const WRITE_DATA: u8 = 0b0000_0000;
/// Clear the entire display and reset the address counter
const CLEAR_DISPLAY: u8 = 0b0000_0001;
/// Return the cursor to the home position and undo display shifts
const RETURN_HOME: u8 = 0b0000_0010;
/// Set cursor move direction and display shift on data access
const ENTRY_MODE_SET: u8 = 0b0000_0100;
/// Display on/off, cursor on/off, cursor blink on/off
const DISPLAY_ON_OFF: u8 = 0b0000_1000;
/// Move the cursor or shift the display without touching DDRAM
const CURSOR_OR_DISPLAY_SHIFT: u8 = 0b0001_0000;
/// Interface data length, display line count, character font
const FUNCTION_SET: u8 = 0b0010_0000;
/// Set the CGRAM address for custom glyph data
const SET_CGRAM_ADDRESS: u8 = 0b0100_0000;
/// Set the DDRAM address (cursor position)
const SET_DDRAM_ADDRESS: u8 = 0b1000_0000;

/// Register-select bit within a wire frame: data register instead of the
/// instruction register
const RS_DATA: u8 = 0b0000_0001;
/// Read/write bit within a wire frame: read from the controller
const RW_READ: u8 = 0b0000_0010;

/// Highest valid CGRAM address
const CGRAM_ADDRESS_MAX: u8 = 0x3F;
/// Highest valid DDRAM address
const DDRAM_ADDRESS_MAX: u8 = 0x7F;

/// Completion time of most instructions (datasheet: 37 us at the nominal
/// oscillator frequency, rounded up)
const SHORT_COMPLETION: Duration = Duration::from_micros(40);
/// Completion time of clear-display and return-home, which rewrite the whole
/// DDRAM
const LONG_COMPLETION: Duration = Duration::from_micros(1600);

/// Cursor move / shift direction
///
/// Used both by [`Instruction::entry_mode_set`] (the direction the cursor
/// advances after a data access) and [`Instruction::cursor_or_display_shift`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Move left (address counter decrements)
    Left,
    /// Move right (address counter increments)
    Right,
}

/// What a shift instruction moves
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShiftTarget {
    /// Move only the cursor
    Cursor,
    /// Shift the whole display window
    Display,
}

/// A single HD44780 instruction and its wire encoding
///
/// Values are immutable once constructed; every constructor validates its
/// parameters before the instruction exists, so an `Instruction` in hand is
/// always safe to transmit. The completion delay is carried by the
/// instruction itself, keeping the constructors the single source of timing
/// truth.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Instruction {
    /// Operation selector (see the opcode constants)
    opcode: u8,
    /// Mode/address/data bits, ORed into the opcode on the wire
    parameters: u8,
    /// Register select: `false` = instruction register, `true` = data register
    register_select: bool,
    /// Read/write: always `false` (write) in this design
    read_write: bool,
    /// Time the controller needs to finish this operation
    completion_delay: Duration,
}

impl Instruction {
    /// Instruction-register operation with RS/RW both low.
    fn command(opcode: u8, parameters: u8, completion_delay: Duration) -> Self {
        Self {
            opcode,
            parameters,
            register_select: false,
            read_write: false,
            completion_delay,
        }
    }

    /// Clear the entire display and move the cursor home.
    ///
    /// Command: `0000_0001`. Rewrites all of DDRAM, so it takes the long
    /// completion delay.
    pub fn clear_display() -> Self {
        Self::command(CLEAR_DISPLAY, 0, LONG_COMPLETION)
    }

    /// Move the cursor home and undo any display shift.
    ///
    /// Command: `0000_001?`. Long completion delay, same as clear.
    pub fn return_home() -> Self {
        Self::command(RETURN_HOME, 0, LONG_COMPLETION)
    }

    /// Set how the cursor and display react to data accesses.
    ///
    /// Command: `0000_01IS`. `I` moves the cursor right (increment) after
    /// each access, `S` shifts the display instead of the cursor.
    pub fn entry_mode_set(direction: CursorDirection, shift: bool) -> Self {
        let mut parameters = 0;
        if direction == CursorDirection::Right {
            parameters |= 0b0000_0010;
        }
        if shift {
            parameters |= 0b0000_0001;
        }
        Self::command(ENTRY_MODE_SET, parameters, SHORT_COMPLETION)
    }

    /// Switch the display, cursor, and cursor blink on or off.
    ///
    /// Command: `0000_1DCB`.
    pub fn display_on_off(display_on: bool, cursor_on: bool, blink_on: bool) -> Self {
        let mut parameters = 0;
        if display_on {
            parameters |= 0b0000_0100;
        }
        if cursor_on {
            parameters |= 0b0000_0010;
        }
        if blink_on {
            parameters |= 0b0000_0001;
        }
        Self::command(DISPLAY_ON_OFF, parameters, SHORT_COMPLETION)
    }

    /// Move the cursor or shift the display one position without writing DDRAM.
    ///
    /// Command: `0001_DR??`. `D` selects the display over the cursor, `R`
    /// selects right over left.
    pub fn cursor_or_display_shift(target: ShiftTarget, direction: CursorDirection) -> Self {
        let mut parameters = 0;
        if target == ShiftTarget::Display {
            parameters |= 0b0000_1000;
        }
        if direction == CursorDirection::Right {
            parameters |= 0b0000_0100;
        }
        Self::command(CURSOR_OR_DISPLAY_SHIFT, parameters, SHORT_COMPLETION)
    }

    /// Configure interface width, line count, and font.
    ///
    /// Command: `0010_BLF?`. `B` selects the 8-bit interface, `L` two display
    /// lines, `F` the 5x10 font.
    ///
    /// The 8-bit width is a valid *instruction* parameter (the
    /// initialization handshake needs its encoding) even though the driver
    /// itself only runs the interface in 4-bit mode (see
    /// [`crate::config::Builder`]).
    ///
    /// # Errors
    ///
    /// Returns [`InstructionError::InvalidConfiguration`] for two lines with
    /// the 5x10 font: the controller cannot render that combination.
    pub fn function_set(
        bit_mode: BitMode,
        lines: Lines,
        font: Font,
    ) -> Result<Self, InstructionError> {
        if lines == Lines::Two && font == Font::Dots5x10 {
            return Err(InstructionError::InvalidConfiguration { lines, font });
        }
        Ok(Self::command(
            FUNCTION_SET,
            bit_mode.to_mask() | lines.to_mask() | font.to_mask(),
            SHORT_COMPLETION,
        ))
    }

    /// Set the CGRAM address for subsequent custom glyph writes.
    ///
    /// Command: `01AA_AAAA`.
    ///
    /// # Errors
    ///
    /// Returns [`InstructionError::OutOfRange`] if `address` is above `0x3F`.
    pub fn set_cgram_address(address: u8) -> Result<Self, InstructionError> {
        if address > CGRAM_ADDRESS_MAX {
            return Err(InstructionError::OutOfRange {
                value: address,
                max: CGRAM_ADDRESS_MAX,
            });
        }
        Ok(Self::command(SET_CGRAM_ADDRESS, address, SHORT_COMPLETION))
    }

    /// Set the DDRAM address (the cursor position).
    ///
    /// Command: `1AAA_AAAA`.
    ///
    /// # Errors
    ///
    /// Returns [`InstructionError::OutOfRange`] if `address` is above `0x7F`.
    pub fn set_ddram_address(address: u8) -> Result<Self, InstructionError> {
        if address > DDRAM_ADDRESS_MAX {
            return Err(InstructionError::OutOfRange {
                value: address,
                max: DDRAM_ADDRESS_MAX,
            });
        }
        Ok(Self::command(SET_DDRAM_ADDRESS, address, SHORT_COMPLETION))
    }

    /// Write one byte to CGRAM or DDRAM, whichever the last address
    /// instruction selected.
    ///
    /// Sets the register-select bit so the byte lands in the data register.
    /// The `u8` parameter covers exactly the documented 0x00..=0xFF range, so
    /// no runtime check is needed.
    pub fn write_data(data: u8) -> Self {
        Self {
            opcode: WRITE_DATA,
            parameters: data,
            register_select: true,
            read_write: false,
            completion_delay: SHORT_COMPLETION,
        }
    }

    /// The byte carrying this instruction's high nibble: `D7..D4, 0, 0, RW, RS`.
    pub fn high_byte(&self) -> u8 {
        self.control_bits() | ((self.opcode | self.parameters) & 0xF0)
    }

    /// The byte carrying this instruction's low nibble, shifted up onto the
    /// data pins: `D3..D0, 0, 0, RW, RS`.
    pub fn low_byte(&self) -> u8 {
        self.control_bits() | (((self.opcode | self.parameters) & 0x0F) << 4)
    }

    /// How long the controller needs before it accepts the next instruction.
    pub fn completion_delay(&self) -> Duration {
        self.completion_delay
    }

    /// Whether this instruction targets the data register.
    pub fn is_data(&self) -> bool {
        self.register_select
    }

    fn control_bits(&self) -> u8 {
        let rs = if self.register_select { RS_DATA } else { 0 };
        let rw = if self.read_write { RW_READ } else { 0 };
        rs | rw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recombine the data nibbles of both wire frames into the instruction byte.
    fn recombine(instruction: Instruction) -> u8 {
        (instruction.high_byte() & 0xF0) | ((instruction.low_byte() & 0xF0) >> 4)
    }

    #[test]
    fn test_function_set_known_encoding() {
        // 4-bit, two lines, 5x8 font: instruction byte 0b0010_1000
        let instruction =
            Instruction::function_set(BitMode::FourBit, Lines::Two, Font::Dots5x8).unwrap();
        assert_eq!(instruction.high_byte(), 0b0010_0000);
        assert_eq!(instruction.low_byte(), 0b1000_0000);
    }

    #[test]
    fn test_nibble_split_round_trips() {
        let cases = [
            (Instruction::clear_display(), 0b0000_0001),
            (Instruction::return_home(), 0b0000_0010),
            (
                Instruction::entry_mode_set(CursorDirection::Right, false),
                0b0000_0110,
            ),
            (
                Instruction::entry_mode_set(CursorDirection::Left, true),
                0b0000_0101,
            ),
            (Instruction::display_on_off(true, false, false), 0b0000_1100),
            (Instruction::display_on_off(true, true, true), 0b0000_1111),
            (
                Instruction::cursor_or_display_shift(ShiftTarget::Cursor, CursorDirection::Left),
                0b0001_0000,
            ),
            (
                Instruction::cursor_or_display_shift(ShiftTarget::Display, CursorDirection::Right),
                0b0001_1100,
            ),
            (
                Instruction::function_set(BitMode::EightBit, Lines::One, Font::Dots5x8).unwrap(),
                0b0011_0000,
            ),
            (
                Instruction::function_set(BitMode::FourBit, Lines::One, Font::Dots5x10).unwrap(),
                0b0010_0100,
            ),
            (Instruction::set_cgram_address(0x3F).unwrap(), 0b0111_1111),
            (Instruction::set_ddram_address(0x40).unwrap(), 0b1100_0000),
            (Instruction::write_data(0xA5), 0b1010_0101),
        ];

        for (instruction, expected) in cases {
            assert_eq!(recombine(instruction), expected);
        }
    }

    #[test]
    fn test_control_bits_identical_in_both_frames() {
        let data = Instruction::write_data(0x48);
        assert_eq!(data.high_byte() & 0x0F, data.low_byte() & 0x0F);
        let command = Instruction::clear_display();
        assert_eq!(command.high_byte() & 0x0F, command.low_byte() & 0x0F);
    }

    #[test]
    fn test_write_data_sets_register_select() {
        let instruction = Instruction::write_data(0b0100_1000);
        assert!(instruction.is_data());
        assert_eq!(instruction.high_byte(), 0b0100_0001);
        assert_eq!(instruction.low_byte(), 0b1000_0001);
    }

    #[test]
    fn test_commands_leave_register_select_clear() {
        assert!(!Instruction::clear_display().is_data());
        assert!(!Instruction::set_ddram_address(0).unwrap().is_data());
    }

    #[test]
    fn test_function_set_rejects_two_lines_with_5x10_font() {
        for bit_mode in [BitMode::FourBit, BitMode::EightBit] {
            let result = Instruction::function_set(bit_mode, Lines::Two, Font::Dots5x10);
            assert!(matches!(
                result,
                Err(InstructionError::InvalidConfiguration {
                    lines: Lines::Two,
                    font: Font::Dots5x10,
                })
            ));
        }
    }

    #[test]
    fn test_function_set_accepts_every_other_combination() {
        for bit_mode in [BitMode::FourBit, BitMode::EightBit] {
            for (lines, font) in [
                (Lines::One, Font::Dots5x8),
                (Lines::One, Font::Dots5x10),
                (Lines::Two, Font::Dots5x8),
            ] {
                assert!(Instruction::function_set(bit_mode, lines, font).is_ok());
            }
        }
    }

    #[test]
    fn test_cgram_address_boundaries() {
        assert!(Instruction::set_cgram_address(0x00).is_ok());
        assert!(Instruction::set_cgram_address(0x3F).is_ok());
        assert!(matches!(
            Instruction::set_cgram_address(0x40),
            Err(InstructionError::OutOfRange {
                value: 0x40,
                max: 0x3F,
            })
        ));
    }

    #[test]
    fn test_ddram_address_boundaries() {
        assert!(Instruction::set_ddram_address(0x00).is_ok());
        assert!(Instruction::set_ddram_address(0x7F).is_ok());
        assert!(matches!(
            Instruction::set_ddram_address(0x80),
            Err(InstructionError::OutOfRange {
                value: 0x80,
                max: 0x7F,
            })
        ));
    }

    #[test]
    fn test_completion_delay_tiers() {
        assert_eq!(
            Instruction::clear_display().completion_delay(),
            Duration::from_micros(1600)
        );
        assert_eq!(
            Instruction::return_home().completion_delay(),
            Duration::from_micros(1600)
        );
        assert_eq!(
            Instruction::write_data(0x20).completion_delay(),
            Duration::from_micros(40)
        );
        assert_eq!(
            Instruction::entry_mode_set(CursorDirection::Right, false).completion_delay(),
            Duration::from_micros(40)
        );
    }
}
