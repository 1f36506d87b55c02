//! HD44780 Character LCD Driver
//!
//! A driver for HD44780-family character LCD controllers wired through a
//! PCF8574 I2C GPIO expander, the common "I2C backpack" found on low-cost
//! 16x2 and 20x4 displays.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Typed, validated constructors for every documented HD44780 instruction
//! - The full 8-bit to 4-bit power-on handshake with datasheet timing
//! - Pluggable byte transport (real I2C bus, console debug logger, test
//!   doubles)
//! - Runtime backlight control
//!
//! No busy-flag read-back: the driver assumes worst-case fixed delays, which
//! keeps the expander write-only.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hd44780_pcf8574::{Builder, ConsoleTransport, Instruction, Lcd};
//!
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay {
//! #     fn delay_ns(&mut self, _ns: u32) {}
//! # }
//! # let mut delay = Delay;
//! // On real hardware, use Pcf8574Transport over the platform's I2C bus.
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut lcd = match Lcd::new(ConsoleTransport::new(), config) {
//!     Ok(lcd) => lcd,
//!     Err(_) => return,
//! };
//!
//! let _ = lcd.init(&mut delay);
//! let _ = lcd.execute(Instruction::display_on_off(true, false, false), &mut delay);
//! if let Ok(home) = Instruction::set_ddram_address(0) {
//!     let _ = lcd.execute(home, &mut delay);
//! }
//! for byte in *b"Hello" {
//!     let _ = lcd.execute(Instruction::write_data(byte), &mut delay);
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Display configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// HD44780 instruction model and factory
pub mod instruction;
/// Core controller operations
pub mod lcd;
/// Byte transport abstraction
pub mod transport;

pub use config::{BitMode, Builder, Config, Font, Lines};
pub use error::{BuilderError, Error, InstructionError};
pub use instruction::{CursorDirection, Instruction, ShiftTarget};
pub use lcd::Lcd;
pub use transport::{
    BACKLIGHT, ConsoleTransport, DEFAULT_I2C_ADDRESS, ENABLE, Pcf8574Transport, Transport,
};
