//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]), instruction construction ([`InstructionError`]), and
//! controller operations ([`Error`]).
//!
//! All parameter validation happens at construction time, before any byte
//! reaches the transport; a failed instruction or configuration is fully
//! recoverable by retrying with different parameters. Transport failures are
//! passed through unchanged and never retried, since a failed write
//! mid-sequence leaves the hardware state ambiguous and a silent retry could
//! double-apply an enable edge.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{Instruction, InstructionError};
//!
//! // DDRAM only spans 0x00..=0x7F
//! let result = Instruction::set_ddram_address(0x80);
//! assert!(matches!(
//!     result,
//!     Err(InstructionError::OutOfRange { value: 0x80, max: 0x7F })
//! ));
//! ```

use crate::config::{Font, Lines};
use crate::transport::Transport;

/// Errors raised while constructing an [`Instruction`](crate::Instruction)
///
/// Raised before any transport I/O; the caller can simply retry with
/// different parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InstructionError {
    /// Parameter combination the hardware cannot honor
    ///
    /// Currently only two display lines together with the 5x10 font.
    InvalidConfiguration {
        /// Requested line count
        lines: Lines,
        /// Requested font
        font: Font,
    },
    /// Numeric parameter outside its documented range
    OutOfRange {
        /// The rejected value
        value: u8,
        /// Highest accepted value
        max: u8,
    },
}

impl core::fmt::Display for InstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidConfiguration { lines, font } => {
                write!(f, "invalid configuration: {lines:?} with {font:?}")
            }
            Self::OutOfRange { value, max } => {
                write!(f, "value {value:#04x} out of range (max {max:#04x})")
            }
        }
    }
}

impl core::error::Error for InstructionError {}

/// Errors raised while building a [`Config`](crate::config::Config)
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BuilderError {
    /// The 8-bit interface was requested
    ///
    /// Permanently unimplemented: the expander wiring only reaches D7..D4.
    UnsupportedBitMode,
    /// Line count and font the hardware cannot combine
    InvalidConfiguration {
        /// Requested line count
        lines: Lines,
        /// Requested font
        font: Font,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedBitMode => write!(f, "8-bit interface mode is not supported"),
            Self::InvalidConfiguration { lines, font } => {
                write!(f, "invalid configuration: {lines:?} with {font:?}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors raised by [`Lcd`](crate::lcd::Lcd) operations
///
/// Generic over the transport type to preserve the specific bus error, so
/// callers can match on the underlying hardware failure.
#[derive(Debug)]
pub enum Error<T: Transport> {
    /// Transport-level failure, propagated unchanged (never retried)
    Transport(T::Error),
    /// An instruction built internally from caller-supplied parameters was
    /// rejected before any I/O
    Instruction(InstructionError),
    /// The configuration requests the 8-bit interface
    UnsupportedBitMode,
}

impl<T: Transport> From<InstructionError> for Error<T> {
    fn from(err: InstructionError) -> Self {
        Error::Instruction(err)
    }
}

impl<T: Transport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(_) => write!(f, "transport error"),
            Self::Instruction(err) => write!(f, "instruction error: {err}"),
            Self::UnsupportedBitMode => write!(f, "8-bit interface mode is not supported"),
        }
    }
}

impl<T: Transport + core::fmt::Debug> core::error::Error for Error<T> {}
