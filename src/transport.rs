//! Byte transport abstraction
//!
//! This module provides the [`Transport`] trait plus the two shipped
//! implementations: [`Pcf8574Transport`] for a real I2C bus and
//! [`ConsoleTransport`] for protocol debugging without hardware.
//!
//! ## Hardware Requirements
//!
//! The expected wiring is the common PCF8574 "LCD backpack": the expander's
//! eight port pins drive the controller as
//!
//! - **bit 0**: RS (register select)
//! - **bit 1**: RW (read/write)
//! - **bit 2**: E (enable)
//! - **bit 3**: backlight switch
//! - **bits 4-7**: D4..D7 (data nibble)
//!
//! A transport writes one such byte per call and must block until the medium
//! has acknowledged it *and* the expander outputs are stable, so the driver
//! can treat every returned write as pins-settled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use hd44780_pcf8574::{Pcf8574Transport, Transport, DEFAULT_I2C_ADDRESS};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl embedded_hal::delay::DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let mut transport = Pcf8574Transport::new(MockI2c, DEFAULT_I2C_ADDRESS, MockDelay);
//!
//! // Raise the backlight line, everything else low
//! let _ = transport.write_byte(0b0000_1000);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

/// Enable bit within a wire frame
///
/// The controller samples the data nibble while this line is high.
pub const ENABLE: u8 = 0b0000_0100;

/// Backlight bit within a wire frame
///
/// Drives the backpack's backlight transistor; ORed into every byte written
/// while the backlight is on.
pub const BACKLIGHT: u8 = 0b0000_1000;

/// Factory-default I2C address of PCF8574 backpacks
///
/// When in doubt, run `i2cdetect` to find where the device actually sits;
/// PCF8574A parts answer at 0x3F instead.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x27;

/// Time the PCF8574 needs after an acknowledged write before its port pins
/// are guaranteed stable
const PIN_SETTLE_DELAY_US: u32 = 5;

/// Trait for the byte transport to the expander
///
/// This is the single capability the [`Lcd`](crate::lcd::Lcd) driver consumes.
/// Implementations must block until the write is acknowledged by the
/// underlying medium and absorb any medium-specific settle delay before
/// returning; the driver issues its enable pulses back-to-back on that
/// assumption.
///
/// Session setup and teardown of the underlying bus are the implementation's
/// concern: owning the transport value *is* holding the session, and
/// dropping (or releasing) it on any exit path ends it.
///
/// ## Implementing
///
/// For real hardware use the provided [`Pcf8574Transport`]. Implement the
/// trait yourself for other expanders, or as a capturing double in tests.
pub trait Transport {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one byte to the device.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium fails; the driver propagates
    /// it unchanged and performs no retry.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Byte transport over a PCF8574 I2C GPIO expander
///
/// Owns the bus handle, the device address, and a delay provider used to wait
/// out the expander's output settle time after each acknowledged write.
///
/// ## Type Parameters
///
/// * `I2C` - bus implementing [`I2c`]
/// * `D` - delay implementing [`DelayNs`]
pub struct Pcf8574Transport<I2C, D> {
    /// I2C bus handle
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Delay provider for the post-write settle time
    delay: D,
}

impl<I2C, D> Pcf8574Transport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a transport for the expander at `address`.
    ///
    /// For most backpacks the address is [`DEFAULT_I2C_ADDRESS`].
    pub fn new(i2c: I2C, address: u8, delay: D) -> Self {
        Self { i2c, address, delay }
    }

    /// The configured device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus handle and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for Pcf8574Transport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[byte])?;
        // The expander latches on the I2C ack but its outputs ramp slower.
        self.delay.delay_us(PIN_SETTLE_DELAY_US);
        Ok(())
    }
}

/// Debug transport that decodes writes to the log instead of a bus
///
/// Each byte written while the enable line is high is broken into its
/// backlight/E/RW/RS/data fields and emitted via [`log::debug!`]; writes with
/// enable low are the settle/drop halves of a pulse and are skipped, so one
/// line appears per nibble actually clocked into the controller.
#[derive(Debug, Default)]
pub struct ConsoleTransport;

impl ConsoleTransport {
    /// Create a console transport.
    pub fn new() -> Self {
        Self
    }
}

impl Transport for ConsoleTransport {
    type Error = Infallible;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if byte & ENABLE == 0 {
            return Ok(());
        }
        debug!(
            "{:08b} -> B:{} E:{} RW:{} RS:{} D:{:04b}",
            byte,
            u8::from(byte & BACKLIGHT != 0),
            u8::from(byte & ENABLE != 0),
            u8::from(byte & 0b0000_0010 != 0),
            u8::from(byte & 0b0000_0001 != 0),
            (byte & 0xF0) >> 4,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockI2c {
        writes: alloc::vec::Vec<(u8, u8)>,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = embedded_hal::i2c::ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            for operation in operations {
                if let embedded_hal::i2c::Operation::Write(bytes) = operation {
                    for byte in bytes.iter() {
                        self.writes.push((address, *byte));
                    }
                }
            }
            Ok(())
        }
    }

    struct MockDelay {
        waited_us: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.waited_us += ns / 1000;
        }
    }

    #[test]
    fn test_pcf8574_writes_single_byte_to_configured_address() {
        let i2c = MockI2c {
            writes: alloc::vec::Vec::new(),
        };
        let delay = MockDelay { waited_us: 0 };
        let mut transport = Pcf8574Transport::new(i2c, DEFAULT_I2C_ADDRESS, delay);

        transport.write_byte(0xA4).unwrap();
        transport.write_byte(0x00).unwrap();

        let (i2c, _) = transport.release();
        assert_eq!(i2c.writes, alloc::vec![(0x27, 0xA4), (0x27, 0x00)]);
    }

    #[test]
    fn test_pcf8574_waits_for_pin_settle_after_each_write() {
        let i2c = MockI2c {
            writes: alloc::vec::Vec::new(),
        };
        let delay = MockDelay { waited_us: 0 };
        let mut transport = Pcf8574Transport::new(i2c, 0x3F, delay);

        transport.write_byte(0x10).unwrap();
        transport.write_byte(0x14).unwrap();
        transport.write_byte(0x10).unwrap();

        assert_eq!(transport.address(), 0x3F);
        let (_, delay) = transport.release();
        assert_eq!(delay.waited_us, 3 * PIN_SETTLE_DELAY_US);
    }

    #[test]
    fn test_console_transport_never_fails() {
        let mut transport = ConsoleTransport::new();
        for byte in 0..=u8::MAX {
            transport.write_byte(byte).unwrap();
        }
    }
}
