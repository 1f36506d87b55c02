//! Core controller operations

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::config::{BitMode, Config, Font, Lines};
use crate::error::Error;
use crate::instruction::{CursorDirection, Instruction};
use crate::transport::{BACKLIGHT, ENABLE, Transport};

type LcdResult<T> = core::result::Result<(), Error<T>>;

/// Settle time after power-on before the reset handshake may start
const POWER_ON_DELAY: Duration = Duration::from_millis(15);
/// Wait after the first 8-bit sync command of the handshake
const FIRST_SYNC_DELAY: Duration = Duration::from_micros(4100);
/// Wait after the second 8-bit sync command
const SECOND_SYNC_DELAY: Duration = Duration::from_micros(100);
/// Minimum enable pulse width (datasheet PWEH)
const ENABLE_PULSE_WIDTH: Duration = Duration::from_nanos(230);
/// Minimum enable cycle time; the pulse and the low tail together must span it
const ENABLE_CYCLE: Duration = Duration::from_nanos(500);
/// Low tail after dropping enable, so the next pulse is not issued too soon
const ENABLE_DROP_DELAY: Duration = ENABLE_CYCLE.saturating_sub(ENABLE_PULSE_WIDTH);

/// Block for `duration` on the given delay provider.
fn delay_for<D: DelayNs>(delay: &mut D, duration: Duration) {
    delay.delay_ns(duration.as_nanos() as u32);
}

/// Driver for an HD44780 controller behind a byte transport
///
/// Owns the transport exclusively and the controller's current interface
/// mode. The controller powers on in 8-bit mode; [`init`](Self::init)
/// performs the documented reset handshake and switches it (and this driver)
/// to 4-bit mode exactly once. Every operation is strictly sequential; the
/// timed waits model hardware settling that the next instruction depends on.
/// The `&mut self` receivers leave any cross-thread serialization to the
/// caller.
pub struct Lcd<T: Transport> {
    /// Byte transport to the expander
    transport: T,
    /// Configuration fixed at construction
    config: Config,
    /// Current interface mode of the controller
    bit_mode: BitMode,
    /// Current backlight state
    backlight: bool,
}

impl<T: Transport> Lcd<T> {
    /// Create a driver over `transport` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBitMode`] if the configuration requests
    /// the 8-bit interface, which this wiring cannot drive. A
    /// [`Builder`](crate::config::Builder)-made configuration has already
    /// been checked; the repeated validation covers hand-built [`Config`]
    /// values.
    pub fn new(transport: T, config: Config) -> Result<Self, Error<T>> {
        if config.bit_mode == BitMode::EightBit {
            return Err(Error::UnsupportedBitMode);
        }
        Ok(Self {
            transport,
            bit_mode: BitMode::EightBit,
            backlight: config.backlight,
            config,
        })
    }

    /// Run the power-on reset handshake and configure the display.
    ///
    /// Must be called exactly once, before any other instruction: the
    /// controller wakes in 8-bit mode and this is the only place the switch
    /// to 4-bit interpretation happens. Running it again would replay the
    /// 8-bit handshake through the 4-bit path; power-cycle the display
    /// instead.
    ///
    /// The sequence (datasheet, "Initializing by Instruction"): wait out the
    /// power-on settle, send function-set(8-bit, 1 line, 5x8) three times
    /// with the mandated waits in between, send function-set(4-bit) as the
    /// final 8-bit write, then, now in 4-bit mode, the configured function
    /// set, display off, clear, and the default entry mode (increment, no
    /// shift).
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> LcdResult<T> {
        // Build everything up front so parameter validation cannot
        // interleave with bus traffic.
        let sync = Instruction::function_set(BitMode::EightBit, Lines::One, Font::Dots5x8)?;
        let switch = Instruction::function_set(BitMode::FourBit, Lines::One, Font::Dots5x8)?;
        let configure =
            Instruction::function_set(self.config.bit_mode, self.config.lines, self.config.font)?;
        let display_off = Instruction::display_on_off(false, false, false);
        let clear = Instruction::clear_display();
        let entry_mode = Instruction::entry_mode_set(CursorDirection::Right, false);

        delay_for(delay, POWER_ON_DELAY);
        self.execute(sync, delay)?;
        delay_for(delay, FIRST_SYNC_DELAY);
        self.execute(sync, delay)?;
        delay_for(delay, SECOND_SYNC_DELAY);
        self.execute(sync, delay)?;
        // Last 8-bit-mode write; from here the controller expects nibble pairs.
        self.execute(switch, delay)?;
        self.bit_mode = BitMode::FourBit;

        self.execute(configure, delay)?;
        self.execute(display_off, delay)?;
        self.execute(clear, delay)?;
        self.execute(entry_mode, delay)?;
        Ok(())
    }

    /// Transmit one instruction and wait out its completion time.
    ///
    /// In 8-bit mode (before [`init`](Self::init) finishes the switch) only
    /// the high nibble is transmitted: the wiring has no path to D3..D0, so
    /// the low nibble is dropped on purpose. In 4-bit mode the high and low
    /// nibbles go out as two separate enable pulses, then the completion
    /// delay is waited once.
    pub fn execute<D: DelayNs>(&mut self, instruction: Instruction, delay: &mut D) -> LcdResult<T> {
        match self.bit_mode {
            BitMode::EightBit => {
                self.send_nibble(instruction.high_byte(), delay)?;
            }
            BitMode::FourBit => {
                self.send_nibble(instruction.high_byte(), delay)?;
                self.send_nibble(instruction.low_byte(), delay)?;
            }
        }
        delay_for(delay, instruction.completion_delay());
        Ok(())
    }

    /// Switch the backlight line.
    ///
    /// Writes a single frame with all control lines low, so the backlight
    /// changes immediately without clocking the controller. Every subsequent
    /// frame carries the new state.
    pub fn set_backlight(&mut self, on: bool) -> LcdResult<T> {
        self.backlight = on;
        self.write_byte(self.backlight_bit())
    }

    /// Clock one nibble frame into the controller.
    ///
    /// Three writes per frame: data lines settle with enable low, enable
    /// rises (the controller samples on this level), enable drops. The
    /// backlight bit rides along on all three.
    fn send_nibble<D: DelayNs>(&mut self, frame: u8, delay: &mut D) -> LcdResult<T> {
        let frame = frame | self.backlight_bit();
        trace!("Sending frame: {:08b}", frame);
        self.write_byte(frame)?;
        self.write_byte(frame | ENABLE)?;
        delay_for(delay, ENABLE_PULSE_WIDTH);
        self.write_byte(frame)?;
        delay_for(delay, ENABLE_DROP_DELAY);
        Ok(())
    }

    /// Write one byte to the transport
    fn write_byte(&mut self, byte: u8) -> LcdResult<T> {
        self.transport.write_byte(byte).map_err(Error::Transport)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight { BACKLIGHT } else { 0 }
    }

    /// Current interface mode of the controller.
    pub fn bit_mode(&self) -> BitMode {
        self.bit_mode
    }

    /// Access the underlying configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the backlight is currently on.
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Release the transport.
    pub fn release(self) -> T {
        self.transport
    }
}
