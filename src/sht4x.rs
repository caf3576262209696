use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::crc::crc8;
use crate::error::Sht4xError;
use crate::mode::Mode;

/// Factory-default I2C address of SHT4x-Axxx parts.
///
/// SHT4x-Bxxx parts respond on 0x45 instead; use [`Sht4x::with_address`]
/// for those.
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Soft reset command byte.
const CMD_SOFT_RESET: u8 = 0x94;

/// Serial number readout command byte.
const CMD_READ_SERIAL: u8 = 0x89;

/// Settle time (in milliseconds) after a soft reset.
const SOFT_RESET_DELAY_MS: u32 = 1;

/// Settle time (in milliseconds) before the serial number can be read.
const SERIAL_DELAY_MS: u32 = 10;

/// Driver for the SHT4x temperature and humidity sensor.
pub struct Sht4x<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    mode: Mode,
}

/// Converted reading returned by [`Sht4x::measure`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent, clamped to 0-100.
    pub relative_humidity: f64,
}

/// Raw register values returned by [`Sht4x::measure_raw`], before conversion
/// to physical units. Useful for callers applying their own calibration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReading {
    /// Raw temperature register value.
    pub temperature_ticks: u16,
    /// Raw humidity register value.
    pub humidity_ticks: u16,
}

impl<I2C, DELAY, E> Sht4x<I2C, DELAY>
where
    I2C: I2c<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the SHT4x driver on the factory-default
    /// address 0x44.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the sensor is connected to.
    /// * `delay` - A delay provider implementing the `DelayNs` trait, used
    ///   for the per-command settling delays.
    ///
    /// No bus traffic happens until the first command is issued. The
    /// measurement mode starts out as [`Mode::NoHeatHighPrecision`].
    pub fn new(i2c: I2C, delay: DELAY) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Creates a new instance of the SHT4x driver on a non-default address.
    pub fn with_address(i2c: I2C, delay: DELAY, address: u8) -> Self {
        Sht4x {
            i2c,
            delay,
            address,
            mode: Mode::NoHeatHighPrecision,
        }
    }

    /// Consumes the driver and gives back the bus and delay provider.
    pub fn release(self) -> (I2C, DELAY) {
        (self.i2c, self.delay)
    }

    /// Performs a soft reset, returning the sensor to its power-on state.
    ///
    /// Blocks for the 1 ms soft-reset time before returning. The driver's
    /// stored measurement mode is not affected; it is re-applied on the
    /// next [`measure`](Self::measure) call.
    pub fn reset(&mut self) -> Result<(), Sht4xError<E>> {
        self.i2c.write(self.address, &[CMD_SOFT_RESET])?;
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        Ok(())
    }

    /// Returns the currently selected measurement mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selects the measurement mode used by subsequent
    /// [`measure`](Self::measure) calls. No bus traffic.
    ///
    /// # Errors
    ///
    /// Returns [`Sht4xError::InvalidMode`] if `code` is not one of the nine
    /// command bytes in [`Mode`]; the previously selected mode is kept.
    pub fn set_mode(&mut self, code: u8) -> Result<(), Sht4xError<E>> {
        match Mode::from_code(code) {
            Some(mode) => {
                self.mode = mode;
                Ok(())
            }
            None => Err(Sht4xError::InvalidMode(code)),
        }
    }

    /// Reads the sensor's unique 32-bit serial number.
    ///
    /// # Errors
    ///
    /// Returns [`Sht4xError::ChecksumMismatch`] if either response word
    /// fails CRC validation, or [`Sht4xError::I2cError`] on a bus failure.
    pub fn serial_number(&mut self) -> Result<u32, Sht4xError<E>> {
        let response = self.command_and_read(CMD_READ_SERIAL, SERIAL_DELAY_MS)?;
        let (high, low) = Self::split_words(response)?;
        Ok(u32::from(high) << 16 | u32::from(low))
    }

    /// Takes a measurement in the currently selected mode and converts it
    /// to physical units.
    ///
    /// Blocks for the mode's settle delay between issuing the command and
    /// reading the response; heater modes block for the full heater pulse
    /// (up to 1.1 s).
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` with the temperature in degrees Celsius and the
    ///   relative humidity in percent (clamped to 0-100).
    /// * `Err(Sht4xError)` if a bus or checksum error occurs.
    pub fn measure(&mut self) -> Result<Reading, Sht4xError<E>> {
        let raw = self.measure_raw()?;

        let temperature = -45.0 + 175.0 * f64::from(raw.temperature_ticks) / 65535.0;
        // The linear humidity formula can leave the physical 0-100 range
        // at the ends of the register scale; out-of-range values only
        // matter when comparing sensor distributions, so they are clamped.
        let relative_humidity =
            (-6.0 + 125.0 * f64::from(raw.humidity_ticks) / 65535.0).clamp(0.0, 100.0);

        Ok(Reading {
            temperature,
            relative_humidity,
        })
    }

    /// Takes a measurement in the currently selected mode and returns the
    /// checksum-validated register values without unit conversion.
    pub fn measure_raw(&mut self) -> Result<RawReading, Sht4xError<E>> {
        let mode = self.mode;
        let response = self.command_and_read(mode.code(), mode.settle_delay_ms())?;
        let (temperature_ticks, humidity_ticks) = Self::split_words(response)?;

        Ok(RawReading {
            temperature_ticks,
            humidity_ticks,
        })
    }

    /// Writes a single command byte, waits out the settle delay, and reads
    /// the 6-byte response frame.
    fn command_and_read(&mut self, command: u8, settle_ms: u32) -> Result<[u8; 6], Sht4xError<E>> {
        self.i2c.write(self.address, &[command])?;
        self.delay.delay_ms(settle_ms);

        let mut response = [0u8; 6];
        self.i2c.read(self.address, &mut response)?;
        Ok(response)
    }

    /// Splits a response frame into its two big-endian data words, checking
    /// the checksum byte that follows each word.
    fn split_words(response: [u8; 6]) -> Result<(u16, u16), Sht4xError<E>> {
        let [w0_hi, w0_lo, w0_crc, w1_hi, w1_lo, w1_crc] = response;

        if crc8(&[w0_hi, w0_lo]) != w0_crc || crc8(&[w1_hi, w1_lo]) != w1_crc {
            return Err(Sht4xError::ChecksumMismatch);
        }

        Ok((
            u16::from_be_bytes([w0_hi, w0_lo]),
            u16::from_be_bytes([w1_hi, w1_lo]),
        ))
    }
}
