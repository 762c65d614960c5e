//! A platform-agnostic Rust driver for the NXP PCF85363A/PCF85263A real-time
//! clock, built on the [`embedded-hal`](https://github.com/rust-embedded/embedded-hal)
//! traits.
//!
//! # Features
//!
//! - Blocking and async (`async` feature) I2C drivers
//! - Date/time access via chrono's `NaiveDateTime` (years 2000-2099)
//! - Alarm 1 with independent per-field matching on INTA
//! - Interrupt flag handling suitable for shared interrupt lines
//! - NVRAM access (64 bytes on the PCF85363, one byte on the PCF85263)
//! - Optional logging through `log` or `defmt`
//!
//! # Example
//!
//! ```rust,ignore
//! use pcf85363::{Alarm1Config, Config, IntAPinFunction, InterruptMode, Variant, PCF85363};
//!
//! let mut rtc = PCF85363::new(i2c, 0x51, Variant::Pcf85363);
//!
//! rtc.configure(&Config {
//!     inta_function: IntAPinFunction::InterruptOutput,
//!     interrupt_mode: InterruptMode::Level,
//! })?;
//!
//! rtc.set_datetime(&datetime)?;
//!
//! // Fire at hh:30:00 every hour.
//! rtc.set_alarm(&Alarm1Config {
//!     seconds: Some(0),
//!     minutes: Some(30),
//!     enabled: true,
//!     ..Default::default()
//! })?;
//! ```

#![no_std]

#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)*) => (log::debug!($($arg)*));
}
#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! debug {
    ($($arg:tt)*) => (defmt::debug!($($arg)*));
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "log")]
macro_rules! error {
    ($($arg:tt)*) => (log::error!($($arg)*));
}
#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! error {
    ($($arg:tt)*) => (defmt::error!($($arg)*));
}
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! error {
    ($($arg:tt)*) => {{}};
}

mod alarm;
#[cfg(feature = "async")]
pub mod asynch;
mod datetime;
mod registers;

pub use alarm::{Alarm1Config, AlarmError, PCF85363Alarm1};
pub use datetime::{PCF85363DateTimeError, EPOCH_YEAR};
pub use registers::*;

use chrono::NaiveDateTime;
use embedded_hal::i2c::I2c;
use paste::paste;

use crate::datetime::PCF85363DateTime;

/// Device configuration.
pub struct Config {
    /// Function routed to the INTA pin
    pub inta_function: IntAPinFunction,
    /// Level or pulsed interrupt output
    pub interrupt_mode: InterruptMode,
}

/// Chip variant, selecting the NVRAM region.
///
/// The two parts share the full register map; they differ only in the
/// non-volatile storage they provide.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// PCF85363A with 64 bytes of NVRAM
    Pcf85363,
    /// PCF85263A with a single RAM byte
    Pcf85263,
}

impl Variant {
    /// Size of the variant's NVRAM region in bytes.
    pub fn nvram_size(self) -> usize {
        match self {
            Variant::Pcf85363 => 64,
            Variant::Pcf85263 => 1,
        }
    }

    pub(crate) fn nvram_base(self) -> u8 {
        match self {
            Variant::Pcf85363 => RegAddr::Nvram as u8,
            Variant::Pcf85263 => RegAddr::RamByte as u8,
        }
    }
}

/// Phase of a multi-transaction write sequence that failed.
///
/// The device is left in the state the phase documents, not rolled back;
/// re-running the whole operation is always safe.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WritePhase {
    /// The time registers failed to load; the clock is still stopped
    TimeLoad,
    /// The time registers were loaded but the clock was not restarted
    ClockResume,
    /// The alarm match registers failed to load; the alarm is disabled
    AlarmFields,
    /// The alarm match registers were loaded but re-arming failed; the
    /// alarm is disabled
    AlarmRearm,
}

/// Outcome of [`PCF85363::handle_interrupt`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqStatus {
    /// The alarm had fired; its flag has been acknowledged
    Handled,
    /// The alarm flag was clear; another device or function owns this
    /// interrupt
    NotMine,
}

/// Trustworthiness of a time reading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockIntegrity {
    /// The oscillator has run continuously since the time was last set
    Trusted,
    /// The oscillator stopped at some point; the time may be stale
    Compromised,
}

/// Error type for PCF85363 operations.
#[derive(Debug)]
pub enum PCF85363Error<I2CE> {
    /// I2C bus error
    I2c(I2CE),
    /// Date/time conversion error
    DateTime(PCF85363DateTimeError),
    /// Alarm configuration error
    Alarm(AlarmError),
    /// NVRAM access outside the variant's region
    InvalidOffset,
    /// A multi-transaction sequence failed partway through
    PartialWrite {
        /// The phase that failed
        phase: WritePhase,
        /// The underlying bus error
        cause: I2CE,
    },
}

impl<I2CE> From<I2CE> for PCF85363Error<I2CE> {
    fn from(e: I2CE) -> Self {
        PCF85363Error::I2c(e)
    }
}

/// PCF85363 Real-Time Clock driver.
///
/// This struct provides the blocking interface to the device. All methods
/// take `&mut self`, so the borrow checker already guarantees that driver
/// calls on one instance never interleave; bus sharing across devices is
/// the HAL's concern.
pub struct PCF85363<I2C: I2c> {
    i2c: I2C,
    address: u8,
    variant: Variant,
}

impl<I2C: I2c> PCF85363<I2C> {
    /// Creates a new PCF85363 driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus implementation
    /// * `address` - The I2C address of the device (typically 0x51)
    /// * `variant` - The chip variant, selecting the NVRAM region
    pub fn new(i2c: I2C, address: u8, variant: Variant) -> Self {
        Self {
            i2c,
            address,
            variant,
        }
    }

    /// Configures the device according to the provided configuration.
    ///
    /// Routes the requested function to the INTA pin, forces 24-hour mode
    /// and selects level or pulsed interrupt output. Untouched bits in
    /// each register are preserved.
    ///
    /// # Errors
    /// Returns `PCF85363Error::I2c` on bus error.
    pub fn configure(&mut self, config: &Config) -> Result<(), PCF85363Error<I2C::Error>> {
        let mut pin_io = self.pin_io()?;
        pin_io.set_inta_output(config.inta_function);
        debug!("pin io = {}", u8::from(pin_io));
        self.set_pin_io(pin_io)?;

        let mut oscillator = self.oscillator()?;
        oscillator.set_hour_mode(HourMode::TwentyFourHour);
        self.set_oscillator(oscillator)?;

        let mut inta = self.inta_enable()?;
        inta.set_output_mode(config.interrupt_mode);
        debug!("inta enable = {}", u8::from(inta));
        self.set_inta_enable(inta)?;
        Ok(())
    }

    /// Reads the raw datetime registers from the device.
    fn read_raw_datetime(&mut self) -> Result<PCF85363DateTime, PCF85363Error<I2C::Error>> {
        let mut data = [0; 8];
        self.i2c
            .write_read(self.address, &[RegAddr::Hundredths as u8], &mut data)?;
        Ok(data.into())
    }

    /// Gets the current date and time from the device.
    ///
    /// Performs a single bulk read of all eight time registers, so the
    /// returned value is a coherent snapshot.
    ///
    /// # Returns
    /// * `Ok(NaiveDateTime)` - The current date and time
    /// * `Err(PCF85363Error)` on bus error or if the registers hold an
    ///   invalid BCD value
    pub fn datetime(&mut self) -> Result<NaiveDateTime, PCF85363Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        raw.into_datetime().map_err(PCF85363Error::DateTime)
    }

    /// Gets the current date and time together with its integrity.
    ///
    /// Uses the same single bulk read as [`datetime`](Self::datetime) and
    /// additionally reports whether the oscillator-stop flag was set in
    /// that read. A [`ClockIntegrity::Compromised`] reading decodes
    /// normally; the host decides whether to trust it.
    pub fn datetime_with_integrity(
        &mut self,
    ) -> Result<(NaiveDateTime, ClockIntegrity), PCF85363Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        let integrity = if raw.oscillator_stopped() {
            ClockIntegrity::Compromised
        } else {
            ClockIntegrity::Trusted
        };
        let datetime = raw.into_datetime().map_err(PCF85363Error::DateTime)?;
        Ok((datetime, integrity))
    }

    /// Sets the current date and time on the device.
    ///
    /// The load is a three-transaction sequence: stop the clock and clear
    /// the prescaler, write all eight time registers in one transfer, then
    /// restart the clock. Stopping first guarantees no tick lands between
    /// the writes; clearing the prescaler discards the partially elapsed
    /// second.
    ///
    /// # Errors
    /// * `PCF85363Error::DateTime` if the value is outside 2000-2099; the
    ///   device is not touched
    /// * `PCF85363Error::I2c` if the initial stop fails; the clock keeps
    ///   its previous time
    /// * `PCF85363Error::PartialWrite` if a later transaction fails; the
    ///   clock is left stopped and the phase says how far the load got
    pub fn set_datetime(&mut self, datetime: &NaiveDateTime) -> Result<(), PCF85363Error<I2C::Error>> {
        let raw = PCF85363DateTime::from_datetime(datetime).map_err(PCF85363Error::DateTime)?;
        let data: [u8; 8] = (&raw).into();

        let mut stop = StopEnable::default();
        stop.set_stop(true);
        self.i2c.write(
            self.address,
            &[
                RegAddr::StopEnable as u8,
                stop.into(),
                RESET_CLEAR_PRESCALER,
            ],
        )?;

        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::Hundredths as u8,
                    data[0],
                    data[1],
                    data[2],
                    data[3],
                    data[4],
                    data[5],
                    data[6],
                    data[7],
                ],
            )
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::TimeLoad,
                cause,
            })?;

        self.i2c
            .write(
                self.address,
                &[RegAddr::StopEnable as u8, StopEnable::default().into()],
            )
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::ClockResume,
                cause,
            })?;
        Ok(())
    }

    /// Reads the current alarm 1 configuration from the device.
    ///
    /// Reconstructs the per-field matches from the alarm-enable register
    /// and the interrupt enable from the INTA enable register.
    pub fn alarm(&mut self) -> Result<Alarm1Config, PCF85363Error<I2C::Error>> {
        let mut data = [0; 5];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm1Seconds as u8], &mut data)?;
        let raw = PCF85363Alarm1::from(data);
        let enables = self.alarm_enables()?;
        let enabled = self.inta_enable()?.alarm1();
        raw.to_config(enables, enabled).map_err(PCF85363Error::Alarm)
    }

    /// Sets the alarm 1 configuration on the device.
    ///
    /// The alarm is fully disarmed before the match registers change and
    /// re-armed only afterwards, so a half-written configuration can never
    /// fire. A stale fired flag is cleared before re-arming. Alarm 2 bits
    /// in the shared enable register are preserved.
    ///
    /// # Errors
    /// * `PCF85363Error::Alarm` if a match value is out of range; the
    ///   device is not touched
    /// * `PCF85363Error::I2c` if disarming fails; the previous alarm is
    ///   still armed
    /// * `PCF85363Error::PartialWrite` if a later transaction fails; the
    ///   alarm is left disabled and the phase says how far the load got
    pub fn set_alarm(&mut self, config: &Alarm1Config) -> Result<(), PCF85363Error<I2C::Error>> {
        let raw = PCF85363Alarm1::from_config(config).map_err(PCF85363Error::Alarm)?;
        let data: [u8; 5] = (&raw).into();
        let enables: u8 = config.match_enables().into();

        self.update_bits(RegAddr::AlarmEnables, ALARM1_MATCH_MASK, 0)?;
        self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, 0)?;

        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::Alarm1Seconds as u8,
                    data[0],
                    data[1],
                    data[2],
                    data[3],
                    data[4],
                ],
            )
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmFields,
                cause,
            })?;

        self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0)
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmRearm,
                cause,
            })?;
        self.update_bits(RegAddr::AlarmEnables, ALARM1_MATCH_MASK, enables)
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmRearm,
                cause,
            })?;
        if config.enabled {
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, INT_ALARM1_ENABLE)
                .map_err(|cause| PCF85363Error::PartialWrite {
                    phase: WritePhase::AlarmRearm,
                    cause,
                })?;
        }
        Ok(())
    }

    /// Enables or disables the alarm 1 interrupt on INTA.
    ///
    /// Enabling clears a stale fired flag first; a leftover flag would
    /// assert the line the moment the interrupt is unmasked. The match
    /// configuration is owned by [`set_alarm`](Self::set_alarm) and is not
    /// touched here.
    pub fn enable_alarm_irq(&mut self, enabled: bool) -> Result<(), PCF85363Error<I2C::Error>> {
        if enabled {
            self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0)?;
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, INT_ALARM1_ENABLE)?;
        } else {
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, 0)?;
        }
        Ok(())
    }

    /// Services a level or edge on the interrupt line.
    ///
    /// Reads the status flags; if alarm 1 has fired, acknowledges it with
    /// a fresh read-modify-write so flags raised in between survive, and
    /// returns [`IrqStatus::Handled`]. Returns [`IrqStatus::NotMine`]
    /// without writing anything otherwise, so other handlers on a shared
    /// line can probe their own devices.
    pub fn handle_interrupt(&mut self) -> Result<IrqStatus, PCF85363Error<I2C::Error>> {
        let flags = self.flags()?;
        if !flags.alarm1_fired() {
            return Ok(IrqStatus::NotMine);
        }
        self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0)?;
        Ok(IrqStatus::Handled)
    }

    /// Reads from the variant's NVRAM region.
    ///
    /// # Errors
    /// Returns `PCF85363Error::InvalidOffset` without touching the bus if
    /// `offset + data.len()` exceeds the region.
    pub fn nvram_read(&mut self, offset: u8, data: &mut [u8]) -> Result<(), PCF85363Error<I2C::Error>> {
        if usize::from(offset) + data.len() > self.variant.nvram_size() {
            return Err(PCF85363Error::InvalidOffset);
        }
        self.i2c
            .write_read(self.address, &[self.variant.nvram_base() + offset], data)?;
        Ok(())
    }

    /// Writes to the variant's NVRAM region.
    ///
    /// The whole slice is written in a single transaction, so a bus error
    /// cannot leave a torn mix of old and new bytes beyond what the chip
    /// itself committed.
    ///
    /// # Errors
    /// Returns `PCF85363Error::InvalidOffset` without touching the bus if
    /// `offset + data.len()` exceeds the region.
    pub fn nvram_write(&mut self, offset: u8, data: &[u8]) -> Result<(), PCF85363Error<I2C::Error>> {
        if usize::from(offset) + data.len() > self.variant.nvram_size() {
            return Err(PCF85363Error::InvalidOffset);
        }
        let mut buf = [0u8; 65];
        buf[0] = self.variant.nvram_base() + offset;
        buf[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buf[..=data.len()])?;
        Ok(())
    }

    /// Checks whether the oscillator has stopped since the time was last
    /// set, meaning the kept time is not trustworthy.
    pub fn oscillator_stopped(&mut self) -> Result<bool, PCF85363Error<I2C::Error>> {
        Ok(self.second()?.oscillator_stop())
    }

    /// Read-modify-write limited to the masked bits of one register.
    fn update_bits(&mut self, reg: RegAddr, mask: u8, value: u8) -> Result<(), I2C::Error> {
        let mut data = [0];
        self.i2c.write_read(self.address, &[reg as u8], &mut data)?;
        let updated = (data[0] & !mask) | (value & mask);
        self.i2c.write(self.address, &[reg as u8, updated])?;
        Ok(())
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> PCF85363<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Returns"]
                    #[doc = concat!("* `Ok(", stringify!($typ), ")` - The register value on success")]
                    #[doc = "* `Err(PCF85363Error)` on error"]
                    pub fn $name(&mut self) -> Result<$typ, PCF85363Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)?;
                        Ok($typ(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Arguments"]
                    #[doc = concat!("* `value` - The value to write to the ", stringify!($name), " register")]
                    #[doc = "\n\n# Returns"]
                    #[doc = "* `Ok(())` on success"]
                    #[doc = "* `Err(PCF85363Error)` on error"]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), PCF85363Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        )?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Days, Days),
    (weekday, RegAddr::Weekdays, Weekdays),
    (month, RegAddr::Months, Months),
    (year, RegAddr::Years, Years),
    (alarm_enables, RegAddr::AlarmEnables, AlarmEnables),
    (oscillator, RegAddr::Oscillator, Oscillator),
    (pin_io, RegAddr::PinIo, PinIo),
    (inta_enable, RegAddr::IntAEnable, IntEnable),
    (intb_enable, RegAddr::IntBEnable, IntEnable),
    (flags, RegAddr::Flags, Flags),
    (ram_byte, RegAddr::RamByte, RamByte),
    (stop_enable, RegAddr::StopEnable, StopEnable)
);
