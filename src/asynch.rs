//! Async implementation of the PCF85363 driver.
//!
//! This module provides an async interface to the PCF85363 RTC device using
//! `embedded-hal-async` traits. It is only available when the `async` feature
//! is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcf85363::asynch::PCF85363;
//! use pcf85363::Variant;
//!
//! // Initialize device
//! let mut rtc = PCF85363::new(i2c, 0x51, Variant::Pcf85363);
//!
//! // Configure asynchronously
//! rtc.configure(&config).await?;
//!
//! // Get current date/time asynchronously
//! let datetime = rtc.datetime().await?;
//! ```

use chrono::NaiveDateTime;
use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::datetime::PCF85363DateTime;
use crate::{
    Alarm1Config, AlarmEnables, ClockIntegrity, Config, Days, Flags, HourMode, Hours, IntEnable,
    IrqStatus, Minutes, Months, Oscillator, PCF85363Alarm1, PCF85363Error, PinIo, RamByte, RegAddr,
    Seconds, StopEnable, Variant, Weekdays, WritePhase, Years, ALARM1_MATCH_MASK,
    FLAG_ALARM1_FIRED, INT_ALARM1_ENABLE, RESET_CLEAR_PRESCALER,
};

/// PCF85363 Real-Time Clock async driver.
///
/// This struct provides the async interface to the PCF85363 RTC device.
/// It supports async I2C operations through the `embedded-hal-async` traits
/// and mirrors the blocking driver's behavior exactly.
pub struct PCF85363<I2C: I2c> {
    i2c: I2C,
    address: u8,
    variant: Variant,
}

impl<I2C: I2c> PCF85363<I2C> {
    /// Creates a new PCF85363 async driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The async I2C bus implementation
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
    pub async fn configure(&mut self, config: &Config) -> Result<(), PCF85363Error<I2C::Error>> {
        let mut pin_io = self.pin_io().await?;
        pin_io.set_inta_output(config.inta_function);
        debug!("pin io = {}", u8::from(pin_io));
        self.set_pin_io(pin_io).await?;

        let mut oscillator = self.oscillator().await?;
        oscillator.set_hour_mode(HourMode::TwentyFourHour);
        self.set_oscillator(oscillator).await?;

        let mut inta = self.inta_enable().await?;
        inta.set_output_mode(config.interrupt_mode);
        debug!("inta enable = {}", u8::from(inta));
        self.set_inta_enable(inta).await?;
        Ok(())
    }

    /// Reads the raw datetime registers from the device.
    async fn read_raw_datetime(&mut self) -> Result<PCF85363DateTime, PCF85363Error<I2C::Error>> {
        let mut data = [0; 8];
        self.i2c
            .write_read(self.address, &[RegAddr::Hundredths as u8], &mut data)
            .await?;
        Ok(data.into())
    }

    /// Gets the current date and time from the device.
    ///
    /// Performs a single bulk read of all eight time registers, so the
    /// returned value is a coherent snapshot.
    pub async fn datetime(&mut self) -> Result<NaiveDateTime, PCF85363Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
        raw.into_datetime().map_err(PCF85363Error::DateTime)
    }

    /// Gets the current date and time together with its integrity.
    ///
    /// Uses the same single bulk read as [`datetime`](Self::datetime) and
    /// additionally reports whether the oscillator-stop flag was set in
    /// that read.
    pub async fn datetime_with_integrity(
        &mut self,
    ) -> Result<(NaiveDateTime, ClockIntegrity), PCF85363Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
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
    /// restart the clock.
    ///
    /// # Errors
    /// * `PCF85363Error::DateTime` if the value is outside 2000-2099; the
    ///   device is not touched
    /// * `PCF85363Error::I2c` if the initial stop fails; the clock keeps
    ///   its previous time
    /// * `PCF85363Error::PartialWrite` if a later transaction fails; the
    ///   clock is left stopped and the phase says how far the load got
    pub async fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), PCF85363Error<I2C::Error>> {
        let raw = PCF85363DateTime::from_datetime(datetime).map_err(PCF85363Error::DateTime)?;
        let data: [u8; 8] = (&raw).into();

        let mut stop = StopEnable::default();
        stop.set_stop(true);
        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::StopEnable as u8,
                    stop.into(),
                    RESET_CLEAR_PRESCALER,
                ],
            )
            .await?;

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
            .await
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::TimeLoad,
                cause,
            })?;

        self.i2c
            .write(
                self.address,
                &[RegAddr::StopEnable as u8, StopEnable::default().into()],
            )
            .await
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::ClockResume,
                cause,
            })?;
        Ok(())
    }

    /// Reads the current alarm 1 configuration from the device.
    pub async fn alarm(&mut self) -> Result<Alarm1Config, PCF85363Error<I2C::Error>> {
        let mut data = [0; 5];
        self.i2c
            .write_read(self.address, &[RegAddr::Alarm1Seconds as u8], &mut data)
            .await?;
        let raw = PCF85363Alarm1::from(data);
        let enables = self.alarm_enables().await?;
        let enabled = self.inta_enable().await?.alarm1();
        raw.to_config(enables, enabled).map_err(PCF85363Error::Alarm)
    }

    /// Sets the alarm 1 configuration on the device.
    ///
    /// The alarm is fully disarmed before the match registers change and
    /// re-armed only afterwards, so a half-written configuration can never
    /// fire. A stale fired flag is cleared before re-arming.
    pub async fn set_alarm(
        &mut self,
        config: &Alarm1Config,
    ) -> Result<(), PCF85363Error<I2C::Error>> {
        let raw = PCF85363Alarm1::from_config(config).map_err(PCF85363Error::Alarm)?;
        let data: [u8; 5] = (&raw).into();
        let enables: u8 = config.match_enables().into();

        self.update_bits(RegAddr::AlarmEnables, ALARM1_MATCH_MASK, 0)
            .await?;
        self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, 0)
            .await?;

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
            .await
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmFields,
                cause,
            })?;

        self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0)
            .await
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmRearm,
                cause,
            })?;
        self.update_bits(RegAddr::AlarmEnables, ALARM1_MATCH_MASK, enables)
            .await
            .map_err(|cause| PCF85363Error::PartialWrite {
                phase: WritePhase::AlarmRearm,
                cause,
            })?;
        if config.enabled {
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, INT_ALARM1_ENABLE)
                .await
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
    /// assert the line the moment the interrupt is unmasked.
    pub async fn enable_alarm_irq(
        &mut self,
        enabled: bool,
    ) -> Result<(), PCF85363Error<I2C::Error>> {
        if enabled {
            self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0).await?;
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, INT_ALARM1_ENABLE)
                .await?;
        } else {
            self.update_bits(RegAddr::IntAEnable, INT_ALARM1_ENABLE, 0)
                .await?;
        }
        Ok(())
    }

    /// Services a level or edge on the interrupt line.
    ///
    /// Reads the status flags; if alarm 1 has fired, acknowledges it with
    /// a fresh read-modify-write and returns [`IrqStatus::Handled`].
    /// Returns [`IrqStatus::NotMine`] without writing anything otherwise.
    pub async fn handle_interrupt(&mut self) -> Result<IrqStatus, PCF85363Error<I2C::Error>> {
        let flags = self.flags().await?;
        if !flags.alarm1_fired() {
            return Ok(IrqStatus::NotMine);
        }
        self.update_bits(RegAddr::Flags, FLAG_ALARM1_FIRED, 0).await?;
        Ok(IrqStatus::Handled)
    }

    /// Reads from the variant's NVRAM region.
    ///
    /// # Errors
    /// Returns `PCF85363Error::InvalidOffset` without touching the bus if
    /// `offset + data.len()` exceeds the region.
    pub async fn nvram_read(
        &mut self,
        offset: u8,
        data: &mut [u8],
    ) -> Result<(), PCF85363Error<I2C::Error>> {
        if usize::from(offset) + data.len() > self.variant.nvram_size() {
            return Err(PCF85363Error::InvalidOffset);
        }
        self.i2c
            .write_read(self.address, &[self.variant.nvram_base() + offset], data)
            .await?;
        Ok(())
    }

    /// Writes to the variant's NVRAM region.
    ///
    /// # Errors
    /// Returns `PCF85363Error::InvalidOffset` without touching the bus if
    /// `offset + data.len()` exceeds the region.
    pub async fn nvram_write(
        &mut self,
        offset: u8,
        data: &[u8],
    ) -> Result<(), PCF85363Error<I2C::Error>> {
        if usize::from(offset) + data.len() > self.variant.nvram_size() {
            return Err(PCF85363Error::InvalidOffset);
        }
        let mut buf = [0u8; 65];
        buf[0] = self.variant.nvram_base() + offset;
        buf[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buf[..=data.len()]).await?;
        Ok(())
    }

    /// Checks whether the oscillator has stopped since the time was last
    /// set, meaning the kept time is not trustworthy.
    pub async fn oscillator_stopped(&mut self) -> Result<bool, PCF85363Error<I2C::Error>> {
        Ok(self.second().await?.oscillator_stop())
    }

    /// Read-modify-write limited to the masked bits of one register.
    async fn update_bits(&mut self, reg: RegAddr, mask: u8, value: u8) -> Result<(), I2C::Error> {
        let mut data = [0];
        self.i2c
            .write_read(self.address, &[reg as u8], &mut data)
            .await?;
        let updated = (data[0] & !mask) | (value & mask);
        self.i2c.write(self.address, &[reg as u8, updated]).await?;
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
                    pub async fn $name(&mut self) -> Result<$typ, PCF85363Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok($typ(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Arguments"]
                    #[doc = concat!("* `value` - The value to write to the ", stringify!($name), " register")]
                    #[doc = "\n\n# Returns"]
                    #[doc = "* `Ok(())` on success"]
                    #[doc = "* `Err(PCF85363Error)` on error"]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), PCF85363Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
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

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::IntAPinFunction;
    use crate::InterruptMode;
    use alloc::vec;
    use chrono::{Datelike, NaiveDate, Timelike};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const DEVICE_ADDRESS: u8 = 0x51;

    async fn setup_mock(expectations: &[I2cTrans]) -> I2cMock {
        I2cMock::new(expectations)
    }

    #[tokio::test]
    async fn test_async_configure() {
        let config = Config {
            inta_function: IntAPinFunction::InterruptOutput,
            interrupt_mode: InterruptMode::Level,
        };

        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::PinIo as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::PinIo as u8, 0x02]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Oscillator as u8], vec![0x20]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Oscillator as u8, 0x00]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8], vec![0x10]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8, 0x90]),
        ])
        .await;

        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);
        dev.configure(&config).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_read_datetime() {
        // 2024-03-14 15:30:00
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Hundredths as u8],
            vec![0x00, 0x00, 0x30, 0x15, 0x14, 0x04, 0x03, 0x24],
        )])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        let dt = dev.datetime().await.unwrap();
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.day(), 14);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.year(), 2024);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_datetime_integrity() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Hundredths as u8],
            vec![0x00, 0xB0, 0x45, 0x23, 0x14, 0x04, 0x03, 0x24],
        )])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        let (dt, integrity) = dev.datetime_with_integrity().await.unwrap();
        assert_eq!(dt.second(), 30);
        assert_eq!(integrity, ClockIntegrity::Compromised);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_set_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();

        let mock = setup_mock(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::StopEnable as u8, 0x01, RESET_CLEAR_PRESCALER],
            ),
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![
                    RegAddr::Hundredths as u8,
                    0x00,
                    0x00,
                    0x30,
                    0x15,
                    0x14,
                    0x04,
                    0x03,
                    0x24,
                ],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::StopEnable as u8, 0x00]),
        ])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        dev.set_datetime(&dt).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_set_alarm() {
        let config = Alarm1Config {
            minutes: Some(30),
            enabled: true,
            ..Default::default()
        };

        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::AlarmEnables as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::AlarmEnables as u8, 0x00]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8], vec![0x10]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8, 0x00]),
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Alarm1Seconds as u8, 0x00, 0x30, 0x00, 0x00, 0x00],
            ),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Flags as u8], vec![0x20]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Flags as u8, 0x00]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::AlarmEnables as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::AlarmEnables as u8, 0x02]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::IntAEnable as u8, 0x10]),
        ])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        dev.set_alarm(&config).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_handle_interrupt() {
        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Flags as u8], vec![0x60]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Flags as u8], vec![0x60]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Flags as u8, 0x40]),
        ])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        assert_eq!(dev.handle_interrupt().await.unwrap(), IrqStatus::Handled);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_handle_interrupt_not_mine() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Flags as u8],
            vec![0x00],
        )])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        assert_eq!(dev.handle_interrupt().await.unwrap(), IrqStatus::NotMine);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_nvram_access() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Nvram as u8 + 8, 0x11, 0x22]),
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::Nvram as u8 + 8],
                vec![0x11, 0x22],
            ),
        ])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        dev.nvram_write(8, &[0x11, 0x22]).await.unwrap();
        let mut buf = [0u8; 2];
        dev.nvram_read(8, &mut buf).await.unwrap();
        assert_eq!(buf, [0x11, 0x22]);

        let mut big = [0u8; 8];
        assert!(matches!(
            dev.nvram_read(60, &mut big).await,
            Err(PCF85363Error::InvalidOffset)
        ));
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_register_operations() {
        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x45]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x30]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Flags as u8], vec![0x20]),
        ])
        .await;
        let mut dev = PCF85363::new(mock, DEVICE_ADDRESS, Variant::Pcf85363);

        let seconds = dev.second().await.unwrap();
        assert_eq!(seconds.ten_seconds(), 4);
        assert_eq!(seconds.seconds(), 5);
        dev.set_second(Seconds(0x30)).await.unwrap();

        let flags = dev.flags().await.unwrap();
        assert!(flags.alarm1_fired());
        dev.i2c.done();
    }
}
