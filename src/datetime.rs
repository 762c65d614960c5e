//! `DateTime` conversion and register utilities for the PCF85363 RTC.
//!
//! This module provides the internal representation and conversion logic for the PCF85363's date and time registers.
//! It enables safe, validated conversion between the PCF85363's BCD-encoded registers and chrono's `NaiveDateTime`.
//!
//! # Features
//!
//! - Conversion to/from chrono `NaiveDateTime`
//! - Error handling for invalid or out-of-range values
//!
//! # Register Model
//!
//! The PCF85363 stores date and time in 8 consecutive registers:
//! - Hundredths, Seconds, Minutes, Hours, Days, Weekdays, Months, Years
//!
//! The seconds register carries the oscillator-stop flag (OS) in bit 7 and
//! the minutes register carries the event monitor flag (EMON) in bit 7.
//! Both are masked off before the BCD value is decoded.
//!
//! # Error Handling
//!
//! Conversion errors are reported via [`PCF85363DateTimeError`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{Days, Hours, Hundredths, Minutes, Months, Seconds, Weekdays, Years};

/// First year representable by the two-digit BCD year register.
///
/// The chip has no century bit; the stored year is an offset from this
/// epoch, giving a valid range of 2000-01-01 through 2099-12-31.
pub const EPOCH_YEAR: i32 = 2000;

/// Internal representation of the PCF85363 RTC date and time.
///
/// This struct models the 8 date/time registers of the PCF85363, using strongly-typed bitfield wrappers for each field.
/// It is used for register-level I/O and conversion to/from chrono's `NaiveDateTime`.
///
/// Values are always validated and encoded/decoded as BCD, except the
/// weekday register which is plain binary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct PCF85363DateTime {
    hundredths: Hundredths,
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    days: Days,
    weekdays: Weekdays,
    months: Months,
    years: Years,
}

impl PCF85363DateTime {
    /// Helper function to convert a number to BCD format with validation
    pub(crate) fn make_bcd(value: u32, max_value: u32) -> Result<(u8, u8), PCF85363DateTimeError> {
        if value > max_value {
            return Err(PCF85363DateTimeError::InvalidDateTime);
        }
        let ones = u8::try_from(value % 10).map_err(|_| PCF85363DateTimeError::InvalidDateTime)?;
        let tens = u8::try_from(value / 10).map_err(|_| PCF85363DateTimeError::InvalidDateTime)?;
        Ok((ones, tens))
    }

    fn convert_seconds(seconds: u32) -> Result<Seconds, PCF85363DateTimeError> {
        let (ones, tens) = Self::make_bcd(seconds, 59)?;
        let mut value = Seconds::default();
        value.set_seconds(ones);
        value.set_ten_seconds(tens);
        Ok(value)
    }

    fn convert_minutes(minutes: u32) -> Result<Minutes, PCF85363DateTimeError> {
        let (ones, tens) = Self::make_bcd(minutes, 59)?;
        let mut value = Minutes::default();
        value.set_minutes(ones);
        value.set_ten_minutes(tens);
        Ok(value)
    }

    fn convert_hours(hours: u32) -> Result<Hours, PCF85363DateTimeError> {
        if hours > 23 {
            return Err(PCF85363DateTimeError::InvalidDateTime);
        }
        let (ones, tens) = Self::make_bcd(hours, 23)?;
        let mut value = Hours::default();
        value.set_hours(ones);
        value.set_ten_hours(tens);
        Ok(value)
    }

    fn convert_days(days: u32) -> Result<Days, PCF85363DateTimeError> {
        let (ones, tens) = Self::make_bcd(days, 31)?;
        let mut value = Days::default();
        value.set_days(ones);
        value.set_ten_days(tens);
        Ok(value)
    }

    fn convert_weekday(weekday: u32) -> Result<Weekdays, PCF85363DateTimeError> {
        if weekday > 6 {
            return Err(PCF85363DateTimeError::InvalidDateTime);
        }
        let mut value = Weekdays::default();
        value.set_weekday(
            u8::try_from(weekday).map_err(|_| PCF85363DateTimeError::InvalidDateTime)?,
        );
        Ok(value)
    }

    fn convert_months(months: u32) -> Result<Months, PCF85363DateTimeError> {
        let (ones, tens) = Self::make_bcd(months, 12)?;
        let mut value = Months::default();
        value.set_months(ones);
        value.set_ten_months(tens);
        Ok(value)
    }

    fn convert_years(year: i32) -> Result<Years, PCF85363DateTimeError> {
        if year >= EPOCH_YEAR + 100 {
            error!("Year {} is too late! must be before 2100", year);
            return Err(PCF85363DateTimeError::YearNotBefore2100);
        }
        if year < EPOCH_YEAR {
            error!("Year {} is too early! must be greater than 1999", year);
            return Err(PCF85363DateTimeError::YearNotAfter1999);
        }

        let year_offset =
            u8::try_from(year - EPOCH_YEAR).map_err(|_| PCF85363DateTimeError::InvalidDateTime)?;
        let ones = year_offset % 10;
        let tens = year_offset / 10;

        let mut value = Years::default();
        value.set_years(ones);
        value.set_ten_years(tens);
        Ok(value)
    }

    pub(crate) fn from_datetime(
        datetime: &NaiveDateTime,
    ) -> Result<Self, PCF85363DateTimeError> {
        let seconds = Self::convert_seconds(datetime.second())?;
        let minutes = Self::convert_minutes(datetime.minute())?;
        let hours = Self::convert_hours(datetime.hour())?;
        let days = Self::convert_days(datetime.day())?;
        let weekdays = Self::convert_weekday(datetime.weekday().num_days_from_sunday())?;
        let months = Self::convert_months(datetime.month())?;
        let years = Self::convert_years(datetime.year())?;

        let raw = PCF85363DateTime {
            // Sub-second resolution is not carried; the counter restarts
            // from zero when the clock is reloaded.
            hundredths: Hundredths::default(),
            seconds,
            minutes,
            hours,
            days,
            weekdays,
            months,
            years,
        };

        Ok(raw)
    }

    pub(crate) fn into_datetime(self) -> Result<NaiveDateTime, PCF85363DateTimeError> {
        // OS and EMON live in the top bit of their registers and are not
        // part of the BCD value; the bitfield getters never see them.
        let seconds: u32 =
            10 * u32::from(self.seconds.ten_seconds()) + u32::from(self.seconds.seconds());
        let minutes =
            10 * u32::from(self.minutes.ten_minutes()) + u32::from(self.minutes.minutes());
        let hours = 10 * u32::from(self.hours.ten_hours()) + u32::from(self.hours.hours());
        debug!("h={} m={} s={}", hours, minutes, seconds);

        let year_offset = 10 * u32::from(self.years.ten_years()) + u32::from(self.years.years());
        let year = EPOCH_YEAR
            + i32::try_from(year_offset).map_err(|_| PCF85363DateTimeError::InvalidDateTime)?;
        let month = 10 * u32::from(self.months.ten_months()) + u32::from(self.months.months());
        let day = 10 * u32::from(self.days.ten_days()) + u32::from(self.days.days());

        // Validate the date components before creating NaiveDateTime
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hours, minutes, seconds))
            .ok_or(PCF85363DateTimeError::InvalidDateTime)
    }

    /// Returns true when the oscillator-stop flag was set in the seconds
    /// register, meaning the time read is not trustworthy.
    pub(crate) fn oscillator_stopped(&self) -> bool {
        self.seconds.oscillator_stop()
    }
}

impl From<[u8; 8]> for PCF85363DateTime {
    fn from(data: [u8; 8]) -> Self {
        PCF85363DateTime {
            hundredths: Hundredths(data[0]),
            seconds: Seconds(data[1]),
            minutes: Minutes(data[2]),
            hours: Hours(data[3]),
            days: Days(data[4]),
            weekdays: Weekdays(data[5]),
            months: Months(data[6]),
            years: Years(data[7]),
        }
    }
}

impl From<&PCF85363DateTime> for [u8; 8] {
    fn from(dt: &PCF85363DateTime) -> [u8; 8] {
        [
            dt.hundredths.0,
            dt.seconds.0,
            dt.minutes.0,
            dt.hours.0,
            dt.days.0,
            dt.weekdays.0,
            dt.months.0,
            dt.years.0,
        ]
    }
}

#[derive(Debug, PartialEq)]
/// Errors that can occur during PCF85363 date/time conversion or validation.
pub enum PCF85363DateTimeError {
    /// The provided or decoded date/time is invalid (e.g., out of range, not representable)
    InvalidDateTime,
    /// The year is not before 2100 (PCF85363 only supports years < 2100)
    YearNotBefore2100,
    /// The year is not after 1999 (PCF85363 only supports years >= 2000)
    YearNotAfter1999,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_make_bcd_valid() {
        // Test valid cases
        assert_eq!(PCF85363DateTime::make_bcd(0, 59).unwrap(), (0, 0));
        assert_eq!(PCF85363DateTime::make_bcd(9, 59).unwrap(), (9, 0));
        assert_eq!(PCF85363DateTime::make_bcd(10, 59).unwrap(), (0, 1));
        assert_eq!(PCF85363DateTime::make_bcd(45, 59).unwrap(), (5, 4));
        assert_eq!(PCF85363DateTime::make_bcd(59, 59).unwrap(), (9, 5));
    }

    #[test]
    fn test_make_bcd_invalid() {
        // Test values exceeding max_value
        assert!(matches!(
            PCF85363DateTime::make_bcd(60, 59),
            Err(PCF85363DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            PCF85363DateTime::make_bcd(99, 59),
            Err(PCF85363DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            PCF85363DateTime::make_bcd(32, 31),
            Err(PCF85363DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            PCF85363DateTime::make_bcd(13, 12),
            Err(PCF85363DateTimeError::InvalidDateTime)
        ));
    }

    #[test]
    fn test_from_datetime_and_into_datetime_roundtrip() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let raw = PCF85363DateTime::from_datetime(&dt).unwrap();
        let dt2 = raw.into_datetime().unwrap();
        core::assert_eq!(dt, dt2);
    }

    #[test]
    fn test_from_datetime_writes_weekday_raw() {
        // 2024-03-14 is a Thursday (4 days from Sunday); the weekday
        // register is plain binary, not BCD.
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let raw = PCF85363DateTime::from_datetime(&dt).unwrap();
        let arr: [u8; 8] = (&raw).into();
        assert_eq!(arr[5], 4);
    }

    #[test]
    fn test_from_datetime_hundredths_are_zero() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 45)
            .unwrap();
        let raw = PCF85363DateTime::from_datetime(&dt).unwrap();
        let arr: [u8; 8] = (&raw).into();
        assert_eq!(arr[0], 0x00);
    }

    #[test]
    fn test_from_datetime_year_too_early() {
        let dt = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let err = PCF85363DateTime::from_datetime(&dt).unwrap_err();
        assert!(matches!(err, PCF85363DateTimeError::YearNotAfter1999));
    }

    #[test]
    fn test_from_datetime_year_too_late() {
        let dt = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = PCF85363DateTime::from_datetime(&dt).unwrap_err();
        assert!(matches!(err, PCF85363DateTimeError::YearNotBefore2100));
    }

    #[test]
    fn test_from_and_into_bcd_array() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let raw = PCF85363DateTime::from_datetime(&dt).unwrap();
        let arr: [u8; 8] = (&raw).into();
        let raw2 = PCF85363DateTime::from(arr);
        let dt2 = raw2.into_datetime().unwrap();
        core::assert_eq!(dt, dt2);
    }

    #[test]
    fn test_invalid_bcd_to_datetime() {
        // Invalid BCD value for month (0x13 = 19 in decimal)
        let arr = [0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x13, 0x24];
        let raw = PCF85363DateTime::from(arr);
        let result = raw.into_datetime();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            PCF85363DateTimeError::InvalidDateTime
        ));
    }

    #[test]
    fn test_oscillator_stop_flag_does_not_corrupt_decode() {
        // 0xB0 = OS flag plus 30 seconds; the decode must succeed and the
        // flag must be reported separately.
        let arr = [0x00, 0xB0, 0x45, 0x23, 0x14, 0x04, 0x03, 0x24];
        let raw = PCF85363DateTime::from(arr);
        assert!(raw.oscillator_stopped());
        let dt = raw.into_datetime().unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(23, 45, 30)
            .unwrap();
        core::assert_eq!(dt, expected);
    }

    #[test]
    fn test_event_monitor_flag_is_masked() {
        // 0xD7 = EMON flag plus 57 minutes
        let arr = [0x00, 0x00, 0xD7, 0x00, 0x01, 0x01, 0x01, 0x24];
        let raw = PCF85363DateTime::from(arr);
        assert!(!raw.oscillator_stopped());
        let dt = raw.into_datetime().unwrap();
        assert_eq!(dt.minute(), 57);
    }

    #[test]
    fn test_weekday_register_ignored_on_decode() {
        // Whatever the chip reports for the weekday, the decoded date is
        // derived from day/month/year alone.
        let arr = [0x00, 0x00, 0x00, 0x00, 0x14, 0x07, 0x03, 0x24];
        let raw = PCF85363DateTime::from(arr);
        let dt = raw.into_datetime().unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        core::assert_eq!(dt, expected);
    }

    #[test]
    fn test_valid_edge_cases() {
        // Test maximum valid values
        let dt = NaiveDate::from_ymd_opt(2099, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let result = PCF85363DateTime::from_datetime(&dt);
        assert!(result.is_ok());

        // Test minimum valid values
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = PCF85363DateTime::from_datetime(&dt);
        assert!(result.is_ok());
    }

    #[test]
    fn test_roundtrip_across_the_valid_range() {
        let cases = [
            (2000, 1, 1, 0, 0, 0),
            (2012, 2, 29, 12, 0, 0),
            (2038, 1, 19, 3, 14, 7),
            (2063, 7, 4, 6, 45, 13),
            (2099, 12, 31, 23, 59, 59),
        ];
        for &(y, mo, d, h, mi, s) in &cases {
            let dt = NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap();
            let raw = PCF85363DateTime::from_datetime(&dt).unwrap();
            let dt2 = raw.into_datetime().unwrap();
            core::assert_eq!(dt, dt2);
        }
    }
}
