//! Alarm configuration utilities for the PCF85363 RTC.
//!
//! This module provides type-safe configuration for the PCF85363's alarm 1
//! registers. Unlike RTCs that store a mask bit inside each alarm register,
//! the PCF85363 keeps all match enables in a separate alarm-enable register,
//! so each of the five match fields (second, minute, hour, day of month,
//! month) can be enabled independently.
//!
//! # Features
//!
//! - Per-field optional matching: a `Some` field participates in the match,
//!   a `None` field is ignored by the chip
//! - Derivation of the alarm-enable mask from the configured fields
//! - Validated BCD encoding of all match values
//!
//! # Error Handling
//!
//! Configuration errors are reported via [`AlarmError`].

use crate::{
    datetime::{PCF85363DateTime, PCF85363DateTimeError},
    AlarmDays, AlarmEnables, AlarmHours, AlarmMinutes, AlarmMonths, AlarmSeconds,
};

/// Error type for alarm configuration operations.
#[derive(Debug)]
pub enum AlarmError {
    /// Invalid time component value
    InvalidTime(&'static str),
    /// Invalid day of month (must be 1-31)
    InvalidDayOfMonth,
    /// Invalid month (must be 1-12)
    InvalidMonth,
    /// `DateTime` conversion error
    DateTime(PCF85363DateTimeError),
}

impl From<PCF85363DateTimeError> for AlarmError {
    fn from(e: PCF85363DateTimeError) -> Self {
        AlarmError::DateTime(e)
    }
}

/// Alarm 1 configuration.
///
/// Each field is an independent match condition: the alarm fires when every
/// `Some` field matches the running clock simultaneously. `None` fields do
/// not participate. An all-`None` configuration never fires.
///
/// `enabled` controls whether a match raises the INTA interrupt; the match
/// flag is set in the status register either way.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm1Config {
    /// Seconds match value (0-59)
    pub seconds: Option<u8>,
    /// Minutes match value (0-59)
    pub minutes: Option<u8>,
    /// Hours match value (0-23)
    pub hours: Option<u8>,
    /// Day of month match value (1-31)
    pub day: Option<u8>,
    /// Month match value (1-12)
    pub month: Option<u8>,
    /// Raise the INTA interrupt when the alarm fires
    pub enabled: bool,
}

impl Alarm1Config {
    /// Validates the alarm configuration and returns any errors.
    ///
    /// # Errors
    ///
    /// Returns an error if any match value is out of valid range.
    pub fn validate(&self) -> Result<(), AlarmError> {
        if let Some(seconds) = self.seconds {
            if seconds > 59 {
                return Err(AlarmError::InvalidTime("seconds must be 0-59"));
            }
        }
        if let Some(minutes) = self.minutes {
            if minutes > 59 {
                return Err(AlarmError::InvalidTime("minutes must be 0-59"));
            }
        }
        if let Some(hours) = self.hours {
            if hours > 23 {
                return Err(AlarmError::InvalidTime("hours must be 0-23"));
            }
        }
        if let Some(day) = self.day {
            if day == 0 || day > 31 {
                return Err(AlarmError::InvalidDayOfMonth);
            }
        }
        if let Some(month) = self.month {
            if month == 0 || month > 12 {
                return Err(AlarmError::InvalidMonth);
            }
        }
        Ok(())
    }

    /// Derives the alarm 1 match-enable bits from the configured fields.
    ///
    /// Alarm 2 bits are left clear; the caller is expected to preserve them
    /// with a masked register update.
    pub(crate) fn match_enables(&self) -> AlarmEnables {
        let mut enables = AlarmEnables::default();
        enables.set_second_a1(self.seconds.is_some());
        enables.set_minute_a1(self.minutes.is_some());
        enables.set_hour_a1(self.hours.is_some());
        enables.set_day_a1(self.day.is_some());
        enables.set_month_a1(self.month.is_some());
        enables
    }
}

/// Internal representation of PCF85363 Alarm 1 registers.
///
/// This struct models the 5 alarm 1 registers of the PCF85363, using strongly-typed bitfield wrappers for each field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PCF85363Alarm1 {
    seconds: AlarmSeconds,
    minutes: AlarmMinutes,
    hours: AlarmHours,
    days: AlarmDays,
    months: AlarmMonths,
}

impl PCF85363Alarm1 {
    /// Creates an Alarm 1 register configuration from an [`Alarm1Config`].
    ///
    /// Unset fields encode as zero; the chip ignores registers whose
    /// match-enable bit is clear.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration contains out-of-range values.
    pub fn from_config(config: &Alarm1Config) -> Result<Self, AlarmError> {
        config.validate()?;

        let mut alarm = Self {
            seconds: AlarmSeconds::default(),
            minutes: AlarmMinutes::default(),
            hours: AlarmHours::default(),
            days: AlarmDays::default(),
            months: AlarmMonths::default(),
        };

        if let Some(sec) = config.seconds {
            let (ones, tens) = PCF85363DateTime::make_bcd(u32::from(sec), 59)?;
            alarm.seconds.set_seconds(ones);
            alarm.seconds.set_ten_seconds(tens);
        }
        if let Some(min) = config.minutes {
            let (ones, tens) = PCF85363DateTime::make_bcd(u32::from(min), 59)?;
            alarm.minutes.set_minutes(ones);
            alarm.minutes.set_ten_minutes(tens);
        }
        if let Some(hr) = config.hours {
            let (ones, tens) = PCF85363DateTime::make_bcd(u32::from(hr), 23)?;
            alarm.hours.set_hours(ones);
            alarm.hours.set_ten_hours(tens);
        }
        if let Some(day) = config.day {
            let (ones, tens) = PCF85363DateTime::make_bcd(u32::from(day), 31)?;
            alarm.days.set_days(ones);
            alarm.days.set_ten_days(tens);
        }
        if let Some(month) = config.month {
            let (ones, tens) = PCF85363DateTime::make_bcd(u32::from(month), 12)?;
            alarm.months.set_months(ones);
            alarm.months.set_ten_months(tens);
        }

        Ok(alarm)
    }

    /// Converts the register values back to an [`Alarm1Config`].
    ///
    /// The per-field enables come from the separate alarm-enable register,
    /// so the caller supplies its current value; only enabled fields are
    /// decoded, matching what the chip actually compares.
    ///
    /// # Errors
    ///
    /// Returns an error if an enabled register holds an invalid BCD value.
    pub fn to_config(
        &self,
        enables: AlarmEnables,
        enabled: bool,
    ) -> Result<Alarm1Config, AlarmError> {
        let seconds = if enables.second_a1() {
            Some(self.decode_bcd_seconds()?)
        } else {
            None
        };
        let minutes = if enables.minute_a1() {
            Some(self.decode_bcd_minutes()?)
        } else {
            None
        };
        let hours = if enables.hour_a1() {
            Some(self.decode_bcd_hours()?)
        } else {
            None
        };
        let day = if enables.day_a1() {
            Some(self.decode_bcd_day()?)
        } else {
            None
        };
        let month = if enables.month_a1() {
            Some(self.decode_bcd_month()?)
        } else {
            None
        };

        Ok(Alarm1Config {
            seconds,
            minutes,
            hours,
            day,
            month,
            enabled,
        })
    }

    fn decode_bcd_seconds(self) -> Result<u8, AlarmError> {
        let ones = self.seconds.seconds();
        let tens = self.seconds.ten_seconds();
        if ones > 9 || tens > 5 {
            return Err(AlarmError::InvalidTime("Invalid BCD seconds value"));
        }
        Ok(tens * 10 + ones)
    }

    fn decode_bcd_minutes(self) -> Result<u8, AlarmError> {
        let ones = self.minutes.minutes();
        let tens = self.minutes.ten_minutes();
        if ones > 9 || tens > 5 {
            return Err(AlarmError::InvalidTime("Invalid BCD minutes value"));
        }
        Ok(tens * 10 + ones)
    }

    fn decode_bcd_hours(self) -> Result<u8, AlarmError> {
        let ones = self.hours.hours();
        let tens = self.hours.ten_hours();
        if ones > 9 || tens > 2 {
            return Err(AlarmError::InvalidTime("Invalid BCD hours value"));
        }
        let hours = tens * 10 + ones;
        if hours > 23 {
            return Err(AlarmError::InvalidTime("Invalid 24-hour value"));
        }
        Ok(hours)
    }

    fn decode_bcd_day(self) -> Result<u8, AlarmError> {
        let ones = self.days.days();
        let tens = self.days.ten_days();
        if ones > 9 || tens > 3 {
            return Err(AlarmError::InvalidTime("Invalid BCD day value"));
        }
        let day = tens * 10 + ones;
        if day == 0 || day > 31 {
            return Err(AlarmError::InvalidTime("Invalid day value"));
        }
        Ok(day)
    }

    fn decode_bcd_month(self) -> Result<u8, AlarmError> {
        let ones = self.months.months();
        let tens = self.months.ten_months();
        if ones > 9 || tens > 1 {
            return Err(AlarmError::InvalidTime("Invalid BCD month value"));
        }
        let month = tens * 10 + ones;
        if month == 0 || month > 12 {
            return Err(AlarmError::InvalidTime("Invalid month value"));
        }
        Ok(month)
    }
}

impl From<[u8; 5]> for PCF85363Alarm1 {
    fn from(data: [u8; 5]) -> Self {
        PCF85363Alarm1 {
            seconds: AlarmSeconds(data[0]),
            minutes: AlarmMinutes(data[1]),
            hours: AlarmHours(data[2]),
            days: AlarmDays(data[3]),
            months: AlarmMonths(data[4]),
        }
    }
}

impl From<&PCF85363Alarm1> for [u8; 5] {
    fn from(alarm: &PCF85363Alarm1) -> [u8; 5] {
        [
            alarm.seconds.0,
            alarm.minutes.0,
            alarm.hours.0,
            alarm.days.0,
            alarm.months.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALARM1_MATCH_MASK;

    #[test]
    fn test_validate_accepts_valid_config() {
        let config = Alarm1Config {
            seconds: Some(30),
            minutes: Some(45),
            hours: Some(7),
            day: Some(14),
            month: Some(3),
            enabled: true,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_empty_config() {
        let config = Alarm1Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let config = Alarm1Config {
            seconds: Some(60),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlarmError::InvalidTime("seconds must be 0-59"))
        ));

        let config = Alarm1Config {
            minutes: Some(60),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlarmError::InvalidTime("minutes must be 0-59"))
        ));

        let config = Alarm1Config {
            hours: Some(24),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlarmError::InvalidTime("hours must be 0-23"))
        ));

        let config = Alarm1Config {
            day: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlarmError::InvalidDayOfMonth)
        ));

        let config = Alarm1Config {
            day: Some(32),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlarmError::InvalidDayOfMonth)
        ));

        let config = Alarm1Config {
            month: Some(13),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AlarmError::InvalidMonth)));
    }

    #[test]
    fn test_match_enables_follow_configured_fields() {
        let config = Alarm1Config {
            seconds: Some(0),
            minutes: Some(30),
            hours: None,
            day: None,
            month: None,
            enabled: true,
        };
        let enables = config.match_enables();
        assert!(enables.second_a1());
        assert!(enables.minute_a1());
        assert!(!enables.hour_a1());
        assert!(!enables.day_a1());
        assert!(!enables.month_a1());
        assert_eq!(u8::from(enables), 0b0000_0011);

        let config = Alarm1Config {
            seconds: Some(0),
            minutes: Some(0),
            hours: Some(0),
            day: Some(1),
            month: Some(1),
            enabled: false,
        };
        assert_eq!(u8::from(config.match_enables()), ALARM1_MATCH_MASK);

        assert_eq!(u8::from(Alarm1Config::default().match_enables()), 0x00);
    }

    #[test]
    fn test_from_config_encodes_bcd() {
        let config = Alarm1Config {
            seconds: Some(45),
            minutes: Some(59),
            hours: Some(23),
            day: Some(31),
            month: Some(12),
            enabled: true,
        };
        let alarm = PCF85363Alarm1::from_config(&config).unwrap();
        let bytes: [u8; 5] = (&alarm).into();
        assert_eq!(bytes, [0x45, 0x59, 0x23, 0x31, 0x12]);
    }

    #[test]
    fn test_from_config_unset_fields_encode_as_zero() {
        let config = Alarm1Config {
            seconds: None,
            minutes: Some(7),
            hours: None,
            day: None,
            month: None,
            enabled: false,
        };
        let alarm = PCF85363Alarm1::from_config(&config).unwrap();
        let bytes: [u8; 5] = (&alarm).into();
        assert_eq!(bytes, [0x00, 0x07, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_from_config_rejects_invalid_values() {
        let config = Alarm1Config {
            hours: Some(24),
            ..Default::default()
        };
        assert!(PCF85363Alarm1::from_config(&config).is_err());
    }

    #[test]
    fn test_to_config_roundtrip() {
        let config = Alarm1Config {
            seconds: Some(15),
            minutes: Some(30),
            hours: Some(6),
            day: None,
            month: None,
            enabled: true,
        };
        let alarm = PCF85363Alarm1::from_config(&config).unwrap();
        let decoded = alarm.to_config(config.match_enables(), true).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_to_config_ignores_disabled_fields() {
        // All registers hold values but only the minute enable is set; the
        // decoded config must expose only the minute match.
        let alarm = PCF85363Alarm1::from([0x45, 0x30, 0x12, 0x14, 0x06]);
        let mut enables = AlarmEnables::default();
        enables.set_minute_a1(true);
        let config = alarm.to_config(enables, false).unwrap();
        assert_eq!(config.seconds, None);
        assert_eq!(config.minutes, Some(30));
        assert_eq!(config.hours, None);
        assert_eq!(config.day, None);
        assert_eq!(config.month, None);
        assert!(!config.enabled);
    }

    #[test]
    fn test_to_config_rejects_invalid_bcd() {
        // 0x5A seconds is not valid BCD
        let alarm = PCF85363Alarm1::from([0x5A, 0x00, 0x00, 0x01, 0x01]);
        let enables = AlarmEnables::from(ALARM1_MATCH_MASK);
        assert!(alarm.to_config(enables, true).is_err());
    }

    #[test]
    fn test_to_config_full_mask_roundtrip() {
        let config = Alarm1Config {
            seconds: Some(0),
            minutes: Some(0),
            hours: Some(12),
            day: Some(25),
            month: Some(12),
            enabled: true,
        };
        let alarm = PCF85363Alarm1::from_config(&config).unwrap();
        let bytes: [u8; 5] = (&alarm).into();
        let alarm2 = PCF85363Alarm1::from(bytes);
        let decoded = alarm2
            .to_config(AlarmEnables::from(ALARM1_MATCH_MASK), true)
            .unwrap();
        assert_eq!(decoded, config);
    }
}
