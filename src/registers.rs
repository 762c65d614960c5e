//! Register definitions and bitfield structures for the PCF85363 RTC.
//!
//! This module contains all register addresses, bitfield definitions, and
//! related types for interacting with the PCF85363A/PCF85263A Real-Time
//! Clock registers.

use bitfield::bitfield;

/// Register addresses for the PCF85363 RTC.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// 100ths of a second register (0-99)
    Hundredths = 0x00,
    /// Seconds register (0-59) with the oscillator-stop flag in bit 7
    Seconds = 0x01,
    /// Minutes register (0-59) with the event monitor flag in bit 7
    Minutes = 0x02,
    /// Hours register (0-23)
    Hours = 0x03,
    /// Day of month register (1-31)
    Days = 0x04,
    /// Day of week register (0-6)
    Weekdays = 0x05,
    /// Month register (1-12)
    Months = 0x06,
    /// Year register (0-99)
    Years = 0x07,
    /// Alarm 1 seconds register
    Alarm1Seconds = 0x08,
    /// Alarm 1 minutes register
    Alarm1Minutes = 0x09,
    /// Alarm 1 hours register
    Alarm1Hours = 0x0A,
    /// Alarm 1 day of month register
    Alarm1Days = 0x0B,
    /// Alarm 1 month register
    Alarm1Months = 0x0C,
    /// Alarm 2 minutes register
    Alarm2Minutes = 0x0D,
    /// Alarm 2 hours register
    Alarm2Hours = 0x0E,
    /// Alarm 2 day of week register
    Alarm2Weekdays = 0x0F,
    /// Alarm enable register (per-field match enables for both alarms)
    AlarmEnables = 0x10,
    /// First timestamp capture block (6 bytes)
    Timestamp1 = 0x11,
    /// Second timestamp capture block (6 bytes)
    Timestamp2 = 0x17,
    /// Third timestamp capture block (6 bytes)
    Timestamp3 = 0x1D,
    /// Timestamp mode control register
    TimestampMode = 0x23,
    /// Oscillator offset calibration register
    Offset = 0x24,
    /// Oscillator control register
    Oscillator = 0x25,
    /// Battery switch control register
    BatterySwitch = 0x26,
    /// Pin I/O control register
    PinIo = 0x27,
    /// Function control register
    Function = 0x28,
    /// INTA interrupt enable register
    IntAEnable = 0x29,
    /// INTB interrupt enable register
    IntBEnable = 0x2A,
    /// Status flags register
    Flags = 0x2B,
    /// Single RAM byte (the PCF85263's only NVRAM)
    RamByte = 0x2C,
    /// Watchdog control register
    Watchdog = 0x2D,
    /// Stop enable register
    StopEnable = 0x2E,
    /// Software reset register
    Resets = 0x2F,
    /// Start of the 64-byte NVRAM region (PCF85363 only)
    Nvram = 0x40,
}

/// Resets register command that clears the clock prescaler.
///
/// Writing this value while the clock is stopped discards any partially
/// elapsed second so the next tick starts from a clean boundary.
pub const RESET_CLEAR_PRESCALER: u8 = 0xA4;

/// All five alarm 1 match-enable bits in the alarm enable register.
pub const ALARM1_MATCH_MASK: u8 = 0x1F;

/// Alarm 1 interrupt enable bit in the INTA/INTB enable registers.
pub const INT_ALARM1_ENABLE: u8 = 0x10;

/// Alarm 1 fired bit in the status flags register.
pub const FLAG_ALARM1_FIRED: u8 = 0x20;

/// INTA pin function selection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntAPinFunction {
    /// Output the clock signal on INTA
    ClockOutput = 0b00,
    /// Output the battery mode indicator on INTA
    BatteryIndicator = 0b01,
    /// Output the interrupt signal on INTA
    InterruptOutput = 0b10,
    /// INTA is high impedance
    HighImpedance = 0b11,
}
impl From<u8> for IntAPinFunction {
    /// Creates an `IntAPinFunction` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0b00, 0b01, 0b10, or 0b11.
    fn from(v: u8) -> Self {
        match v {
            0b00 => IntAPinFunction::ClockOutput,
            0b01 => IntAPinFunction::BatteryIndicator,
            0b10 => IntAPinFunction::InterruptOutput,
            0b11 => IntAPinFunction::HighImpedance,
            _ => panic!("Invalid value for IntAPinFunction: {}", v),
        }
    }
}
impl From<IntAPinFunction> for u8 {
    /// Converts an `IntAPinFunction` to its raw register value.
    fn from(v: IntAPinFunction) -> Self {
        v as u8
    }
}

/// Interrupt output mode (ILP bit).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// Interrupt generates a pulse
    Pulse = 0,
    /// Interrupt follows the flag level
    Level = 1,
}
impl From<u8> for InterruptMode {
    /// Creates an `InterruptMode` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => InterruptMode::Pulse,
            1 => InterruptMode::Level,
            _ => panic!("Invalid value for InterruptMode: {}", v),
        }
    }
}
impl From<InterruptMode> for u8 {
    /// Converts an `InterruptMode` to its raw register value.
    fn from(v: InterruptMode) -> Self {
        v as u8
    }
}

/// Hour format selection (12_24 bit in the oscillator register).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourMode {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}
impl From<u8> for HourMode {
    /// Creates an `HourMode` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => HourMode::TwentyFourHour,
            1 => HourMode::TwelveHour,
            _ => panic!("Invalid value for HourMode: {}", v),
        }
    }
}
impl From<HourMode> for u8 {
    /// Converts an `HourMode` to its raw register value.
    fn from(v: HourMode) -> Self {
        v as u8
    }
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// 100ths of a second register (0-99) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hundredths(u8);
    impl Debug;
    /// Tens place of hundredths (0-9)
    pub ten_hundredths, set_ten_hundredths: 7, 4;
    /// Ones place of hundredths (0-9)
    pub hundredths, set_hundredths: 3, 0;
}
from_register_u8!(Hundredths);

#[cfg(feature = "defmt")]
impl defmt::Format for Hundredths {
    fn format(&self, f: defmt::Formatter) {
        let hundredths = 10 * self.ten_hundredths() + self.hundredths();
        defmt::write!(f, "Hundredths({})", hundredths);
    }
}

bitfield! {
    /// Seconds register (0-59) with BCD encoding and the oscillator-stop flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Oscillator stop flag (OS); set when the oscillator has halted
    pub oscillator_stop, set_oscillator_stop: 7;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(Seconds);

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        let seconds = 10 * self.ten_seconds() + self.seconds();
        defmt::write!(f, "Seconds({}s", seconds);
        if self.oscillator_stop() {
            defmt::write!(f, ", OS");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Minutes register (0-59) with BCD encoding and the event monitor flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Event monitor flag (EMON)
    pub event_monitor, set_event_monitor: 7;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(Minutes);

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        let minutes = 10 * self.ten_minutes() + self.minutes();
        defmt::write!(f, "Minutes({}m)", minutes);
    }
}

bitfield! {
    /// Hours register (0-23) with BCD encoding, 24-hour format.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// Tens place of hours (0-2)
    pub ten_hours, set_ten_hours: 5, 4;
    /// Ones place of hours (0-9)
    pub hours, set_hours: 3, 0;
}
from_register_u8!(Hours);

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        let hours = 10 * self.ten_hours() + self.hours();
        defmt::write!(f, "Hours({}h)", hours);
    }
}

bitfield! {
    /// Day of month register (1-31) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Days(u8);
    impl Debug;
    /// Tens place of the day (0-3)
    pub ten_days, set_ten_days: 5, 4;
    /// Ones place of the day (0-9)
    pub days, set_days: 3, 0;
}
from_register_u8!(Days);

#[cfg(feature = "defmt")]
impl defmt::Format for Days {
    fn format(&self, f: defmt::Formatter) {
        let days = 10 * self.ten_days() + self.days();
        defmt::write!(f, "Days({})", days);
    }
}

bitfield! {
    /// Day of week register (0-6), plain binary, not BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Weekdays(u8);
    impl Debug;
    /// Day of week (0-6, 0=Sunday)
    pub weekday, set_weekday: 2, 0;
}
from_register_u8!(Weekdays);

#[cfg(feature = "defmt")]
impl defmt::Format for Weekdays {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Weekdays({})", self.weekday());
    }
}

bitfield! {
    /// Month register (1-12) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Months(u8);
    impl Debug;
    /// Tens place of the month (0-1)
    pub ten_months, set_ten_months: 4, 4;
    /// Ones place of the month (0-9)
    pub months, set_months: 3, 0;
}
from_register_u8!(Months);

#[cfg(feature = "defmt")]
impl defmt::Format for Months {
    fn format(&self, f: defmt::Formatter) {
        let months = 10 * self.ten_months() + self.months();
        defmt::write!(f, "Months({})", months);
    }
}

bitfield! {
    /// Year register (0-99) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Years(u8);
    impl Debug;
    /// Tens place of the year (0-9)
    pub ten_years, set_ten_years: 7, 4;
    /// Ones place of the year (0-9)
    pub years, set_years: 3, 0;
}
from_register_u8!(Years);

#[cfg(feature = "defmt")]
impl defmt::Format for Years {
    fn format(&self, f: defmt::Formatter) {
        let years = 10 * self.ten_years() + self.years();
        defmt::write!(f, "Years({})", years);
    }
}

// Alarm 1 register types. The match-enable bits live in the separate
// AlarmEnables register, so these carry only the BCD value.

bitfield! {
    /// Alarm 1 seconds register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmSeconds(u8);
    impl Debug;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(AlarmSeconds);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmSeconds {
    fn format(&self, f: defmt::Formatter) {
        let seconds = 10 * self.ten_seconds() + self.seconds();
        defmt::write!(f, "AlarmSeconds({}s)", seconds);
    }
}

bitfield! {
    /// Alarm 1 minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmMinutes(u8);
    impl Debug;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(AlarmMinutes);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmMinutes {
    fn format(&self, f: defmt::Formatter) {
        let minutes = 10 * self.ten_minutes() + self.minutes();
        defmt::write!(f, "AlarmMinutes({}m)", minutes);
    }
}

bitfield! {
    /// Alarm 1 hours register (0-23) with BCD encoding, 24-hour format.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmHours(u8);
    impl Debug;
    /// Tens place of hours (0-2)
    pub ten_hours, set_ten_hours: 5, 4;
    /// Ones place of hours (0-9)
    pub hours, set_hours: 3, 0;
}
from_register_u8!(AlarmHours);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmHours {
    fn format(&self, f: defmt::Formatter) {
        let hours = 10 * self.ten_hours() + self.hours();
        defmt::write!(f, "AlarmHours({}h)", hours);
    }
}

bitfield! {
    /// Alarm 1 day of month register (1-31) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmDays(u8);
    impl Debug;
    /// Tens place of the day (0-3)
    pub ten_days, set_ten_days: 5, 4;
    /// Ones place of the day (0-9)
    pub days, set_days: 3, 0;
}
from_register_u8!(AlarmDays);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmDays {
    fn format(&self, f: defmt::Formatter) {
        let days = 10 * self.ten_days() + self.days();
        defmt::write!(f, "AlarmDays({})", days);
    }
}

bitfield! {
    /// Alarm 1 month register (1-12) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmMonths(u8);
    impl Debug;
    /// Tens place of the month (0-1)
    pub ten_months, set_ten_months: 4, 4;
    /// Ones place of the month (0-9)
    pub months, set_months: 3, 0;
}
from_register_u8!(AlarmMonths);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmMonths {
    fn format(&self, f: defmt::Formatter) {
        let months = 10 * self.ten_months() + self.months();
        defmt::write!(f, "AlarmMonths({})", months);
    }
}

bitfield! {
    /// Alarm enable register with per-field match enables for both alarms.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmEnables(u8);
    impl Debug;
    /// Enable alarm 2 weekday match
    pub weekday_a2, set_weekday_a2: 7;
    /// Enable alarm 2 hour match
    pub hour_a2, set_hour_a2: 6;
    /// Enable alarm 2 minute match
    pub minute_a2, set_minute_a2: 5;
    /// Enable alarm 1 month match
    pub month_a1, set_month_a1: 4;
    /// Enable alarm 1 day match
    pub day_a1, set_day_a1: 3;
    /// Enable alarm 1 hour match
    pub hour_a1, set_hour_a1: 2;
    /// Enable alarm 1 minute match
    pub minute_a1, set_minute_a1: 1;
    /// Enable alarm 1 second match
    pub second_a1, set_second_a1: 0;
}
from_register_u8!(AlarmEnables);

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmEnables {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "AlarmEnables({=u8:#010b})", self.0);
    }
}

bitfield! {
    /// Oscillator control register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Oscillator(u8);
    impl Debug;
    /// Invert the clock output
    pub clock_inversion, set_clock_inversion: 7;
    /// Offset calibration mode
    pub offset_calibration_mode, set_offset_calibration_mode: 6;
    /// Hour format selection (12/24 hour)
    pub from into HourMode, hour_mode, set_hour_mode: 5, 5;
    /// Low jitter mode
    pub low_jitter, set_low_jitter: 4;
    /// Oscillator drive strength
    pub drive, set_drive: 3, 2;
    /// Quartz load capacitance selection
    pub load_capacitance, set_load_capacitance: 1, 0;
}
from_register_u8!(Oscillator);

#[cfg(feature = "defmt")]
impl defmt::Format for Oscillator {
    fn format(&self, f: defmt::Formatter) {
        match self.hour_mode() {
            HourMode::TwentyFourHour => defmt::write!(f, "Oscillator(24h"),
            HourMode::TwelveHour => defmt::write!(f, "Oscillator(12h"),
        }
        if self.low_jitter() {
            defmt::write!(f, ", low jitter");
        }
        defmt::write!(f, ", drive {}, cl {})", self.drive(), self.load_capacitance());
    }
}

bitfield! {
    /// Pin I/O control register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct PinIo(u8);
    impl Debug;
    /// Disable the CLK pin
    pub clock_pin_disable, set_clock_pin_disable: 7;
    /// INTA pin function selection
    pub from into IntAPinFunction, inta_output, set_inta_output: 1, 0;
}
from_register_u8!(PinIo);

#[cfg(feature = "defmt")]
impl defmt::Format for PinIo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PinIo(");
        match self.inta_output() {
            IntAPinFunction::ClockOutput => defmt::write!(f, "INTA=clock"),
            IntAPinFunction::BatteryIndicator => defmt::write!(f, "INTA=battery"),
            IntAPinFunction::InterruptOutput => defmt::write!(f, "INTA=interrupt"),
            IntAPinFunction::HighImpedance => defmt::write!(f, "INTA=hi-z"),
        }
        if self.clock_pin_disable() {
            defmt::write!(f, ", CLK disabled");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Interrupt enable register, used for both INTA and INTB.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct IntEnable(u8);
    impl Debug;
    /// Interrupt output mode (pulse or level)
    pub from into InterruptMode, output_mode, set_output_mode: 7, 7;
    /// Enable the periodic interrupt
    pub periodic, set_periodic: 6;
    /// Enable the offset correction interrupt
    pub offset_correction, set_offset_correction: 5;
    /// Enable the alarm 1 interrupt
    pub alarm1, set_alarm1: 4;
    /// Enable the alarm 2 interrupt
    pub alarm2, set_alarm2: 3;
    /// Enable the timestamp interrupt
    pub timestamp, set_timestamp: 2;
    /// Enable the battery switch interrupt
    pub battery_switch, set_battery_switch: 1;
    /// Enable the watchdog interrupt
    pub watchdog, set_watchdog: 0;
}
from_register_u8!(IntEnable);

#[cfg(feature = "defmt")]
impl defmt::Format for IntEnable {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "IntEnable(");
        let mut first = true;
        if self.alarm1() {
            defmt::write!(f, "A1IE");
            first = false;
        }
        if self.alarm2() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "A2IE");
            first = false;
        }
        if self.timestamp() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "TSIE");
            first = false;
        }
        if self.watchdog() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "WDIE");
            first = false;
        }
        if first {
            defmt::write!(f, "none");
        }
        match self.output_mode() {
            InterruptMode::Pulse => defmt::write!(f, ", pulse)"),
            InterruptMode::Level => defmt::write!(f, ", level)"),
        }
    }
}

bitfield! {
    /// Status flags register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Flags(u8);
    impl Debug;
    /// Periodic interrupt flag
    pub periodic, set_periodic: 7;
    /// Alarm 2 triggered flag
    pub alarm2_fired, set_alarm2_fired: 6;
    /// Alarm 1 triggered flag
    pub alarm1_fired, set_alarm1_fired: 5;
    /// Watchdog expired flag
    pub watchdog, set_watchdog: 4;
    /// Battery switch occurred flag
    pub battery_switched, set_battery_switched: 3;
    /// Timestamp 3 captured flag
    pub timestamp3, set_timestamp3: 2;
    /// Timestamp 2 captured flag
    pub timestamp2, set_timestamp2: 1;
    /// Timestamp 1 captured flag
    pub timestamp1, set_timestamp1: 0;
}
from_register_u8!(Flags);

#[cfg(feature = "defmt")]
impl defmt::Format for Flags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Flags(");
        let mut first = true;
        if self.periodic() {
            defmt::write!(f, "PIF");
            first = false;
        }
        if self.alarm2_fired() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "A2F");
            first = false;
        }
        if self.alarm1_fired() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "A1F");
            first = false;
        }
        if self.watchdog() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "WDF");
            first = false;
        }
        if self.battery_switched() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "BSF");
            first = false;
        }
        if self.timestamp3() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "TSR3F");
            first = false;
        }
        if self.timestamp2() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "TSR2F");
            first = false;
        }
        if self.timestamp1() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "TSR1F");
            first = false;
        }
        if first {
            defmt::write!(f, "clear");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Single RAM byte register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct RamByte(u8);
    impl Debug;
    /// Stored byte value
    pub value, set_value: 7, 0;
}
from_register_u8!(RamByte);

#[cfg(feature = "defmt")]
impl defmt::Format for RamByte {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RamByte({=u8:#04x})", self.value());
    }
}

bitfield! {
    /// Stop enable register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct StopEnable(u8);
    impl Debug;
    /// Stop the clock counters
    pub stop, set_stop: 0;
}
from_register_u8!(StopEnable);

#[cfg(feature = "defmt")]
impl defmt::Format for StopEnable {
    fn format(&self, f: defmt::Formatter) {
        if self.stop() {
            defmt::write!(f, "StopEnable(stopped)");
        } else {
            defmt::write!(f, "StopEnable(running)");
        }
    }
}
