//! Supported LED chip families and their electrical constants

use embassy_time::Duration;

use crate::current::CurrentProfile;

/// One-wire bit timing, in nanoseconds
///
/// Every bit starts with a high phase and ends low. A "1" holds the line
/// high for roughly two thirds of the period, a "0" for roughly one third.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    /// Full bit period
    pub period_ns: u32,
    /// High phase of a "1" bit
    pub one_high_ns: u32,
    /// High phase of a "0" bit
    pub zero_high_ns: u32,
    /// Allowed deviation of each phase
    pub tolerance_ns: u32,
}

impl BitTiming {
    /// 800 kHz timing shared by most modern chips
    pub const KHZ_800: Self = Self {
        period_ns: 1250,
        one_high_ns: 800,
        zero_high_ns: 400,
        tolerance_ns: 150,
    };

    /// 400 kHz timing of the original WS2811
    pub const KHZ_400: Self = Self {
        period_ns: 2500,
        one_high_ns: 1200,
        zero_high_ns: 500,
        tolerance_ns: 150,
    };

    pub const fn one_low_ns(self) -> u32 {
        self.period_ns - self.one_high_ns
    }

    pub const fn zero_low_ns(self) -> u32 {
        self.period_ns - self.zero_high_ns
    }
}

/// LED chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipFamily {
    Ws2811,
    Ws2812,
    Ws2813,
    Ws2815,
    Ws2818,
    /// RGBW one-wire chip (also sold as WS6812)
    Sk6812,
    /// Clocked two-wire chip
    Apa102,
}

impl ChipFamily {
    /// Whether the chip takes a clock line instead of self-timed pulses
    pub const fn is_clocked(self) -> bool {
        matches!(self, Self::Apa102)
    }

    /// Whether every pixel carries a fourth, white byte
    pub const fn has_white(self) -> bool {
        matches!(self, Self::Sk6812)
    }

    /// Minimum idle time after the last pulse before a new frame may start
    pub const fn latch_interval(self) -> Duration {
        match self {
            Self::Ws2811 | Self::Ws2815 => Duration::from_micros(280),
            Self::Ws2812 | Self::Ws2813 | Self::Ws2818 => Duration::from_micros(300),
            Self::Sk6812 => Duration::from_micros(80),
            Self::Apa102 => Duration::from_micros(0),
        }
    }

    /// Pulse timing for one-wire chips, `None` for clocked ones
    pub const fn bit_timing(self) -> Option<BitTiming> {
        match self {
            Self::Ws2811 => Some(BitTiming::KHZ_400),
            Self::Ws2812 | Self::Ws2813 | Self::Ws2815 | Self::Ws2818 | Self::Sk6812 => {
                Some(BitTiming::KHZ_800)
            }
            Self::Apa102 => None,
        }
    }

    /// Measured supply current figures
    ///
    /// `active` is the current of one fully lit pixel above the idle draw,
    /// `idle` is the draw of one dark pixel.
    pub const fn current_profile(self) -> CurrentProfile {
        match self {
            Self::Ws2811 => CurrentProfile::new(2000, 46),
            Self::Ws2812 | Self::Sk6812 => CurrentProfile::new(660, 30),
            Self::Ws2813 => CurrentProfile::new(1266, 30),
            Self::Ws2815 => CurrentProfile::new(1753, 10),
            Self::Ws2818 => CurrentProfile::new(1900, 46),
            Self::Apa102 => CurrentProfile::new(1000, 60),
        }
    }
}
