//! Supply current estimation and brightness limiting
//!
//! The estimate works on the aggregate of all pixels, so it runs once per
//! frame before transmission.

use crate::{color::Rgbw, math8::scale8};

/// Calibration constants of a chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentProfile {
    /// Draw of one dark pixel, in microamps
    pub idle_microamps: u32,
    /// Extra draw of one fully lit white pixel, in milliamps
    pub active_milliamps: u32,
}

impl CurrentProfile {
    pub const fn new(idle_microamps: u32, active_milliamps: u32) -> Self {
        Self {
            idle_microamps,
            active_milliamps,
        }
    }
}

/// Limits brightness so the estimated draw stays within a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentLimiter {
    budget_milliamps: u32,
    profile: CurrentProfile,
}

impl CurrentLimiter {
    /// Create an unlimited corrector for the given chip profile
    pub const fn new(profile: CurrentProfile) -> Self {
        Self {
            budget_milliamps: 0,
            profile,
        }
    }

    /// Set the budget in milliamps, 0 disables limiting
    pub fn set_budget(&mut self, milliamps: u32) {
        self.budget_milliamps = milliamps;
    }

    pub const fn budget(&self) -> u32 {
        self.budget_milliamps
    }

    pub const fn is_limited(&self) -> bool {
        self.budget_milliamps != 0
    }

    pub const fn profile(&self) -> CurrentProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: CurrentProfile) {
        self.profile = profile;
    }

    /// Draw of `pixels` dark pixels, in milliamps
    #[allow(clippy::cast_possible_truncation)]
    pub const fn idle_current(&self, pixels: usize) -> u32 {
        (self.profile.idle_microamps as u64 * pixels as u64 / 1000) as u32
    }

    /// Estimated total draw of a frame shown at `brightness`, in milliamps
    pub fn estimate<I>(&self, pixels: I, brightness: u8) -> u32
    where
        I: Iterator<Item = Rgbw>,
    {
        let (duty, count) = Self::duty(pixels, brightness);
        self.active_current(duty) + self.idle_current(count)
    }

    /// Highest brightness up to `brightness` whose estimate fits the budget
    ///
    /// Returns `brightness` unchanged when no budget is set, the frame is
    /// dark, or it already fits. Otherwise returns
    /// `brightness * (budget - idle) / active`, floored, then stepped down
    /// while rounding still keeps the estimate above the budget.
    #[allow(clippy::cast_possible_truncation)]
    pub fn correct<I>(&self, pixels: I, brightness: u8) -> u8
    where
        I: Iterator<Item = Rgbw> + Clone,
    {
        if !self.is_limited() {
            return brightness;
        }

        let (duty, count) = Self::duty(pixels.clone(), brightness);
        let active = self.active_current(duty);
        if active == 0 {
            return brightness;
        }

        let idle = self.idle_current(count);
        if active + idle <= self.budget_milliamps {
            return brightness;
        }

        let available = self.budget_milliamps.saturating_sub(idle);
        let mut corrected =
            (u32::from(brightness) * available / active).min(u32::from(brightness)) as u8;

        while corrected > 0 && self.estimate(pixels.clone(), corrected) > self.budget_milliamps {
            corrected -= 1;
        }

        trace!(
            "[CurrentLimiter.correct] limiting brightness {} -> {} ({} mA active, {} mA idle)",
            brightness,
            corrected,
            active,
            idle
        );

        corrected
    }

    /// Sum of all channel duties at `brightness` and the pixel count
    fn duty<I>(pixels: I, brightness: u8) -> (u32, usize)
    where
        I: Iterator<Item = Rgbw>,
    {
        pixels.fold((0u32, 0usize), |(sum, count), pixel| {
            let channels = u32::from(scale8(pixel.r, brightness))
                + u32::from(scale8(pixel.g, brightness))
                + u32::from(scale8(pixel.b, brightness))
                + u32::from(scale8(pixel.w, brightness));
            (sum + channels, count + 1)
        })
    }

    /// Convert a duty sum to milliamps
    ///
    /// Three channels at full duty make up one fully lit pixel.
    const fn active_current(&self, duty: u32) -> u32 {
        (duty >> 8) * self.profile.active_milliamps / 3
    }
}
