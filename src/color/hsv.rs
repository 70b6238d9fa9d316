//! HSV to RGB conversion over the 1530-step hexcone
//!
//! The six hue segments are 255 steps wide. The last value of each segment
//! equals the first value of the next one, so it is dropped and the wheel has
//! 6 * 255 = 1530 distinct hues instead of 1536.

use super::Rgb;

/// Number of distinct hues on the wheel
pub const HUE_STEPS: u16 = 1530;

/// Fully saturated, full-value hue on the 0-1529 wheel
///
/// Values past the end of the wheel wrap around.
#[allow(clippy::cast_possible_truncation)]
pub const fn color_wheel(hue: u16) -> Rgb {
    let hue = hue % HUE_STEPS;
    let (r, g, b) = if hue < 510 {
        if hue < 255 {
            (255, hue as u8, 0)
        } else {
            ((510 - hue) as u8, 255, 0)
        }
    } else if hue < 1020 {
        if hue < 765 {
            (0, 255, (hue - 510) as u8)
        } else {
            (0, (1020 - hue) as u8, 255)
        }
    } else if hue < 1275 {
        ((hue - 1020) as u8, 0, 255)
    } else {
        (255, 0, (1530 - hue) as u8)
    };
    Rgb { r, g, b }
}

/// Convert a hue on the 0-1529 wheel plus saturation and value to RGB
pub const fn hsv1530_to_rgb(hue: u16, sat: u8, val: u8) -> Rgb {
    let pure = color_wheel(hue);
    Rgb {
        r: apply_sat_val(pure.r, sat, val),
        g: apply_sat_val(pure.g, sat, val),
        b: apply_sat_val(pure.b, sat, val),
    }
}

/// Convert a 16-bit hue (one full turn per 65536) plus saturation and value to RGB
///
/// Pure red is centered on the 65536 rollover, so hues slightly above zero
/// and slightly below 65536 both yield red.
#[allow(clippy::cast_possible_truncation)]
pub const fn hsv_to_rgb(hue: u16, sat: u8, val: u8) -> Rgb {
    let wheel = ((hue as u32 * HUE_STEPS as u32 + 32_768) / 65_536) as u16;
    hsv1530_to_rgb(wheel, sat, val)
}

/// Mix a pure hue channel toward white by `sat`, then scale by `val`
#[allow(clippy::cast_possible_truncation)]
const fn apply_sat_val(channel: u8, sat: u8, val: u8) -> u8 {
    // 1..=256 multipliers allow a shift instead of a divide by 255
    let s1 = 1 + sat as u32;
    let v1 = 1 + val as u32;
    let s2 = 255 - sat as u32;
    ((((channel as u32 * s1) >> 8) + s2) * v1 >> 8) as u8
}
