//! 8-bit fixed-point helpers
//!
//! All scale factors use the 0-255 = 0.0-1.0 convention.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// `scale8(x, 255) == x` and `scale8(x, 0) == 0` for every `x`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
///
/// `amount_of_b` = 0 yields `a`, 255 yields `b`.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16;
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    );
    partial = partial.wrapping_add(0x8000);

    (partial >> 16) as u8
}

/// Reduce a value toward zero by `amount` (0 = unchanged, 255 = off)
#[inline]
pub const fn fade8(value: u8, amount: u8) -> u8 {
    scale8(value, 255 - amount)
}

/// Position of `index` between `from` and `to` as a 0-255 blend amount
///
/// Both endpoints are exact: `from` maps to 0 and `to` maps to 255.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn lerp_index8(index: usize, from: usize, to: usize) -> u8 {
    if to <= from || index <= from {
        return 0;
    }
    if index >= to {
        return 255;
    }
    (((index - from) as u64 * 255) / (to - from) as u64) as u8
}
