use crate::{
    color::{Rgb, Rgbw},
    math8::{blend8, scale8},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Blend two RGBW colors, channel by channel
#[inline]
pub const fn blend_rgbw(a: Rgbw, b: Rgbw, amount_of_b: u8) -> Rgbw {
    Rgbw {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
        w: blend8(a.w, b.w, amount_of_b),
    }
}

/// Scale every channel by a brightness factor (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_rgbw(color: Rgbw, scale: u8) -> Rgbw {
    if scale == 255 {
        return color;
    }
    Rgbw {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
        w: scale8(color.w, scale),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Create an RGBW color from a u32 value (0xWWRRGGBB format)
///
/// A 24-bit 0xRRGGBB value yields white 0.
pub const fn rgbw_from_u32(color: u32) -> Rgbw {
    let [w, r, g, b] = color.to_be_bytes();
    Rgbw { r, g, b, w }
}

/// Pack an RGBW color into a u32 value (0xWWRRGGBB format)
pub const fn rgbw_to_u32(color: Rgbw) -> u32 {
    u32::from_be_bytes([color.w, color.r, color.g, color.b])
}
