mod gamma;
mod hsv;
mod kelvin;
mod packed;
mod utils;

pub use gamma::{gamma8, gamma32, gamma_rgb};
pub use hsv::{HUE_STEPS, color_wheel, hsv_to_rgb, hsv1530_to_rgb};
pub use kelvin::kelvin_to_rgb;
pub use packed::{PackedColor, Rgb332, Rgb555};
pub use smart_leds::colors;
pub use utils::{
    blend_colors, blend_rgbw, rgb_from_u32, rgb_to_u32, rgbw_from_u32, rgbw_to_u32, scale_rgbw,
};

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// RGB color with a dedicated white channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    /// Fully dark color
    pub const OFF: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Color part without the white channel
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl From<Rgb> for Rgbw {
    fn from(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 0)
    }
}

/// Packed 0xWWRRGGBB, see [`rgbw_from_u32`]
impl From<u32> for Rgbw {
    fn from(color: u32) -> Self {
        rgbw_from_u32(color)
    }
}

impl From<Rgbw> for Rgb {
    fn from(color: Rgbw) -> Self {
        color.rgb()
    }
}
