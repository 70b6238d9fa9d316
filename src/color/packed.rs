//! Compressed pixel formats
//!
//! A strip stores one [`PackedColor`] per LED. Smaller formats trade color
//! resolution for RAM: a 300-LED strip needs 300 bytes as [`Rgb332`],
//! 600 bytes as [`Rgb555`] and 900 bytes as 24-bit [`Rgb`].
//!
//! Packing truncates the low bits of each channel. Unpacking replicates the
//! high bits into the low ones, so full-scale channels read back as 255.

use core::fmt::Debug;

use super::{Rgb, Rgbw};

/// A color value stored in a pixel buffer
pub trait PackedColor: Copy + Debug + PartialEq {
    /// Bits of storage per pixel
    const BITS: u8;

    /// Stored representation of "off"
    const OFF: Self;

    /// Compress a color, dropping the white channel if the format has none
    fn pack(color: Rgbw) -> Self;

    /// Expand to 8 bits per channel
    fn unpack(self) -> Rgbw;

    fn from_rgb(color: Rgb) -> Self {
        Self::pack(color.into())
    }

    fn to_rgb(self) -> Rgb {
        self.unpack().rgb()
    }
}

/// 8-bit color: 3 bits red, 3 bits green, 2 bits blue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb332(pub u8);

/// 16-bit color: 5 bits per channel, top bit unused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb555(pub u16);

#[inline]
const fn expand3(value: u8) -> u8 {
    (value << 5) | (value << 2) | (value >> 1)
}

#[inline]
const fn expand5(value: u8) -> u8 {
    (value << 3) | (value >> 2)
}

impl PackedColor for Rgb332 {
    const BITS: u8 = 8;
    const OFF: Self = Self(0);

    fn pack(color: Rgbw) -> Self {
        Self((color.r & 0xE0) | ((color.g & 0xE0) >> 3) | (color.b >> 6))
    }

    fn unpack(self) -> Rgbw {
        let value = self.0;
        Rgbw::new(
            expand3(value >> 5),
            expand3((value >> 2) & 0x07),
            (value & 0x03) * 0x55,
            0,
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
impl PackedColor for Rgb555 {
    const BITS: u8 = 16;
    const OFF: Self = Self(0);

    fn pack(color: Rgbw) -> Self {
        let r = u16::from(color.r >> 3);
        let g = u16::from(color.g >> 3);
        let b = u16::from(color.b >> 3);
        Self((r << 10) | (g << 5) | b)
    }

    fn unpack(self) -> Rgbw {
        let value = self.0;
        Rgbw::new(
            expand5(((value >> 10) & 0x1F) as u8),
            expand5(((value >> 5) & 0x1F) as u8),
            expand5((value & 0x1F) as u8),
            0,
        )
    }
}

impl PackedColor for Rgb {
    const BITS: u8 = 24;
    const OFF: Self = Rgb { r: 0, g: 0, b: 0 };

    fn pack(color: Rgbw) -> Self {
        color.rgb()
    }

    fn unpack(self) -> Rgbw {
        self.into()
    }
}

impl PackedColor for Rgbw {
    const BITS: u8 = 32;
    const OFF: Self = Rgbw::OFF;

    fn pack(color: Rgbw) -> Self {
        color
    }

    fn unpack(self) -> Rgbw {
        self
    }
}
