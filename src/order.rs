//! Wire channel order
//!
//! Chips disagree on which byte of a pixel carries which channel. A
//! [`ColorOrder`] records the position of red, green and blue relative to
//! each other, plus the byte position of white for four-channel chips.

use crate::color::Rgbw;

/// Byte position of each channel on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorOrder {
    r: u8,
    g: u8,
    b: u8,
    w: u8,
}

impl ColorOrder {
    pub const RGB: Self = Self::new(0, 1, 2, 3);
    pub const RBG: Self = Self::new(0, 2, 1, 3);
    pub const GRB: Self = Self::new(1, 0, 2, 3);
    pub const GBR: Self = Self::new(2, 0, 1, 3);
    pub const BRG: Self = Self::new(1, 2, 0, 3);
    pub const BGR: Self = Self::new(2, 1, 0, 3);
    pub const GRBW: Self = Self::GRB;
    pub const RGBW: Self = Self::RGB;
    pub const WRGB: Self = Self::new(0, 1, 2, 0);

    const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Parse an order string such as `"GRB"`, `"grbw"` or `"WRGB"`
    ///
    /// Red, green and blue must appear exactly once. White is optional; when
    /// missing it goes after the color bytes.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let len = s.len();
        if len != 3 && len != 4 {
            return None;
        }

        let mut positions: [Option<u8>; 4] = [None; 4];
        for (position, channel) in s.bytes().enumerate() {
            let slot = match channel.to_ascii_uppercase() {
                b'R' => 0,
                b'G' => 1,
                b'B' => 2,
                b'W' => 3,
                _ => return None,
            };
            if positions[slot].is_some() {
                return None;
            }
            positions[slot] = Some(position as u8);
        }

        let [Some(r), Some(g), Some(b), w] = positions else {
            return None;
        };
        let w = w.unwrap_or(3);

        // Color bytes are ranked among themselves so the order also works on
        // three-byte chips when white leads, as in "WRGB".
        let rank = |p: u8| u8::from(r < p) + u8::from(g < p) + u8::from(b < p);
        Some(Self::new(rank(r), rank(g), rank(b), w))
    }

    /// Byte position of white in a four-byte pixel
    pub const fn white_position(self) -> u8 {
        self.w
    }

    /// Lay out the channels of one pixel in wire order
    ///
    /// Returns the bytes and how many of them are used: 4 with `white`, 3
    /// without.
    pub const fn arrange(self, color: Rgbw, white: bool) -> ([u8; 4], usize) {
        let mut rgb = [0u8; 3];
        rgb[self.r as usize] = color.r;
        rgb[self.g as usize] = color.g;
        rgb[self.b as usize] = color.b;

        if !white {
            return ([rgb[0], rgb[1], rgb[2], 0], 3);
        }

        let mut out = [0u8; 4];
        let mut source = 0;
        let mut position = 0;
        while position < 4 {
            if position == self.w as usize {
                out[position] = color.w;
            } else {
                out[position] = rgb[source];
                source += 1;
            }
            position += 1;
        }
        (out, 4)
    }
}

impl Default for ColorOrder {
    fn default() -> Self {
        Self::GRB
    }
}
