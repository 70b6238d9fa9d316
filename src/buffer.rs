//! Fixed-capacity compressed pixel storage
//!
//! The buffer reserves `MAX` slots up front and exposes the first `len` of
//! them. Every access is bounds-checked against `len`: writes outside are
//! dropped, reads outside return [`Rgbw::OFF`]. Animation code regularly
//! computes indices one step past either end, and that must never fault.

use heapless::Vec;

use crate::{
    color::{PackedColor, Rgbw, blend_rgbw, scale_rgbw},
    error::CapacityError,
    math8::lerp_index8,
};

/// Pixel storage in the compressed format `C`
#[derive(Debug, Clone)]
pub struct PixelBuffer<C: PackedColor, const MAX: usize> {
    pixels: Vec<C, MAX>,
}

impl<C: PackedColor, const MAX: usize> PixelBuffer<C, MAX> {
    /// Create an unallocated buffer
    pub const fn new() -> Self {
        Self { pixels: Vec::new() }
    }

    /// Create a buffer of `len` dark pixels
    pub fn with_len(len: usize) -> Result<Self, CapacityError> {
        let mut buffer = Self::new();
        buffer.reallocate(len)?;
        Ok(buffer)
    }

    /// Resize to `len` pixels and turn every pixel off
    ///
    /// Old contents are never carried over. On failure the buffer is left
    /// unallocated.
    pub fn reallocate(&mut self, len: usize) -> Result<(), CapacityError> {
        self.pixels.clear();
        self.pixels.resize(len, C::OFF).map_err(|()| CapacityError {
            requested: len,
            capacity: MAX,
        })
    }

    /// Same length in another compressed format, all pixels off
    pub fn into_format<D: PackedColor>(self) -> PixelBuffer<D, MAX> {
        let mut buffer = PixelBuffer::new();
        // Same capacity, so the length always fits
        let _ = buffer.reallocate(self.len());
        buffer
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether the buffer holds at least one pixel
    pub fn is_allocated(&self) -> bool {
        !self.pixels.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        MAX
    }

    pub fn as_slice(&self) -> &[C] {
        &self.pixels
    }

    /// Expanded colors in buffer order
    pub fn iter(&self) -> impl Iterator<Item = Rgbw> + Clone + '_ {
        self.pixels.iter().map(|pixel| pixel.unpack())
    }

    pub fn set(&mut self, index: usize, color: impl Into<Rgbw>) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = C::pack(color.into());
        }
    }

    /// Color at `index`, [`Rgbw::OFF`] outside the buffer
    pub fn get(&self, index: usize) -> Rgbw {
        self.pixels
            .get(index)
            .map_or(Rgbw::OFF, |pixel| pixel.unpack())
    }

    pub fn fill(&mut self, color: impl Into<Rgbw>) {
        let packed = C::pack(color.into());
        self.pixels.iter_mut().for_each(|pixel| *pixel = packed);
    }

    /// Fill `from..to`, clamped to the buffer
    pub fn fill_range(&mut self, from: usize, to: usize, color: impl Into<Rgbw>) {
        let to = to.min(self.len());
        if from >= to {
            return;
        }
        let packed = C::pack(color.into());
        self.pixels[from..to]
            .iter_mut()
            .for_each(|pixel| *pixel = packed);
    }

    /// Fill `from..to`, continuing at the start when `to` runs past the end
    ///
    /// At most `len` pixels are written.
    pub fn fill_range_wrapping(&mut self, from: usize, to: usize, color: impl Into<Rgbw>) {
        let len = self.len();
        if len == 0 || from >= to {
            return;
        }
        let packed = C::pack(color.into());
        let count = (to - from).min(len);
        for offset in 0..count {
            self.pixels[(from + offset) % len] = packed;
        }
    }

    /// Blend from `start` at `from` to `end` at `to`, both ends inclusive
    ///
    /// Positions past the buffer are skipped, but the blend still spans the
    /// whole requested range.
    pub fn fill_gradient(
        &mut self,
        from: usize,
        to: usize,
        start: impl Into<Rgbw>,
        end: impl Into<Rgbw>,
    ) {
        let (from, to, start, end) = if from <= to {
            (from, to, start.into(), end.into())
        } else {
            (to, from, end.into(), start.into())
        };

        let last = to.min(self.len().saturating_sub(1));
        if self.is_empty() || from > last {
            return;
        }
        for index in from..=last {
            let amount = lerp_index8(index, from, to);
            self.pixels[index] = C::pack(blend_rgbw(start, end, amount));
        }
    }

    /// Dim one pixel toward off (0 = unchanged, 255 = off)
    pub fn fade(&mut self, index: usize, amount: u8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = C::pack(scale_rgbw(pixel.unpack(), 255 - amount));
        }
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = C::OFF);
    }
}

impl<C: PackedColor, const MAX: usize> Default for PixelBuffer<C, MAX> {
    fn default() -> Self {
        Self::new()
    }
}
