//! Clocked two-wire protocol (APA102)
//!
//! A frame is four zero bytes, then per pixel a `0xFF` global byte and the
//! color bytes, then enough trailing bytes to push the data through the
//! whole chain. Timing only matters for the order of clock and data edges.

use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::WireWriter;
use crate::chip::ChipFamily;

const START_FRAME: [u8; 4] = [0; 4];

/// Global byte with full per-pixel brightness
const PIXEL_HEADER: u8 = 0xFF;

/// Length of the end frame for `pixels` pixels
///
/// Each pixel delays the data by half a clock, so the chain needs one extra
/// byte per 16 pixels, but never fewer than four.
pub const fn apa102_end_frame_len(pixels: usize) -> usize {
    let len = pixels.div_ceil(16);
    if len < 4 { 4 } else { len }
}

/// APA102 on two GPIO pins
pub struct SoftClockedWriter<Data, Clk> {
    data: Data,
    clock: Clk,
}

impl<Data, Clk> SoftClockedWriter<Data, Clk>
where
    Data: OutputPin,
    Clk: OutputPin<Error = Data::Error>,
{
    pub fn new(data: Data, clock: Clk) -> Self {
        Self { data, clock }
    }

    pub fn release(self) -> (Data, Clk) {
        (self.data, self.clock)
    }

    fn write_zeros(&mut self, count: usize) -> Result<(), Data::Error> {
        for _ in 0..count {
            self.write_byte(0)?;
        }
        Ok(())
    }
}

impl<Data, Clk> WireWriter for SoftClockedWriter<Data, Clk>
where
    Data: OutputPin,
    Clk: OutputPin<Error = Data::Error>,
{
    type Error = Data::Error;

    fn chip(&self) -> ChipFamily {
        ChipFamily::Apa102
    }

    fn start_frame(&mut self) -> Result<(), Self::Error> {
        self.write_zeros(START_FRAME.len())
    }

    fn pixel_header(&self) -> Option<u8> {
        Some(PIXEL_HEADER)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        for shift in (0..8).rev() {
            if (byte >> shift) & 1 == 1 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            // Sampled on the rising edge
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }

    fn end_frame(&mut self, pixels: usize) -> Result<(), Self::Error> {
        self.write_zeros(apa102_end_frame_len(pixels))?;
        self.data.set_low()
    }
}

/// APA102 on a hardware SPI bus
pub struct SpiWriter<S> {
    spi: S,
}

impl<S: SpiBus<u8>> SpiWriter<S> {
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiBus<u8>> WireWriter for SpiWriter<S> {
    type Error = S::Error;

    fn chip(&self) -> ChipFamily {
        ChipFamily::Apa102
    }

    fn start_frame(&mut self) -> Result<(), Self::Error> {
        self.spi.write(&START_FRAME)
    }

    fn pixel_header(&self) -> Option<u8> {
        Some(PIXEL_HEADER)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte])
    }

    fn end_frame(&mut self, pixels: usize) -> Result<(), Self::Error> {
        let zeros = [0u8; 4];
        let mut remaining = apa102_end_frame_len(pixels);
        while remaining > 0 {
            let chunk = remaining.min(zeros.len());
            self.spi.write(&zeros[..chunk])?;
            remaining -= chunk;
        }
        self.spi.flush()
    }
}
