//! Byte serializers for the physical LED data line
//!
//! A [`WireWriter`] knows how one chip family wants its bytes framed and
//! clocked. It has no notion of pixels beyond the optional per-pixel header
//! byte; color order, scaling and interrupt masking live in the
//! [`Transmitter`](crate::Transmitter).

mod clocked;
mod one_wire;

pub use clocked::{SoftClockedWriter, SpiWriter, apa102_end_frame_len};
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
pub use one_wire::CortexMDelay;
pub use one_wire::{
    BitPulse, CycleDelay, OneWireWriter, PulseTiming, Sk6812, Ws2811, Ws2812, Ws2813, Ws2815,
    Ws2818,
};

use crate::chip::ChipFamily;

/// Serializes frame bytes onto the wire
pub trait WireWriter {
    type Error;

    /// Chip family this writer speaks to
    fn chip(&self) -> ChipFamily;

    /// Emit the start-of-frame marker, if the protocol has one
    fn start_frame(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Byte sent in front of the color bytes of every pixel
    fn pixel_header(&self) -> Option<u8> {
        None
    }

    /// Emit one byte, most significant bit first
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Emit the end-of-frame marker after `pixels` pixels
    fn end_frame(&mut self, pixels: usize) -> Result<(), Self::Error> {
        let _ = pixels;
        Ok(())
    }
}
