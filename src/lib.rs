#![no_std]

#[macro_use]
mod log;

pub mod buffer;
pub mod chip;
pub mod clock;
pub mod color;
pub mod current;
pub mod error;
pub mod interrupt;
pub mod math8;
pub mod matrix;
pub mod order;
pub mod strip;
pub mod transmitter;
pub mod wire;

pub use buffer::PixelBuffer;
pub use chip::{BitTiming, ChipFamily};
pub use clock::{Clock, LatchTimer, SystemClock};
pub use color::{PackedColor, Rgb, Rgb332, Rgb555, Rgbw};
pub use current::{CurrentLimiter, CurrentProfile};
pub use error::CapacityError;
pub use interrupt::{CriticalSectionMask, InterruptMask, InterruptPolicy, MaskGuard, NoMask};
pub use matrix::{MatrixCorner, MatrixDescriptor, MatrixOrientation, MatrixTopology};
pub use order::ColorOrder;
pub use strip::{LedStrip, StripConfig};
pub use transmitter::{FaultSignal, FrameSession, Transmitter};
pub use wire::{OneWireWriter, SoftClockedWriter, SpiWriter, WireWriter};

pub use embassy_time::{Duration, Instant};
