//! Frame transmission
//!
//! A frame goes through the same steps every time: wait out the latch
//! interval of the previous frame, mask interrupts if the policy covers the
//! whole frame, send the start marker, the pixels and the end marker, then
//! restore interrupts and record when the last pulse left the pin.
//!
//! [`FrameSession`] is that frame. It exists only between
//! [`Transmitter::begin`] and [`FrameSession::end`], and dropping it on any
//! path, including an early `?` return, unmasks interrupts and arms the
//! latch timer.

use crate::{
    buffer::PixelBuffer,
    chip::ChipFamily,
    clock::{Clock, LatchTimer},
    color::{PackedColor, Rgbw, scale_rgbw},
    interrupt::{InterruptMask, InterruptPolicy, MaskGuard},
    order::ColorOrder,
    wire::WireWriter,
};

/// Host-visible signal raised when a frame cannot be sent
///
/// Typically blinks a status LED.
pub type FaultSignal = fn();

/// Drives a [`WireWriter`] with latch timing and interrupt masking
pub struct Transmitter<W, M, K> {
    writer: W,
    mask: M,
    clock: K,
    policy: InterruptPolicy,
    order: ColorOrder,
    latch: LatchTimer,
    fault: Option<FaultSignal>,
}

impl<W, M, K> Transmitter<W, M, K>
where
    W: WireWriter,
    M: InterruptMask,
    K: Clock,
{
    pub fn new(writer: W, mask: M, clock: K) -> Self {
        let latch = LatchTimer::new(writer.chip().latch_interval());
        Self {
            writer,
            mask,
            clock,
            policy: InterruptPolicy::default(),
            order: ColorOrder::default(),
            latch,
            fault: None,
        }
    }

    pub fn chip(&self) -> ChipFamily {
        self.writer.chip()
    }

    pub fn policy(&self) -> InterruptPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: InterruptPolicy) {
        self.policy = policy;
    }

    pub fn order(&self) -> ColorOrder {
        self.order
    }

    pub fn set_order(&mut self, order: ColorOrder) {
        self.order = order;
    }

    pub fn set_fault_signal(&mut self, fault: Option<FaultSignal>) {
        self.fault = fault;
    }

    pub fn latch(&self) -> &LatchTimer {
        &self.latch
    }

    /// Whether a frame could start right now without waiting
    pub fn can_show(&mut self) -> bool {
        let now = self.clock.now();
        self.latch.can_show(now)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    pub fn mask_mut(&mut self) -> &mut M {
        &mut self.mask
    }

    /// Give back the writer, the interrupt mask and the clock
    pub fn release(self) -> (W, M, K) {
        (self.writer, self.mask, self.clock)
    }

    /// Raise the fault signal, if one is configured
    pub fn signal_fault(&self) {
        if let Some(fault) = self.fault {
            fault();
        }
    }

    /// Open a frame; every pixel sent through it is scaled by `scale`
    ///
    /// Blocks until the latch interval of the previous frame has passed.
    pub fn begin(&mut self, scale: u8) -> Result<FrameSession<'_, W, M, K>, W::Error> {
        self.latch.wait(&mut self.clock);

        let white = self.writer.chip().has_white();
        let header = self.writer.pixel_header();
        let Self {
            writer,
            mask,
            clock,
            policy,
            order,
            latch,
            ..
        } = self;

        let frame_state = match policy {
            InterruptPolicy::PerFrame => Some(mask.mask()),
            _ => None,
        };

        let mut session = FrameSession {
            writer,
            mask,
            clock,
            latch,
            policy: *policy,
            order: *order,
            scale,
            white,
            header,
            frame_state,
            pixels: 0,
        };
        session.writer.start_frame()?;
        Ok(session)
    }

    /// Send the whole buffer as one frame
    ///
    /// An unallocated buffer is not sent; the fault signal is raised instead
    /// and `Ok` is returned.
    pub fn show<C, const MAX: usize>(
        &mut self,
        buffer: &PixelBuffer<C, MAX>,
        scale: u8,
    ) -> Result<(), W::Error>
    where
        C: PackedColor,
    {
        if !buffer.is_allocated() {
            trace!("[Transmitter.show] buffer is not allocated, frame skipped");
            self.signal_fault();
            return Ok(());
        }

        let mut session = self.begin(scale)?;
        for color in buffer.iter() {
            session.send(color)?;
        }
        session.end()
    }
}

/// One frame in flight
pub struct FrameSession<'a, W, M, K>
where
    W: WireWriter,
    M: InterruptMask,
    K: Clock,
{
    writer: &'a mut W,
    mask: &'a mut M,
    clock: &'a mut K,
    latch: &'a mut LatchTimer,
    policy: InterruptPolicy,
    order: ColorOrder,
    scale: u8,
    white: bool,
    header: Option<u8>,
    frame_state: Option<M::State>,
    pixels: usize,
}

impl<W, M, K> FrameSession<'_, W, M, K>
where
    W: WireWriter,
    M: InterruptMask,
    K: Clock,
{
    /// Send one pixel
    pub fn send(&mut self, color: impl Into<Rgbw>) -> Result<(), W::Error> {
        let color = scale_rgbw(color.into(), self.scale);
        let (bytes, count) = self.order.arrange(color, self.white);
        let bytes = &bytes[..count];

        match self.policy {
            InterruptPolicy::PerPixel => {
                let _guard = MaskGuard::new(&mut *self.mask);
                write_pixel(self.writer, self.header, bytes)?;
            }
            InterruptPolicy::PerByte => {
                for byte in self.header.into_iter().chain(bytes.iter().copied()) {
                    let _guard = MaskGuard::new(&mut *self.mask);
                    self.writer.write_byte(byte)?;
                }
            }
            InterruptPolicy::Never | InterruptPolicy::PerFrame => {
                write_pixel(self.writer, self.header, bytes)?;
            }
        }

        self.pixels += 1;
        Ok(())
    }

    /// Pixels sent so far
    pub fn pixels(&self) -> usize {
        self.pixels
    }

    /// Send the end marker and close the frame
    pub fn end(mut self) -> Result<(), W::Error> {
        self.writer.end_frame(self.pixels)
    }
}

impl<W, M, K> Drop for FrameSession<'_, W, M, K>
where
    W: WireWriter,
    M: InterruptMask,
    K: Clock,
{
    fn drop(&mut self) {
        if let Some(state) = self.frame_state.take() {
            self.mask.restore(state);
        }
        let now = self.clock.now();
        self.latch.mark(now);
    }
}

#[inline(always)]
fn write_pixel<W: WireWriter>(
    writer: &mut W,
    header: Option<u8>,
    bytes: &[u8],
) -> Result<(), W::Error> {
    if let Some(header) = header {
        writer.write_byte(header)?;
    }
    for &byte in bytes {
        writer.write_byte(byte)?;
    }
    Ok(())
}
