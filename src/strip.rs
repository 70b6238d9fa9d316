//! LED strip and matrix front end
//!
//! [`LedStrip`] owns the pixel buffer and the [`Transmitter`]. Colors are
//! premultiplied by the current brightness when written, so a later
//! brightness change only affects pixels written after it. Reading a pixel
//! back gives the stored, scaled and compressed value.

use crate::{
    buffer::PixelBuffer,
    clock::Clock,
    color::{PackedColor, Rgbw, gamma_rgb, hsv_to_rgb, rgb_from_u32, scale_rgbw},
    current::{CurrentLimiter, CurrentProfile},
    error::CapacityError,
    interrupt::{InterruptMask, InterruptPolicy},
    matrix::MatrixDescriptor,
    order::ColorOrder,
    transmitter::{FaultSignal, FrameSession, Transmitter},
    wire::WireWriter,
};

/// Strip settings applied at construction
#[derive(Debug, Clone, Copy)]
pub struct StripConfig {
    /// Wire order of the color channels
    pub order: ColorOrder,
    /// Interrupt masking during transmission
    pub policy: InterruptPolicy,
    /// Initial brightness
    pub brightness: u8,
    /// Supply current budget in milliamps, 0 = unlimited
    pub max_current_milliamps: u32,
    /// Calibration override; the chip's own figures are used otherwise
    pub current_profile: Option<CurrentProfile>,
    /// Called when `show` finds no buffer to send
    pub fault: Option<FaultSignal>,
}

impl StripConfig {
    pub const fn new() -> Self {
        Self {
            order: ColorOrder::GRB,
            policy: InterruptPolicy::Never,
            brightness: 255,
            max_current_milliamps: 0,
            current_profile: None,
            fault: None,
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: InterruptPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_max_current(mut self, milliamps: u32) -> Self {
        self.max_current_milliamps = milliamps;
        self
    }

    #[must_use]
    pub const fn with_current_profile(mut self, profile: CurrentProfile) -> Self {
        self.current_profile = Some(profile);
        self
    }

    #[must_use]
    pub const fn with_fault_signal(mut self, fault: FaultSignal) -> Self {
        self.fault = Some(fault);
        self
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Addressable LED strip, optionally wired as a matrix
///
/// `C` is the stored pixel format and `MAX` the largest number of pixels the
/// strip can ever hold.
pub struct LedStrip<C, W, M, K, const MAX: usize>
where
    C: PackedColor,
{
    buffer: PixelBuffer<C, MAX>,
    transmitter: Transmitter<W, M, K>,
    brightness: u8,
    limiter: CurrentLimiter,
    matrix: Option<MatrixDescriptor>,
}

impl<C, W, M, K, const MAX: usize> LedStrip<C, W, M, K, MAX>
where
    C: PackedColor,
    W: WireWriter,
    M: InterruptMask,
    K: Clock,
{
    /// Create a strip of `len` pixels
    ///
    /// If `len` exceeds `MAX` the strip starts unallocated: nothing is sent
    /// and every `show` raises the fault signal.
    pub fn new(mut transmitter: Transmitter<W, M, K>, len: usize, config: StripConfig) -> Self {
        transmitter.set_order(config.order);
        transmitter.set_policy(config.policy);
        transmitter.set_fault_signal(config.fault);

        let profile = config
            .current_profile
            .unwrap_or_else(|| transmitter.chip().current_profile());
        let mut limiter = CurrentLimiter::new(profile);
        limiter.set_budget(config.max_current_milliamps);

        let mut strip = Self {
            buffer: PixelBuffer::new(),
            transmitter,
            brightness: config.brightness,
            limiter,
            matrix: None,
        };
        // Failure is logged and leaves the strip unallocated
        let _ = strip.reallocate(len);
        strip
    }

    /// Create a strip wired as `matrix`, one pixel per cell
    pub fn new_matrix(
        transmitter: Transmitter<W, M, K>,
        matrix: MatrixDescriptor,
        config: StripConfig,
    ) -> Self {
        let mut strip = Self::new(transmitter, matrix.len(), config);
        strip.matrix = Some(matrix);
        strip
    }

    /// Resize the buffer, turning every pixel off
    pub fn reallocate(&mut self, len: usize) -> Result<(), CapacityError> {
        let result = self.buffer.reallocate(len);
        match result {
            Ok(()) => trace!("[LedStrip.reallocate] {} pixels", len),
            Err(error) => trace!(
                "[LedStrip.reallocate] cannot hold {} pixels, capacity {}",
                error.requested,
                error.capacity
            ),
        }
        result
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_allocated(&self) -> bool {
        self.buffer.is_allocated()
    }

    pub fn buffer(&self) -> &PixelBuffer<C, MAX> {
        &self.buffer
    }

    pub fn matrix(&self) -> Option<&MatrixDescriptor> {
        self.matrix.as_ref()
    }

    pub fn transmitter(&self) -> &Transmitter<W, M, K> {
        &self.transmitter
    }

    pub fn transmitter_mut(&mut self) -> &mut Transmitter<W, M, K> {
        &mut self.transmitter
    }

    // Brightness and current

    /// Set the brightness applied to pixels written from now on
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set the supply current budget in milliamps, 0 disables limiting
    pub fn set_max_current(&mut self, milliamps: u32) {
        self.limiter.set_budget(milliamps);
    }

    pub fn max_current(&self) -> u32 {
        self.limiter.budget()
    }

    pub fn set_current_profile(&mut self, profile: CurrentProfile) {
        self.limiter.set_profile(profile);
    }

    pub fn current_limiter(&self) -> &CurrentLimiter {
        &self.limiter
    }

    /// Estimated draw of the buffered frame, in milliamps
    pub fn estimated_current(&self) -> u32 {
        self.limiter.estimate(self.buffer.iter(), 255)
    }

    pub fn set_interrupt_policy(&mut self, policy: InterruptPolicy) {
        self.transmitter.set_policy(policy);
    }

    pub fn interrupt_policy(&self) -> InterruptPolicy {
        self.transmitter.policy()
    }

    // Linear access

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn fill(&mut self, color: impl Into<Rgbw>) {
        let color = self.premultiply(color);
        self.buffer.fill(color);
    }

    /// Fill `from..to`, clamped to the strip
    pub fn fill_range(&mut self, from: usize, to: usize, color: impl Into<Rgbw>) {
        let color = self.premultiply(color);
        self.buffer.fill_range(from, to, color);
    }

    /// Fill `from..to`, wrapping past the end of the strip
    pub fn fill_range_wrapping(&mut self, from: usize, to: usize, color: impl Into<Rgbw>) {
        let color = self.premultiply(color);
        self.buffer.fill_range_wrapping(from, to, color);
    }

    /// Blend from `start` at `from` to `end` at `to`, both ends inclusive
    pub fn fill_gradient(
        &mut self,
        from: usize,
        to: usize,
        start: impl Into<Rgbw>,
        end: impl Into<Rgbw>,
    ) {
        let start = self.premultiply(start);
        let end = self.premultiply(end);
        self.buffer.fill_gradient(from, to, start, end);
    }

    /// Spread `reps` full hue cycles over the strip, starting at `first_hue`
    ///
    /// Negative `reps` run the hues backwards.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn fill_rainbow(&mut self, first_hue: u16, reps: i8, sat: u8, val: u8, gammify: bool) {
        let len = self.len();
        for index in 0..len {
            let offset = (index as i64 * i64::from(reps) * 65536 / len as i64) as u16;
            let mut color = hsv_to_rgb(first_hue.wrapping_add(offset), sat, val);
            if gammify {
                color = gamma_rgb(color);
            }
            self.set(index, color);
        }
    }

    pub fn set(&mut self, index: usize, color: impl Into<Rgbw>) {
        let color = self.premultiply(color);
        self.buffer.set(index, color);
    }

    /// Set a pixel from separate channels, including white
    pub fn set_rgbw(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        self.set(index, Rgbw::new(r, g, b, w));
    }

    /// Stored color at `index`, off outside the strip
    pub fn get(&self, index: usize) -> Rgbw {
        self.buffer.get(index)
    }

    /// Dim one pixel toward off (0 = unchanged, 255 = off)
    pub fn fade(&mut self, index: usize, amount: u8) {
        self.buffer.fade(index, amount);
    }

    // Matrix access

    /// Buffer index of `(x, y)`, `None` off the matrix or without one
    pub fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        self.matrix?
            .coordinate_to_index(x, y)
            .filter(|&index| index < self.len())
    }

    pub fn set_xy(&mut self, x: i32, y: i32, color: impl Into<Rgbw>) {
        if let Some(index) = self.pixel_index(x, y) {
            self.set(index, color);
        }
    }

    /// Stored color at `(x, y)`, off outside the matrix
    pub fn get_xy(&self, x: i32, y: i32) -> Rgbw {
        self.pixel_index(x, y)
            .map_or(Rgbw::OFF, |index| self.get(index))
    }

    pub fn fade_xy(&mut self, x: i32, y: i32, amount: u8) {
        if let Some(index) = self.pixel_index(x, y) {
            self.fade(index, amount);
        }
    }

    /// Draw a `width` x `height` image of `0xRRGGBB` values
    ///
    /// `frame` holds rows top row first. The image's bottom-left corner lands
    /// on `(x, y)`; cells off the matrix are skipped.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn draw_bitmap(&mut self, x: i32, y: i32, width: usize, height: usize, frame: &[u32]) {
        for row in 0..height {
            for column in 0..width {
                let Some(&color) = frame.get(column + (height - 1 - row) * width) else {
                    continue;
                };
                self.set_xy(x + column as i32, y + row as i32, rgb_from_u32(color));
            }
        }
    }

    // Output

    /// Whether `show` would start without waiting for the latch interval
    pub fn can_show(&mut self) -> bool {
        self.transmitter.can_show()
    }

    /// Send the buffer, blocking until the frame is on the wire
    ///
    /// With a current budget set, the frame is dimmed as a whole so the
    /// estimate fits. Stored pixels are not modified.
    pub fn show(&mut self) -> Result<(), W::Error> {
        let scale = if self.buffer.is_allocated() {
            self.limiter.correct(self.buffer.iter(), 255)
        } else {
            255
        };
        self.transmitter.show(&self.buffer, scale)
    }

    /// Start streaming a frame without touching the buffer
    ///
    /// Pixels sent through the session are scaled by the current
    /// brightness. No current limiting is applied.
    pub fn begin(&mut self) -> Result<FrameSession<'_, W, M, K>, W::Error> {
        self.transmitter.begin(self.brightness)
    }

    fn premultiply(&self, color: impl Into<Rgbw>) -> Rgbw {
        scale_rgbw(color.into(), self.brightness)
    }
}
