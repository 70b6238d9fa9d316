use core::fmt;

/// Error returned when a buffer cannot hold the requested number of pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError {
    /// Pixel count that was asked for
    pub requested: usize,
    /// Fixed capacity of the buffer
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot allocate {} pixels, capacity is {}",
            self.requested, self.capacity
        )
    }
}

impl core::error::Error for CapacityError {}
