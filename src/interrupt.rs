//! Interrupt masking around transmission
//!
//! One-wire chips cannot resynchronize on a bitstream that stalls in the
//! middle of a bit. The [`InterruptPolicy`] picks how much of a frame runs
//! with interrupts masked, and [`MaskGuard`] restores the previous state on
//! every exit path.

/// How much of a frame is sent with interrupts masked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPolicy {
    /// Interrupts stay enabled
    #[default]
    Never,
    /// Masked around every output byte
    PerByte,
    /// Masked around the three or four bytes of every pixel
    PerPixel,
    /// Masked from the first byte of a frame to the last
    PerFrame,
}

/// Host interrupt control
///
/// `mask` disables interrupts and returns whatever is needed to put the
/// previous state back. Calls nest: every `mask` is paired with exactly one
/// `restore` of the state it returned, innermost first.
pub trait InterruptMask {
    type State;

    fn mask(&mut self) -> Self::State;

    fn restore(&mut self, state: Self::State);

    /// Mask until the returned guard is dropped
    fn guard(&mut self) -> MaskGuard<'_, Self>
    where
        Self: Sized,
    {
        MaskGuard::new(self)
    }
}

/// Masks interrupts through the global `critical-section` implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalSectionMask;

impl InterruptMask for CriticalSectionMask {
    type State = critical_section::RestoreState;

    fn mask(&mut self) -> Self::State {
        // SAFETY: the state is handed back to `restore` by the caller, and
        // guards are dropped in reverse order of acquisition.
        unsafe { critical_section::acquire() }
    }

    fn restore(&mut self, state: Self::State) {
        // SAFETY: `state` was returned by the matching `acquire` above.
        unsafe { critical_section::release(state) }
    }
}

/// Leaves interrupts untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMask;

impl InterruptMask for NoMask {
    type State = ();

    fn mask(&mut self) {}

    fn restore(&mut self, _state: ()) {}
}

/// Scoped interrupt mask, restored on drop
pub struct MaskGuard<'a, M: InterruptMask> {
    mask: &'a mut M,
    state: Option<M::State>,
}

impl<'a, M: InterruptMask> MaskGuard<'a, M> {
    pub fn new(mask: &'a mut M) -> Self {
        let state = mask.mask();
        Self {
            mask,
            state: Some(state),
        }
    }
}

impl<M: InterruptMask> Drop for MaskGuard<'_, M> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.mask.restore(state);
        }
    }
}
