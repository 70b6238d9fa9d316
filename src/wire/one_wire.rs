//! Self-timed one-wire protocol (WS281x, SK6812)
//!
//! Every bit is a high pulse followed by a low gap inside a fixed period.
//! Pulse lengths are resolved to CPU cycles at compile time from the chip's
//! [`BitTiming`] and the host clock, then to delay steps of the writer's
//! [`CycleDelay`], so the bit loop only picks between two precomputed pairs
//! of delays.
//!
//! The cycle budget of one bit:
//!
//! ```text
//! high = EDGE_CYCLES + CALL_CYCLES + steps * STEP_CYCLES
//! low  = EDGE_CYCLES + CALL_CYCLES + steps * STEP_CYCLES + LOOP_CYCLES
//! ```
//!
//! `LOOP_CYCLES` is the bookkeeping between the low delay and the next rising
//! edge (bit test, shift, branch and the error check of the pin write).

use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;

use super::WireWriter;
use crate::chip::{BitTiming, ChipFamily};

/// Busy-wait with a known cost
///
/// `delay(steps)` must take exactly `CALL_CYCLES + steps * STEP_CYCLES`
/// CPU cycles, `steps == 0` included.
pub trait CycleDelay {
    /// Fixed cost of one call
    const CALL_CYCLES: u32 = 0;
    /// Cost of one step
    const STEP_CYCLES: u32 = 1;

    fn delay(&mut self, steps: u32);
}

/// Counted busy loop on Cortex-M cores
///
/// One step is one pass of a `subs`/`bne` loop. `STEP` is the cost of that
/// pass: 3 on Cortex-M0+, M3 and M4 running from zero-wait memory, 4 on
/// Cortex-M0. Flash wait states add to it.
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexMDelay<const STEP: u32 = 3>;

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl<const STEP: u32> CycleDelay for CortexMDelay<STEP> {
    // The loop runs `steps + 1` passes and the last branch falls through:
    // 1 (adds) + (steps + 1) (subs) + steps * (STEP - 1) (taken) + 1
    const CALL_CYCLES: u32 = 3;
    const STEP_CYCLES: u32 = STEP;

    #[inline(always)]
    fn delay(&mut self, steps: u32) {
        // SAFETY: only touches the scratch register holding the counter
        unsafe {
            core::arch::asm!(
                "adds {n}, #1",
                "2:",
                "subs {n}, #1",
                "bne 2b",
                n = inout(reg) steps => _,
                options(nomem, nostack),
            );
        }
    }
}

/// Pulse phases of one bit
///
/// [`PulseTiming::resolve`] yields the cycles left for the delay after pin
/// edges and loop bookkeeping. [`PulseTiming::in_steps`] converts those to
/// steps of a [`CycleDelay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    pub one_high: u32,
    pub one_low: u32,
    pub zero_high: u32,
    pub zero_low: u32,
    /// Allowed deviation of each phase, in cycles
    pub tolerance: u32,
}

#[allow(clippy::cast_possible_truncation)]
const fn ns_to_cycles(ns: u32, cpu_hz: u32) -> u32 {
    ((ns as u64 * cpu_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

const fn phase(ns: u32, cpu_hz: u32, overhead: u32) -> u32 {
    let cycles = ns_to_cycles(ns, cpu_hz);
    assert!(
        cycles >= overhead,
        "pin edge is slower than the shortest pulse phase"
    );
    cycles - overhead
}

const fn steps(cycles: u32, call_cycles: u32, step_cycles: u32) -> u32 {
    assert!(
        cycles >= call_cycles,
        "delay call is slower than the shortest pulse phase"
    );
    (cycles - call_cycles + step_cycles / 2) / step_cycles
}

impl PulseTiming {
    /// Resolve nanosecond timing for a host running at `cpu_hz`
    ///
    /// `edge_cycles` is the cost of one pin write, `loop_cycles` the per-bit
    /// bookkeeping charged to the low phase.
    ///
    /// Panics, which fails the build when used in a constant, if one cycle is
    /// longer than the tolerance or a phase is shorter than its overhead.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn resolve(
        timing: BitTiming,
        cpu_hz: u32,
        edge_cycles: u32,
        loop_cycles: u32,
    ) -> Self {
        assert!(cpu_hz > 0, "host clock frequency must not be zero");
        assert!(
            1_000_000_000 / cpu_hz <= timing.tolerance_ns,
            "host clock is too slow for this chip"
        );

        let low_overhead = edge_cycles + loop_cycles;
        Self {
            one_high: phase(timing.one_high_ns, cpu_hz, edge_cycles),
            one_low: phase(timing.one_low_ns(), cpu_hz, low_overhead),
            zero_high: phase(timing.zero_high_ns, cpu_hz, edge_cycles),
            zero_low: phase(timing.zero_low_ns(), cpu_hz, low_overhead),
            tolerance: (timing.tolerance_ns as u64 * cpu_hz as u64 / 1_000_000_000) as u32,
        }
    }

    /// Resolve the timing of a one-wire chip family
    pub const fn for_chip(
        chip: ChipFamily,
        cpu_hz: u32,
        edge_cycles: u32,
        loop_cycles: u32,
    ) -> Self {
        match chip.bit_timing() {
            Some(timing) => Self::resolve(timing, cpu_hz, edge_cycles, loop_cycles),
            None => panic!("clocked chips have no pulse timing"),
        }
    }

    /// Convert delay cycles to steps of a delay costing
    /// `call_cycles + steps * step_cycles`
    ///
    /// Rounds to the nearest step. Panics if a step is coarser than the
    /// tolerance or a phase is shorter than the call itself.
    pub const fn in_steps(&self, call_cycles: u32, step_cycles: u32) -> Self {
        assert!(step_cycles > 0, "delay step must take at least one cycle");
        assert!(
            step_cycles <= self.tolerance,
            "delay step is coarser than the pulse tolerance"
        );

        Self {
            one_high: steps(self.one_high, call_cycles, step_cycles),
            one_low: steps(self.one_low, call_cycles, step_cycles),
            zero_high: steps(self.zero_high, call_cycles, step_cycles),
            zero_low: steps(self.zero_low, call_cycles, step_cycles),
            tolerance: self.tolerance,
        }
    }

    /// High and low delays of one bit
    #[inline(always)]
    pub const fn bit(&self, set: bool) -> (u32, u32) {
        if set {
            (self.one_high, self.one_low)
        } else {
            (self.zero_high, self.zero_low)
        }
    }
}

/// Pulse strategy for one chip family on one host clock
pub trait BitPulse {
    const FAMILY: ChipFamily;
    /// Delay cycles left after edges and loop bookkeeping
    const TIMING: PulseTiming;
}

macro_rules! bit_pulse {
    ($($(#[$meta:meta])* $name:ident => $family:ident;)*) => {$(
        $(#[$meta])*
        ///
        /// `CPU_HZ` is the host core clock, `EDGE_CYCLES` the cost of one pin
        /// write and `LOOP_CYCLES` the per-bit bookkeeping on that host.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name<
            const CPU_HZ: u32,
            const EDGE_CYCLES: u32 = 2,
            const LOOP_CYCLES: u32 = 4,
        >;

        impl<const CPU_HZ: u32, const EDGE_CYCLES: u32, const LOOP_CYCLES: u32> BitPulse
            for $name<CPU_HZ, EDGE_CYCLES, LOOP_CYCLES>
        {
            const FAMILY: ChipFamily = ChipFamily::$family;
            const TIMING: PulseTiming =
                PulseTiming::for_chip(ChipFamily::$family, CPU_HZ, EDGE_CYCLES, LOOP_CYCLES);
        }
    )*};
}

bit_pulse! {
    /// WS2811 at 400 kHz
    Ws2811 => Ws2811;
    /// WS2812 / WS2812B
    Ws2812 => Ws2812;
    /// WS2813
    Ws2813 => Ws2813;
    /// WS2815
    Ws2815 => Ws2815;
    /// WS2818
    Ws2818 => Ws2818;
    /// SK6812 RGBW
    Sk6812 => Sk6812;
}

/// Bit-banged one-wire writer
pub struct OneWireWriter<P, D, S> {
    pin: P,
    delay: D,
    _strategy: PhantomData<S>,
}

impl<P, D, S> OneWireWriter<P, D, S>
where
    P: OutputPin,
    D: CycleDelay,
    S: BitPulse,
{
    /// Bit delays in steps of `D`
    const STEPS: PulseTiming = S::TIMING.in_steps(D::CALL_CYCLES, D::STEP_CYCLES);

    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            _strategy: PhantomData,
        }
    }

    /// Give back the pin and the delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D, S> WireWriter for OneWireWriter<P, D, S>
where
    P: OutputPin,
    D: CycleDelay,
    S: BitPulse,
{
    type Error = P::Error;

    fn chip(&self) -> ChipFamily {
        S::FAMILY
    }

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        let steps = Self::STEPS;
        let mut bit = 0x80u8;
        while bit != 0 {
            let (high, low) = steps.bit(byte & bit != 0);
            self.pin.set_high()?;
            self.delay.delay(high);
            self.pin.set_low()?;
            self.delay.delay(low);
            bit >>= 1;
        }
        Ok(())
    }
}
