//! Simulated host for transmission tests
//!
//! Pins, delays, the clock, the interrupt mask and the SPI bus all share one
//! cycle counter, so a recorded pin trace can be read like a logic analyzer
//! capture.

#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc, vec::Vec};

use embassy_time::Instant;
use embedded_hal::{digital, spi};
use myrtio_led_driver::{
    Clock, InterruptMask,
    wire::{CycleDelay, PulseTiming},
};

pub const CPU_HZ: u32 = 64_000_000;
pub const EDGE_CYCLES: u32 = 2;
/// Bit loop bookkeeping, charged before every rising edge
pub const LOOP_CYCLES: u32 = 4;
/// Fixed cost of one delay call
pub const DELAY_CALL_CYCLES: u32 = 3;
/// Cost of one delay step
pub const DELAY_STEP_CYCLES: u32 = 2;

/// Cycles one clock read costs, one microsecond
pub const CLOCK_READ_CYCLES: u64 = CPU_HZ as u64 / 1_000_000;

pub const DATA_PIN: u8 = 0;
pub const CLOCK_PIN: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub at: u64,
    pub pin: u8,
    pub high: bool,
    pub masked: bool,
}

#[derive(Debug, Default)]
pub struct HostState {
    pub cycles: u64,
    pub mask_depth: u32,
    pub mask_count: usize,
    pub edges: Vec<Edge>,
    pub spi: Vec<u8>,
    pub spi_flushes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Host {
    state: Rc<RefCell<HostState>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, pin: u8) -> SimPin {
        SimPin {
            host: self.clone(),
            pin,
            fail_after: None,
        }
    }

    /// A pin whose writes fail once `edges` edges went out
    pub fn failing_pin(&self, pin: u8, edges: usize) -> SimPin {
        SimPin {
            host: self.clone(),
            pin,
            fail_after: Some(edges),
        }
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay { host: self.clone() }
    }

    pub fn clock(&self) -> SimClock {
        SimClock { host: self.clone() }
    }

    pub fn mask(&self) -> SimMask {
        SimMask { host: self.clone() }
    }

    pub fn spi(&self) -> SimSpi {
        SimSpi { host: self.clone() }
    }

    pub fn cycles(&self) -> u64 {
        self.state.borrow().cycles
    }

    pub fn advance(&self, cycles: u64) {
        self.state.borrow_mut().cycles += cycles;
    }

    pub fn mask_depth(&self) -> u32 {
        self.state.borrow().mask_depth
    }

    pub fn mask_count(&self) -> usize {
        self.state.borrow().mask_count
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.state.borrow().edges.clone()
    }

    pub fn data_edges(&self) -> Vec<Edge> {
        self.edges_of(DATA_PIN)
    }

    pub fn edges_of(&self, pin: u8) -> Vec<Edge> {
        self.state
            .borrow()
            .edges
            .iter()
            .copied()
            .filter(|edge| edge.pin == pin)
            .collect()
    }

    pub fn spi_bytes(&self) -> Vec<u8> {
        self.state.borrow().spi.clone()
    }

    pub fn spi_flushes(&self) -> usize {
        self.state.borrow().spi_flushes
    }

    pub fn reset_trace(&self) {
        let mut state = self.state.borrow_mut();
        state.edges.clear();
        state.spi.clear();
        state.mask_count = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinError;

impl digital::Error for SimPinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct SimPin {
    host: Host,
    pin: u8,
    fail_after: Option<usize>,
}

impl SimPin {
    fn record(&mut self, high: bool) -> Result<(), SimPinError> {
        match &mut self.fail_after {
            Some(0) => return Err(SimPinError),
            Some(left) => *left -= 1,
            None => {}
        }

        let mut state = self.host.state.borrow_mut();
        if high {
            state.cycles += u64::from(LOOP_CYCLES);
        }
        let edge = Edge {
            at: state.cycles,
            pin: self.pin,
            high,
            masked: state.mask_depth > 0,
        };
        state.edges.push(edge);
        state.cycles += u64::from(EDGE_CYCLES);
        Ok(())
    }
}

impl digital::ErrorType for SimPin {
    type Error = SimPinError;
}

impl digital::OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

pub struct SimDelay {
    host: Host,
}

impl CycleDelay for SimDelay {
    const CALL_CYCLES: u32 = DELAY_CALL_CYCLES;
    const STEP_CYCLES: u32 = DELAY_STEP_CYCLES;

    fn delay(&mut self, steps: u32) {
        self.host
            .advance(u64::from(DELAY_CALL_CYCLES + steps * DELAY_STEP_CYCLES));
    }
}

pub struct SimClock {
    host: Host,
}

impl Clock for SimClock {
    fn now(&mut self) -> Instant {
        self.host.advance(CLOCK_READ_CYCLES);
        Instant::from_micros(self.host.cycles() / CLOCK_READ_CYCLES)
    }
}

pub struct SimMask {
    host: Host,
}

impl InterruptMask for SimMask {
    type State = u32;

    fn mask(&mut self) -> u32 {
        let mut state = self.host.state.borrow_mut();
        let previous = state.mask_depth;
        state.mask_depth += 1;
        state.mask_count += 1;
        previous
    }

    fn restore(&mut self, previous: u32) {
        let mut state = self.host.state.borrow_mut();
        assert_eq!(state.mask_depth, previous + 1, "mask restored out of order");
        state.mask_depth = previous;
    }
}

pub struct SimSpi {
    host: Host,
}

impl spi::ErrorType for SimSpi {
    type Error = Infallible;
}

impl spi::SpiBus<u8> for SimSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.host.state.borrow_mut().spi.extend_from_slice(words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        spi::SpiBus::write(self, write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        spi::SpiBus::write(self, &words.to_vec())?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.host.state.borrow_mut().spi_flushes += 1;
        Ok(())
    }
}

/// One bit on a one-wire trace: high and low phase in cycles
///
/// The low phase of the very last bit has no closing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub high: u64,
    pub low: Option<u64>,
}

/// Split a one-wire trace into bit pulses
pub fn pulses(edges: &[Edge]) -> Vec<Pulse> {
    let mut pulses = Vec::new();
    let mut index = 0;
    while index + 1 < edges.len() {
        let (rise, fall) = (edges[index], edges[index + 1]);
        assert!(rise.high && !fall.high, "pulse must be a rising then a falling edge");
        let low = edges.get(index + 2).map(|next| next.at - fall.at);
        pulses.push(Pulse {
            high: fall.at - rise.at,
            low,
        });
        index += 2;
    }
    pulses
}

/// Decode one-wire pulses back into bytes, most significant bit first
pub fn decode_one_wire(edges: &[Edge], timing: PulseTiming) -> Vec<u8> {
    let threshold = (u64::from(timing.one_high) + u64::from(timing.zero_high)) / 2
        + u64::from(EDGE_CYCLES);
    pulses(edges)
        .chunks(8)
        .map(|bits| {
            bits.iter()
                .fold(0u8, |byte, pulse| (byte << 1) | u8::from(pulse.high > threshold))
        })
        .collect()
}

/// Sample the data line on every rising clock edge
pub fn decode_clocked(edges: &[Edge]) -> Vec<u8> {
    let mut data = false;
    let mut bits = Vec::new();
    for edge in edges {
        match edge.pin {
            DATA_PIN => data = edge.high,
            CLOCK_PIN if edge.high => bits.push(data),
            _ => {}
        }
    }
    bits.chunks(8)
        .map(|bits| bits.iter().fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit)))
        .collect()
}

pub fn cycles_to_ns(cycles: u64) -> u64 {
    cycles * 1_000_000_000 / u64::from(CPU_HZ)
}
