//! Common traits and types for YM3812 (OPL2) drivers.
//!
//! This crate provides the bus abstraction shared by the driver core and the
//! per-platform transport implementations (SPI + GPIO on a Raspberry Pi, a
//! shift register on a microcontroller, or a test double on the host).
//!
//! # Traits
//!
//! - [`Opl2Bus`] - byte transfer, pin control and delays for one OPL2 board
//!
//! # Test doubles
//!
//! - [`MockBus`] - decodes the two-phase write protocol back into
//!   `(register, value)` transactions and records pin events and delays
//! - [`NullBus`] - discards everything, for documentation examples
//!
//! # Example
//!
//! ```ignore
//! use opl2_common::{Opl2Bus, BusPin, PinLevel};
//!
//! struct SpiBus { /* platform handles */ }
//!
//! impl Opl2Bus for SpiBus {
//!     fn set_pin(&mut self, pin: BusPin, level: PinLevel) { /* gpio */ }
//!     fn transfer(&mut self, value: u8) -> u8 { /* spi */ 0 }
//!     fn delay_us(&mut self, micros: u32) { /* busy wait */ }
//!     fn delay_ms(&mut self, millis: u32) { /* sleep */ }
//! }
//! ```

#![warn(missing_docs)]

// ============================================================================
// Protocol timing constants
// ============================================================================

/// Latch strobe width in microseconds (low phase of the latch pulse).
pub const LATCH_PULSE_US: u32 = 1;

/// Settle delay after latching a register address.
///
/// Empirically required chip timing margin, not tunable.
pub const ADDRESS_SETTLE_US: u32 = 4;

/// Settle delay after latching a data byte.
///
/// Empirically required chip timing margin, not tunable.
pub const DATA_SETTLE_US: u32 = 23;

/// Minimum width of the hardware reset pulse in milliseconds.
pub const RESET_HOLD_MS: u32 = 1;

// ============================================================================
// Pin roles and levels
// ============================================================================

/// Control pin roles of the OPL2 board.
///
/// Roles are fixed by the write protocol; which physical pin number backs
/// each role is a property of the platform bus implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusPin {
    /// Hardware reset line (active low).
    Reset,
    /// Address/data select line (low = register address, high = data byte).
    Address,
    /// Shift register latch line (strobed low after each byte).
    Latch,
}

/// Logic level of a control pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinLevel {
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

// ============================================================================
// Bus trait
// ============================================================================

/// Physical transport to one OPL2 board.
///
/// The driver assumes exclusive ownership of the bus for its lifetime; the
/// two-phase write protocol is not reentrant, so implementations need no
/// internal locking but callers must not share a bus between drivers.
pub trait Opl2Bus {
    /// Drive a control pin to the given level.
    fn set_pin(&mut self, pin: BusPin, level: PinLevel);

    /// Shift one byte out to the board, returning whatever was shifted in.
    ///
    /// The OPL2 has no read path; the returned byte is only meaningful for
    /// bus implementations that loop data back (e.g. test doubles).
    fn transfer(&mut self, value: u8) -> u8;

    /// Block for at least `micros` microseconds.
    fn delay_us(&mut self, micros: u32);

    /// Block for at least `millis` milliseconds.
    fn delay_ms(&mut self, millis: u32);
}

// ============================================================================
// Test doubles
// ============================================================================

/// A recorded pin transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvent {
    /// Which pin changed.
    pub pin: BusPin,
    /// The level it was driven to.
    pub level: PinLevel,
}

/// Scripted bus that decodes register transactions for assertions.
///
/// `MockBus` tracks the address-select line and interprets transferred bytes
/// the way the chip's bus interface does: a byte shifted while the address
/// line is low latches a register address, a byte shifted while it is high is
/// data for the latched register. Every completed `(register, value)` pair is
/// recorded in order, along with all pin transitions and delays, so tests can
/// assert both final state and transaction ordering.
#[derive(Debug, Default)]
pub struct MockBus {
    address_high: bool,
    latched_register: Option<u8>,
    transactions: Vec<(u8, u8)>,
    pin_events: Vec<PinEvent>,
    delays_us: Vec<u32>,
    delays_ms: Vec<u32>,
}

impl MockBus {
    /// Create an idle mock bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// All completed `(register, value)` transactions, in write order.
    pub fn transactions(&self) -> &[(u8, u8)] {
        &self.transactions
    }

    /// All values written to the given register, in write order.
    pub fn writes_to(&self, register: u8) -> Vec<u8> {
        self.transactions
            .iter()
            .filter(|(reg, _)| *reg == register)
            .map(|(_, value)| *value)
            .collect()
    }

    /// Every pin transition, in order.
    pub fn pin_events(&self) -> &[PinEvent] {
        &self.pin_events
    }

    /// Every microsecond delay requested, in order.
    pub fn delays_us(&self) -> &[u32] {
        &self.delays_us
    }

    /// Every millisecond delay requested, in order.
    pub fn delays_ms(&self) -> &[u32] {
        &self.delays_ms
    }

    /// Forget everything recorded so far, keeping the latched bus state.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.pin_events.clear();
        self.delays_us.clear();
        self.delays_ms.clear();
    }
}

impl Opl2Bus for MockBus {
    fn set_pin(&mut self, pin: BusPin, level: PinLevel) {
        if pin == BusPin::Address {
            self.address_high = level == PinLevel::High;
        }
        self.pin_events.push(PinEvent { pin, level });
    }

    fn transfer(&mut self, value: u8) -> u8 {
        if self.address_high {
            // Data phase. The register stays latched, as on real hardware.
            if let Some(register) = self.latched_register {
                self.transactions.push((register, value));
            }
        } else {
            self.latched_register = Some(value);
        }
        value
    }

    fn delay_us(&mut self, micros: u32) {
        self.delays_us.push(micros);
    }

    fn delay_ms(&mut self, millis: u32) {
        self.delays_ms.push(millis);
    }
}

/// Bus that discards all traffic. Useful for documentation examples.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBus;

impl Opl2Bus for NullBus {
    fn set_pin(&mut self, _pin: BusPin, _level: PinLevel) {}

    fn transfer(&mut self, _value: u8) -> u8 {
        0
    }

    fn delay_us(&mut self, _micros: u32) {}

    fn delay_ms(&mut self, _millis: u32) {}
}
