//! Register-level driver for the YM3812 (OPL2) FM synthesizer.
//!
//! The YM3812 is a write-only chip programmed through a sparse, bit-packed
//! bank of 256 registers. This crate maps that register space onto a typed
//! API: named field accessors for every envelope, waveform and frequency
//! parameter, an instrument codec for the fixed 12-byte binary patch
//! layout, and note/drum playback helpers. A shadow register bank makes the
//! chip's state readable even though the hardware is not.
//!
//! The physical transport (SPI or bit-banged shift register, GPIO pins,
//! delays) is injected through the [`Opl2Bus`] trait from `opl2-common`;
//! the driver itself never touches platform APIs, so the same core runs on
//! a Raspberry Pi, a microcontroller HAL, or a [`MockBus`] in tests.
//!
//! # Design notes
//!
//! - **No errors in the hot path.** All out-of-range input (channels,
//!   operators, octaves, notes, field values) is clamped or masked to the
//!   nearest valid value, mirroring the chip's own behavior. The only
//!   fallible operation is decoding an instrument from a byte slice.
//! - **Faithful shadow.** Every register write goes through the shadow
//!   bank, so reading back an instrument reproduces exactly what was
//!   written, and two drivers can serve two chips independently.
//!
//! # Quick start
//!
//! ```
//! use opl2::{Opl2, Drum};
//! use opl2_common::NullBus;
//!
//! let mut chip = Opl2::new(NullBus);
//! chip.init();
//!
//! // Melodic voice on channel 0.
//! chip.set_attack(0, 1, 0x0C);
//! chip.set_sustain(0, 1, 0x04);
//! chip.play_note(0, 4, 9); // A-4
//!
//! // Rhythm section.
//! chip.set_percussion(true);
//! chip.play_drum(Drum::Bass, 2, 0);
//! ```

#![warn(missing_docs)]

pub mod chip;
pub mod instrument;
pub mod registers;
pub mod tables;

pub use chip::Opl2;
pub use instrument::{Drum, Instrument, InstrumentType, OperatorParams, INSTRUMENT_DATA_LEN};
pub use registers::{DrumKit, Field, FieldTarget, RegisterBank};
pub use tables::{frequency_block, note_fnumber, register_offset};

// Re-exported so driver users need no separate opl2-common import.
pub use opl2_common::{BusPin, MockBus, NullBus, Opl2Bus, PinLevel};

/// Errors of the instrument codec.
///
/// The register-level API is infallible by design (invalid values clamp or
/// mask); only decoding instrument data from arbitrary byte slices can
/// fail.
#[derive(thiserror::Error, Debug)]
pub enum Opl2Error {
    /// Instrument data slice shorter than the fixed binary layout.
    #[error("instrument data too short: expected {expected} bytes, got {actual}")]
    InstrumentTooShort {
        /// Required length of the layout.
        expected: usize,
        /// Length of the slice supplied.
        actual: usize,
    },
}
