//! YM3812 register definitions.
//!
//! The chip exposes a bank of 256 write-only registers. Every controllable
//! parameter lives in a named bit-field of one of those registers; this
//! module describes each field declaratively (base address, shift, width and
//! how it is addressed) so the driver can derive all get/set logic from one
//! read-modify-write path instead of hand-written mask pairs.

use bitflags::bitflags;

/// How a field's register address is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// Base address plus the per-operator register offset.
    Operator,
    /// Base address plus the channel number.
    Channel,
    /// Fixed register address.
    Global,
}

/// A named bit-field within one of the chip's registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Register base address (exact address for global fields).
    pub base: u8,
    /// Bit position of the field's least significant bit.
    pub shift: u8,
    /// Field width in bits.
    pub width: u8,
    /// Addressing mode.
    pub target: FieldTarget,
}

impl Field {
    const fn per_operator(base: u8, shift: u8, width: u8) -> Self {
        Field {
            base,
            shift,
            width,
            target: FieldTarget::Operator,
        }
    }

    const fn per_channel(base: u8, shift: u8, width: u8) -> Self {
        Field {
            base,
            shift,
            width,
            target: FieldTarget::Channel,
        }
    }

    const fn global(base: u8, shift: u8, width: u8) -> Self {
        Field {
            base,
            shift,
            width,
            target: FieldTarget::Global,
        }
    }

    /// Bit mask of the field within its register.
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }
}

// Register 0x01: test / waveform select enable.

/// Waveform selection enable (must be set before writing waveforms).
pub const WAVEFORM_SELECT: Field = Field::global(0x01, 5, 1);

// Registers 0x20..0x35: flags and frequency multiplier, per operator.

/// Amplitude modulation (tremolo) flag.
pub const TREMOLO: Field = Field::per_operator(0x20, 7, 1);
/// Frequency modulation (vibrato) flag.
pub const VIBRATO: Field = Field::per_operator(0x20, 6, 1);
/// Hold-at-sustain-level flag.
pub const MAINTAIN_SUSTAIN: Field = Field::per_operator(0x20, 5, 1);
/// Envelope scaling (shorter envelopes at higher pitch) flag.
pub const ENVELOPE_SCALING: Field = Field::per_operator(0x20, 4, 1);
/// Frequency multiplier, 4 bits.
pub const MULTIPLIER: Field = Field::per_operator(0x20, 0, 4);

// Registers 0x40..0x55: key scaling and output level, per operator.

/// Key scale level, 2 bits.
pub const SCALING_LEVEL: Field = Field::per_operator(0x40, 6, 2);
/// Output level, 6 bits, inverted scale (0 loudest, 63 softest).
pub const OUTPUT_LEVEL: Field = Field::per_operator(0x40, 0, 6);

// Registers 0x60..0x75 and 0x80..0x95: envelope rates, per operator.

/// Attack rate, 4 bits.
pub const ATTACK: Field = Field::per_operator(0x60, 4, 4);
/// Decay rate, 4 bits.
pub const DECAY: Field = Field::per_operator(0x60, 0, 4);
/// Sustain level, 4 bits, inverted scale.
pub const SUSTAIN: Field = Field::per_operator(0x80, 4, 4);
/// Release rate, 4 bits.
pub const RELEASE: Field = Field::per_operator(0x80, 0, 4);

// Registers 0xA0..0xA8 and 0xB0..0xB8: frequency and key-on, per channel.

/// Low 8 bits of the 10-bit F-number.
pub const FNUMBER_LOW: Field = Field::per_channel(0xA0, 0, 8);
/// High 2 bits of the 10-bit F-number.
pub const FNUMBER_HIGH: Field = Field::per_channel(0xB0, 0, 2);
/// Frequency block (octave), 3 bits.
pub const BLOCK: Field = Field::per_channel(0xB0, 2, 3);
/// Voice key-on flag.
pub const KEY_ON: Field = Field::per_channel(0xB0, 5, 1);

// Registers 0xC0..0xC8: feedback and synthesis mode, per channel.

/// Operator 1 feedback strength, 3 bits.
pub const FEEDBACK: Field = Field::per_channel(0xC0, 1, 3);
/// Synthesis mode flag (0 = FM, 1 = additive).
pub const SYNTH_MODE: Field = Field::per_channel(0xC0, 0, 1);

// Register 0xBD: depth flags and rhythm control.

/// Shared depth/rhythm control register.
pub const CONTROL_REGISTER: u8 = 0xBD;
/// Tremolo depth flag (1.0 dB vs 4.8 dB).
pub const DEEP_TREMOLO: Field = Field::global(CONTROL_REGISTER, 7, 1);
/// Vibrato depth flag (7 vs 14 cents).
pub const DEEP_VIBRATO: Field = Field::global(CONTROL_REGISTER, 6, 1);
/// Percussion (rhythm) mode flag; reassigns channels 6..8 to drums.
pub const PERCUSSION_MODE: Field = Field::global(CONTROL_REGISTER, 5, 1);

// Registers 0xE0..0xF5: waveform select, per operator.

/// Waveform selector, 2 bits.
pub const WAVEFORM: Field = Field::per_operator(0xE0, 0, 2);

bitflags! {
    /// Drum enable bits of the rhythm control register (0xBD, bits 0..4).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrumKit: u8 {
        /// Bass drum (channel 6, both operators).
        const BASS = 0x10;
        /// Snare drum (channel 7, operator 2).
        const SNARE = 0x08;
        /// Tom tom (channel 8, operator 1).
        const TOM = 0x04;
        /// Top cymbal (channel 8, operator 2).
        const CYMBAL = 0x02;
        /// Hi-hat (channel 7, operator 1).
        const HI_HAT = 0x01;
    }
}

/// Shadow copy of the chip's 256 write-only registers.
///
/// The YM3812 has no hardware read path, so the driver keeps a faithful
/// shadow: every slot holds the last value written to that register, or 0
/// after a reset. The bank is owned by a driver instance, never shared, so
/// dual-chip setups simply hold two banks.
#[derive(Debug, Clone)]
pub struct RegisterBank {
    registers: [u8; 256],
}

impl RegisterBank {
    /// Create an all-zero bank.
    pub fn new() -> Self {
        RegisterBank {
            registers: [0; 256],
        }
    }

    /// Last value written to the given register.
    pub fn read(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Record a value written to the given register.
    pub fn write(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    /// Zero every register, as after a hardware reset.
    pub fn clear(&mut self) {
        self.registers = [0; 256];
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}
