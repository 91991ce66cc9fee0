//! Instrument value objects and the binary instrument codec.
//!
//! An [`Instrument`] bundles the full timbre of one voice: envelope and
//! waveform parameters for both operators plus the channel-level feedback
//! and synthesis mode bits. Instruments are plain values; the driver turns
//! them into register writes and can snapshot them back from its shadow
//! state.

use crate::registers::DrumKit;
use crate::Opl2Error;

/// Length of the fixed binary instrument layout in bytes.
pub const INSTRUMENT_DATA_LEN: usize = 12;

/// Instrument type tags used by the binary layout (byte 0).
const TAG_BASS: u8 = 6;
const TAG_HI_HAT: u8 = 10;

/// One of the five rhythm-mode drum voices.
///
/// In percussion mode channels 6..8 are reassigned to fixed drum roles; the
/// bass drum owns both operators of channel 6 while the other four drums
/// share one operator each of channels 7 and 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drum {
    /// Bass drum, channel 6, both operators.
    Bass,
    /// Snare drum, channel 7, operator 2.
    Snare,
    /// Tom tom, channel 8, operator 1.
    Tom,
    /// Top cymbal, channel 8, operator 2.
    Cymbal,
    /// Hi-hat, channel 7, operator 1.
    HiHat,
}

impl Drum {
    /// Per-operator register offsets, indexed `[operator][drum]`. `None`
    /// marks the operator a drum does not own.
    const OPERATOR_OFFSETS: [[Option<u8>; 5]; 2] = [
        [Some(0x10), None, Some(0x12), None, Some(0x11)],
        [Some(0x13), Some(0x14), None, Some(0x15), None],
    ];

    /// Fixed channel carrying each drum.
    const CHANNELS: [u8; 5] = [6, 7, 8, 8, 7];

    const fn index(self) -> usize {
        match self {
            Drum::Bass => 0,
            Drum::Snare => 1,
            Drum::Tom => 2,
            Drum::Cymbal => 3,
            Drum::HiHat => 4,
        }
    }

    /// Channel this drum occupies (6, 7 or 8).
    pub const fn channel(self) -> u8 {
        Self::CHANNELS[self.index()]
    }

    /// Enable bit of this drum in the rhythm control register.
    pub const fn bit(self) -> DrumKit {
        match self {
            Drum::Bass => DrumKit::BASS,
            Drum::Snare => DrumKit::SNARE,
            Drum::Tom => DrumKit::TOM,
            Drum::Cymbal => DrumKit::CYMBAL,
            Drum::HiHat => DrumKit::HI_HAT,
        }
    }

    /// Register offset of the given operator, or `None` when this drum
    /// sounds through the other operator of its shared channel.
    pub fn operator_offset(self, operator: u8) -> Option<u8> {
        Self::OPERATOR_OFFSETS[operator.min(1) as usize][self.index()]
    }
}

/// What kind of voice an instrument is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstrumentType {
    /// Regular melodic voice on any of the 9 channels.
    #[default]
    Melodic,
    /// Rhythm-mode drum voice on its fixed channel.
    Percussion(Drum),
}

impl InstrumentType {
    /// Decode the type tag of the binary layout. Tags 6..=10 select the
    /// drums; anything else is melodic.
    fn from_tag(tag: u8) -> Self {
        match tag {
            TAG_BASS => InstrumentType::Percussion(Drum::Bass),
            7 => InstrumentType::Percussion(Drum::Snare),
            8 => InstrumentType::Percussion(Drum::Tom),
            9 => InstrumentType::Percussion(Drum::Cymbal),
            TAG_HI_HAT => InstrumentType::Percussion(Drum::HiHat),
            _ => InstrumentType::Melodic,
        }
    }
}

/// Envelope and timbre parameters of one operator.
///
/// Multi-bit values wider than their field are masked down when written to
/// the chip; see the field widths in [`crate::registers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatorParams {
    /// Amplitude modulation enabled.
    pub tremolo: bool,
    /// Frequency modulation enabled.
    pub vibrato: bool,
    /// Hold the sustain level until key-off.
    pub maintain_sustain: bool,
    /// Shorten envelopes as pitch rises.
    pub envelope_scaling: bool,
    /// Frequency multiplier, 4 bits (0 applies x0.5).
    pub multiplier: u8,
    /// Key scale level, 2 bits.
    pub scaling_level: u8,
    /// Output level, 6 bits, inverted (0 loudest, 63 softest).
    pub output_level: u8,
    /// Attack rate, 4 bits (15 fastest).
    pub attack: u8,
    /// Decay rate, 4 bits (15 fastest).
    pub decay: u8,
    /// Sustain level, 4 bits, inverted.
    pub sustain: u8,
    /// Release rate, 4 bits (15 fastest).
    pub release: u8,
    /// Waveform selector, 2 bits.
    pub waveform: u8,
}

impl OperatorParams {
    /// Decode the operator's 5-byte slice of the binary layout.
    fn from_bytes(data: &[u8]) -> Self {
        OperatorParams {
            tremolo: data[0] & 0x80 != 0,
            vibrato: data[0] & 0x40 != 0,
            maintain_sustain: data[0] & 0x20 != 0,
            envelope_scaling: data[0] & 0x10 != 0,
            multiplier: data[0] & 0x0F,
            scaling_level: (data[1] & 0xC0) >> 6,
            output_level: data[1] & 0x3F,
            attack: (data[2] & 0xF0) >> 4,
            decay: data[2] & 0x0F,
            sustain: (data[3] & 0xF0) >> 4,
            release: data[3] & 0x0F,
            waveform: data[4] & 0x03,
        }
    }

    /// Pack the flag bits and multiplier into the 0x20-register layout.
    pub(crate) fn flags_and_multiplier(&self) -> u8 {
        (u8::from(self.tremolo) << 7)
            | (u8::from(self.vibrato) << 6)
            | (u8::from(self.maintain_sustain) << 5)
            | (u8::from(self.envelope_scaling) << 4)
            | (self.multiplier & 0x0F)
    }
}

/// Complete timbre of one voice: two operators plus channel-level bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instrument {
    /// Modulator (index 0) and carrier (index 1) parameters.
    pub operators: [OperatorParams; 2],
    /// Operator 1 feedback strength, 3 bits.
    pub feedback: u8,
    /// Additive synthesis when true, FM when false.
    pub additive_synth: bool,
    /// Melodic or drum voice tag.
    pub instrument_type: InstrumentType,
}

impl Instrument {
    /// Create an all-zero melodic instrument.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an instrument from the fixed 12-byte binary layout.
    ///
    /// Layout: byte 0 is the type tag (6..=10 select a drum, anything else
    /// is melodic); bytes 1..=5 and 7..=11 hold operator 1 and operator 2 as
    /// `[flags | multiplier] [scaling << 6 | level] [attack << 4 | decay]
    /// [sustain << 4 | release] [waveform]`; byte 6 holds feedback in bits
    /// 1..=3 and the additive-synthesis flag in bit 0. Extra trailing bytes
    /// are ignored, so slices from larger banks decode directly.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Opl2Error> {
        if data.len() < INSTRUMENT_DATA_LEN {
            return Err(Opl2Error::InstrumentTooShort {
                expected: INSTRUMENT_DATA_LEN,
                actual: data.len(),
            });
        }

        Ok(Instrument {
            operators: [
                OperatorParams::from_bytes(&data[1..6]),
                OperatorParams::from_bytes(&data[7..12]),
            ],
            feedback: (data[6] & 0x0E) >> 1,
            additive_synth: data[6] & 0x01 != 0,
            instrument_type: InstrumentType::from_tag(data[0]),
        })
    }
}

/// Attenuate a stored output level by a volume factor in [0, 1].
///
/// The register scale is inverted (0 loudest, 63 silent), so attenuation
/// scales the distance from silence: volume 1.0 keeps the stored level,
/// volume 0.0 yields 63.
pub(crate) fn scaled_output_level(level: u8, volume: f32) -> u8 {
    let level = f32::from(level & 0x3F);
    63 - ((63.0 - level) * volume).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // A lead guitar patch from the stock instrument bank.
    const GUITAR: [u8; 12] = [
        0x00, 0x21, 0x11, 0xA2, 0x74, 0x00, 0x09, 0x31, 0x00, 0xF1, 0xF1, 0x00,
    ];

    #[test]
    fn test_decode_melodic_instrument() {
        let instrument = Instrument::from_bytes(&GUITAR).unwrap();

        assert_eq!(instrument.instrument_type, InstrumentType::Melodic);
        assert_eq!(instrument.feedback, 0x04);
        assert!(instrument.additive_synth);

        let op1 = instrument.operators[0];
        assert!(!op1.tremolo);
        assert!(op1.maintain_sustain);
        assert_eq!(op1.multiplier, 0x01);
        assert_eq!(op1.output_level, 0x11);
        assert_eq!(op1.attack, 0x0A);
        assert_eq!(op1.decay, 0x02);
        assert_eq!(op1.sustain, 0x07);
        assert_eq!(op1.release, 0x04);
        assert_eq!(op1.waveform, 0x00);

        let op2 = instrument.operators[1];
        assert!(op2.maintain_sustain);
        assert_eq!(op2.output_level, 0x00);
        assert_eq!(op2.attack, 0x0F);
        assert_eq!(op2.sustain, 0x0F);
    }

    #[test]
    fn test_decode_drum_tag() {
        let mut data = GUITAR;
        data[0] = 7;
        let instrument = Instrument::from_bytes(&data).unwrap();
        assert_eq!(
            instrument.instrument_type,
            InstrumentType::Percussion(Drum::Snare)
        );

        // Unknown tags fall back to melodic rather than erroring.
        data[0] = 42;
        let instrument = Instrument::from_bytes(&data).unwrap();
        assert_eq!(instrument.instrument_type, InstrumentType::Melodic);
    }

    #[test]
    fn test_decode_rejects_short_slice() {
        let err = Instrument::from_bytes(&GUITAR[..11]).unwrap_err();
        assert!(matches!(
            err,
            Opl2Error::InstrumentTooShort {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bank = GUITAR.to_vec();
        bank.extend_from_slice(&[0xFF; 4]);
        assert_eq!(
            Instrument::from_bytes(&bank).unwrap(),
            Instrument::from_bytes(&GUITAR).unwrap()
        );
    }

    #[test]
    fn test_drum_channel_and_operator_mapping() {
        assert_eq!(Drum::Bass.channel(), 6);
        assert_eq!(Drum::Snare.channel(), 7);
        assert_eq!(Drum::Tom.channel(), 8);
        assert_eq!(Drum::Cymbal.channel(), 8);
        assert_eq!(Drum::HiHat.channel(), 7);

        // Bass owns both operators of channel 6.
        assert_eq!(Drum::Bass.operator_offset(0), Some(0x10));
        assert_eq!(Drum::Bass.operator_offset(1), Some(0x13));

        // Single-operator drums pair up on channels 7 and 8.
        assert_eq!(Drum::HiHat.operator_offset(0), Some(0x11));
        assert_eq!(Drum::HiHat.operator_offset(1), None);
        assert_eq!(Drum::Snare.operator_offset(0), None);
        assert_eq!(Drum::Snare.operator_offset(1), Some(0x14));
        assert_eq!(Drum::Tom.operator_offset(1), None);
        assert_eq!(Drum::Cymbal.operator_offset(0), None);
    }

    #[test]
    fn test_scaled_output_level_bounds() {
        assert_eq!(scaled_output_level(0x11, 1.0), 0x11);
        assert_eq!(scaled_output_level(0x00, 0.0), 63);
        assert_eq!(scaled_output_level(0x3F, 0.5), 63);
        // Half volume on the loudest level lands mid-scale.
        assert_eq!(scaled_output_level(0x00, 0.5), 63 - 32);
    }
}
