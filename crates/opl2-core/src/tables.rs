//! YM3812 address mapping and frequency tables.
//!
//! The chip's per-voice register layout is sparse: operator registers are
//! grouped three channels at a time with gaps in between, so offsets come
//! from a fixed table rather than arithmetic. Frequencies are encoded as a
//! 10-bit F-number scaled by a per-block step size that doubles with each
//! block, giving an 8-octave exponential range.

/// Number of melodic voices.
pub const NUM_CHANNELS: u8 = 9;

/// Highest valid channel index.
pub const CHANNEL_MAX: u8 = 8;

/// Highest valid block (octave) value.
pub const OCTAVE_MAX: u8 = 7;

/// Highest valid note index within an octave (C..B = 0..11).
pub const NOTE_MAX: u8 = 11;

/// Highest valid 10-bit F-number.
pub const FNUMBER_MAX: u16 = 1023;

/// Per-operator register offsets, indexed `[operator][channel]`.
///
/// These reproduce the chip's actual sparse layout; they are not derivable
/// from `channel * 2 + operator`.
pub const REGISTER_OFFSETS: [[u8; 9]; 2] = [
    [0x00, 0x01, 0x02, 0x08, 0x09, 0x0A, 0x10, 0x11, 0x12],
    [0x03, 0x04, 0x05, 0x0B, 0x0C, 0x0D, 0x13, 0x14, 0x15],
];

/// Frequency step per F-number increment for each block, in Hz.
///
/// Block 0 steps 0.048 Hz per F-number; every following block doubles the
/// step, up to 6.069 Hz at block 7.
pub const BLOCK_STEPS: [f32; 8] = [0.048, 0.095, 0.190, 0.379, 0.759, 1.517, 3.034, 6.069];

/// Upper edge frequency of each block in Hz (F-number 1023 at that block).
pub const BLOCK_EDGES: [f32; 8] = [
    48.503, 97.006, 194.013, 388.026, 776.053, 1552.107, 3104.215, 6208.431,
];

/// F-numbers of the 12 semitones C..B, valid when the block is used as the
/// octave number.
pub const NOTE_FNUMBERS: [u16; 12] = [
    0x156, 0x16B, 0x181, 0x198, 0x1B0, 0x1CA, 0x1E5, 0x202, 0x220, 0x241, 0x263, 0x287,
];

/// Register offset for the given channel and operator.
///
/// Channel is clamped to [0, 8] and operator to {0, 1}.
pub fn register_offset(channel: u8, operator: u8) -> u8 {
    REGISTER_OFFSETS[operator.min(1) as usize][channel.min(CHANNEL_MAX) as usize]
}

/// Best block for the given frequency in Hz.
///
/// Returns the first block whose upper edge exceeds the frequency,
/// saturating at block 7 for anything beyond the chip's range.
pub fn frequency_block(frequency: f32) -> u8 {
    for (block, edge) in BLOCK_EDGES.iter().enumerate() {
        if frequency < *edge {
            return block as u8;
        }
    }
    OCTAVE_MAX
}

/// F-number of the given semitone, assuming block = octave playback.
///
/// The note index is clamped to [0, 11].
pub fn note_fnumber(note: u8) -> u16 {
    NOTE_FNUMBERS[note.min(NOTE_MAX) as usize]
}

/// Clamp a channel index to the valid range [0, 8].
pub(crate) fn clamp_channel(channel: u8) -> u8 {
    channel.min(CHANNEL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_offsets_skip_group_gaps() {
        // Offsets run in groups of three channels with gaps of 3 between.
        assert_eq!(register_offset(2, 0), 0x02);
        assert_eq!(register_offset(3, 0), 0x08);
        assert_eq!(register_offset(5, 1), 0x0D);
        assert_eq!(register_offset(6, 1), 0x13);
    }

    #[test]
    fn test_register_offset_clamps_out_of_range_input() {
        assert_eq!(register_offset(200, 0), register_offset(8, 0));
        assert_eq!(register_offset(0, 9), register_offset(0, 1));
    }

    #[test]
    fn test_operator_offsets_never_collide() {
        for channel in 0..NUM_CHANNELS {
            assert_ne!(
                register_offset(channel, 0),
                register_offset(channel, 1),
                "operators of channel {channel} must map to distinct registers"
            );
        }
    }

    #[test]
    fn test_frequency_block_boundaries() {
        assert_eq!(frequency_block(0.0), 0);
        assert_eq!(frequency_block(48.502), 0);
        assert_eq!(frequency_block(48.503), 1);
        assert_eq!(frequency_block(440.0), 4);
        assert_eq!(frequency_block(6208.431), 7);
        assert_eq!(frequency_block(20_000.0), 7);
    }

    #[test]
    fn test_frequency_block_monotonic() {
        let mut previous = frequency_block(0.0);
        let mut f = 0.0;
        while f < 7000.0 {
            let block = frequency_block(f);
            assert!(
                block >= previous,
                "block must not decrease as frequency rises (at {f} Hz)"
            );
            previous = block;
            f += 1.0;
        }
    }

    #[test]
    fn test_block_steps_double_per_block() {
        for block in 1..8 {
            let ratio = BLOCK_STEPS[block] / BLOCK_STEPS[block - 1];
            assert!(
                (ratio - 2.0).abs() < 0.03,
                "step of block {block} should be about twice block {}",
                block - 1
            );
        }
    }

    #[test]
    fn test_note_fnumbers_ascend_and_clamp() {
        for note in 1..12 {
            assert!(NOTE_FNUMBERS[note] > NOTE_FNUMBERS[note - 1]);
        }
        assert_eq!(note_fnumber(0), 0x156);
        assert_eq!(note_fnumber(11), 0x287);
        assert_eq!(note_fnumber(200), 0x287);
    }
}
