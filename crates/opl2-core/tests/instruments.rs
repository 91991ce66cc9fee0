//! Instrument codec round-trip tests.
//!
//! Programming an instrument onto a channel and snapshotting it back must
//! be lossless, because the shadow register bank is the only way to read
//! chip state at all.

use opl2::{Drum, Instrument, InstrumentType, MockBus, Opl2};

// Piano and snare patches from the stock instrument bank.
const PIANO: [u8; 12] = [
    0x00, 0x01, 0x4F, 0xF1, 0x50, 0x00, 0x06, 0x01, 0x04, 0xD2, 0x7C, 0x00,
];
const SNARE: [u8; 12] = [
    0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x00, 0xF8, 0xB5, 0x00,
];

fn chip() -> Opl2<MockBus> {
    Opl2::new(MockBus::new())
}

#[test]
fn empty_instrument_round_trips_as_melodic_zeroes() {
    let mut chip = chip();
    chip.set_instrument(4, &Instrument::new(), 1.0);

    let read_back = chip.instrument(4);
    assert_eq!(read_back, Instrument::new());
    assert_eq!(read_back.instrument_type, InstrumentType::Melodic);
}

#[test]
fn decoded_patch_round_trips_through_a_channel() {
    let mut chip = chip();
    let piano = Instrument::from_bytes(&PIANO).unwrap();

    chip.set_instrument(2, &piano, 1.0);

    assert_eq!(chip.instrument(2), piano);
    assert!(chip.waveform_select(), "waveform select must be enabled");
}

#[test]
fn full_volume_preserves_output_levels() {
    let mut chip = chip();
    let piano = Instrument::from_bytes(&PIANO).unwrap();
    chip.set_instrument(0, &piano, 1.0);

    assert_eq!(chip.volume(0, 0), piano.operators[0].output_level);
    assert_eq!(chip.volume(0, 1), piano.operators[1].output_level);
}

#[test]
fn zero_volume_silences_both_operators() {
    let mut chip = chip();
    let piano = Instrument::from_bytes(&PIANO).unwrap();
    chip.set_instrument(0, &piano, 0.0);

    assert_eq!(chip.volume(0, 0), 63);
    assert_eq!(chip.volume(0, 1), 63);
    // Attenuation must not leak into the key-scale bits.
    assert_eq!(chip.scaling_level(0, 0), piano.operators[0].scaling_level);
}

#[test]
fn volume_outside_unit_range_is_clamped() {
    let mut chip = chip();
    let piano = Instrument::from_bytes(&PIANO).unwrap();

    chip.set_instrument(0, &piano, 5.0);
    assert_eq!(chip.volume(0, 0), piano.operators[0].output_level);

    chip.set_instrument(1, &piano, -1.0);
    assert_eq!(chip.volume(1, 0), 63);
}

#[test]
fn drum_instrument_writes_only_owned_operator() {
    let mut chip = chip();
    let snare = Instrument::from_bytes(&SNARE).unwrap();
    assert_eq!(snare.instrument_type, InstrumentType::Percussion(Drum::Snare));
    chip.bus_mut().clear();

    chip.set_drum_instrument(&snare, 1.0);

    // Snare lives in operator 2 of channel 7 (offset 0x14).
    assert!(!chip.bus().writes_to(0x34).is_empty());
    // Operator 1 of channel 7 belongs to the hi-hat and must be untouched.
    assert!(chip.bus().writes_to(0x31).is_empty());
    // No feedback for drums, and key-on stays alone.
    assert_eq!(chip.register(0xC7), 0x00);
    assert!(chip.bus().writes_to(0xB7).is_empty());
}

#[test]
fn drum_instrument_round_trips_through_its_channel() {
    let mut chip = chip();
    let snare = Instrument::from_bytes(&SNARE).unwrap();
    chip.set_drum_instrument(&snare, 1.0);

    let read_back = chip.drum_instrument(Drum::Snare);
    assert_eq!(read_back.operators[1], snare.operators[1]);
    assert_eq!(read_back.instrument_type, InstrumentType::Percussion(Drum::Snare));
    // The unowned operator snapshot stays zeroed.
    assert_eq!(read_back.operators[0], Default::default());
    assert_eq!(read_back.feedback, 0);
    assert!(!read_back.additive_synth);
}

#[test]
fn bass_drum_uses_both_operators() {
    let mut chip = chip();
    let mut patch = Instrument::from_bytes(&PIANO).unwrap();
    patch.instrument_type = InstrumentType::Percussion(Drum::Bass);

    chip.bus_mut().clear();
    chip.set_drum_instrument(&patch, 1.0);

    // Channel 6, operator offsets 0x10 and 0x13.
    assert!(!chip.bus().writes_to(0x30).is_empty());
    assert!(!chip.bus().writes_to(0x33).is_empty());
    assert_eq!(chip.register(0xC6), 0x00);
}

#[test]
fn snapshot_of_a_live_channel_is_tagged_melodic() {
    let mut chip = chip();
    let piano = Instrument::from_bytes(&PIANO).unwrap();
    chip.set_instrument(8, &piano, 1.0);
    // Channel state carries no percussion tag, so read-back is melodic.
    assert_eq!(chip.instrument(8).instrument_type, InstrumentType::Melodic);
}
