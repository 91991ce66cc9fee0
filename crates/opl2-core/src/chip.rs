//! YM3812 driver.
//!
//! [`Opl2`] owns a bus and a shadow register bank and exposes typed
//! accessors over the chip's bit-packed register space. The chip is
//! write-only: every getter reads the shadow, every setter performs a
//! read-modify-write against the shadow and pushes the result out over the
//! two-phase serial protocol.
//!
//! Invalid input is never an error here. Channels, operators, octaves,
//! notes and field values outside their range are clamped or masked to the
//! nearest valid value before use, matching the chip's forgiving register
//! interface.

use opl2_common::{
    BusPin, Opl2Bus, PinLevel, ADDRESS_SETTLE_US, DATA_SETTLE_US, LATCH_PULSE_US, RESET_HOLD_MS,
};

use crate::instrument::{scaled_output_level, Drum, Instrument, InstrumentType, OperatorParams};
use crate::registers::{
    DrumKit, Field, FieldTarget, RegisterBank, ATTACK, BLOCK, CONTROL_REGISTER, DECAY,
    DEEP_TREMOLO, DEEP_VIBRATO, ENVELOPE_SCALING, FEEDBACK, FNUMBER_HIGH, FNUMBER_LOW, KEY_ON,
    MAINTAIN_SUSTAIN, MULTIPLIER, OUTPUT_LEVEL, PERCUSSION_MODE, RELEASE, SCALING_LEVEL, SUSTAIN,
    SYNTH_MODE, TREMOLO, VIBRATO, WAVEFORM, WAVEFORM_SELECT,
};
use crate::tables::{
    clamp_channel, frequency_block, note_fnumber, register_offset, BLOCK_STEPS, FNUMBER_MAX,
    OCTAVE_MAX,
};

/// Register-level driver for one YM3812.
///
/// The driver takes exclusive ownership of its bus; the two-phase write
/// protocol is not reentrant and the shadow bank is not synchronized, so
/// multi-threaded callers must serialize access externally. Call [`init`]
/// once before anything else: the chip's power-on register state is
/// undefined until the reset sequence has run.
///
/// [`init`]: Opl2::init
///
/// # Example
///
/// ```
/// use opl2::{Opl2, Instrument};
/// use opl2_common::NullBus;
///
/// let mut chip = Opl2::new(NullBus);
/// chip.init();
///
/// let piano = Instrument::from_bytes(&[
///     0x00, 0x01, 0x4F, 0xF1, 0x50, 0x00, 0x06, 0x01, 0x04, 0xD2, 0x7C, 0x00,
/// ]).unwrap();
/// chip.set_instrument(0, &piano, 1.0);
/// chip.play_note(0, 4, 0); // middle C
/// ```
pub struct Opl2<B: Opl2Bus> {
    bus: B,
    bank: RegisterBank,
}

impl<B: Opl2Bus> Opl2<B> {
    /// Wrap a bus. No hardware access happens until [`init`](Opl2::init).
    pub fn new(bus: B) -> Self {
        Opl2 {
            bus,
            bank: RegisterBank::new(),
        }
    }

    /// Borrow the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the underlying bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the underlying bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    // ------------------------------------------------------------------
    // Register store and writer
    // ------------------------------------------------------------------

    /// Drive the control pins to their idle levels and reset the chip.
    pub fn init(&mut self) {
        self.bus.set_pin(BusPin::Latch, PinLevel::High);
        self.bus.set_pin(BusPin::Reset, PinLevel::High);
        self.bus.set_pin(BusPin::Address, PinLevel::Low);
        self.reset();
    }

    /// Hard-reset the chip and zero every register.
    ///
    /// Pulses the reset line low for the required hold time, then writes 0
    /// to all 256 register addresses, clearing hardware and shadow state
    /// together.
    pub fn reset(&mut self) {
        self.bus.set_pin(BusPin::Reset, PinLevel::Low);
        self.bus.delay_ms(RESET_HOLD_MS);
        self.bus.set_pin(BusPin::Reset, PinLevel::High);

        self.bank.clear();
        for register in 0..=0xFF {
            self.write(register, 0x00);
        }
    }

    /// Push a value to a hardware register, bypassing the shadow bank.
    ///
    /// This is the raw two-phase transaction: register index with the
    /// address line low, data byte with it high, each latched and followed
    /// by the chip's settle delay. Prefer [`set_register`](Opl2::set_register),
    /// which keeps the shadow coherent.
    pub fn write(&mut self, register: u8, value: u8) {
        self.bus.set_pin(BusPin::Address, PinLevel::Low);
        self.bus.transfer(register);
        self.strobe_latch(ADDRESS_SETTLE_US);

        self.bus.set_pin(BusPin::Address, PinLevel::High);
        self.bus.transfer(value);
        self.strobe_latch(DATA_SETTLE_US);
    }

    fn strobe_latch(&mut self, settle_us: u32) {
        self.bus.set_pin(BusPin::Latch, PinLevel::Low);
        self.bus.delay_us(LATCH_PULSE_US);
        self.bus.set_pin(BusPin::Latch, PinLevel::High);
        self.bus.delay_us(settle_us);
    }

    /// Last value written to the given register.
    ///
    /// The chip has no read path; this consults the shadow bank only.
    pub fn register(&self, register: u8) -> u8 {
        self.bank.read(register)
    }

    /// Write a register through the shadow bank. Returns the address.
    ///
    /// Every call is a hardware transaction; writing the same value twice
    /// re-transmits it.
    pub fn set_register(&mut self, register: u8, value: u8) -> u8 {
        self.bank.write(register, value);
        self.write(register, value);
        register
    }

    // ------------------------------------------------------------------
    // Generic field access
    // ------------------------------------------------------------------

    fn field_register(&self, field: Field, channel: u8, operator: u8) -> u8 {
        match field.target {
            FieldTarget::Operator => field.base + register_offset(channel, operator),
            FieldTarget::Channel => field.base + clamp_channel(channel),
            FieldTarget::Global => field.base,
        }
    }

    fn field(&self, field: Field, channel: u8, operator: u8) -> u8 {
        let register = self.field_register(field, channel, operator);
        (self.bank.read(register) & field.mask()) >> field.shift
    }

    fn set_field(&mut self, field: Field, channel: u8, operator: u8, value: u8) -> u8 {
        let register = self.field_register(field, channel, operator);
        let current = self.bank.read(register);
        let next = (current & !field.mask()) | ((value << field.shift) & field.mask());
        self.set_register(register, next)
    }

    fn flag(&self, field: Field, channel: u8, operator: u8) -> bool {
        self.field(field, channel, operator) != 0
    }

    fn set_flag(&mut self, field: Field, channel: u8, operator: u8, enable: bool) -> u8 {
        self.set_field(field, channel, operator, u8::from(enable))
    }

    // ------------------------------------------------------------------
    // Global fields
    // ------------------------------------------------------------------

    /// Is waveform selection enabled chip-wide?
    pub fn waveform_select(&self) -> bool {
        self.flag(WAVEFORM_SELECT, 0, 0)
    }

    /// Enable or disable waveform selection for all operators.
    ///
    /// Must be on before [`set_waveform`](Opl2::set_waveform) has any
    /// audible effect.
    pub fn set_waveform_select(&mut self, enable: bool) -> u8 {
        self.set_flag(WAVEFORM_SELECT, 0, 0, enable)
    }

    /// Is the deeper tremolo depth (4.8 dB) selected?
    pub fn deep_tremolo(&self) -> bool {
        self.flag(DEEP_TREMOLO, 0, 0)
    }

    /// Select tremolo depth: 1.0 dB when false, 4.8 dB when true.
    pub fn set_deep_tremolo(&mut self, enable: bool) -> u8 {
        self.set_flag(DEEP_TREMOLO, 0, 0, enable)
    }

    /// Is the deeper vibrato depth (14 cents) selected?
    pub fn deep_vibrato(&self) -> bool {
        self.flag(DEEP_VIBRATO, 0, 0)
    }

    /// Select vibrato depth: 7 cents when false, 14 cents when true.
    pub fn set_deep_vibrato(&mut self, enable: bool) -> u8 {
        self.set_flag(DEEP_VIBRATO, 0, 0, enable)
    }

    /// Is percussion (rhythm) mode enabled?
    pub fn percussion(&self) -> bool {
        self.flag(PERCUSSION_MODE, 0, 0)
    }

    /// Enable or disable percussion mode.
    ///
    /// When enabled channels 6..8 become the fixed drum voices; key-on for
    /// those channels must be off for the drums to trigger.
    pub fn set_percussion(&mut self, enable: bool) -> u8 {
        self.set_flag(PERCUSSION_MODE, 0, 0, enable)
    }

    /// Currently enabled drum sounds.
    pub fn drums(&self) -> DrumKit {
        DrumKit::from_bits_truncate(self.bank.read(CONTROL_REGISTER))
    }

    /// Set all five drum enable bits at once.
    ///
    /// Clears the drum bits first and then writes the new set, so no
    /// spurious combination is ever latched mid-update. Bits 5..7 of the
    /// control register are preserved.
    pub fn set_drums(&mut self, drums: DrumKit) -> u8 {
        let keep = self.bank.read(CONTROL_REGISTER) & !DrumKit::all().bits();
        self.set_register(CONTROL_REGISTER, keep);
        self.set_register(CONTROL_REGISTER, keep | drums.bits())
    }

    /// Set the drum enable bits from named flags.
    pub fn set_drum_sounds(
        &mut self,
        bass: bool,
        snare: bool,
        tom: bool,
        cymbal: bool,
        hihat: bool,
    ) -> u8 {
        let mut drums = DrumKit::empty();
        drums.set(DrumKit::BASS, bass);
        drums.set(DrumKit::SNARE, snare);
        drums.set(DrumKit::TOM, tom);
        drums.set(DrumKit::CYMBAL, cymbal);
        drums.set(DrumKit::HI_HAT, hihat);
        self.set_drums(drums)
    }

    // ------------------------------------------------------------------
    // Per-operator fields
    // ------------------------------------------------------------------

    /// Is amplitude modulation enabled for the given operator?
    pub fn tremolo(&self, channel: u8, operator: u8) -> bool {
        self.flag(TREMOLO, channel, operator)
    }

    /// Apply amplitude modulation. Depth is global, see
    /// [`set_deep_tremolo`](Opl2::set_deep_tremolo).
    pub fn set_tremolo(&mut self, channel: u8, operator: u8, enable: bool) -> u8 {
        self.set_flag(TREMOLO, channel, operator, enable)
    }

    /// Is vibrato enabled for the given operator?
    pub fn vibrato(&self, channel: u8, operator: u8) -> bool {
        self.flag(VIBRATO, channel, operator)
    }

    /// Apply vibrato. Depth is global, see
    /// [`set_deep_vibrato`](Opl2::set_deep_vibrato).
    pub fn set_vibrato(&mut self, channel: u8, operator: u8, enable: bool) -> u8 {
        self.set_flag(VIBRATO, channel, operator, enable)
    }

    /// Is the sustain level held until key-off?
    pub fn maintain_sustain(&self, channel: u8, operator: u8) -> bool {
        self.flag(MAINTAIN_SUSTAIN, channel, operator)
    }

    /// Hold the sustain level until release when true; decay immediately
    /// after reaching it when false.
    pub fn set_maintain_sustain(&mut self, channel: u8, operator: u8, enable: bool) -> u8 {
        self.set_flag(MAINTAIN_SUSTAIN, channel, operator, enable)
    }

    /// Is envelope scaling applied to the given operator?
    pub fn envelope_scaling(&self, channel: u8, operator: u8) -> bool {
        self.flag(ENVELOPE_SCALING, channel, operator)
    }

    /// When enabled, higher notes get shorter envelopes than lower ones.
    pub fn set_envelope_scaling(&mut self, channel: u8, operator: u8, enable: bool) -> u8 {
        self.set_flag(ENVELOPE_SCALING, channel, operator, enable)
    }

    /// Frequency multiplier of the given operator.
    pub fn multiplier(&self, channel: u8, operator: u8) -> u8 {
        self.field(MULTIPLIER, channel, operator)
    }

    /// Set the frequency multiplier (4 bits; 0 multiplies by 0.5).
    pub fn set_multiplier(&mut self, channel: u8, operator: u8, multiplier: u8) -> u8 {
        self.set_field(MULTIPLIER, channel, operator, multiplier)
    }

    /// Key scale level of the given operator.
    pub fn scaling_level(&self, channel: u8, operator: u8) -> u8 {
        self.field(SCALING_LEVEL, channel, operator)
    }

    /// Attenuate output as frequency rises: 0 none, 1 = 1.5 dB/oct,
    /// 2 = 3.0 dB/oct, 3 = 6.0 dB/oct.
    pub fn set_scaling_level(&mut self, channel: u8, operator: u8, scaling: u8) -> u8 {
        self.set_field(SCALING_LEVEL, channel, operator, scaling)
    }

    /// Output level of the given operator. 0 is loudest, 63 softest.
    pub fn volume(&self, channel: u8, operator: u8) -> u8 {
        self.field(OUTPUT_LEVEL, channel, operator)
    }

    /// Set the output level. Note the inverted scale: 0 loudest, 63 softest.
    pub fn set_volume(&mut self, channel: u8, operator: u8, volume: u8) -> u8 {
        self.set_field(OUTPUT_LEVEL, channel, operator, volume)
    }

    /// Attack rate of the given operator.
    pub fn attack(&self, channel: u8, operator: u8) -> u8 {
        self.field(ATTACK, channel, operator)
    }

    /// Set the attack rate, 0 slowest to 15 fastest.
    pub fn set_attack(&mut self, channel: u8, operator: u8, attack: u8) -> u8 {
        self.set_field(ATTACK, channel, operator, attack)
    }

    /// Decay rate of the given operator.
    pub fn decay(&self, channel: u8, operator: u8) -> u8 {
        self.field(DECAY, channel, operator)
    }

    /// Set the decay rate, 0 slowest to 15 fastest.
    pub fn set_decay(&mut self, channel: u8, operator: u8, decay: u8) -> u8 {
        self.set_field(DECAY, channel, operator, decay)
    }

    /// Sustain level of the given operator. 0 is loudest, 15 softest.
    pub fn sustain(&self, channel: u8, operator: u8) -> u8 {
        self.field(SUSTAIN, channel, operator)
    }

    /// Set the sustain level. Inverted scale: 0 loudest, 15 softest.
    pub fn set_sustain(&mut self, channel: u8, operator: u8, sustain: u8) -> u8 {
        self.set_field(SUSTAIN, channel, operator, sustain)
    }

    /// Release rate of the given operator.
    pub fn release(&self, channel: u8, operator: u8) -> u8 {
        self.field(RELEASE, channel, operator)
    }

    /// Set the release rate, 0 slowest to 15 fastest.
    pub fn set_release(&mut self, channel: u8, operator: u8, release: u8) -> u8 {
        self.set_field(RELEASE, channel, operator, release)
    }

    /// Waveform of the given operator.
    pub fn waveform(&self, channel: u8, operator: u8) -> u8 {
        self.field(WAVEFORM, channel, operator)
    }

    /// Select the operator's waveform (0 sine, 1 half sine, 2 absolute
    /// sine, 3 quarter sine). Requires waveform select mode.
    pub fn set_waveform(&mut self, channel: u8, operator: u8, waveform: u8) -> u8 {
        self.set_field(WAVEFORM, channel, operator, waveform)
    }

    // ------------------------------------------------------------------
    // Per-channel fields
    // ------------------------------------------------------------------

    /// Current 10-bit F-number of the given channel.
    pub fn fnumber(&self, channel: u8) -> u16 {
        let channel = clamp_channel(channel);
        (u16::from(self.field(FNUMBER_HIGH, channel, 0)) << 8)
            | u16::from(self.bank.read(FNUMBER_LOW.base + channel))
    }

    /// Set the channel's F-number, clamped to [0, 1023].
    pub fn set_fnumber(&mut self, channel: u8, fnumber: u16) -> u8 {
        let channel = clamp_channel(channel);
        let fnumber = fnumber.min(FNUMBER_MAX);
        let register = self.set_register(FNUMBER_LOW.base + channel, (fnumber & 0xFF) as u8);
        self.set_field(FNUMBER_HIGH, channel, 0, (fnumber >> 8) as u8);
        register
    }

    /// Frequency step in Hz per F-number increment at the channel's
    /// current block.
    pub fn frequency_step(&self, channel: u8) -> f32 {
        BLOCK_STEPS[self.block(channel) as usize]
    }

    /// F-number encoding the given frequency at the channel's *current*
    /// block (set the block first when switching ranges). Truncated toward
    /// zero, clamped to [0, 1023].
    pub fn frequency_fnumber(&self, channel: u8, frequency: f32) -> u16 {
        let fnumber = (frequency / self.frequency_step(channel)) as i64;
        fnumber.clamp(0, i64::from(FNUMBER_MAX)) as u16
    }

    /// Frequency in Hz currently programmed on the channel.
    pub fn frequency(&self, channel: u8) -> f32 {
        f32::from(self.fnumber(channel)) * self.frequency_step(channel)
    }

    /// Program a frequency in Hz, switching block when needed.
    pub fn set_frequency(&mut self, channel: u8, frequency: f32) -> u8 {
        let block = frequency_block(frequency);
        if self.block(channel) != block {
            self.set_block(channel, block);
        }
        let fnumber = self.frequency_fnumber(channel, frequency);
        self.set_fnumber(channel, fnumber)
    }

    /// Frequency block of the given channel.
    pub fn block(&self, channel: u8) -> u8 {
        self.field(BLOCK, channel, 0)
    }

    /// Set the frequency block, 0 lowest to 7 highest. Each block doubles
    /// the frequency step; see [`BLOCK_STEPS`].
    pub fn set_block(&mut self, channel: u8, block: u8) -> u8 {
        self.set_field(BLOCK, channel, 0, block)
    }

    /// Is the channel's voice currently keyed on?
    pub fn key_on(&self, channel: u8) -> bool {
        self.flag(KEY_ON, channel, 0)
    }

    /// Key the voice on or off.
    pub fn set_key_on(&mut self, channel: u8, key_on: bool) -> u8 {
        self.set_flag(KEY_ON, channel, 0, key_on)
    }

    /// Feedback strength of the given channel.
    pub fn feedback(&self, channel: u8) -> u8 {
        self.field(FEEDBACK, channel, 0)
    }

    /// Set operator 1 self-modulation, 0 none to 7 strongest.
    pub fn set_feedback(&mut self, channel: u8, feedback: u8) -> u8 {
        self.set_field(FEEDBACK, channel, 0, feedback)
    }

    /// Is the channel in additive synthesis mode?
    pub fn synth_mode(&self, channel: u8) -> bool {
        self.flag(SYNTH_MODE, channel, 0)
    }

    /// Select the synthesis mode. When false operator 1 modulates operator
    /// 2; when true both operators sound directly.
    pub fn set_synth_mode(&mut self, channel: u8, additive: bool) -> u8 {
        self.set_flag(SYNTH_MODE, channel, 0, additive)
    }

    // ------------------------------------------------------------------
    // Instrument codec
    // ------------------------------------------------------------------

    fn operator_params(&self, channel: u8, operator: u8) -> OperatorParams {
        OperatorParams {
            tremolo: self.tremolo(channel, operator),
            vibrato: self.vibrato(channel, operator),
            maintain_sustain: self.maintain_sustain(channel, operator),
            envelope_scaling: self.envelope_scaling(channel, operator),
            multiplier: self.multiplier(channel, operator),
            scaling_level: self.scaling_level(channel, operator),
            output_level: self.volume(channel, operator),
            attack: self.attack(channel, operator),
            decay: self.decay(channel, operator),
            sustain: self.sustain(channel, operator),
            release: self.release(channel, operator),
            waveform: self.waveform(channel, operator),
        }
    }

    /// Snapshot the instrument currently programmed on a channel.
    ///
    /// Always tagged melodic; a drum's percussion type is not recoverable
    /// from channel state, use [`drum_instrument`](Opl2::drum_instrument).
    pub fn instrument(&self, channel: u8) -> Instrument {
        Instrument {
            operators: [
                self.operator_params(channel, 0),
                self.operator_params(channel, 1),
            ],
            feedback: self.feedback(channel),
            additive_synth: self.synth_mode(channel),
            instrument_type: InstrumentType::Melodic,
        }
    }

    /// Snapshot the instrument of a percussion-mode drum.
    ///
    /// Only the operators the drum actually owns are read; the other
    /// operator (shared with a different drum) stays zeroed. Feedback and
    /// synthesis mode have no meaning for drums and are left at zero.
    pub fn drum_instrument(&self, drum: Drum) -> Instrument {
        let channel = drum.channel();
        let mut instrument = Instrument::new();
        for operator in 0..2u8 {
            if drum.operator_offset(operator).is_some() {
                instrument.operators[operator as usize] = self.operator_params(channel, operator);
            }
        }
        instrument.instrument_type = InstrumentType::Percussion(drum);
        instrument
    }

    fn write_operator(&mut self, offset: u8, params: &OperatorParams, volume: f32) {
        self.set_register(TREMOLO.base + offset, params.flags_and_multiplier());
        self.set_register(
            OUTPUT_LEVEL.base + offset,
            ((params.scaling_level & 0x03) << 6) | scaled_output_level(params.output_level, volume),
        );
        self.set_register(
            ATTACK.base + offset,
            ((params.attack & 0x0F) << 4) | (params.decay & 0x0F),
        );
        self.set_register(
            SUSTAIN.base + offset,
            ((params.sustain & 0x0F) << 4) | (params.release & 0x0F),
        );
        self.set_register(WAVEFORM.base + offset, params.waveform & 0x03);
    }

    /// Program an instrument onto a channel.
    ///
    /// `volume` in [0, 1] attenuates both operators' output levels on the
    /// chip without touching the instrument value: 1.0 writes the stored
    /// levels unchanged, 0.0 writes full attenuation (63). Waveform select
    /// mode is enabled once before the waveform registers are written.
    pub fn set_instrument(&mut self, channel: u8, instrument: &Instrument, volume: f32) {
        let channel = clamp_channel(channel);
        let volume = volume.clamp(0.0, 1.0);

        self.set_waveform_select(true);
        for (operator, params) in instrument.operators.iter().enumerate() {
            let offset = register_offset(channel, operator as u8);
            self.write_operator(offset, params, volume);
        }
        self.set_register(
            FEEDBACK.base + channel,
            ((instrument.feedback & 0x07) << 1) | u8::from(instrument.additive_synth),
        );
    }

    /// Program a drum instrument onto its fixed percussion channel.
    ///
    /// Writes only the operator(s) the drum owns, leaves key-on untouched
    /// (drums trigger through the rhythm control register) and clears the
    /// channel's feedback/synthesis bits, which have no meaning for drums.
    /// Melodic-tagged instruments are written as a bass drum.
    pub fn set_drum_instrument(&mut self, instrument: &Instrument, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        let drum = match instrument.instrument_type {
            InstrumentType::Percussion(drum) => drum,
            InstrumentType::Melodic => Drum::Bass,
        };

        self.set_waveform_select(true);
        for (operator, params) in instrument.operators.iter().enumerate() {
            if let Some(offset) = drum.operator_offset(operator as u8) {
                self.write_operator(offset, params, volume);
            }
        }
        self.set_register(FEEDBACK.base + drum.channel(), 0x00);
    }

    // ------------------------------------------------------------------
    // Playback helpers
    // ------------------------------------------------------------------

    /// Play a note of a given octave on a channel.
    ///
    /// Exactly three register transactions, in order: key-off, F-number
    /// low byte, then one write carrying block, F-number high bits and
    /// key-on. The forced key-off guarantees the envelope restarts; on real
    /// hardware retriggering a keyed-on voice can be inaudible.
    pub fn play_note(&mut self, channel: u8, octave: u8, note: u8) {
        let channel = clamp_channel(channel);
        let block = octave.min(OCTAVE_MAX);
        let fnumber = note_fnumber(note);

        let register = KEY_ON.base + channel;
        let current = self.bank.read(register);
        self.set_register(register, current & !KEY_ON.mask());
        self.set_register(FNUMBER_LOW.base + channel, (fnumber & 0xFF) as u8);
        self.set_register(
            register,
            (current & !(KEY_ON.mask() | BLOCK.mask() | FNUMBER_HIGH.mask()))
                | KEY_ON.mask()
                | (block << BLOCK.shift)
                | (fnumber >> 8) as u8,
        );
    }

    /// Retrigger a drum at the given octave and note.
    ///
    /// Clears the drum's enable bit, reprograms its channel's block and
    /// F-number, then re-sets the bit, leaving the other drums' enable
    /// state untouched. Drums sharing a channel (snare + hi-hat, tom +
    /// cymbal) share the frequency too.
    pub fn play_drum(&mut self, drum: Drum, octave: u8, note: u8) {
        let state = self.drums();
        self.set_drums(state - drum.bit());

        let channel = drum.channel();
        self.set_block(channel, octave.min(OCTAVE_MAX));
        self.set_fnumber(channel, note_fnumber(note));

        self.set_drums(state | drum.bit());
    }
}
