//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and menu music - no external files
//! needed! Word pronunciation is delegated to the browser's speech
//! synthesis. The simulation never calls in here directly; the shell drains
//! its cue queue and dispatches through [`AudioEngine::play`].

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType, SpeechSynthesis,
    SpeechSynthesisUtterance,
};

use crate::sim::SoundCue;

/// Menu arpeggio theme - C minor up/down, then the relative Bb major
const ARP_SEQUENCE: [f32; 16] = [
    261.63, 311.13, 392.00, 523.25, // C4 Eb4 G4 C5
    392.00, 311.13, 261.63, 196.00, // G4 Eb4 C4 G3
    233.08, 293.66, 349.23, 466.16, // Bb3 D4 F4 Bb4
    349.23, 293.66, 233.08, 174.61, // F4 D4 Bb3 F3
];

/// Sequencer step interval, ms
const BGM_STEP_MS: i32 = 150;
/// Bass roots, alternating every 16 steps
const BASS_C2: f32 = 65.41;
const BASS_BB1: f32 = 58.27;

/// Running menu sequencer: the interval handle plus its live callback
struct Sequencer {
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
}

/// Audio engine for the game.
///
/// Construction may land in a suspended context (browsers require a user
/// gesture before audio flows); every cue is a silent no-op until
/// [`AudioEngine::resume`] succeeds, never an error.
pub struct AudioEngine {
    ctx: Option<Rc<AudioContext>>,
    muted: Rc<Cell<bool>>,
    bgm: Option<Sequencer>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        // May fail outside a secure context - degrade to silence
        let ctx = AudioContext::new().ok().map(Rc::new);
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            muted: Rc::new(Cell::new(false)),
            bgm: None,
        }
    }

    /// Resume the audio context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    /// Flip the mute flag. Muting halts the sequencer and cancels any queued
    /// speech; sounds already scheduled on the device play out.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.muted.get();
        self.muted.set(muted);
        if muted {
            self.stop_music();
            if let Some(synth) = speech() {
                synth.cancel();
            }
        }
        muted
    }

    /// Pronounce a word. Any in-flight utterance is cancelled first so the
    /// queue never backs up behind fast spawns.
    pub fn speak(&self, text: &str) {
        if self.muted.get() {
            return;
        }
        let Some(synth) = speech() else { return };
        synth.cancel();

        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            return;
        };
        utterance.set_lang("en-US");
        utterance.set_rate(1.0);
        utterance.set_pitch(1.0);
        utterance.set_volume(1.0);
        synth.speak(&utterance);
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        if self.muted.get() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Kick a suspended context; stays silent until a gesture lands
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Shoot => self.play_shoot(ctx),
            SoundCue::Hit => self.play_hit(ctx),
            SoundCue::Error => self.play_error(ctx),
            SoundCue::Miss => self.play_miss(ctx),
            SoundCue::MatchStart => self.play_match_start(ctx),
            SoundCue::CountdownBeep => self.play_countdown_beep(ctx),
            SoundCue::CountdownGo => self.play_countdown_go(ctx),
            SoundCue::Defeat => self.play_defeat(ctx),
            SoundCue::Blip => self.play_blip(ctx),
        }
    }

    // === Background sequencer ===

    /// Start the menu arpeggio. A second call while running is a no-op.
    pub fn start_menu_music(&mut self) {
        if self.bgm.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some(window) = web_sys::window() else { return };

        let ctx = ctx.clone();
        let muted = self.muted.clone();
        let step = Cell::new(0u32);
        let tick = Closure::<dyn FnMut()>::new(move || {
            if muted.get() {
                return;
            }
            let n = step.get();
            step.set(n.wrapping_add(1));
            sequencer_step(&ctx, n);
        });

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            BGM_STEP_MS,
        ) {
            Ok(interval_id) => {
                self.bgm = Some(Sequencer {
                    interval_id,
                    _tick: tick,
                });
            }
            Err(_) => log::warn!("Failed to start music timer"),
        }
    }

    /// Cancel the sequencer timer; note scheduling state is simply dropped
    pub fn stop_music(&mut self) {
        if let Some(seq) = self.bgm.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(seq.interval_id);
            }
        }
    }

    pub fn music_running(&self) -> bool {
        self.bgm.is_some()
    }

    // === Sound generators ===

    /// Shoot - descending square zap
    fn play_shoot(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 600.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.15)
            .ok();
        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.15).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Hit - noise burst through a falling lowpass, the satisfaction boom
    fn play_hit(&self, ctx: &AudioContext) {
        let t = ctx.current_time();
        let duration = 0.3;
        let Some((noise, filter, gain)) = create_noise(ctx, duration) else {
            return;
        };

        filter.frequency().set_value_at_time(800.0, t).ok();
        filter
            .frequency()
            .exponential_ramp_to_value_at_time(50.0, t + duration - 0.1)
            .ok();
        gain.gain().set_value_at_time(0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        noise.start().ok();
    }

    /// Wrong category - short sour buzz
    fn play_error(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency()
            .linear_ramp_to_value_at_time(50.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(0.2, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Word reached the bottom - longer "bu-buu" buzzer
    fn play_miss(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency()
            .linear_ramp_to_value_at_time(60.0, t + 0.4)
            .ok();
        gain.gain().set_value_at_time(0.2, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.4).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Match start - rising octave jingle
    fn play_match_start(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 220.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(440.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(880.0, t + 0.2).ok();
        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.6).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.6).ok();
    }

    /// Countdown 3/2/1 beep
    fn play_countdown_beep(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// "START!" - octave sweep upward
    fn play_countdown_go(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency()
            .linear_ramp_to_value_at_time(1760.0, t + 0.5)
            .ok();
        gain.gain().set_value_at_time(0.25, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    /// Defeat - long noise wash plus a triangle sub-drop
    fn play_defeat(&self, ctx: &AudioContext) {
        let t = ctx.current_time();
        let duration = 2.0;

        if let Some((noise, filter, gain)) = create_noise(ctx, duration) {
            filter.frequency().set_value_at_time(1200.0, t).ok();
            filter
                .frequency()
                .exponential_ramp_to_value_at_time(10.0, t + 1.5)
                .ok();
            gain.gain().set_value_at_time(1.0, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 1.5)
                .ok();
            noise.start().ok();
        }

        if let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Triangle) {
            osc.frequency()
                .exponential_ramp_to_value_at_time(20.0, t + 0.8)
                .ok();
            gain.gain().set_value_at_time(0.8, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 1.0)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 2.0).ok();
        }
    }

    /// UI toggle blip
    fn play_blip(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop_music();
    }
}

/// One sequencer step: square pluck from the arpeggio, triangle bass on
/// every 8th step with the root alternating every 16
fn sequencer_step(ctx: &AudioContext, step: u32) {
    let now = ctx.current_time();
    let freq = ARP_SEQUENCE[step as usize % ARP_SEQUENCE.len()];

    if let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Square) {
        // Short pluck envelope
        gain.gain().set_value_at_time(0.05, now).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, now + 0.1)
            .ok();
        osc.start().ok();
        osc.stop_with_when(now + 0.12).ok();
    }

    if step % 8 == 0 {
        let bass = if step % 16 == 0 { BASS_C2 } else { BASS_BB1 };
        if let Some((osc, gain)) = create_osc(ctx, bass, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(0.15, now).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, now + 0.4).ok();
            osc.start().ok();
            osc.stop_with_when(now + 0.4).ok();
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Create a white-noise source routed through a lowpass filter and gain
fn create_noise(
    ctx: &AudioContext,
    duration: f64,
) -> Option<(web_sys::AudioBufferSourceNode, web_sys::BiquadFilterNode, GainNode)> {
    let sample_rate = ctx.sample_rate();
    let len = (sample_rate as f64 * duration) as u32;
    let buffer = ctx.create_buffer(1, len, sample_rate).ok()?;

    let mut data = vec![0.0f32; len as usize];
    for sample in data.iter_mut() {
        *sample = js_sys::Math::random() as f32 * 2.0 - 1.0;
    }
    buffer.copy_to_channel(&mut data, 0).ok()?;

    let noise = ctx.create_buffer_source().ok()?;
    noise.set_buffer(Some(&buffer));

    let filter = ctx.create_biquad_filter().ok()?;
    filter.set_type(BiquadFilterType::Lowpass);

    let gain = ctx.create_gain().ok()?;

    noise.connect_with_audio_node(&filter).ok()?;
    filter.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((noise, filter, gain))
}

fn speech() -> Option<SpeechSynthesis> {
    web_sys::window()?.speech_synthesis().ok()
}
