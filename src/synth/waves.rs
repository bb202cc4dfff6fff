/// PCM waveform renderers
///
/// Each cue is synthesized as a mono f32 buffer at 44.1 kHz. Sweeps use
/// exponential ramps for pitch and gain (linear ramps sound wrong for both),
/// filtering is a single one-pole low-pass.
use std::f32::consts::PI;

use rand::Rng;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44_100;

/// One-pole low-pass filter state
struct LowPass {
    last: f32,
}

impl LowPass {
    fn new() -> Self {
        Self { last: 0.0 }
    }

    /// Filter one sample at the given cutoff frequency.
    fn process(&mut self, input: f32, cutoff_hz: f32) -> f32 {
        let dt = 1.0 / SAMPLE_RATE as f32;
        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        let alpha = dt / (rc + dt);
        self.last += alpha * (input - self.last);
        self.last
    }
}

/// Exponential interpolation from `start` to `end` at position `x` in [0, 1].
/// Both endpoints must be positive.
fn exp_ramp(start: f32, end: f32, x: f32) -> f32 {
    start * (end / start).powf(x.clamp(0.0, 1.0))
}

fn sample_count(seconds: f32) -> usize {
    (SAMPLE_RATE as f32 * seconds) as usize
}

/// Lever-turn cue: sawtooth swept 100 Hz -> 40 Hz over 0.1 s with a fast
/// exponential gain decay, 0.15 s total.
pub fn render_crank() -> Vec<f32> {
    let total = sample_count(0.15);
    let sweep = 0.1_f32;
    let mut samples = Vec::with_capacity(total);
    let mut phase = 0.0_f32;

    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let freq = exp_ramp(100.0, 40.0, t / sweep);
        let gain = exp_ramp(0.3, 0.01, t / sweep);

        phase = (phase + freq / SAMPLE_RATE as f32).fract();
        let saw = 2.0 * phase - 1.0;
        samples.push(saw * gain);
    }
    samples
}

/// Capsule-open cue: sine swept 800 Hz -> 100 Hz over 0.15 s with a fast
/// gain decay, 0.2 s total.
pub fn render_pop() -> Vec<f32> {
    let total = sample_count(0.2);
    let sweep = 0.15_f32;
    let mut samples = Vec::with_capacity(total);
    let mut phase = 0.0_f32;

    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let freq = exp_ramp(800.0, 100.0, t / sweep);
        let gain = exp_ramp(0.5, 0.01, t / sweep);

        phase = (phase + freq / SAMPLE_RATE as f32).fract();
        samples.push((2.0 * PI * phase).sin() * gain);
    }
    samples
}

/// Card-flip cue: 0.3 s white-noise burst through a low-pass swept up from
/// 200 Hz to 1500 Hz over the first half, gain decaying throughout.
pub fn render_flip<R: Rng>(rng: &mut R) -> Vec<f32> {
    let total = sample_count(0.3);
    let sweep = 0.15_f32;
    let mut samples = Vec::with_capacity(total);
    let mut filter = LowPass::new();

    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        // Rising cutoff gives the "whoosh" its upward motion
        let cutoff = 200.0 + (1500.0 - 200.0) * (t / sweep).min(1.0);
        let gain = exp_ramp(0.2, 0.001, t / 0.3);

        let noise: f32 = rng.gen_range(-1.0..1.0);
        samples.push(filter.process(noise, cutoff) * gain);
    }
    samples
}

/// Shuffle rattle: 50 Hz square wave through a 400 Hz low-pass, amplitude
/// modulated by a 15 Hz sawtooth LFO. Rendered as a 1 s buffer; both the
/// carrier and the LFO complete whole cycles in that window, so the buffer
/// repeats seamlessly.
pub fn render_shuffle_loop() -> Vec<f32> {
    let total = sample_count(1.0);
    let mut samples = Vec::with_capacity(total);
    let mut filter = LowPass::new();

    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let carrier_phase = (t * 50.0).fract();
        let square = if carrier_phase < 0.5 { 1.0 } else { -1.0 };

        // Descending saw: sharp attack, falling tail, like capsules knocking
        let lfo = 1.0 - (t * 15.0).fract();
        let gain = 0.1 * (0.35 + 0.65 * lfo);

        samples.push(filter.process(square, 400.0) * gain);
    }
    samples
}
