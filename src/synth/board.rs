/// Cue facade over a sink
///
/// `SoundBoard` renders the right waveform for each cue and forwards it to
/// the injected sink. Every method is fire-and-forget; loop idempotence is
/// enforced by the sink's single loop slot.
use rand::Rng;

use crate::synth::cue::Cue;
use crate::synth::output::AudioSink;
use crate::synth::waves;

/// Sound board for the capsule machine
pub struct SoundBoard<S: AudioSink> {
    sink: S,
}

impl<S: AudioSink> SoundBoard<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Lever-turn cue
    pub fn crank(&self) {
        self.sink.play(Cue::Crank, waves::render_crank());
    }

    /// Capsule-open cue
    pub fn pop(&self) {
        self.sink.play(Cue::Pop, waves::render_pop());
    }

    /// Card-flip cue. Takes the caller's rng so the noise burst is
    /// deterministic under a seeded generator.
    pub fn flip<R: Rng>(&self, rng: &mut R) {
        self.sink.play(Cue::Flip, waves::render_flip(rng));
    }

    /// Start the shuffle rattle. No-op when already rattling.
    pub fn start_shuffle(&self) {
        self.sink.start_loop(Cue::Shuffle, waves::render_shuffle_loop());
    }

    /// Fade out and stop the shuffle rattle. No-op when silent.
    pub fn stop_shuffle(&self) {
        self.sink.stop_loop();
    }

    /// Check whether the shuffle loop is sounding
    pub fn shuffling(&self) -> bool {
        self.sink.loop_active()
    }

    /// Access the underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
