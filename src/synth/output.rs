/// Audio output sinks
///
/// `AudioSink` is the capability the synthesizer needs from the platform:
/// fire-and-forget playback of short buffers plus one managed loop slot.
/// `RodioSink` talks to the default output device; `NullSink` swallows
/// everything and keeps counts for tests.
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::AudioError;
use crate::synth::cue::Cue;
use crate::synth::waves::SAMPLE_RATE;

/// Fade applied when the loop is stopped, to avoid an audible click
const LOOP_FADE_STEPS: u32 = 20;
const LOOP_FADE_STEP_MS: u64 = 10;

/// Output capability for synthesized cues.
///
/// Every operation is infallible from the caller's point of view: an
/// unavailable device degrades to silence, never to an error.
pub trait AudioSink {
    /// Play a one-shot buffer, fire-and-forget.
    fn play(&self, cue: Cue, samples: Vec<f32>);

    /// Start looping a buffer. A second start while the loop is active is
    /// a no-op; exactly one loop can be live at a time.
    fn start_loop(&self, cue: Cue, samples: Vec<f32>);

    /// Stop the active loop with a short fade-out. Safe to call with no
    /// loop active.
    fn stop_loop(&self);

    /// Check whether the loop slot is occupied.
    fn loop_active(&self) -> bool;
}

/// Lazily initialized output stream state
enum Output {
    /// No cue requested yet
    Uninit,

    /// Device opened; the stream must stay alive for playback to continue
    Ready(OutputStream, OutputStreamHandle),

    /// Device refused; all cues degrade to silence for the session
    Unavailable,
}

/// Real output device sink backed by rodio.
///
/// The output stream is opened on the first cue and reused for the process
/// lifetime. If the platform denies the device, the sink goes silent and
/// stays silent; the visual flow is never blocked by audio.
pub struct RodioSink {
    output: RefCell<Output>,
    loop_slot: Mutex<Option<Sink>>,
}

impl RodioSink {
    pub fn new() -> Self {
        Self {
            output: RefCell::new(Output::Uninit),
            loop_slot: Mutex::new(None),
        }
    }

    /// Run `f` with the stream handle, opening the device if this is the
    /// first cue. Returns without calling `f` when the device is gone.
    fn with_handle<T>(&self, f: impl FnOnce(&OutputStreamHandle) -> T) -> Option<T> {
        let mut output = self.output.borrow_mut();
        if let Output::Uninit = *output {
            *output = match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    tracing::debug!("Audio output stream opened");
                    Output::Ready(stream, handle)
                }
                Err(e) => {
                    let err = AudioError::StreamInitFailed(Box::new(e));
                    tracing::warn!(error = %err, "Audio unavailable, cues will be silent");
                    Output::Unavailable
                }
            };
        }

        match &*output {
            Output::Ready(_, handle) => Some(f(handle)),
            _ => None,
        }
    }
}

impl Default for RodioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for RodioSink {
    fn play(&self, cue: Cue, samples: Vec<f32>) {
        self.with_handle(|handle| {
            let buffer = SamplesBuffer::new(1, SAMPLE_RATE, samples);
            if let Err(e) = handle.play_raw(buffer) {
                tracing::warn!(%cue, error = %e, "Cue playback failed");
            } else {
                tracing::debug!(%cue, "Cue played");
            }
        });
    }

    fn start_loop(&self, cue: Cue, samples: Vec<f32>) {
        let mut slot = self.loop_slot.lock();
        if slot.is_some() {
            tracing::debug!(%cue, "Loop already active, start ignored");
            return;
        }

        *slot = self.with_handle(|handle| match Sink::try_new(handle) {
            Ok(sink) => {
                let buffer = SamplesBuffer::new(1, SAMPLE_RATE, samples);
                sink.append(buffer.repeat_infinite());
                sink.play();
                tracing::debug!(%cue, "Loop started");
                Some(sink)
            }
            Err(e) => {
                let err = AudioError::SinkFailed(Box::new(e));
                tracing::warn!(%cue, error = %err, "Loop start failed");
                None
            }
        })
        .flatten();
    }

    fn stop_loop(&self) {
        let sink = match self.loop_slot.lock().take() {
            Some(sink) => sink,
            None => return,
        };

        // Ramp the volume down before tearing the sink down; a hard stop
        // on a sustained waveform clicks.
        std::thread::spawn(move || {
            let start_volume = sink.volume();
            for step in (0..LOOP_FADE_STEPS).rev() {
                sink.set_volume(start_volume * step as f32 / LOOP_FADE_STEPS as f32);
                std::thread::sleep(Duration::from_millis(LOOP_FADE_STEP_MS));
            }
            sink.stop();
            tracing::debug!("Loop faded out");
        });
    }

    fn loop_active(&self) -> bool {
        self.loop_slot.lock().is_some()
    }
}

/// Recording no-op sink for tests and muted sessions.
#[derive(Default)]
pub struct NullSink {
    plays: Mutex<Vec<Cue>>,
    loop_starts: Mutex<u32>,
    loop_stops: Mutex<u32>,
    active: Mutex<bool>,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot cues played so far, in order.
    pub fn played(&self) -> Vec<Cue> {
        self.plays.lock().clone()
    }

    /// Number of times a given one-shot cue was played.
    pub fn play_count(&self, cue: Cue) -> usize {
        self.plays.lock().iter().filter(|c| **c == cue).count()
    }

    /// Number of accepted (non-ignored) loop starts.
    pub fn loop_start_count(&self) -> u32 {
        *self.loop_starts.lock()
    }

    /// Number of accepted (non-ignored) loop stops.
    pub fn loop_stop_count(&self) -> u32 {
        *self.loop_stops.lock()
    }
}

impl AudioSink for NullSink {
    fn play(&self, cue: Cue, _samples: Vec<f32>) {
        self.plays.lock().push(cue);
    }

    fn start_loop(&self, _cue: Cue, _samples: Vec<f32>) {
        let mut active = self.active.lock();
        if *active {
            return;
        }
        *active = true;
        *self.loop_starts.lock() += 1;
    }

    fn stop_loop(&self) {
        let mut active = self.active.lock();
        if !*active {
            return;
        }
        *active = false;
        *self.loop_stops.lock() += 1;
    }

    fn loop_active(&self) -> bool {
        *self.active.lock()
    }
}

impl<S: AudioSink + ?Sized> AudioSink for &S {
    fn play(&self, cue: Cue, samples: Vec<f32>) {
        (**self).play(cue, samples)
    }

    fn start_loop(&self, cue: Cue, samples: Vec<f32>) {
        (**self).start_loop(cue, samples)
    }

    fn stop_loop(&self) {
        (**self).stop_loop()
    }

    fn loop_active(&self) -> bool {
        (**self).loop_active()
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Arc<S> {
    fn play(&self, cue: Cue, samples: Vec<f32>) {
        (**self).play(cue, samples)
    }

    fn start_loop(&self, cue: Cue, samples: Vec<f32>) {
        (**self).start_loop(cue, samples)
    }

    fn stop_loop(&self) {
        (**self).stop_loop()
    }

    fn loop_active(&self) -> bool {
        (**self).loop_active()
    }
}
