pub mod board;
pub mod cue;
/// Sound synthesis module
///
/// Procedural audio for the machine: every cue is rendered as a short f32
/// PCM buffer by pure DSP routines and handed to an output sink. No sample
/// assets, no decoding.
///
/// ## Architecture
///
/// ```text
/// SoundBoard
///   ├── waves::render_crank()   ─┐
///   ├── waves::render_pop()     ─┤  pure PCM renderers
///   ├── waves::render_flip()    ─┤
///   └── waves::render_shuffle() ─┘
///         │
///         ▼
///   AudioSink (capability trait)
///     ├── RodioSink  — real output device, lazy stream, fail-silent
///     └── NullSink   — records activity for tests
/// ```
///
/// The sink is injected, never ambient: callers that cannot or do not want
/// to produce sound run the identical choreography against `NullSink`.
pub mod output;
pub mod waves;

// Re-export commonly used types
pub use board::SoundBoard;
pub use cue::Cue;
pub use output::{AudioSink, NullSink, RodioSink};
pub use waves::SAMPLE_RATE;
