//! Gashapon trivia machine.
//!
//! A capsule-toy quiz widget: pull the lever, watch the globe shuffle, let
//! the capsule drop, open it, and read a trivia question on a flipping
//! card. Everything is a small guarded state machine plus timer
//! choreography and procedurally synthesized sound; no assets, no I/O
//! beyond the audio device.
//!
//! The engine is deliberately inert: it reads no clock and owns no output
//! device. Callers feed it gestures and `Instant`s and inject an
//! [`synth::AudioSink`], which is what makes the whole draw cycle testable
//! on fabricated time.

pub mod bank;
pub mod engine;
pub mod error;
pub mod state;
pub mod synth;
pub mod timers;
pub mod timings;
pub mod view;

pub use bank::{PrizeColor, Question, QuestionBank};
pub use engine::{EngineSnapshot, Gesture, GashaEngine};
pub use state::{DrawMachine, MachineState, Prize, Transition};
pub use synth::{AudioSink, Cue, NullSink, RodioSink, SoundBoard};
pub use timings::Timings;
