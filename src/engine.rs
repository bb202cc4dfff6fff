/// Draw-cycle choreography
///
/// `GashaEngine` is the single place where gestures, timers, randomness,
/// and sound meet. It owns the state machine and applies the transition
/// table: gestures and due timers go in, guarded transitions plus cue side
/// effects come out. The engine never sleeps and never reads a clock; the
/// caller supplies `now`, so tests drive it on fabricated time.
use std::time::Instant;

use rand::Rng;

use crate::bank::QuestionBank;
use crate::state::{DrawMachine, MachineState, Prize};
use crate::synth::{AudioSink, SoundBoard};
use crate::timers::{TimerEvent, TimerQueue};
use crate::timings::Timings;

/// User gestures the machine responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Turn the lever to start a draw (honored only while idle)
    PullLever,

    /// Click the settled capsule (honored only while waiting)
    OpenCapsule,

    /// Toggle the revealed card between question and answer
    FlipCard,

    /// Close the revealed card and return the machine to idle
    CloseCard,
}

/// Read-only view of the engine for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub state: MachineState,
    pub prize: Option<Prize>,
    /// Whether the revealed card currently shows the answer face
    pub answer_shown: bool,
}

/// The capsule-toy engine
pub struct GashaEngine<S: AudioSink, R: Rng> {
    machine: DrawMachine,
    timers: TimerQueue,
    board: SoundBoard<S>,
    bank: QuestionBank,
    timings: Timings,
    rng: R,
    answer_shown: bool,
}

impl<S: AudioSink, R: Rng> GashaEngine<S, R> {
    pub fn new(bank: QuestionBank, timings: Timings, sink: S, rng: R) -> Self {
        Self {
            machine: DrawMachine::new(),
            timers: TimerQueue::new(),
            board: SoundBoard::new(sink),
            bank,
            timings,
            rng,
            answer_shown: false,
        }
    }

    pub fn state(&self) -> MachineState {
        self.machine.state()
    }

    pub fn prize(&self) -> Option<&Prize> {
        self.machine.prize()
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.machine.state(),
            prize: self.machine.prize().cloned(),
            answer_shown: self.answer_shown,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn board(&self) -> &SoundBoard<S> {
        &self.board
    }

    /// When the next deferred transition is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Apply a user gesture. Returns true when the machine changed.
    pub fn handle_gesture(&mut self, gesture: Gesture, now: Instant) -> bool {
        match gesture {
            Gesture::PullLever => self.pull_lever(now),
            Gesture::OpenCapsule => self.open_capsule(),
            Gesture::FlipCard => self.flip_card(),
            Gesture::CloseCard => self.close_card(now),
        }
    }

    /// Advance deferred transitions up to `now`. Returns true when the
    /// machine changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for event in self.timers.pop_due(now) {
            changed |= match event {
                TimerEvent::ShuffleFinished => self.finish_shuffle(now),
                TimerEvent::DropSettled => self.machine.settle_drop().applied(),
                TimerEvent::PrizeCleared => self.machine.clear_prize().applied(),
            };
        }
        changed
    }

    fn pull_lever(&mut self, now: Instant) -> bool {
        // Guard before drawing: an ignored pull must not consume randomness
        // or re-roll the prize in flight.
        if !self.machine.state().accepts_lever() {
            tracing::debug!(state = %self.machine.state(), "Lever pull ignored");
            return false;
        }

        let prize = Prize {
            question: self.bank.draw_question(&mut self.rng).clone(),
            color: self.bank.draw_color(&mut self.rng).clone(),
        };

        self.board.crank();
        let applied = self.machine.pull_lever(prize).applied();
        debug_assert!(applied);

        self.board.start_shuffle();
        self.timers.schedule(now, self.timings.shuffle(), TimerEvent::ShuffleFinished);
        true
    }

    fn finish_shuffle(&mut self, now: Instant) -> bool {
        if !self.machine.finish_shuffle().applied() {
            return false;
        }
        // Leaving Shuffling always silences the rattle
        self.board.stop_shuffle();
        self.timers.schedule(now, self.timings.settle(), TimerEvent::DropSettled);
        true
    }

    fn open_capsule(&mut self) -> bool {
        if !self.machine.open_capsule().applied() {
            return false;
        }
        // A freshly revealed card always starts on the question face
        self.answer_shown = false;
        self.board.pop();
        true
    }

    fn flip_card(&mut self) -> bool {
        if self.machine.state() != MachineState::Revealed {
            tracing::debug!(state = %self.machine.state(), "Flip ignored");
            return false;
        }
        self.answer_shown = !self.answer_shown;
        self.board.flip(&mut self.rng);
        true
    }

    fn close_card(&mut self, now: Instant) -> bool {
        if !self.machine.close_card().applied() {
            return false;
        }
        self.timers.schedule(now, self.timings.clear(), TimerEvent::PrizeCleared);
        true
    }
}
