/// Guarded state machine for one draw cycle
///
/// Owns the current `MachineState` plus the prize drawn for the cycle in
/// flight. Every trigger is total: fired in the wrong state it reports
/// `Transition::Ignored` and changes nothing. Wrong-state triggers are part
/// of normal operation (late timers, mashed buttons), not errors.
use crate::bank::{PrizeColor, Question};
use crate::state::machine_state::MachineState;

/// The hidden selection made at lever-pull time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    pub question: Question,
    pub color: PrizeColor,
}

/// Outcome of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Trigger accepted, machine moved to the contained state
    Applied(MachineState),

    /// Trigger fired in a state that does not honor it; nothing changed
    Ignored,
}

impl Transition {
    pub fn applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}

/// State machine for the capsule-toy draw cycle
#[derive(Debug, Default)]
pub struct DrawMachine {
    state: MachineState,
    prize: Option<Prize>,
}

impl DrawMachine {
    /// Create a machine in `Idle` with no prize held
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Get the prize drawn for the cycle in flight, if any
    pub fn prize(&self) -> Option<&Prize> {
        self.prize.as_ref()
    }

    /// Lever pulled: `Idle -> Shuffling`, storing the freshly drawn prize.
    ///
    /// The selection happens exactly once per cycle, on this edge; it stays
    /// fixed until the next accepted lever pull.
    pub fn pull_lever(&mut self, prize: Prize) -> Transition {
        match self.state {
            MachineState::Idle => {
                tracing::info!(question_id = prize.question.id, "Draw started");
                self.prize = Some(prize);
                self.set(MachineState::Shuffling)
            }
            _ => self.ignore("pull_lever"),
        }
    }

    /// Shuffle timer elapsed: `Shuffling -> Dropping`
    pub fn finish_shuffle(&mut self) -> Transition {
        match self.state {
            MachineState::Shuffling => self.set(MachineState::Dropping),
            _ => self.ignore("finish_shuffle"),
        }
    }

    /// Drop timer elapsed: `Dropping -> WaitingToOpen`
    pub fn settle_drop(&mut self) -> Transition {
        match self.state {
            MachineState::Dropping => self.set(MachineState::WaitingToOpen),
            _ => self.ignore("settle_drop"),
        }
    }

    /// Capsule clicked: `WaitingToOpen -> Revealed`
    pub fn open_capsule(&mut self) -> Transition {
        match self.state {
            MachineState::WaitingToOpen => self.set(MachineState::Revealed),
            _ => self.ignore("open_capsule"),
        }
    }

    /// Card closed: `Revealed -> Resetting`.
    ///
    /// The prize is intentionally kept; the exit animation still reads it.
    pub fn close_card(&mut self) -> Transition {
        match self.state {
            MachineState::Revealed => self.set(MachineState::Resetting),
            _ => self.ignore("close_card"),
        }
    }

    /// Clear timer elapsed: `Resetting -> Idle`, dropping the stored prize.
    pub fn clear_prize(&mut self) -> Transition {
        match self.state {
            MachineState::Resetting => {
                self.prize = None;
                self.set(MachineState::Idle)
            }
            _ => self.ignore("clear_prize"),
        }
    }

    fn set(&mut self, next: MachineState) -> Transition {
        tracing::info!(from = %self.state, to = %next, "State transition");
        self.state = next;
        Transition::Applied(next)
    }

    fn ignore(&self, trigger: &str) -> Transition {
        tracing::debug!(state = %self.state, trigger, "Trigger ignored");
        Transition::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prize() -> Prize {
        Prize {
            question: Question {
                id: 1,
                question: "q".to_string(),
                answer: "a".to_string(),
            },
            color: PrizeColor {
                fill: "rose".to_string(),
                shade: "dark-rose".to_string(),
            },
        }
    }

    #[test]
    fn test_full_cycle_transitions() {
        let mut machine = DrawMachine::new();
        assert_eq!(machine.state(), MachineState::Idle);
        assert!(machine.prize().is_none());

        assert!(machine.pull_lever(prize()).applied());
        assert_eq!(machine.state(), MachineState::Shuffling);
        assert!(machine.prize().is_some());

        assert!(machine.finish_shuffle().applied());
        assert_eq!(machine.state(), MachineState::Dropping);

        assert!(machine.settle_drop().applied());
        assert_eq!(machine.state(), MachineState::WaitingToOpen);

        assert!(machine.open_capsule().applied());
        assert_eq!(machine.state(), MachineState::Revealed);

        assert!(machine.close_card().applied());
        assert_eq!(machine.state(), MachineState::Resetting);
        // Exit animation can still read the prize
        assert!(machine.prize().is_some());

        assert!(machine.clear_prize().applied());
        assert_eq!(machine.state(), MachineState::Idle);
        assert!(machine.prize().is_none());
    }

    #[test]
    fn test_lever_ignored_outside_idle() {
        let mut machine = DrawMachine::new();
        machine.pull_lever(prize());
        let first = machine.prize().cloned();

        // Second pull mid-cycle changes nothing and never re-rolls
        assert_eq!(machine.pull_lever(prize()), Transition::Ignored);
        assert_eq!(machine.state(), MachineState::Shuffling);
        assert_eq!(machine.prize().cloned(), first);
    }

    #[test]
    fn test_open_ignored_outside_waiting() {
        let mut machine = DrawMachine::new();
        assert_eq!(machine.open_capsule(), Transition::Ignored);

        machine.pull_lever(prize());
        assert_eq!(machine.open_capsule(), Transition::Ignored);
        assert_eq!(machine.state(), MachineState::Shuffling);
    }

    #[test]
    fn test_close_ignored_outside_revealed() {
        let mut machine = DrawMachine::new();
        assert_eq!(machine.close_card(), Transition::Ignored);
        assert_eq!(machine.state(), MachineState::Idle);
    }

    #[test]
    fn test_late_timers_are_noops() {
        let mut machine = DrawMachine::new();
        // Stray timer events with no cycle in flight
        assert_eq!(machine.finish_shuffle(), Transition::Ignored);
        assert_eq!(machine.settle_drop(), Transition::Ignored);
        assert_eq!(machine.clear_prize(), Transition::Ignored);
        assert_eq!(machine.state(), MachineState::Idle);
    }

    #[test]
    fn test_prize_constant_across_cycle() {
        let mut machine = DrawMachine::new();
        machine.pull_lever(prize());
        let drawn = machine.prize().cloned().unwrap();

        machine.finish_shuffle();
        machine.settle_drop();
        machine.open_capsule();
        assert_eq!(machine.prize().cloned().unwrap(), drawn);
    }
}
