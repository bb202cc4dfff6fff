/// Machine lifecycle state
///
/// Exactly one state is active at any instant and every transition between
/// them is explicit. `Resetting` is the card exit phase: the user already
/// closed the card, but the drawn prize stays readable until the exit
/// animation finishes.

/// State of the capsule-toy machine
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MachineState {
    /// Lever armed, nothing drawn
    Idle,

    /// Globe churning, prize already selected but hidden
    Shuffling,

    /// Capsule falling toward the tray
    Dropping,

    /// Capsule settled, waiting for the open gesture
    WaitingToOpen,

    /// Card on screen showing the drawn question
    Revealed,

    /// Card closing; prize still readable for the exit animation
    Resetting,
}

impl MachineState {
    /// Check whether the lever gesture is honored in this state
    pub fn accepts_lever(&self) -> bool {
        matches!(self, MachineState::Idle)
    }

    /// Check whether the capsule-open gesture is honored in this state
    pub fn accepts_open(&self) -> bool {
        matches!(self, MachineState::WaitingToOpen)
    }

    /// Check whether a drawn prize is held in this state
    pub fn holds_prize(&self) -> bool {
        !matches!(self, MachineState::Idle)
    }

    /// Check whether the shuffle loop should be sounding
    pub fn is_shuffling(&self) -> bool {
        matches!(self, MachineState::Shuffling)
    }

    /// Get a human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            MachineState::Idle => "Idle",
            MachineState::Shuffling => "Shuffling",
            MachineState::Dropping => "Dropping",
            MachineState::WaitingToOpen => "Waiting to open",
            MachineState::Revealed => "Revealed",
            MachineState::Resetting => "Resetting",
        }
    }
}

impl Default for MachineState {
    fn default() -> Self {
        MachineState::Idle
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(MachineState::Idle.accepts_lever());
        assert!(!MachineState::Shuffling.accepts_lever());
        assert!(!MachineState::Resetting.accepts_lever());

        assert!(MachineState::WaitingToOpen.accepts_open());
        assert!(!MachineState::Dropping.accepts_open());

        assert!(!MachineState::Idle.holds_prize());
        assert!(MachineState::Shuffling.holds_prize());
        assert!(MachineState::Resetting.holds_prize());

        assert!(MachineState::Shuffling.is_shuffling());
        assert!(!MachineState::Dropping.is_shuffling());
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(MachineState::default(), MachineState::Idle);
    }

    #[test]
    fn test_display() {
        assert_eq!(MachineState::WaitingToOpen.to_string(), "Waiting to open");
    }
}
