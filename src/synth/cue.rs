/// Cue identifiers
///
/// One entry per procedural sound the machine can make.
use std::fmt;

/// Sound cue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Mechanical lever turn (descending sawtooth)
    Crank,

    /// Rattling capsules while the globe churns (looped)
    Shuffle,

    /// Capsule opening (descending sine)
    Pop,

    /// Card flip (filtered noise burst)
    Flip,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Crank => write!(f, "Crank"),
            Cue::Shuffle => write!(f, "Shuffle"),
            Cue::Pop => write!(f, "Pop"),
            Cue::Flip => write!(f, "Flip"),
        }
    }
}

impl Cue {
    /// Check if this cue plays as a sustained loop rather than one-shot
    pub fn is_loop(&self) -> bool {
        matches!(self, Cue::Shuffle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_display() {
        assert_eq!(Cue::Crank.to_string(), "Crank");
        assert_eq!(Cue::Shuffle.to_string(), "Shuffle");
    }

    #[test]
    fn test_only_shuffle_loops() {
        assert!(Cue::Shuffle.is_loop());
        assert!(!Cue::Crank.is_loop());
        assert!(!Cue::Pop.is_loop());
        assert!(!Cue::Flip.is_loop());
    }
}
