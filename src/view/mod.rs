/// Presentation module
///
/// Pure rendering of an engine snapshot to terminal frames. Nothing here
/// mutates the engine; the only view-owned data is the decorative capsule
/// layout rolled once at startup.

pub mod card;
pub mod machine;

pub use card::render_card;
pub use machine::{DecoCapsule, MachineView};

use crate::engine::EngineSnapshot;
use crate::state::MachineState;

/// Render one full frame for the current snapshot.
///
/// `frame` is a monotonically increasing counter the caller bumps per
/// redraw; it drives the jitter and bounce animations without giving the
/// view any state of its own.
pub fn render_frame(view: &MachineView, snapshot: &EngineSnapshot, frame: u64) -> String {
    match snapshot.state {
        MachineState::Revealed => match &snapshot.prize {
            Some(prize) => render_card(prize, snapshot.answer_shown),
            // Unreachable by the machine's invariants, rendered benignly
            None => view.render(snapshot, frame),
        },
        _ => view.render(snapshot, frame),
    }
}

/// Status strip shown under the machine, mirroring the state.
pub fn status_line(state: MachineState) -> &'static str {
    match state {
        MachineState::Idle => "Turn the handle to draw a question!",
        MachineState::Shuffling => "Mixing up the trivia...",
        MachineState::Dropping => "Here it comes...",
        MachineState::WaitingToOpen => "Got one! Click the capsule to open it.",
        MachineState::Revealed => "Flip the card, or close it to play again.",
        MachineState::Resetting => "See you next round!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{PrizeColor, Question};
    use crate::state::Prize;

    fn snapshot(state: MachineState, with_prize: bool) -> EngineSnapshot {
        EngineSnapshot {
            state,
            prize: with_prize.then(|| Prize {
                question: Question {
                    id: 7,
                    question: "How many hearts does an octopus have?".to_string(),
                    answer: "Three.".to_string(),
                },
                color: PrizeColor {
                    fill: "sky".to_string(),
                    shade: "dark-sky".to_string(),
                },
            }),
            answer_shown: false,
        }
    }

    #[test]
    fn test_every_state_renders() {
        let view = MachineView::generate(&mut rand::rngs::mock::StepRng::new(0, 1), 8, 6);
        for state in [
            MachineState::Idle,
            MachineState::Shuffling,
            MachineState::Dropping,
            MachineState::WaitingToOpen,
            MachineState::Revealed,
            MachineState::Resetting,
        ] {
            let frame = render_frame(&view, &snapshot(state, state.holds_prize()), 0);
            assert!(!frame.is_empty());
        }
    }

    #[test]
    fn test_revealed_frame_shows_question() {
        let view = MachineView::generate(&mut rand::rngs::mock::StepRng::new(0, 1), 8, 6);
        let frame = render_frame(&view, &snapshot(MachineState::Revealed, true), 0);
        assert!(frame.contains("octopus"));
        assert!(frame.contains("#7"));
        assert!(!frame.contains("Three."));
    }

    #[test]
    fn test_rendering_is_pure() {
        let view = MachineView::generate(&mut rand::rngs::mock::StepRng::new(0, 1), 8, 6);
        let snap = snapshot(MachineState::Shuffling, true);
        assert_eq!(render_frame(&view, &snap, 3), render_frame(&view, &snap, 3));
    }
}
