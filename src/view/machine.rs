/// Machine rendering: globe, lever, and tray
use rand::Rng;

use crate::engine::EngineSnapshot;
use crate::state::MachineState;

/// Globe window size in character cells
const GLOBE_COLS: usize = 24;
const GLOBE_ROWS: usize = 5;

/// A decorative capsule inside the globe. Visual-only: random position,
/// rotation, and palette slot, rolled once at load and kept for the
/// session.
#[derive(Debug, Clone, Copy)]
pub struct DecoCapsule {
    /// Horizontal offset within the globe, -70..70
    pub x: f32,

    /// Vertical offset within the globe, -70..70
    pub y: f32,

    /// Resting rotation in degrees
    pub rotation: f32,

    /// Index into the color palette
    pub color_index: usize,
}

/// The machine's visual identity: a fixed set of decorative capsules.
#[derive(Debug, Clone)]
pub struct MachineView {
    deco: Vec<DecoCapsule>,
}

impl MachineView {
    /// Roll `count` decorative capsules from the injected rng.
    pub fn generate<R: Rng>(rng: &mut R, count: usize, palette_len: usize) -> Self {
        let deco = (0..count)
            .map(|i| DecoCapsule {
                x: rng.gen_range(-70.0..70.0),
                y: rng.gen_range(-70.0..70.0),
                rotation: rng.gen_range(0.0..360.0),
                color_index: i % palette_len.max(1),
            })
            .collect();
        Self { deco }
    }

    pub fn deco(&self) -> &[DecoCapsule] {
        &self.deco
    }

    /// Render the machine for the given snapshot. Pure: the same snapshot
    /// and frame counter always produce the same text.
    pub fn render(&self, snapshot: &EngineSnapshot, frame: u64) -> String {
        let mut out = String::new();
        out.push_str("   .-~~~~~~~~~~~~~~~~~~~~~~~~-.\n");
        for row in self.globe_rows(snapshot.state, frame) {
            out.push_str("   |");
            out.push_str(&row);
            out.push_str("|\n");
        }
        out.push_str("   '-~~~~~~~~~~~~~~~~~~~~~~~~-'\n");
        out.push_str(&self.lever_rows(snapshot.state, frame));
        out.push_str(&self.tray_rows(snapshot, frame));
        out
    }

    fn globe_rows(&self, state: MachineState, frame: u64) -> Vec<String> {
        let mut grid = vec![vec![' '; GLOBE_COLS]; GLOBE_ROWS];
        // Glass reflection, top-left
        grid[0][2] = '_';
        grid[0][3] = '_';

        for (i, capsule) in self.deco.iter().enumerate() {
            let (mut col, mut row) = place(capsule.x, capsule.y);
            if state.is_shuffling() {
                // Chaotic motion: deterministic jitter from frame + index
                let (dx, dy) = jitter(frame, i as u64);
                col = (col as i64 + dx).rem_euclid(GLOBE_COLS as i64) as usize;
                row = (row as i64 + dy).rem_euclid(GLOBE_ROWS as i64) as usize;
            }
            grid[row][col] = capsule_glyph(capsule.rotation);
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn lever_rows(&self, state: MachineState, frame: u64) -> String {
        let knob = if state.is_shuffling() {
            // Spinning handle
            match frame % 4 {
                0 => '|',
                1 => '/',
                2 => '-',
                _ => '\\',
            }
        } else {
            '+'
        };
        let label = if state.accepts_lever() { "PULL" } else { "    " };
        format!("            .---.\n            ( {} )  {}\n            '---'\n", knob, label)
    }

    fn tray_rows(&self, snapshot: &EngineSnapshot, frame: u64) -> String {
        let slot = match (snapshot.state, &snapshot.prize) {
            (MachineState::Dropping, Some(prize)) => {
                format!("  ( {} ) ...", color_glyph(&prize.color.fill))
            }
            (MachineState::WaitingToOpen, Some(prize)) => {
                // Bounce: the capsule hops every other frame
                let hop = if frame % 2 == 0 { "(_{}_)" } else { " ({}) " };
                format!("  {}  <- open me!", hop.replace("{}", &color_glyph(&prize.color.fill).to_string()))
            }
            _ => "          ".to_string(),
        };
        format!(
            "       ._____________________.\n       | {:<20}|\n       '---------------------'\n",
            slot
        )
    }
}

/// Map a -70..70 globe offset to a grid cell.
fn place(x: f32, y: f32) -> (usize, usize) {
    let col = ((x + 70.0) / 140.0 * (GLOBE_COLS - 1) as f32) as usize;
    let row = ((y + 70.0) / 140.0 * (GLOBE_ROWS - 1) as f32) as usize;
    (col.min(GLOBE_COLS - 1), row.min(GLOBE_ROWS - 1))
}

fn jitter(frame: u64, index: u64) -> (i64, i64) {
    let h = frame
        .wrapping_mul(6364136223846793005)
        .wrapping_add(index.wrapping_mul(1442695040888963407));
    let dx = (h % 7) as i64 - 3;
    let dy = ((h >> 8) % 5) as i64 - 2;
    (dx, dy)
}

fn capsule_glyph(rotation: f32) -> char {
    if rotation < 180.0 {
        'o'
    } else {
        'O'
    }
}

/// First letter of the fill token stands in for the color.
fn color_glyph(fill: &str) -> char {
    fill.chars().next().unwrap_or('?').to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{PrizeColor, Question};
    use crate::state::Prize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snap(state: MachineState) -> EngineSnapshot {
        EngineSnapshot {
            state,
            prize: state.holds_prize().then(|| Prize {
                question: Question {
                    id: 1,
                    question: "q".to_string(),
                    answer: "a".to_string(),
                },
                color: PrizeColor {
                    fill: "rose".to_string(),
                    shade: "dark-rose".to_string(),
                },
            }),
            answer_shown: false,
        }
    }

    #[test]
    fn test_layout_is_rolled_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = MachineView::generate(&mut rng, 8, 6);
        assert_eq!(view.deco().len(), 8);
        for capsule in view.deco() {
            assert!((-70.0..70.0).contains(&capsule.x));
            assert!((-70.0..70.0).contains(&capsule.y));
            assert!(capsule.color_index < 6);
        }
    }

    #[test]
    fn test_idle_frame_is_stable_across_frames() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = MachineView::generate(&mut rng, 8, 6);
        assert_eq!(view.render(&snap(MachineState::Idle), 0), view.render(&snap(MachineState::Idle), 1));
    }

    #[test]
    fn test_shuffling_frames_jitter() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = MachineView::generate(&mut rng, 8, 6);
        let frames: Vec<String> = (0..4)
            .map(|frame| view.render(&snap(MachineState::Shuffling), frame))
            .collect();
        assert!(frames.iter().any(|f| *f != frames[0]));
    }

    #[test]
    fn test_waiting_tray_prompts_open() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = MachineView::generate(&mut rng, 8, 6);
        let frame = view.render(&snap(MachineState::WaitingToOpen), 0);
        assert!(frame.contains("open me"));
        assert!(frame.contains('R')); // rose capsule glyph
    }

    #[test]
    fn test_idle_shows_pull_label() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = MachineView::generate(&mut rng, 8, 6);
        assert!(view.render(&snap(MachineState::Idle), 0).contains("PULL"));
        assert!(!view.render(&snap(MachineState::Dropping), 0).contains("PULL"));
    }
}
