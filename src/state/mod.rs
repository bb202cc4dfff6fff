/// State management module
///
/// The capsule-toy machine's lifecycle: one explicit enum as the single
/// source of truth, plus the guarded machine that owns it.

pub mod draw_machine;
pub mod machine_state;

// Re-export commonly used types
pub use draw_machine::{DrawMachine, Prize, Transition};
pub use machine_state::MachineState;
