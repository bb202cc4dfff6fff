use std::io::BufRead;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use rand::thread_rng;

use gasha_quiz::view::{render_frame, status_line, MachineView};
use gasha_quiz::{GashaEngine, Gesture, MachineState, QuestionBank, RodioSink, Timings};

const DECO_CAPSULE_COUNT: usize = 8;
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Initialize tracing for the session.
///
/// Console only: the widget keeps no files around, so there is no log
/// directory. `RUST_LOG` overrides the default `info` filter.
fn initialize_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}

fn main() -> anyhow::Result<()> {
    initialize_tracing();

    println!("===========================================");
    println!("  Gasha Quiz - capsule-toy trivia machine");
    println!("===========================================\n");

    // Broken embedded content is a startup failure, never a draw-time one
    let bank = QuestionBank::load_embedded().context("embedded question bank is invalid")?;
    tracing::info!(questions = bank.questions().len(), "Ready to draw");

    let mut rng = thread_rng();
    let view = MachineView::generate(&mut rng, DECO_CAPSULE_COUNT, bank.palette().len());
    let mut engine = GashaEngine::new(bank, Timings::default(), RodioSink::new(), rng);

    println!("Commands: [p]ull  [o]pen  [f]lip  [c]lose  [q]uit\n");

    // Stdin reader thread; gestures flow to the tick loop over a channel
    let (command_tx, command_rx) = unbounded::<Command>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            let command = match parse_command(line.trim()) {
                Some(command) => command,
                None => continue,
            };
            let quit = command == Command::Quit;
            if command_tx.send(command).is_err() || quit {
                break;
            }
        }
    });

    let mut frame: u64 = 0;
    let mut last_state = engine.state();
    draw(&view, &engine, frame);

    loop {
        let mut changed = false;
        match command_rx.recv_timeout(TICK_INTERVAL) {
            Ok(Command::Gesture(gesture)) => {
                changed |= engine.handle_gesture(gesture, Instant::now());
            }
            Ok(Command::Quit) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        changed |= engine.tick(Instant::now());

        // Animated states redraw on a cadence even without transitions
        let animating = matches!(
            engine.state(),
            MachineState::Shuffling | MachineState::WaitingToOpen
        );
        if changed || last_state != engine.state() || (animating && frame % 4 == 0) {
            draw(&view, &engine, frame);
            last_state = engine.state();
        }
        frame = frame.wrapping_add(1);
    }

    println!("\nThanks for playing!");
    Ok(())
}

/// Parsed terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Gesture(Gesture),
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "p" | "pull" => Some(Command::Gesture(Gesture::PullLever)),
        "o" | "open" => Some(Command::Gesture(Gesture::OpenCapsule)),
        "f" | "flip" => Some(Command::Gesture(Gesture::FlipCard)),
        "c" | "close" => Some(Command::Gesture(Gesture::CloseCard)),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

fn draw<S, R>(view: &MachineView, engine: &GashaEngine<S, R>, frame: u64)
where
    S: gasha_quiz::AudioSink,
    R: rand::Rng,
{
    // Clear and repaint the whole frame
    print!("\x1b[2J\x1b[H");
    println!("{}", render_frame(view, &engine.snapshot(), frame));
    println!("  {}", status_line(engine.state()));
    println!("\n  [p]ull  [o]pen  [f]lip  [c]lose  [q]uit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("p"), Some(Command::Gesture(Gesture::PullLever)));
        assert_eq!(parse_command("open"), Some(Command::Gesture(Gesture::OpenCapsule)));
        assert_eq!(parse_command("f"), Some(Command::Gesture(Gesture::FlipCard)));
        assert_eq!(parse_command("close"), Some(Command::Gesture(Gesture::CloseCard)));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command(""), None);
    }
}
