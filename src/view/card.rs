/// Reveal card rendering
///
/// The capsule morphs into a full card on reveal: question on the front,
/// answer on the back, themed with the prize color tokens.
use crate::state::Prize;

const CARD_WIDTH: usize = 38;

/// Render the revealed card, front or back.
pub fn render_card(prize: &Prize, answer_shown: bool) -> String {
    if answer_shown {
        render_back(prize)
    } else {
        render_front(prize)
    }
}

fn render_front(prize: &Prize) -> String {
    let mut out = String::new();
    push_border(&mut out);
    push_line(&mut out, "");
    push_line(&mut out, "( ? )");
    push_line(&mut out, "");
    push_line(&mut out, &format!("QUESTION #{}", prize.question.id));
    push_line(&mut out, &format!("[{}]", prize.color.fill));
    push_line(&mut out, "");
    for line in wrap(&prize.question.question, CARD_WIDTH - 6) {
        push_line(&mut out, &line);
    }
    push_line(&mut out, "");
    push_line(&mut out, "- flip to see the answer -");
    push_line(&mut out, "");
    push_border(&mut out);
    out
}

fn render_back(prize: &Prize) -> String {
    let mut out = String::new();
    push_border(&mut out);
    push_line(&mut out, "");
    push_line(&mut out, "( ! )");
    push_line(&mut out, "");
    push_line(&mut out, "THE ANSWER IS");
    push_line(&mut out, &format!("[{}]", prize.color.shade));
    push_line(&mut out, "");
    for line in wrap(&prize.question.answer, CARD_WIDTH - 6) {
        push_line(&mut out, &line);
    }
    push_line(&mut out, "");
    push_line(&mut out, "- close to play again -");
    push_line(&mut out, "");
    push_border(&mut out);
    out
}

fn push_border(out: &mut String) {
    out.push_str("   +");
    out.push_str(&"=".repeat(CARD_WIDTH));
    out.push_str("+\n");
}

fn push_line(out: &mut String, text: &str) {
    let pad = CARD_WIDTH.saturating_sub(text.chars().count());
    let left = pad / 2;
    out.push_str("   |");
    out.push_str(&" ".repeat(left));
    out.push_str(text);
    out.push_str(&" ".repeat(pad - left));
    out.push_str("|\n");
}

/// Greedy word wrap to the given width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{PrizeColor, Question};

    fn prize() -> Prize {
        Prize {
            question: Question {
                id: 4,
                question: "Which planet in our solar system rotates on its side?".to_string(),
                answer: "Uranus.".to_string(),
            },
            color: PrizeColor {
                fill: "violet".to_string(),
                shade: "dark-violet".to_string(),
            },
        }
    }

    #[test]
    fn test_front_hides_answer() {
        let front = render_card(&prize(), false);
        assert!(front.contains("QUESTION #4"));
        assert!(front.contains("rotates on its side?"));
        assert!(front.contains("[violet]"));
        assert!(!front.contains("Uranus"));
    }

    #[test]
    fn test_back_shows_answer() {
        let back = render_card(&prize(), true);
        assert!(back.contains("THE ANSWER IS"));
        assert!(back.contains("Uranus."));
        assert!(back.contains("[dark-violet]"));
        assert!(!back.contains("QUESTION #4"));
    }

    #[test]
    fn test_card_lines_have_uniform_width() {
        for frame in [render_card(&prize(), false), render_card(&prize(), true)] {
            for line in frame.lines() {
                assert_eq!(line.chars().count(), CARD_WIDTH + 5, "line: {:?}", line);
            }
        }
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six seven eight", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six seven eight");
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }
}
