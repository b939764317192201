/// Parsing of refinement answers typed at the prompt.
///
/// The five-point scale is entered as a letter (A-E) or a digit (1-5), left to
/// right: A/1 means the left programme is strongly preferred, E/5 the right one.
use fyrank_core::Preference;

/// The 5 scale letters in order, left-strong first.
const SCALE_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Rate(Preference),
    Skip,
    Undo,
    Redo,
    Quit,
}

fn letter_to_index(c: char) -> Option<usize> {
    SCALE_LETTERS.iter().position(|&l| l == c.to_ascii_uppercase())
}

fn digit_to_index(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        d @ 1..=5 => Some(d as usize - 1),
        _ => None,
    }
}

/// Parse one line of input. Returns None if it isn't a recognised answer.
pub fn parse_answer(input: &str) -> Option<Answer> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    // Allow "B: left slightly" style echoes of the menu, but nothing else trailing.
    let rest = chars.as_str().trim();
    if !rest.is_empty() && !rest.starts_with(':') {
        return match trimmed.to_ascii_lowercase().as_str() {
            "skip" => Some(Answer::Skip),
            "undo" => Some(Answer::Undo),
            "redo" => Some(Answer::Redo),
            "quit" | "exit" => Some(Answer::Quit),
            _ => None,
        };
    }

    match first.to_ascii_lowercase() {
        's' => return Some(Answer::Skip),
        'u' => return Some(Answer::Undo),
        'r' => return Some(Answer::Redo),
        'q' => return Some(Answer::Quit),
        _ => {}
    }

    let index = letter_to_index(first).or_else(|| digit_to_index(first))?;
    Some(Answer::Rate(Preference::ALL[index]))
}
