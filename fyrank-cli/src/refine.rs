/// Interactive pairwise refinement loop.
///
/// Reads answers line by line and writes prompts to `out`, so the same loop
/// runs against a terminal or a scripted input in tests.
use std::io::{self, BufRead, Write};

use fyrank_core::RefinementSession;
use tracing::info;

use crate::parse::{parse_answer, Answer};
use crate::prompt::{build_prompt, describe_outcome, format_confidence, render_neighbourhood};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub answered: usize,
    pub skipped: usize,
    /// True if the user typed `q`; false if input ran out.
    pub quit: bool,
}

pub fn run_loop<R: BufRead, W: Write>(
    session: &mut RefinementSession,
    input: R,
    out: &mut W,
) -> io::Result<LoopSummary> {
    let mut summary = LoopSummary { answered: 0, skipped: 0, quit: false };
    let mut lines = input.lines();

    loop {
        let (left, right) = session.current_matchup().clone();
        write!(out, "\n{}", render_neighbourhood(&session.neighbourhood(), &left, &right))?;
        write!(out, "\n{}> ", build_prompt(session.label(&left), session.label(&right)))?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_answer(&line) {
            Some(Answer::Rate(preference)) => {
                let outcome = session.record(preference);
                let winner = outcome.winner().map(|id| session.label(id).to_string());
                writeln!(out, "{}", describe_outcome(&outcome, winner.as_deref()))?;
                writeln!(out, "{}", format_confidence(session.confidence(), session.comparisons_made()))?;
                summary.answered += 1;
            }
            Some(Answer::Skip) => {
                session.skip();
                summary.skipped += 1;
            }
            Some(Answer::Undo) => {
                if session.undo() {
                    writeln!(out, "Undid last answer")?;
                } else {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            Some(Answer::Redo) => {
                if session.redo() {
                    writeln!(out, "Redid answer")?;
                } else {
                    writeln!(out, "Nothing to redo")?;
                }
            }
            Some(Answer::Quit) => {
                summary.quit = true;
                break;
            }
            None => {
                writeln!(out, "Please answer A-E, 1-5, s, u, r or q")?;
            }
        }
    }

    info!(
        answered = summary.answered,
        skipped = summary.skipped,
        confidence = session.confidence(),
        "refinement finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyrank_core::SessionConfig;
    use std::io::Cursor;

    fn session(ids: &[&str]) -> RefinementSession {
        RefinementSession::flat_with(ids, SessionConfig { seed: Some(1), ..SessionConfig::default() })
    }

    #[test]
    fn test_answers_are_recorded() {
        let mut s = session(&["a", "b", "c"]);
        let mut out = Vec::new();
        let summary = run_loop(&mut s, Cursor::new("A\n3\ns\nq\n"), &mut out).unwrap();

        assert_eq!(summary, LoopSummary { answered: 2, skipped: 1, quit: true });
        assert_eq!(s.comparisons_made(), 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Confidence"));
        assert!(text.contains("Recorded as a draw"));
    }

    #[test]
    fn test_undo_and_redo() {
        let mut s = session(&["a", "b", "c"]);
        let mut out = Vec::new();
        run_loop(&mut s, Cursor::new("E\nu\nu\nr\n"), &mut out).unwrap();

        assert_eq!(s.comparisons_made(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Undid last answer"));
        assert!(text.contains("Nothing to undo"));
        assert!(text.contains("Redid answer"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let mut s = session(&["a", "b"]);
        let mut out = Vec::new();
        let summary = run_loop(&mut s, Cursor::new("what\n"), &mut out).unwrap();

        assert_eq!(summary, LoopSummary { answered: 0, skipped: 0, quit: false });
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Please answer"));
    }
}
