//! Function body extraction
//!
//! Global invariants enforced:
//! - Braces inside string/char literals and comments never change the depth
//! - Lexer state starts fresh for every body
//! - An unbalanced body is dropped, never reported and never an error

use crate::cancel::Interrupt;
use crate::lexer::LexState;
use serde::{Deserialize, Serialize};

/// Where the opening brace of a body may sit relative to the signature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracePlacement {
    /// `)` directly followed by `\n{`
    #[default]
    NextLine,
    /// Spaces, tabs and carriage returns around at most one newline
    Lenient,
}

/// Outcome of scanning for the brace that closes a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceMatch {
    /// Offset of the matching `}`
    Closed(usize),
    /// End of text reached with depth above zero
    Unbalanced,
    /// The interrupt fired before the scan finished
    Interrupted,
}

/// Offset of the `{` opening the body of a signature ending at `sig_end`
pub fn locate_open_brace(bytes: &[u8], sig_end: usize, placement: BracePlacement) -> Option<usize> {
    match placement {
        BracePlacement::NextLine => {
            let open = sig_end + 1;
            (bytes.get(sig_end) == Some(&b'\n') && bytes.get(open) == Some(&b'{')).then_some(open)
        }
        BracePlacement::Lenient => {
            let mut pos = skip_blanks(bytes, sig_end);
            if bytes.get(pos) == Some(&b'\n') {
                pos = skip_blanks(bytes, pos + 1);
            }
            (bytes.get(pos) == Some(&b'{')).then_some(pos)
        }
    }
}

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\r')) {
        pos += 1;
    }
    pos
}

/// Scan forward from the `{` at `open` for its matching `}`
pub fn match_brace<I: Interrupt + ?Sized>(bytes: &[u8], open: usize, interrupt: &I) -> BraceMatch {
    let mut depth = 1usize;
    let mut state = LexState::new();
    let mut pos = open + 1;

    while pos < bytes.len() {
        if interrupt.is_interrupted() {
            return BraceMatch::Interrupted;
        }
        let step = state.step(bytes, pos);
        match step.code {
            Some(b'{') => depth += 1,
            Some(b'}') => {
                depth -= 1;
                if depth == 0 {
                    return BraceMatch::Closed(pos);
                }
            }
            _ => {}
        }
        pos += step.advance;
    }

    BraceMatch::Unbalanced
}

/// Newlines strictly inside a body
///
/// Counts `\n` in `[open + 2, close)`: the newline right after `{` belongs to
/// the brace line, and the newline before `}` is the last body line's own.
/// A `\r` directly after `{` shifts the start by one so CRLF bodies count the same.
pub fn count_body_lines(bytes: &[u8], open: usize, close: usize) -> usize {
    let mut from = open + 2;
    if bytes.get(open + 1) == Some(&b'\r') {
        from += 1;
    }
    if from >= close {
        return 0;
    }
    bytes[from..close].iter().filter(|&&b| b == b'\n').count()
}
