//! Function signature candidates (`identifier(...)`)
//!
//! Global invariants enforced:
//! - Candidates are produced in ascending start offset
//! - Identifier bytes consumed by one candidate are never re-examined
//! - Every candidate ends with a `)` at paren depth zero
//! - A `;` directly inside the outer parens abandons the candidate
//!
//! A candidate is only a lexical guess. Calls, declarations and macro
//! invocations all look like signatures here; the body extractor decides which
//! of them own a body.

use crate::lexer::LexState;
use serde::{Deserialize, Serialize};

/// How the parameter list is scanned for its closing paren
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureMode {
    /// Count every `(`, `)` and `;` byte, including ones inside literals and comments
    #[default]
    Baseline,
    /// Ignore parens and semicolons inside string/char literals and comments
    LiteralAware,
}

/// A candidate function header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    /// Offset of the first identifier byte
    pub start: usize,
    /// Offset one past the matching `)`
    pub end: usize,
    /// `text[start..end]`
    pub raw: &'a str,
}

impl<'a> Signature<'a> {
    /// Identifier preceding the parameter list
    pub fn name(&self) -> &'a str {
        match self.raw.find('(') {
            Some(idx) => &self.raw[..idx],
            None => self.raw,
        }
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Lazy iterator over the signature candidates of a text
///
/// Restartable: a fresh scanner (or a clone taken before iteration) yields the
/// same sequence.
#[derive(Debug, Clone)]
pub struct SignatureScanner<'a> {
    text: &'a str,
    pos: usize,
    mode: SignatureMode,
}

impl<'a> SignatureScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_mode(text, SignatureMode::Baseline)
    }

    pub fn with_mode(text: &'a str, mode: SignatureMode) -> Self {
        SignatureScanner { text, pos: 0, mode }
    }

    /// Current scan offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Find the offset one past the `)` matching the `(` at `open`.
    ///
    /// Returns `None` if a top-level `;` comes first or the text ends unbalanced.
    fn close_paren(&self, open: usize) -> Option<usize> {
        match self.mode {
            SignatureMode::Baseline => close_paren_baseline(self.text.as_bytes(), open),
            SignatureMode::LiteralAware => close_paren_literal_aware(self.text.as_bytes(), open),
        }
    }
}

fn close_paren_baseline(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            b';' if depth == 1 => return None,
            _ => {}
        }
        pos += 1;
    }
    None
}

fn close_paren_literal_aware(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut state = LexState::new();
    let mut pos = open + 1;
    while pos < bytes.len() {
        let step = state.step(bytes, pos);
        match step.code {
            Some(b'(') => depth += 1,
            Some(b')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            Some(b';') if depth == 1 => return None,
            _ => {}
        }
        pos += step.advance;
    }
    None
}

impl<'a> Iterator for SignatureScanner<'a> {
    type Item = Signature<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        let len = bytes.len();

        loop {
            while self.pos < len && !is_ident_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= len {
                return None;
            }

            let start = self.pos;
            while self.pos < len && is_ident_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= len || bytes[self.pos] != b'(' {
                continue;
            }

            let open = self.pos;
            match self.close_paren(open) {
                Some(end) => {
                    self.pos = end;
                    return Some(Signature {
                        start,
                        end,
                        raw: &self.text[start..end],
                    });
                }
                None => {
                    // Abandoned: resume inside the parameter list
                    self.pos = open + 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "signature/tests.rs"]
mod tests;
