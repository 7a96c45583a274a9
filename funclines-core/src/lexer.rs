//! Literal and comment tracking for brace and paren scans
//!
//! Global invariants enforced:
//! - `in_string` and `in_char` are never both set
//! - Neither literal flag is set while a comment flag is set
//! - Transitions depend only on the bytes seen so far (no backtracking)
//!
//! Every structural character the scanners care about (`{ } ( ) ; " ' / * \ \n`)
//! is ASCII, so stepping over the UTF-8 bytes of a `&str` never misreads a
//! multi-byte character as one of them.

/// Lexical context of the byte currently being scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexState {
    pub in_string: bool,
    pub in_char: bool,
    pub in_line_comment: bool,
    pub in_block_comment: bool,
}

/// Result of stepping the lexer over one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Number of bytes consumed (1 or 2)
    pub advance: usize,
    /// The byte at the position, when it sits in plain code and no rule consumed it
    pub code: Option<u8>,
}

impl Step {
    fn skip(advance: usize) -> Self {
        Step {
            advance,
            code: None,
        }
    }

    fn code(byte: u8) -> Self {
        Step {
            advance: 1,
            code: Some(byte),
        }
    }
}

impl LexState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_comment(&self) -> bool {
        self.in_line_comment || self.in_block_comment
    }

    pub fn in_literal(&self) -> bool {
        self.in_string || self.in_char
    }

    /// True when the next byte will be read as plain code
    pub fn is_code(&self) -> bool {
        !self.in_comment() && !self.in_literal()
    }

    /// Advance over the byte at `pos`, updating the literal/comment flags.
    ///
    /// Callers must guarantee `pos < bytes.len()`. The returned `advance` may
    /// move past the end of `bytes` (an escape as the final byte); scan loops
    /// bound themselves with `pos < len`.
    pub fn step(&mut self, bytes: &[u8], pos: usize) -> Step {
        let byte = bytes[pos];

        if self.in_comment() {
            if self.in_line_comment && byte == b'\n' {
                // Closing a line comment is zero-width: the newline itself is code.
                self.in_line_comment = false;
                return Step::code(byte);
            }
            if self.in_block_comment && byte == b'/' && pos > 0 && bytes[pos - 1] == b'*' {
                self.in_block_comment = false;
            }
            return Step::skip(1);
        }

        if self.in_literal() {
            return match byte {
                b'\\' => Step::skip(2),
                b'"' if !self.in_char => {
                    self.in_string = false;
                    Step::skip(1)
                }
                b'\'' if !self.in_string => {
                    self.in_char = false;
                    Step::skip(1)
                }
                _ => Step::skip(1),
            };
        }

        match byte {
            b'"' => {
                self.in_string = true;
                Step::skip(1)
            }
            b'\'' => {
                self.in_char = true;
                Step::skip(1)
            }
            b'/' => match bytes.get(pos + 1) {
                Some(b'/') => {
                    self.in_line_comment = true;
                    Step::skip(2)
                }
                Some(b'*') => {
                    self.in_block_comment = true;
                    Step::skip(2)
                }
                _ => Step::code(byte),
            },
            _ => Step::code(byte),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect the code bytes the lexer exposes for `src`
    fn code_bytes(src: &str) -> String {
        let bytes = src.as_bytes();
        let mut state = LexState::new();
        let mut pos = 0;
        let mut out = String::new();
        while pos < bytes.len() {
            let step = state.step(bytes, pos);
            if let Some(b) = step.code {
                out.push(b as char);
            }
            pos += step.advance;
        }
        out
    }

    #[test]
    fn test_plain_code_passes_through() {
        assert_eq!(code_bytes("a{b}c"), "a{b}c");
    }

    #[test]
    fn test_string_contents_hidden() {
        assert_eq!(code_bytes(r#"x"{}"y"#), "xy");
    }

    #[test]
    fn test_char_contents_hidden() {
        assert_eq!(code_bytes("x'}'y"), "xy");
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        assert_eq!(code_bytes(r#"a"\"}"b"#), "ab");
    }

    #[test]
    fn test_escaped_backslash_then_close() {
        assert_eq!(code_bytes(r#"a"\\"}"#), "a}");
    }

    #[test]
    fn test_double_quote_inside_char_literal() {
        assert_eq!(code_bytes(r#"'"'{"#), "{");
    }

    #[test]
    fn test_single_quote_inside_string() {
        assert_eq!(code_bytes(r#""it's"{"#), "{");
    }

    #[test]
    fn test_line_comment_ends_at_newline() {
        assert_eq!(code_bytes("a// }\nb"), "a\nb");
    }

    #[test]
    fn test_block_comment_hidden() {
        assert_eq!(code_bytes("a/* { */b"), "ab");
    }

    #[test]
    fn test_quotes_inside_comments_ignored() {
        assert_eq!(code_bytes("// it's\n{"), "\n{");
        assert_eq!(code_bytes("/* \" */}"), "}");
    }

    #[test]
    fn test_lone_slash_is_code() {
        assert_eq!(code_bytes("a/b"), "a/b");
    }

    #[test]
    fn test_trailing_escape_does_not_panic() {
        assert_eq!(code_bytes("\"\\"), "");
    }

    #[test]
    fn test_flags_mutually_exclusive() {
        let src = r#"a "s'" 'c"' // l "x
/* b 'y' */ z"#;
        let bytes = src.as_bytes();
        let mut state = LexState::new();
        let mut pos = 0;
        while pos < bytes.len() {
            pos += state.step(bytes, pos).advance;
            assert!(!(state.in_string && state.in_char));
            assert!(!(state.in_literal() && state.in_comment()));
        }
        assert!(state.is_code());
    }
}
