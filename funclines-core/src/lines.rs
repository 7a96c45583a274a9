//! Byte offset to line number mapping

/// Start offsets of every line in a text
///
/// Line `n` (1-based) spans `starts[n - 1]..starts[n]`, newline included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines (a trailing newline opens an empty last line)
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-based line holding `offset`
    ///
    /// Offsets at or past the end of the text map to the last line.
    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        self.starts.partition_point(|&start| start <= offset) as u32
    }

    /// Offset of the first byte of a 1-based line
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let idx = (line as usize).checked_sub(1)?;
        self.starts.get(idx).copied()
    }
}
