//! # Character scanner
//!
//! A read/unread cursor over a bounded range of document text. Rules drive the
//! scanner one `char` at a time and push characters back when a match fails.
//!
//! The scanner owns the whole document text even though it only reads inside
//! `[range_start, range_end)`: rules may probe characters before the range
//! start (a code span checks for a preceding backslash) and the column and
//! line of the first position are computed from the real line start.
//!
//! The scanner also records its lookahead horizon: the end of the furthest
//! text examined since the last [`CharacterScanner::reset_horizon`], counting
//! failed rule attempts. Incremental re-partitioning uses it to find the first
//! token whose outcome an edit can change.

use std::cell::Cell;

use crate::document::LEGAL_LINE_DELIMITERS;

/// Snapshot of a scanner position. Restoring a mark restores offset, column
/// and line exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub offset: usize,
    pub column: usize,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct CharacterScanner<'a> {
    text: &'a str,
    range_start: usize,
    range_end: usize,
    pos: usize,
    column: usize,
    line: usize,
    horizon: Cell<usize>,
}

impl<'a> CharacterScanner<'a> {
    /// Scanner over the whole of `text`.
    pub fn new(text: &'a str) -> Self {
        Self::with_range(text, 0, text.len())
    }

    /// Scanner over `length` bytes of `text` starting at `offset`.
    ///
    /// # Panics
    /// When the range leaves `text` or splits a character.
    pub fn with_range(text: &'a str, offset: usize, length: usize) -> Self {
        let mut scanner = Self {
            text,
            range_start: 0,
            range_end: 0,
            pos: 0,
            column: 0,
            line: 0,
            horizon: Cell::new(0),
        };
        scanner.set_range(offset, length);
        scanner
    }

    /// Restarts the scanner on a new range of the same text.
    ///
    /// # Panics
    /// When the range leaves the text or splits a character.
    pub fn set_range(&mut self, offset: usize, length: usize) {
        let end = offset
            .checked_add(length)
            .filter(|end| *end <= self.text.len());
        let Some(end) = end else {
            panic!(
                "scan range {offset}+{length} outside text of length {}",
                self.text.len()
            );
        };
        assert!(
            self.text.is_char_boundary(offset) && self.text.is_char_boundary(end),
            "scan range {offset}..{end} splits a character"
        );

        self.range_start = offset;
        self.range_end = end;
        self.pos = offset;
        self.column = column_at(self.text, offset);
        self.line = line_at(self.text, offset);
        self.horizon.set(offset);
    }

    /// Reads the next character, or `None` at the end of the range.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\r' {
            // whether this `\r` ends the line depends on the next byte
            self.extend_horizon(self.pos + 1);
        }
        if self.ends_line_at(self.pos - c.len_utf8()) {
            self.column = 0;
            self.line += 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Moves back by one character, restoring column and line.
    ///
    /// # Panics
    /// When already at the start of the document.
    pub fn unread(&mut self) {
        let Some(c) = self.peek_back() else {
            panic!("unread past the start of the document");
        };
        self.pos -= c.len_utf8();
        if self.ends_line_at(self.pos) {
            self.line -= 1;
            self.column = column_at(self.text, self.pos);
        } else {
            self.column = self.column.saturating_sub(1);
        }
    }

    /// Column of the character about to be read: the number of characters
    /// read since the start of the current line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Zero-based line of the character about to be read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of the character about to be read.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn range_start(&self) -> usize {
        self.range_start
    }

    pub fn range_end(&self) -> usize {
        self.range_end
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.range_end
    }

    /// The next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        let c = self.text[self.pos..self.range_end].chars().next();
        match c {
            Some(c) => self.extend_horizon(self.pos + c.len_utf8()),
            None => self.extend_horizon(self.range_end + 1),
        }
        c
    }

    /// The character before the current position, which may lie before the
    /// range start. `None` only at the start of the document.
    pub fn peek_back(&self) -> Option<char> {
        self.text[..self.pos].chars().next_back()
    }

    pub fn mark(&self) -> Mark {
        Mark {
            offset: self.pos,
            column: self.column,
            line: self.line,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        debug_assert!(mark.offset <= self.range_end);
        self.pos = mark.offset;
        self.column = mark.column;
        self.line = mark.line;
    }

    pub fn legal_line_delimiters(&self) -> &'static [&'static str] {
        LEGAL_LINE_DELIMITERS
    }

    /// Text between `mark` and the current position.
    pub fn consumed_since(&self, mark: Mark) -> &'a str {
        &self.text[mark.offset..self.pos]
    }

    /// All document text before the current position, ignoring the range.
    pub fn preceding_text(&self) -> &'a str {
        &self.text[..self.pos]
    }

    /// True if the unread part of the range starts with `sequence`.
    pub fn looking_at(&self, sequence: &str) -> bool {
        let end = self.pos + sequence.len();
        if end > self.range_end {
            self.extend_horizon(self.range_end + 1);
            return false;
        }
        self.extend_horizon(end);
        self.text[self.pos..self.range_end].starts_with(sequence)
    }

    /// End of the furthest text examined since the last reset. A value past
    /// [`Self::range_end`] means the end of the range itself was observed.
    pub fn horizon(&self) -> usize {
        self.horizon.get()
    }

    pub fn reset_horizon(&mut self) {
        self.horizon.set(self.pos);
    }

    fn extend_horizon(&self, end: usize) {
        if end > self.horizon.get() {
            self.horizon.set(end);
        }
    }

    /// Consumes `sequence` if the unread part of the range starts with it.
    pub fn consume(&mut self, sequence: &str) -> bool {
        if !self.looking_at(sequence) {
            return false;
        }
        for _ in sequence.chars() {
            self.read();
        }
        true
    }

    /// Given that `c` was just read, reports whether it starts a line
    /// delimiter. The `\n` of a `\r\n` pair is consumed as well.
    pub fn finish_line_delimiter(&mut self, c: char) -> bool {
        match c {
            '\n' => true,
            '\r' => {
                if self.peek() == Some('\n') {
                    self.read();
                }
                true
            }
            _ => false,
        }
    }

    /// A `\n` always ends a line; a `\r` ends one unless a `\n` follows.
    fn ends_line_at(&self, offset: usize) -> bool {
        match self.text.as_bytes().get(offset) {
            Some(b'\n') => true,
            Some(b'\r') => self.text.as_bytes().get(offset + 1) != Some(&b'\n'),
            _ => false,
        }
    }
}

/// Characters between the start of the line containing `offset` and `offset`.
fn column_at(text: &str, offset: usize) -> usize {
    let before = &text[..offset];
    let line_start = before
        .rfind(['\n', '\r'])
        .map(|i| {
            // `\r` directly before `offset` with a `\n` at `offset` is mid-delimiter
            if before.as_bytes()[i] == b'\r' && text.as_bytes().get(i + 1) == Some(&b'\n') {
                before[..i].rfind(['\n', '\r']).map_or(0, |j| j + 1)
            } else {
                i + 1
            }
        })
        .unwrap_or(0);
    before[line_start..].chars().count()
}

/// Zero-based line containing `offset`, counting `\n`, `\r\n` and a lone `\r`
/// as one delimiter each.
pub(crate) fn line_at(text: &str, offset: usize) -> usize {
    let bytes = &text.as_bytes()[..offset];
    bytes
        .iter()
        .enumerate()
        .filter(|(i, b)| match b {
            b'\n' => true,
            b'\r' => text.as_bytes().get(i + 1) != Some(&b'\n'),
            _ => false,
        })
        .count()
}
