//! Text cursor (C1): 1-based line/column tracking with cheap save/restore.
//!
//! Bytes are treated as opaque 8-bit values; no Unicode awareness is
//! promised or needed, since the grammar's terminals are individual bytes
//! or byte sets.

/// A fully-determining, cheaply-restorable cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// Scans a byte buffer while tracking line/column, with tab expansion.
pub struct Cursor<'a> {
    text: &'a [u8],
    tab_width: u32,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, tab_width: u32) -> Self {
        Self {
            text: text.as_bytes(),
            tab_width: tab_width.max(1),
            pos: Position::start(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos.offset >= self.text.len()
    }

    #[inline]
    pub fn current_byte(&self) -> Option<u8> {
        self.text.get(self.pos.offset).copied()
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.text[self.pos.offset.min(self.text.len())..]
    }

    /// Consume one byte, updating line/column. No-op past end of input.
    pub fn advance(&mut self) {
        let Some(byte) = self.current_byte() else {
            return;
        };
        self.pos.offset += 1;
        match byte {
            b'\t' => {
                let stop = ((self.pos.column - 1) / self.tab_width + 1) * self.tab_width + 1;
                self.pos.column = stop;
            }
            b'\n' => {
                self.pos.line += 1;
                self.pos.column = 1;
            }
            _ => {
                self.pos.column += 1;
            }
        }
    }

    #[inline]
    pub fn save(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn restore(&mut self, pos: Position) {
        self.pos = pos;
    }
}
