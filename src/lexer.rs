/// One-based line and column of a byte in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub usize, pub usize);

impl Pos {
    pub fn start() -> Pos {
        Pos(1, 1)
    }

    pub fn line(&self) -> usize {
        self.0
    }

    pub fn column(&self) -> usize {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: Pos,
    pub end: Pos,
    pub lexeme: String,
}

/// Splits text into candidate words.
///
/// A candidate is a run of ASCII letters that may also contain apostrophes
/// after its first byte. Runs longer than the configured maximum and runs
/// touching a digit are skipped without being emitted.
#[derive(Debug)]
pub struct Lexer {
    text: Vec<u8>,
    offset: usize,
    line: usize,
    col: usize,
    max_word_length: usize,
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new<T: Into<Vec<u8>>>(text: T, max_word_length: usize) -> Lexer {
        let Pos(line, col) = Pos::start();
        Lexer {
            text: text.into(),
            offset: 0,
            line,
            col,
            max_word_length,
        }
    }

    fn pos(&self) -> Pos {
        Pos(self.line, self.col)
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        // Positions saturate instead of wrapping.
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.col = 1;
        } else {
            self.col = self.col.saturating_add(1);
        }
        Some(byte)
    }

    fn next_token(&mut self) -> Option<Token> {
        let mut start = self.pos();
        let mut start_offset = self.offset;
        let mut len = 0;

        loop {
            let Some(byte) = self.peek() else {
                return (len > 0).then(|| self.token(start, start_offset));
            };

            if byte.is_ascii_alphabetic() || (byte == b'\'' && len > 0) {
                if len == 0 {
                    start = self.pos();
                    start_offset = self.offset;
                }
                self.next_byte();
                len += 1;
                if len > self.max_word_length {
                    // The byte ending the discarded run is dropped with it.
                    while matches!(self.next_byte(), Some(b) if b.is_ascii_alphabetic()) {}
                    len = 0;
                }
            } else if byte.is_ascii_digit() {
                self.next_byte();
                while matches!(self.next_byte(), Some(b) if b.is_ascii_alphanumeric()) {}
                len = 0;
            } else if len > 0 {
                let token = self.token(start, start_offset);
                self.next_byte();
                return Some(token);
            } else {
                self.next_byte();
            }
        }
    }

    fn token(&self, start: Pos, start_offset: usize) -> Token {
        Token {
            start,
            end: self.pos(),
            lexeme: self.text[start_offset..self.offset]
                .iter()
                .map(|&b| b as char)
                .collect(),
        }
    }
}
