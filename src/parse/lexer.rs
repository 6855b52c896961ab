use super::token::{RawKind, Token, TokenKind};
use crate::{Error, ErrorLevel, ErrorSink, ErrorType, Location};
use logos::{Lexer as LogosLexer, Logos};
use std::collections::VecDeque;

/// One slot of an assembled marker pattern, matched against a primitive
/// token.
#[derive(Clone, Copy)]
enum Slot {
    /// A word: a `Text` token of word characters, or a bare `Number`.
    Word,
    /// A `Number` token.
    Digits,
    /// A lone `,`.
    Comma,
    /// Whitespace made of spaces only, no tabs or newlines.
    Spaces,
    /// Exactly one space.
    Space,
    /// A run of asterisks.
    Asterisks,
    Exact(&'static str),
}

/// `\w+ +\d+, +\d+ +to +\w+ +\d+, +\d+`, e.g.
/// `Period 3, 2011 to Period 4, 2011`.
const START_ADDRESS: &[Slot] = &[
    Slot::Word,
    Slot::Spaces,
    Slot::Digits,
    Slot::Comma,
    Slot::Spaces,
    Slot::Digits,
    Slot::Spaces,
    Slot::Exact("to"),
    Slot::Spaces,
    Slot::Word,
    Slot::Spaces,
    Slot::Digits,
    Slot::Comma,
    Slot::Spaces,
    Slot::Digits,
];

/// `\*+ Summary of Account Activity \*+`.
const END_ADDRESS: &[Slot] = &[
    Slot::Asterisks,
    Slot::Space,
    Slot::Exact("Summary"),
    Slot::Space,
    Slot::Exact("of"),
    Slot::Space,
    Slot::Exact("Account"),
    Slot::Space,
    Slot::Exact("Activity"),
    Slot::Space,
    Slot::Asterisks,
];

fn matches_slot(token: &Token, slot: Slot) -> bool {
    match slot {
        Slot::Word => match token.kind {
            TokenKind::Number => true,
            TokenKind::Text => token
                .text
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_'),
            _ => false,
        },
        Slot::Digits => token.kind == TokenKind::Number,
        Slot::Comma => token.kind == TokenKind::Text && token.text == ",",
        Slot::Spaces => {
            token.kind == TokenKind::Whitespace && token.text.bytes().all(|b| b == b' ')
        }
        Slot::Space => token.kind == TokenKind::Whitespace && token.text == " ",
        Slot::Asterisks => token.kind == TokenKind::Text && token.text.bytes().all(|b| b == b'*'),
        Slot::Exact(word) => token.kind == TokenKind::Text && token.text == word,
    }
}

/// A lexer over the raw dump text with enough lookahead to recognize the
/// composite address markers over runs of primitive lexemes.
///
/// The running line counter is advanced only by the newlines inside
/// [`TokenKind::LineNo`] slices; the page-start marker and plain whitespace
/// never advance it. Columns are recovered by scanning backward from the
/// token's byte offset to the preceding newline.
pub struct Lexer<'source, 'sink> {
    llex: LogosLexer<'source, RawKind>,
    source: &'source str,
    /// Byte offset of the inner lexer's slice within `source`; moves forward
    /// each time scanning resumes past an illegal character.
    base: usize,
    line: usize,
    queue: VecDeque<Token<'source>>,
    sink: &'sink mut dyn ErrorSink,
}

fn column_at(source: &str, offset: usize) -> usize {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..offset].chars().count() + 1
}

impl<'source, 'sink> Lexer<'source, 'sink> {
    pub fn new(source: &'source str, sink: &'sink mut dyn ErrorSink) -> Self {
        Lexer {
            llex: RawKind::lexer(source),
            source,
            base: 0,
            line: 1,
            queue: VecDeque::new(),
            sink,
        }
    }

    /// Produces the next primitive token, reporting and skipping illegal
    /// characters on the way. Recovery skips exactly one character and
    /// rescans from the next, so a bad byte never swallows the content
    /// behind it. Lexing never aborts.
    fn next_raw(&mut self) -> Option<Token<'source>> {
        loop {
            let raw = self.llex.next()?;
            let offset = self.base + self.llex.span().start;
            let kind = match raw {
                RawKind::Error => {
                    let ch = self.source[offset..].chars().next()?;
                    let error = Error {
                        msg: format!("Illegal character {:?}", ch),
                        location: (self.line, column_at(self.source, offset)).into(),
                        r#type: ErrorType::Lex,
                        level: ErrorLevel::Warning,
                    };
                    self.sink.report(&error);
                    self.base = offset + ch.len_utf8();
                    self.llex = RawKind::lexer(&self.source[self.base..]);
                    continue;
                }
                RawKind::StartPage => TokenKind::StartPage,
                RawKind::Whitespace => TokenKind::Whitespace,
                RawKind::Number => TokenKind::Number,
                RawKind::LineNo => TokenKind::LineNo,
                RawKind::Text => TokenKind::Text,
            };
            let text = self.llex.slice();
            let token = Token {
                kind,
                text,
                line: self.line,
                column: column_at(self.source, offset),
                offset,
            };
            if kind == TokenKind::LineNo {
                self.line += text.matches('\n').count();
            }
            return Some(token);
        }
    }

    /// Ensures the queue holds at least `len` tokens. Returns `false` when
    /// the input runs out first.
    fn fill(&mut self, len: usize) -> bool {
        while self.queue.len() < len {
            match self.next_raw() {
                Some(token) => self.queue.push_back(token),
                None => return false,
            }
        }
        true
    }

    /// Matches `pattern` against the front of the queue, pulling lookahead
    /// tokens as needed. The matched tokens must be contiguous in the
    /// source; a gap left by a skipped illegal character breaks the marker.
    fn matches_pattern(&mut self, pattern: &[Slot]) -> bool {
        for (index, slot) in pattern.iter().enumerate() {
            if !self.fill(index + 1) {
                return false;
            }
            let token = self.queue[index];
            if index > 0 {
                let prev = self.queue[index - 1];
                if token.offset != prev.offset + prev.text.len() {
                    return false;
                }
            }
            if !matches_slot(&token, *slot) {
                return false;
            }
        }
        true
    }

    /// Replaces the first `len` queued tokens with a single token of `kind`
    /// spanning all of them.
    fn merge_front(&mut self, len: usize, kind: TokenKind) {
        let first = self.queue[0];
        let last = self.queue[len - 1];
        let end = last.offset + last.text.len();
        self.queue.drain(..len);
        self.queue.push_front(Token {
            kind,
            text: &self.source[first.offset..end],
            line: first.line,
            column: first.column,
            offset: first.offset,
        });
    }

    /// Collapses a marker starting at the queue front, if one is there. A
    /// failed match leaves the queued tokens to be emitted one by one, so a
    /// near-miss like a partial period range stays ordinary content.
    fn assemble_marker(&mut self) {
        let front = match self.queue.front() {
            Some(token) => *token,
            None => return,
        };
        match front.kind {
            TokenKind::Text if front.text.bytes().all(|b| b == b'*') => {
                if self.matches_pattern(END_ADDRESS) {
                    self.merge_front(END_ADDRESS.len(), TokenKind::EndAddress);
                }
            }
            TokenKind::Text | TokenKind::Number => {
                if self.matches_pattern(START_ADDRESS) {
                    self.merge_front(START_ADDRESS.len(), TokenKind::StartAddress);
                }
            }
            _ => {}
        }
    }

    pub fn peek(&mut self) -> Option<Token<'source>> {
        if self.queue.is_empty() && !self.fill(1) {
            return None;
        }
        self.assemble_marker();
        self.queue.front().copied()
    }

    #[inline]
    pub fn consume(&mut self) {
        self.queue.pop_front();
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        let token = self.peek();
        if token.is_some() {
            self.consume();
        }
        token
    }

    pub fn take(&mut self, expected: TokenKind) -> Result<Token<'source>, Error> {
        match self.peek() {
            Some(token) if token.kind == expected => {
                self.consume();
                Ok(token)
            }
            Some(token) => Err(Error {
                msg: format!(
                    "Expect {:?}, found {:?}({:?})",
                    expected, token.kind, token.text
                ),
                location: token.location(),
                r#type: ErrorType::Syntax,
                level: ErrorLevel::Error,
            }),
            None => Err(self.end_of_input()),
        }
    }

    pub fn end_of_input(&self) -> Error {
        Error {
            msg: "Unexpected end of input.".to_string(),
            location: self.end_location(),
            r#type: ErrorType::Syntax,
            level: ErrorLevel::Error,
        }
    }

    fn end_location(&self) -> Location {
        (self.line, column_at(self.source, self.source.len())).into()
    }
}
