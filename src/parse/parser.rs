use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::utils::is_sentinel_address;
use crate::{Document, Error, ErrorLevel, ErrorSink, ErrorType, Location, Page, Statement};
use std::collections::BTreeMap;
use std::mem;

/// The mutable aggregation state of a single parse: pages, address history,
/// statements, and the running counters. Constructed fresh per parse call
/// and finalized into an immutable [`Document`] exactly once.
#[derive(Debug, Default)]
pub struct DocumentDraft {
    pub pages: Vec<Page>,
    pub statements: BTreeMap<usize, Statement>,
    pub addresses: Vec<String>,
    pub total_pages: usize,
    pub total_statements: usize,
}

impl DocumentDraft {
    /// Appends an address entry to the history. Every recognized address
    /// block lands here, sentinel dividers included.
    pub fn push_address(&mut self, entry: String) {
        self.addresses.push(entry);
    }

    fn add_page(&mut self, text: String) -> usize {
        self.total_pages += 1;
        self.pages.push(Page {
            number: self.total_pages,
            text,
        });
        self.total_pages
    }

    /// Opens a new statement from a page whose address block holds a real
    /// mailing address.
    pub fn open_statement(&mut self, address: String, page_text: String) {
        let number = self.add_page(page_text);
        self.total_statements += 1;
        let statement = Statement {
            id: self.total_statements,
            page_count: 1,
            page_numbers: vec![number],
            address,
            attachments: Vec::new(),
            overlay: None,
        };
        self.statements.insert(statement.id, statement);
    }

    /// Folds a page into the currently open statement: plain pages and
    /// sentinel-addressed pages both continue the statement they follow.
    /// A page with no statement to continue is a fatal error.
    pub fn continue_statement(
        &mut self,
        page_text: String,
        location: Location,
    ) -> Result<(), Error> {
        if self.total_statements == 0 {
            return Err(Error {
                msg: "Page is not preceded by any addressed page.".to_string(),
                location,
                r#type: ErrorType::Syntax,
                level: ErrorLevel::Error,
            });
        }
        let number = self.add_page(page_text);
        if let Some(statement) = self.statements.get_mut(&self.total_statements) {
            statement.page_numbers.push(number);
            statement.page_count += 1;
        }
        Ok(())
    }

    pub fn finalize(self) -> Document {
        let DocumentDraft {
            pages,
            statements,
            addresses,
            total_pages,
            total_statements,
        } = self;
        Document {
            pages,
            statements,
            addresses,
            total_pages,
            total_statements,
        }
    }
}

/// A recursive-descent parser over the dump token stream.
///
/// ```text
/// document       := pagelist+
/// pagelist       := addressed_page | plain_page
/// addressed_page := STARTPAGE lines address lines
/// plain_page     := STARTPAGE lines
/// address        := begin_marker lines end_marker
/// lines          := line+
/// line           := content? LINENO
/// content        := (WHITESPACE | NUMBER | TEXT)*
/// begin_marker   := content STARTADDRESS content? LINENO
/// end_marker     := content ENDADDRESS content? LINENO
/// ```
pub struct Parser<'source, 'sink> {
    lexer: Lexer<'source, 'sink>,
    draft: DocumentDraft,
}

impl<'source, 'sink> Parser<'source, 'sink> {
    /// Segments `text` into a [`Document`]. Recoverable lexer errors are
    /// reported through `sink` and do not abort the run; a grammar error is
    /// reported through `sink`, returned, and yields no document. Empty or
    /// whitespace-only input yields an empty document.
    pub fn parse(text: &str, sink: &mut dyn ErrorSink) -> Result<Document, Error> {
        if text.trim().is_empty() {
            return Ok(DocumentDraft::default().finalize());
        }
        let mut parser = Parser {
            lexer: Lexer::new(text, &mut *sink),
            draft: DocumentDraft::default(),
        };
        let result = parser.document();
        drop(parser);
        if let Err(error) = &result {
            sink.report(error);
        }
        result
    }

    fn document(&mut self) -> Result<Document, Error> {
        // document := pagelist+, so a stream with no tokens at all (input
        // that lexed to nothing) cannot be reduced
        if self.lexer.peek().is_none() {
            return Err(self.lexer.end_of_input());
        }
        while self.lexer.peek().is_some() {
            self.parse_page()?;
        }
        Ok(mem::take(&mut self.draft).finalize())
    }

    fn unexpected(&self, token: Token) -> Error {
        Error {
            msg: format!("Unexpected token {:?}({:?}).", token.kind, token.text),
            location: token.location(),
            r#type: ErrorType::Syntax,
            level: ErrorLevel::Error,
        }
    }

    /// Collects content tokens into `out`, stopping at the first structural
    /// token without consuming it. Returns whether anything was collected.
    fn gather_content(&mut self, out: &mut String) -> bool {
        let mut any = false;
        while let Some(token) = self.lexer.peek() {
            match token.kind {
                TokenKind::Whitespace | TokenKind::Number | TokenKind::Text => {
                    out.push_str(token.text);
                    self.lexer.consume();
                    any = true;
                }
                _ => break,
            }
        }
        any
    }

    /// `pagelist := addressed_page | plain_page`. A page runs from its
    /// STARTPAGE marker to the next marker or end of input, and must close
    /// every content run with a LINENO stamp.
    fn parse_page(&mut self) -> Result<(), Error> {
        let marker = self.lexer.take(TokenKind::StartPage)?;
        let mut text = String::new();
        let mut address: Option<String> = None;
        let mut closed_lines = 0usize;
        loop {
            let dangling = self.gather_content(&mut text);
            match self.lexer.peek() {
                None => {
                    if dangling || closed_lines == 0 {
                        return Err(self.lexer.end_of_input());
                    }
                    break;
                }
                Some(token) if token.kind == TokenKind::StartPage => {
                    if dangling || closed_lines == 0 {
                        return Err(self.unexpected(token));
                    }
                    break;
                }
                Some(token) if token.kind == TokenKind::LineNo => {
                    self.lexer.consume();
                    text.push_str(token.text);
                    closed_lines += 1;
                }
                Some(token) if token.kind == TokenKind::StartAddress => {
                    // one address block per page, and at least one full
                    // line before it
                    if address.is_some() || closed_lines == 0 {
                        return Err(self.unexpected(token));
                    }
                    address = Some(self.parse_address(&mut text)?);
                    closed_lines = 0;
                }
                Some(token) => return Err(self.unexpected(token)),
            }
        }
        match address {
            Some(entry) if !is_sentinel_address(&entry) => {
                self.draft.open_statement(entry, text);
                Ok(())
            }
            _ => self.draft.continue_statement(text, marker.location()),
        }
    }

    /// `address := begin_marker lines end_marker`. The inner lines form the
    /// address entry and are appended to the history unconditionally; the
    /// full block, marker lines included, lands in `page_text`.
    fn parse_address(&mut self, page_text: &mut String) -> Result<String, Error> {
        let marker = self.lexer.take(TokenKind::StartAddress)?;
        page_text.push_str(marker.text);
        self.gather_content(page_text);
        let stamp = self.lexer.take(TokenKind::LineNo)?;
        page_text.push_str(stamp.text);

        let mut entry = String::new();
        let mut inner_lines = 0usize;
        loop {
            // a chunk belongs to the entry only if its line closes with a
            // LINENO stamp; before ENDADDRESS it is end_marker content
            let mut chunk = String::new();
            self.gather_content(&mut chunk);
            match self.lexer.peek() {
                Some(token) if token.kind == TokenKind::LineNo => {
                    self.lexer.consume();
                    chunk.push_str(token.text);
                    entry.push_str(&chunk);
                    page_text.push_str(&chunk);
                    inner_lines += 1;
                }
                Some(token) if token.kind == TokenKind::EndAddress => {
                    if inner_lines == 0 {
                        return Err(self.unexpected(token));
                    }
                    self.lexer.consume();
                    page_text.push_str(&chunk);
                    page_text.push_str(token.text);
                    self.gather_content(page_text);
                    let stamp = self.lexer.take(TokenKind::LineNo)?;
                    page_text.push_str(stamp.text);
                    self.draft.push_address(entry.clone());
                    return Ok(entry);
                }
                Some(token) => return Err(self.unexpected(token)),
                None => return Err(self.lexer.end_of_input()),
            }
        }
    }
}
