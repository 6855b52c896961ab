use crate::parse::Parser;
use getset::{CopyGetters, Getters};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::From;
use std::fmt;
use std::fs;

/// Representing a location, line number and column number, in the input text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl From<(usize, usize)> for Location {
    fn from(tuple: (usize, usize)) -> Self {
        Location {
            line: tuple.0,
            col: tuple.1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Kinds of errors that `despool` encountered while segmenting a dump.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// IO error, e.g., the content of an input file cannot be read.
    Io,
    /// An unrecognized character sequence in the input. The offending
    /// character is skipped and scanning continues.
    Lex,
    /// A token sequence that matches no production of the segmentation
    /// grammar. Fatal to the current parse.
    Syntax,
}

/// The level of an error. A run that produced an [`ErrorLevel::Error`]
/// yields no [`Document`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// Contains the full information of an error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub msg: String,
    pub location: Location,
    pub r#type: ErrorType,
    pub level: ErrorLevel,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {}\n  {}:{}",
            self.level, self.msg, self.location.line, self.location.col
        )
    }
}

/// Receives errors reported by the lexer (recoverable) and the parser
/// (fatal). The caller decides whether to log, collect, or abort.
pub trait ErrorSink {
    fn report(&mut self, error: &Error);
}

impl ErrorSink for Vec<Error> {
    fn report(&mut self, error: &Error) {
        self.push(error.clone());
    }
}

/// One physical page of the source dump: its 1-based ordinal over the whole
/// document and its verbatim text, line-number footers included.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Page {
    /// Returns the page ordinal, strictly increasing across the document.
    #[getset(get_copy = "pub")]
    pub(crate) number: usize,

    /// Returns the reconstructed page text: every matched token slice after
    /// the page-start marker, in original order.
    #[getset(get = "pub")]
    pub(crate) text: String,
}

/// One reconstructed account statement: the pages that belong to it and the
/// mailing address that opened it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Statement {
    /// Returns the statement id, assigned sequentially starting at 1.
    #[getset(get_copy = "pub")]
    pub(crate) id: usize,

    /// Returns the number of pages in this statement.
    #[getset(get_copy = "pub")]
    pub(crate) page_count: usize,

    /// Returns the page ordinals of this statement, in encounter order.
    #[getset(get = "pub")]
    pub(crate) page_numbers: Vec<usize>,

    /// Returns the address-block text that opened this statement.
    #[getset(get = "pub")]
    pub(crate) address: String,

    /// Returns the renderer attachments. Reserved for the renderer layer;
    /// always empty after segmentation.
    #[getset(get = "pub")]
    pub(crate) attachments: Vec<String>,

    /// Returns the renderer overlay. Reserved for the renderer layer;
    /// always `None` after segmentation.
    #[getset(get = "pub")]
    pub(crate) overlay: Option<String>,
}

/// The finalized segmentation of a dump, handed to an external renderer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, CopyGetters)]
pub struct Document {
    /// Returns all pages of the dump, in order.
    #[getset(get = "pub")]
    pub(crate) pages: Vec<Page>,

    /// Returns the statements, keyed by id.
    #[getset(get = "pub")]
    pub(crate) statements: BTreeMap<usize, Statement>,

    /// Returns the address history: one entry per recognized address block,
    /// sentinel dividers included, in encounter order.
    #[getset(get = "pub")]
    pub(crate) addresses: Vec<String>,

    /// Returns the total number of pages.
    #[getset(get_copy = "pub")]
    pub(crate) total_pages: usize,

    /// Returns the total number of statements.
    #[getset(get_copy = "pub")]
    pub(crate) total_statements: usize,
}

impl Document {
    /// Segments `text` into a [`Document`]. Returns `None` if a fatal error
    /// occurred; recoverable lexer errors may accompany a valid document.
    pub fn from_text(text: &str) -> (Option<Self>, Vec<Error>) {
        let mut errors = Vec::new();
        let result = Parser::parse(text, &mut errors);
        (result.ok(), errors)
    }

    /// Reads `path` and segments its content.
    pub fn from_file(path: &str) -> (Option<Self>, Vec<Error>) {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_text(&text),
            Err(io_error) => {
                let error = Error {
                    msg: format!("Couldn't read {}: {:?}", path, io_error),
                    location: (1, 1).into(),
                    r#type: ErrorType::Io,
                    level: ErrorLevel::Error,
                };
                (None, vec![error])
            }
        }
    }
}
