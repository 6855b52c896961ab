use crate::Location;
use logos::Logos;

/// The primitive lexemes matched by [`logos`]. The two composite address
/// markers are assembled from these by the [`Lexer`](super::Lexer): logos
/// commits to a pattern without backtracking, so a multi-word regex like the
/// period range would swallow ordinary content words before failing. The one
/// same-span overlap left here is a `000000001` line, which both `StartPage`
/// and `LineNo` match in full; the explicit priority awards it to
/// `StartPage`.
#[derive(Debug, PartialEq, Eq, Logos, Clone, Copy)]
pub(crate) enum RawKind {
    #[regex(r"\s*000000001\n", priority = 20)]
    StartPage,

    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"[0-9]+")]
    Number,

    /// A trailing per-line line-number stamp, newline included.
    #[regex(r"\s*[0-9]+\n")]
    LineNo,

    /// A run of printable characters, digits and whitespace excluded.
    #[regex(r"[\x21-\x2f\x3a-\x7e]+")]
    Text,

    #[error]
    Error,
}

/// The token kinds of the dump format. `StartAddress` and `EndAddress` are
/// recognized over runs of primitive lexemes and surface as single tokens
/// spanning the whole marker.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    /// A line containing only the page-start stamp.
    StartPage,
    /// A period range like `Period 3, 2011 to Period 4, 2011`, marking the
    /// start of an embedded mailing-address block.
    StartAddress,
    /// The asterisk-framed divider closing an address block.
    EndAddress,
    Whitespace,
    Number,
    /// A trailing per-line line-number stamp, newline included.
    LineNo,
    Text,
}

/// One token of the input: its kind, the exact matched slice, and where the
/// slice starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'source> {
    pub kind: TokenKind,
    pub text: &'source str,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl<'source> Token<'source> {
    pub fn location(&self) -> Location {
        (self.line, self.column).into()
    }
}
