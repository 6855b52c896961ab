use despool::parse::{Lexer, TokenKind};
use despool::{Error, ErrorLevel, ErrorType};

fn kinds(input: &str) -> (Vec<TokenKind>, Vec<Error>) {
    let mut errors = Vec::new();
    let mut collected = Vec::new();
    let mut lexer = Lexer::new(input, &mut errors);
    while let Some(token) = lexer.next_token() {
        collected.push(token.kind);
    }
    (collected, errors)
}

#[test]
fn page_marker_wins_over_line_number_stamp() {
    let (tokens, errors) = kinds("000000001\n");
    assert_eq!(tokens, vec![TokenKind::StartPage]);
    assert!(errors.is_empty());
}

#[test]
fn page_marker_absorbs_leading_whitespace() {
    let (tokens, _) = kinds("\n   000000001\n");
    assert_eq!(tokens, vec![TokenKind::StartPage]);
}

#[test]
fn content_line_classification() {
    let (tokens, errors) = kinds("FOO  12 bar   7\n");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Number,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::LineNo,
        ]
    );
    assert!(errors.is_empty());
}

#[test]
fn ordinary_content_words_stay_plain_text() {
    let (tokens, errors) = kinds("GOLD RESERVE BANK   1\n");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::LineNo,
        ]
    );
    assert!(errors.is_empty());
}

#[test]
fn period_range_is_an_address_start() {
    let (tokens, _) = kinds("Period 3, 2011 to Period 4, 2011   9\n");
    assert_eq!(tokens, vec![TokenKind::StartAddress, TokenKind::LineNo]);
}

#[test]
fn wide_spacing_in_a_period_range_still_marks_an_address() {
    let (tokens, errors) = kinds("Period  3,   2011  to  Period  4,  2011 1\n");
    assert_eq!(tokens, vec![TokenKind::StartAddress, TokenKind::LineNo]);
    assert!(errors.is_empty());
}

#[test]
fn a_partial_period_range_is_not_an_address_start() {
    let (tokens, errors) = kinds("Period 3, 2011 to nowhere\n");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Number,
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Number,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::Whitespace,
        ]
    );
    assert!(errors.is_empty());
}

#[test]
fn summary_divider_is_an_address_end() {
    let (tokens, _) = kinds("*** Summary of Account Activity ***   4\n");
    assert_eq!(tokens, vec![TokenKind::EndAddress, TokenKind::LineNo]);
}

#[test]
fn a_partial_summary_divider_is_not_an_address_end() {
    let (tokens, errors) = kinds("*** Summary of Account Balance ***\n");
    assert!(!tokens.contains(&TokenKind::EndAddress));
    assert_eq!(tokens[0], TokenKind::Text);
    assert!(errors.is_empty());
}

#[test]
fn bare_asterisk_run_is_plain_text() {
    let (tokens, _) = kinds("**********");
    assert_eq!(tokens, vec![TokenKind::Text]);
}

#[test]
fn line_counter_follows_line_number_stamps() {
    let mut errors = Vec::new();
    let mut lexer = Lexer::new("a 1\nb 2\nc", &mut errors);
    let a = lexer.next_token().unwrap();
    assert_eq!((a.kind, a.line, a.column), (TokenKind::Text, 1, 1));
    let stamp = lexer.next_token().unwrap();
    assert_eq!((stamp.kind, stamp.line, stamp.column), (TokenKind::LineNo, 1, 2));
    let b = lexer.next_token().unwrap();
    assert_eq!((b.kind, b.line, b.column), (TokenKind::Text, 2, 1));
    let stamp = lexer.next_token().unwrap();
    assert_eq!(stamp.kind, TokenKind::LineNo);
    let c = lexer.next_token().unwrap();
    assert_eq!((c.kind, c.line, c.column), (TokenKind::Text, 3, 1));
    assert!(lexer.next_token().is_none());
}

#[test]
fn multi_newline_stamp_advances_the_counter_by_its_newline_count() {
    let mut errors = Vec::new();
    let mut lexer = Lexer::new("x\n\n12\nY 3\n", &mut errors);
    let x = lexer.next_token().unwrap();
    assert_eq!((x.kind, x.line), (TokenKind::Text, 1));
    let stamp = lexer.next_token().unwrap();
    assert_eq!((stamp.kind, stamp.text), (TokenKind::LineNo, "\n\n12\n"));
    let y = lexer.next_token().unwrap();
    assert_eq!((y.kind, y.line), (TokenKind::Text, 4));
}

#[test]
fn illegal_character_is_reported_and_skipped() {
    let (tokens, errors) = kinds("ok \u{0} go 1\n");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::LineNo,
        ]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].r#type, ErrorType::Lex);
    assert_eq!(errors[0].level, ErrorLevel::Warning);
    assert!(errors[0].msg.contains("Illegal character"));
}

#[test]
fn every_illegal_character_is_reported_separately() {
    let (tokens, errors) = kinds("A\u{0}\u{1}B 1\n");
    assert_eq!(
        tokens,
        vec![TokenKind::Text, TokenKind::Text, TokenKind::LineNo]
    );
    assert_eq!(errors.len(), 2);
    for error in &errors {
        assert_eq!(error.r#type, ErrorType::Lex);
        assert_eq!(error.level, ErrorLevel::Warning);
    }
}

#[test]
fn take_reports_the_expected_and_found_kinds() {
    let mut errors = Vec::new();
    let mut lexer = Lexer::new("hello 1\n", &mut errors);
    let error = lexer.take(TokenKind::StartPage).unwrap_err();
    assert_eq!(error.r#type, ErrorType::Syntax);
    assert!(error.msg.contains("StartPage"));
    assert!(error.msg.contains("Text"));
    assert_eq!(error.location, (1, 1).into());
}

#[test]
fn take_at_end_of_input_fails() {
    let mut errors = Vec::new();
    let mut lexer = Lexer::new("", &mut errors);
    let error = lexer.take(TokenKind::StartPage).unwrap_err();
    assert_eq!(error.msg, "Unexpected end of input.");
}
