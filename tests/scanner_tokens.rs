use loxvm::scanner::{Scanner, Token, TokenType};

fn scan_all(source: &str) -> Vec<Token> {
  let mut scanner = Scanner::bind(source.to_owned());
  let mut tokens = Vec::new();
  loop {
    let token = scanner.scan_token();
    let eof = token.token_type() == TokenType::Eof;
    tokens.push(token);
    if eof {
      break;
    }
  }
  tokens
}

fn kinds(source: &str) -> Vec<TokenType> {
  scan_all(source)
    .into_iter()
    .map(|token| token.token_type())
    .take_while(|&kind| kind != TokenType::Eof)
    .collect()
}

#[test]
fn keywords_and_identifiers() {
  use TokenType::*;

  let source = "var value = nil; while (true) { print value; } loop break";
  #[rustfmt::skip]
  let expected = vec![
    Var, Identifier, Equal, Nil, Semicolon,
    While, LeftParen, True, RightParen, LeftBrace,
      Print, Identifier, Semicolon,
    RightBrace,
    Loop, Break,
  ];
  assert_eq!(kinds(source), expected);
}

#[test]
fn two_char_lexemes_win_over_one_char() {
  use TokenType::*;

  let source = "! != = == > >= < <= + ++ - -- ? :";
  let expected = vec![
    Bang, BangEqual, Equal, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Plus, PlusPlus,
    Minus, MinusMinus, Query, Colon,
  ];
  assert_eq!(kinds(source), expected);
}

#[test]
fn comments_and_blanks_are_skipped() {
  use TokenType::*;

  let source = "1 // the rest of this line vanishes + 2\n\t + 3 // trailing";
  assert_eq!(kinds(source), vec![Number, Plus, Number]);
}

#[test]
fn line_numbers_count_newlines() {
  let source = "one\ntwo // comment\n\nfour";
  let tokens = scan_all(source);
  let lines: Vec<usize> = tokens.iter().map(|token| token.line()).collect();
  // identifiers on lines 1, 2 and 4; EOF stays on 4
  assert_eq!(lines, vec![1, 2, 4, 4]);
}

#[test]
fn number_lexemes() {
  let tokens = scan_all("12 3.25 4.");
  assert_eq!(tokens[0].token_type(), TokenType::Number);
  assert_eq!(tokens[0].lexeme(), "12");
  assert_eq!(tokens[1].token_type(), TokenType::Number);
  assert_eq!(tokens[1].lexeme(), "3.25");
  // "4." is a number followed by a dot, not a fraction
  assert_eq!(tokens[2].token_type(), TokenType::Number);
  assert_eq!(tokens[2].lexeme(), "4");
  assert_eq!(tokens[3].token_type(), TokenType::Dot);
}

#[test]
fn string_lexeme_keeps_quotes_and_counts_lines() {
  let tokens = scan_all("\"first\nsecond\" after");
  assert_eq!(tokens[0].token_type(), TokenType::String);
  assert_eq!(tokens[0].lexeme(), "\"first\nsecond\"");
  // the embedded newline moved the scanner to line 2
  assert_eq!(tokens[1].line(), 2);
}

#[test]
fn unterminated_string_is_an_error_token() {
  let tokens = scan_all("\"never closed");
  assert_eq!(tokens[0].token_type(), TokenType::Error);
  assert_eq!(tokens[0].lexeme(), "Unterminated string.");
}

#[test]
fn unexpected_character_is_an_error_token() {
  let tokens = scan_all("@");
  assert_eq!(tokens[0].token_type(), TokenType::Error);
  assert_eq!(tokens[0].lexeme(), "Unexpected character.");
}

#[test]
fn identifiers_allow_underscores_and_digits() {
  let tokens = scan_all("_private x2 snake_case");
  assert!(tokens[..3]
    .iter()
    .all(|token| token.token_type() == TokenType::Identifier));
  assert_eq!(tokens[2].lexeme(), "snake_case");
}
