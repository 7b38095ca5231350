//! # Scanner
//!
//! The scanner is responsible for:
//!
//! - reading the source code
//! - producing a stream of tokens on demand.

use crate::Init;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// ## TokenType
///
/// An enum which represents the different types of tokens.
#[repr(u8)]
#[derive(Debug, byte_enum::ByteEnum, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
  // Single-character tokens.
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,
  Colon,
  Query,
  // One or two character tokens.
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,
  PlusPlus,
  MinusMinus,
  // Literals.
  Identifier,
  String,
  Number,
  // Keywords.
  And,
  Class,
  Else,
  False,
  Fun,
  For,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,
  Loop,
  Break,
  // Specials.
  Comment,
  Error,
  Eof,
  Newline,
  Unuseful,
}

lazy_static! {
  /// Reserved words, looked up after an identifier has been consumed.
  static ref KEYWORDS: HashMap<&'static str, TokenType> = {
    let mut map = HashMap::new();
    map.insert("and", TokenType::And);
    map.insert("class", TokenType::Class);
    map.insert("else", TokenType::Else);
    map.insert("false", TokenType::False);
    map.insert("fun", TokenType::Fun);
    map.insert("for", TokenType::For);
    map.insert("if", TokenType::If);
    map.insert("nil", TokenType::Nil);
    map.insert("or", TokenType::Or);
    map.insert("print", TokenType::Print);
    map.insert("return", TokenType::Return);
    map.insert("super", TokenType::Super);
    map.insert("this", TokenType::This);
    map.insert("true", TokenType::True);
    map.insert("var", TokenType::Var);
    map.insert("while", TokenType::While);
    map.insert("loop", TokenType::Loop);
    map.insert("break", TokenType::Break);
    map
  };
}

/// ## Token
///
/// A struct which represents a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  /// The type of the token.
  pub(crate) token_type: TokenType,
  /// The line of the token.
  pub(crate) line: usize,
  /// The lexeme of the token.
  ///
  /// A lexeme is the text that the token represents.
  /// For an `Error` token it holds the diagnostic message instead.
  pub(crate) lexeme: String,
}

impl Init for Token {}

impl Default for Token {
  fn default() -> Self {
    Self {
      token_type: TokenType::Eof,
      line: 1,
      lexeme: String::new(),
    }
  }
}

impl Token {
  pub fn token_type(&self) -> TokenType {
    self.token_type
  }

  pub fn lexeme(&self) -> &str {
    &self.lexeme
  }

  pub fn line(&self) -> usize {
    self.line
  }
}

/// ## Scanner
///
/// A struct which represents a scanner.
#[derive(Debug, Default)]
pub struct Scanner {
  /// The source code.
  pub(crate) source: String,
  /// The start position of the lexeme in progress.
  pub(crate) start: usize,
  /// The current position.
  pub(crate) current: usize,
  /// The current line.
  pub(crate) line: usize,
}

impl Scanner {
  /// Scan the next significant token.
  ///
  /// Comments, newlines and blank characters re-enter the loop;
  /// everything else (including `Error` tokens) is handed out.
  pub fn scan_token(&mut self) -> Token {
    loop {
      self.start = self.current;

      if self.is_at_end() {
        return self.make_token(TokenType::Eof);
      }

      let c = self.advance();

      if let Some(token_type) = self.lexeme_type(c) {
        match token_type {
          TokenType::Comment => self.consume_line(),
          TokenType::Newline => self.line += 1,
          TokenType::Unuseful => {}
          TokenType::String => return self.string(),
          _ => return self.make_token(token_type),
        }
      } else if c.is_ascii_digit() {
        return self.number();
      } else if is_ident_start(c) {
        return self.identifier();
      } else {
        return self.error_token("Unexpected character.");
      }
    }
  }

  /// Resolve a lexeme to its token type, longest match first:
  /// a two-character lexeme wins over its one-character prefix.
  fn lexeme_type(&mut self, c: u8) -> Option<TokenType> {
    if let Some(token_type) = two_char_lexeme(c, self.peek()) {
      self.current += 1;
      return Some(token_type);
    }
    one_char_lexeme(c)
  }
}

impl Scanner {
  /// Make a token, specifically from `string`.
  fn string(&mut self) -> Token {
    // Try finding the closing quote.
    while self.peek() != b'"' && !self.is_at_end() {
      if self.peek() == b'\n' {
        self.line += 1;
      }
      self.advance();
    }

    // Cannot find the closing quote.
    if self.is_at_end() {
      return self.error_token("Unterminated string.");
    }

    self.advance();
    self.make_token(TokenType::String)
  }

  /// Make a token, specifically from `number`.
  fn number(&mut self) -> Token {
    while self.peek().is_ascii_digit() {
      self.advance();
    }

    // Seeking for a fractional part
    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      // Consume the "."
      self.advance();

      // Consume the fractional part
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenType::Number)
  }

  /// Make a token, specifically from `identifier` (or a keyword).
  fn identifier(&mut self) -> Token {
    while is_ident_char(self.peek()) {
      self.advance();
    }

    let lexeme = &self.source[self.start..self.current];
    match KEYWORDS.get(lexeme) {
      Some(&keyword) => self.make_token(keyword),
      None => self.make_token(TokenType::Identifier),
    }
  }

  /// Consume the rest of the line (after a `//` comment marker).
  fn consume_line(&mut self) {
    while self.peek() != b'\n' && !self.is_at_end() {
      self.advance();
    }
  }
}

impl Scanner {
  /// Make a token.
  fn make_token(&self, token_type: TokenType) -> Token {
    Token {
      token_type,
      line: self.line,
      lexeme: self.source[self.start..self.current].to_owned(),
    }
  }

  /// Make an error token; the lexeme carries the message.
  fn error_token(&self, message: &str) -> Token {
    Token {
      token_type: TokenType::Error,
      line: self.line,
      lexeme: message.to_owned(),
    }
  }
}

impl Scanner {
  /// Check if the scanner is at the end of the source code.
  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  /// Get current char, then advance the scanner (one step).
  fn advance(&mut self) -> u8 {
    self.current += 1;
    self.source.as_bytes()[self.current - 1]
  }

  /// Get current char, without advancing the scanner.
  fn peek(&self) -> u8 {
    if self.is_at_end() {
      return b'\0';
    }
    self.source.as_bytes()[self.current]
  }

  /// Get the next char, without advancing the scanner.
  fn peek_next(&self) -> u8 {
    if self.current + 1 >= self.source.len() {
      return b'\0';
    }
    self.source.as_bytes()[self.current + 1]
  }
}

impl Scanner {
  /// Bind a new scanner to the source code.
  #[inline]
  pub fn bind(source: String) -> Self {
    Self {
      source,
      start: 0,
      current: 0,
      line: 1,
    }
  }
}

fn two_char_lexeme(c: u8, next: u8) -> Option<TokenType> {
  let token_type = match (c, next) {
    (b'!', b'=') => TokenType::BangEqual,
    (b'=', b'=') => TokenType::EqualEqual,
    (b'>', b'=') => TokenType::GreaterEqual,
    (b'<', b'=') => TokenType::LessEqual,
    (b'+', b'+') => TokenType::PlusPlus,
    (b'-', b'-') => TokenType::MinusMinus,
    (b'/', b'/') => TokenType::Comment,
    _ => return None,
  };
  Some(token_type)
}

fn one_char_lexeme(c: u8) -> Option<TokenType> {
  let token_type = match c {
    b'(' => TokenType::LeftParen,
    b')' => TokenType::RightParen,
    b'{' => TokenType::LeftBrace,
    b'}' => TokenType::RightBrace,
    b',' => TokenType::Comma,
    b'.' => TokenType::Dot,
    b'-' => TokenType::Minus,
    b'+' => TokenType::Plus,
    b';' => TokenType::Semicolon,
    b'/' => TokenType::Slash,
    b'*' => TokenType::Star,
    b':' => TokenType::Colon,
    b'?' => TokenType::Query,
    b'!' => TokenType::Bang,
    b'=' => TokenType::Equal,
    b'>' => TokenType::Greater,
    b'<' => TokenType::Less,
    b'"' => TokenType::String,
    b' ' | b'\r' | b'\t' => TokenType::Unuseful,
    b'\n' => TokenType::Newline,
    _ => return None,
  };
  Some(token_type)
}

fn is_ident_start(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_char(c: u8) -> bool {
  is_ident_start(c) || c.is_ascii_digit()
}
