//! # Parser
//!
//! Submodule of `compiler`, which drives the single pass from tokens to
//! bytecode. Expressions go through the Pratt rule table below;
//! statements and declarations are hand-written recursive descent.

use crate::{
  chunk::{Chunk, OpCode},
  object::ObjString,
  scanner::{Scanner, Token, TokenType},
  table::Table,
  value::Value,
  Init,
};

use once_cell::sync::Lazy;
use std::rc::Rc;

use super::{Local, Locals, Precedence, LOCALS_MAX};

type ParseFn = fn(&mut Parser, bool);

pub mod compile_time_error_handlers;
pub mod emit_methods;
pub mod ops_after_get_parse_rule;
pub mod statement_methods;
pub mod variable_methods;

/// ## ParseRule
///
/// A struct which represents the parse rule, with:
///
/// - prefix: the prefix parse function
/// - infix: the infix parse function
/// - precedence: the precedence of the operator
#[derive(Default, Clone, Copy)]
pub struct ParseRule {
  pub prefix: Option<ParseFn>,
  pub infix: Option<ParseFn>,
  pub precedence: Precedence,
}

impl ParseRule {
  pub fn new(prefix: Option<ParseFn>, infix: Option<ParseFn>, precedence: Precedence) -> Self {
    Self {
      prefix,
      infix,
      precedence,
    }
  }
}

/// ## RULES
///
/// The Pratt driver table, indexed by token-kind ordinal. Token kinds
/// not listed here (keywords without expression forms, the stub tokens,
/// punctuation) keep the default empty rule, so reaching one of them in
/// expression position reports "Expect expression.".
static RULES: Lazy<[ParseRule; TokenType::VARIANT_COUNT]> = Lazy::new(|| {
  let mut rules = [ParseRule::default(); TokenType::VARIANT_COUNT];
  let entries: &[(TokenType, ParseRule)] = &[
    (
      TokenType::LeftParen,
      ParseRule::new(Some(Parser::grouping), None, Precedence::None),
    ),
    (
      TokenType::Minus,
      ParseRule::new(Some(Parser::unary), Some(Parser::binary), Precedence::Term),
    ),
    (
      TokenType::Plus,
      ParseRule::new(None, Some(Parser::binary), Precedence::Term),
    ),
    (
      TokenType::Slash,
      ParseRule::new(None, Some(Parser::binary), Precedence::Factor),
    ),
    (
      TokenType::Star,
      ParseRule::new(None, Some(Parser::binary), Precedence::Factor),
    ),
    (
      TokenType::Bang,
      ParseRule::new(Some(Parser::unary), None, Precedence::None),
    ),
    (
      TokenType::BangEqual,
      ParseRule::new(None, Some(Parser::binary), Precedence::Equality),
    ),
    (
      TokenType::EqualEqual,
      ParseRule::new(None, Some(Parser::binary), Precedence::Equality),
    ),
    (
      TokenType::Greater,
      ParseRule::new(None, Some(Parser::binary), Precedence::Comparison),
    ),
    (
      TokenType::GreaterEqual,
      ParseRule::new(None, Some(Parser::binary), Precedence::Comparison),
    ),
    (
      TokenType::Less,
      ParseRule::new(None, Some(Parser::binary), Precedence::Comparison),
    ),
    (
      TokenType::LessEqual,
      ParseRule::new(None, Some(Parser::binary), Precedence::Comparison),
    ),
    (
      TokenType::Identifier,
      ParseRule::new(Some(Parser::variable), None, Precedence::None),
    ),
    (
      TokenType::String,
      ParseRule::new(Some(Parser::string), None, Precedence::None),
    ),
    (
      TokenType::Number,
      ParseRule::new(Some(Parser::number), None, Precedence::None),
    ),
    (
      TokenType::And,
      ParseRule::new(None, Some(Parser::and_), Precedence::And),
    ),
    (
      TokenType::Or,
      ParseRule::new(None, Some(Parser::or_), Precedence::Or),
    ),
    (
      TokenType::False,
      ParseRule::new(Some(Parser::literal), None, Precedence::None),
    ),
    (
      TokenType::Nil,
      ParseRule::new(Some(Parser::literal), None, Precedence::None),
    ),
    (
      TokenType::True,
      ParseRule::new(Some(Parser::literal), None, Precedence::None),
    ),
  ];
  for &(token_type, rule) in entries {
    rules[token_type as usize] = rule;
  }
  rules
});

/// ## Parser
///
/// Owns everything the single pass needs: the scanner, the chunk being
/// written, the intern table (borrowed from the VM for the duration of
/// the compile), the two tokens in flight and the error state.
#[derive(Default)]
pub struct Parser {
  /// Chunk used for compiling.
  pub(crate) chunk: Chunk,
  /// Scanner in parser.
  pub(crate) scanner: Scanner,
  /// Interned strings, shared with the VM across compiles.
  pub(crate) strings: Table<Rc<ObjString>>,
  /// Current token.
  pub(crate) current: Token,
  /// Previous token.
  pub(crate) previous: Token,
  /// If had error.
  pub(crate) had_error: bool,
  /// If in panic mode.
  pub(crate) panic_mode: bool,
  /// Local variables and scope depth.
  pub(crate) locals: Locals,
}

impl Init for Parser {}

impl Parser {
  /// Bind a parser to the source code, taking over the intern table.
  pub fn bind(source: String, strings: Table<Rc<ObjString>>) -> Self {
    Self {
      scanner: Scanner::bind(source),
      strings,
      ..Default::default()
    }
  }

  /// Compile the bound source into the chunk.
  ///
  /// Returns `false` if any syntax error was reported; the chunk may
  /// still be partially populated and must not be executed then.
  pub fn compile(&mut self) -> bool {
    self.advance_token();
    while !self.match_token(TokenType::Eof) {
      self.declaration();
    }
    self.end_compiler();
    !self.had_error
  }

  /// Hand the chunk and the intern table back.
  pub fn finish(self) -> (Chunk, Table<Rc<ObjString>>) {
    (self.chunk, self.strings)
  }
}

impl Parser {
  /// This function starts at the current token,
  /// then parses any expression at the given precedence level or higher.
  pub(crate) fn parse_precedence(&mut self, precedence: Precedence) {
    // if it's valid to operate `assign`
    let can_assign = precedence <= Precedence::Assignment;

    // look up `prefix parser` for the `current` token
    self.advance_token();
    let Some(prefix_rule) = self.get_rule(self.previous.token_type).prefix else {
      self.error("Expect expression.");
      return;
    };
    prefix_rule(self, can_assign);

    // look for `infix parser` for the `next` token.
    while precedence <= self.get_rule(self.current.token_type).precedence {
      self.advance_token();
      match self.get_rule(self.previous.token_type).infix {
        Some(infix_rule) => infix_rule(self, can_assign),
        // no infix rule, so we are done
        None => break,
      }
    }

    // Deal with invalid assignment.
    // (E.g. => {...}; a + b = c * d;)
    if can_assign && self.match_token(TokenType::Equal) {
      self.error("Invalid assignment target.");
    }
  }

  pub(crate) fn get_rule(&self, token_type: TokenType) -> ParseRule {
    RULES[token_type as usize]
  }
}

impl Parser {
  /// Activate parser, move to next token (one step).
  ///
  /// It asks the scanner for the next token and stores it for later use.
  ///
  /// Before doing that, it takes the old current token and stashes that in a previous field.
  pub(crate) fn advance_token(&mut self) {
    self.previous = self.current.clone();
    loop {
      self.current = self.scanner.scan_token();
      if self.current.token_type != TokenType::Error {
        break;
      }
      let message = self.current.lexeme.clone();
      self.error_at_current(&message);
    }
  }

  /// Try consuming current(last) token, if can't, report the error.
  pub(crate) fn consume_token(&mut self, token_type: TokenType, message: &str) {
    if self.current.token_type == token_type {
      self.advance_token();
    } else {
      self.error_at_current(message);
    }
  }

  /// Check if current token has the same type with expected.
  pub(crate) fn check_token(&self, expected_type: TokenType) -> bool {
    self.current.token_type == expected_type
  }

  /// Execute `check_token`.
  ///
  /// If true, advance token with true returned.
  ///
  /// Else, directly return false.
  pub(crate) fn match_token(&mut self, expected_type: TokenType) -> bool {
    if !self.check_token(expected_type) {
      false
    } else {
      self.advance_token();
      true
    }
  }

  /// Parse the expression.
  pub(crate) fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  /// Step into a block.
  pub(crate) fn begin_scope(&mut self) {
    self.locals.scope_depth += 1;
  }

  /// Step out of a block, popping the locals that die with it.
  pub(crate) fn end_scope(&mut self) {
    self.locals.scope_depth -= 1;
    while self
      .locals
      .locals
      .last()
      .map_or(false, |local| local.depth > self.locals.scope_depth)
    {
      // lifetime of local variable ends here, call pop instruction
      self.emit_byte(OpCode::Pop as u8);
      self.locals.locals.pop();
    }
  }

  /// Parse contents in a block.
  pub(crate) fn block(&mut self) {
    while !self.check_token(TokenType::RightBrace) && !self.check_token(TokenType::Eof) {
      self.declaration();
    }
    self.consume_token(TokenType::RightBrace, "Expect '}' after block.");
  }

  /// Try matching current token as a declaration.
  pub(crate) fn declaration(&mut self) {
    if self.match_token(TokenType::Var) {
      self.var_declaration();
    } else {
      self.statement();
    }
    if self.panic_mode {
      self.synchronize();
    }
  }

  /// Try matching current token as a statement.
  pub(crate) fn statement(&mut self) {
    if self.match_token(TokenType::Print) {
      self.print_statement();
    } else if self.match_token(TokenType::If) {
      self.if_statement();
    } else if self.match_token(TokenType::While) {
      self.while_statement();
    } else if self.match_token(TokenType::For) {
      self.for_statement();
    } else if self.match_token(TokenType::LeftBrace) {
      self.begin_scope();
      self.block();
      self.end_scope();
    } else {
      self.expression_statement();
    }
  }
}

impl Parser {
  /// Append a constant to the pool; the index must fit in one byte.
  pub(crate) fn make_constant(&mut self, value: Value) -> u8 {
    let index = self.chunk.add_constant(value);
    if index > u8::MAX as usize {
      self.error("Too many constants in one chunk.");
      return 0;
    }
    index as u8
  }

  /// Find-or-add a string constant: the same interned handle always
  /// resolves to the same pool index.
  pub(crate) fn string_constant(&mut self, handle: Rc<ObjString>) -> u8 {
    let existing = self
      .chunk
      .constants
      .values
      .iter()
      .position(|value| matches!(value, Value::Str(s) if Rc::ptr_eq(s, &handle)));
    match existing {
      Some(index) => index as u8,
      None => self.make_constant(Value::Str(handle)),
    }
  }
}
