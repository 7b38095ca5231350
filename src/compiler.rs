//! # Compiler
//!
//! The compiler turns source code into bytecode in a single pass:
//! tokens are pulled from the scanner and bytes are written straight
//! into the chunk, with no tree in between.

use crate::scanner::Token;

pub mod parser;

pub use parser::Parser;

/// Most local variables a single chunk can address (one byte of slot).
pub const LOCALS_MAX: usize = u8::MAX as usize + 1;

/// ## Precedence
///
/// Expression precedence levels, lowest to highest; the Pratt driver
/// climbs them.
#[repr(u8)]
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, byte_enum::ByteEnum,
)]
pub enum Precedence {
  #[default]
  None,
  Assignment,
  Or,
  And,
  Equality,
  Comparison,
  Term,
  Factor,
  Unary,
  Call,
  Primary,
}

impl Precedence {
  /// The next-higher level, used by left-associative infix parselets.
  pub fn next(self) -> Self {
    Precedence::try_from(self as u8 + 1).unwrap_or(Precedence::Primary)
  }
}

/// ## Local
///
/// A local variable known at compile time. `depth == -1` marks a
/// variable that is declared but not yet initialized.
#[derive(Debug, Clone)]
pub struct Local {
  pub(crate) name: Token,
  pub(crate) depth: i32,
}

/// ## Locals
///
/// The compile-time local-variable table: slot index here equals the
/// runtime stack offset of the variable.
#[derive(Debug, Default)]
pub struct Locals {
  pub(crate) locals: Vec<Local>,
  pub(crate) scope_depth: i32,
}
