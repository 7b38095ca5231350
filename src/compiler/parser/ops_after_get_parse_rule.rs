use super::*;

impl Parser {
  pub(crate) fn number(&mut self, _can_assign: bool) {
    match self.previous.lexeme.parse::<f64>() {
      Ok(value) => self.emit_constant(Value::Number(value)),
      Err(_) => self.error("Invalid number literal."),
    }
  }

  pub(crate) fn string(&mut self, _can_assign: bool) {
    // strip the surrounding quotes
    let len = self.previous.lexeme.len();
    let handle = self.strings.intern(&self.previous.lexeme[1..len - 1]);
    let constant_index = self.string_constant(handle);
    self.emit_bytes(&[OpCode::Constant as u8, constant_index]);
  }

  pub(crate) fn variable(&mut self, can_assign: bool) {
    self.named_variable(can_assign);
  }

  pub(crate) fn named_variable(&mut self, can_assign: bool) {
    let (arg, get_op, set_op) = match self.resolve_local() {
      Some(slot) => (slot as u8, OpCode::GetLocal, OpCode::SetLocal),
      None => (
        self.identifier_constant(),
        OpCode::GetGlobal,
        OpCode::SetGlobal,
      ),
    };
    if can_assign && self.match_token(TokenType::Equal) {
      self.expression();
      self.emit_bytes(&[set_op as u8, arg]);
    } else {
      self.emit_bytes(&[get_op as u8, arg]);
    }
  }

  pub(crate) fn grouping(&mut self, _can_assign: bool) {
    self.expression();
    self.consume_token(TokenType::RightParen, "Expect ')' after expression.");
  }

  pub(crate) fn unary(&mut self, _can_assign: bool) {
    let operator_type = self.previous.token_type;

    // Compile the operand
    self.parse_precedence(Precedence::Unary);

    // Emit the operator instruction
    match operator_type {
      TokenType::Bang => self.emit_byte(OpCode::Not as u8),
      TokenType::Minus => self.emit_byte(OpCode::Negate as u8),
      _ => self.error("Unknown unary operator."),
    }
  }

  pub(crate) fn binary(&mut self, _can_assign: bool) {
    let operator_type = self.previous.token_type;
    let rule = self.get_rule(operator_type);
    self.parse_precedence(rule.precedence.next());

    // `a >= b` lowers to `!(a < b)`, and `<=` likewise.
    match operator_type {
      TokenType::Plus => self.emit_byte(OpCode::Add as u8),
      TokenType::Minus => self.emit_byte(OpCode::Subtract as u8),
      TokenType::Star => self.emit_byte(OpCode::Multiply as u8),
      TokenType::Slash => self.emit_byte(OpCode::Divide as u8),
      TokenType::BangEqual => self.emit_bytes(&[OpCode::Equal as u8, OpCode::Not as u8]),
      TokenType::EqualEqual => self.emit_byte(OpCode::Equal as u8),
      TokenType::Greater => self.emit_byte(OpCode::Greater as u8),
      TokenType::GreaterEqual => self.emit_bytes(&[OpCode::Less as u8, OpCode::Not as u8]),
      TokenType::Less => self.emit_byte(OpCode::Less as u8),
      TokenType::LessEqual => self.emit_bytes(&[OpCode::Greater as u8, OpCode::Not as u8]),
      _ => self.error("Unknown binary operator."),
    }
  }

  pub(crate) fn literal(&mut self, _can_assign: bool) {
    match self.previous.token_type {
      TokenType::False => self.emit_byte(OpCode::False as u8),
      TokenType::Nil => self.emit_byte(OpCode::Nil as u8),
      TokenType::True => self.emit_byte(OpCode::True as u8),
      _ => self.error("Unknown literal."),
    }
  }

  /// Short-circuit `and`: skip the right operand when the left is falsey.
  pub(crate) fn and_(&mut self, _can_assign: bool) {
    let end_jump = self.emit_jump(OpCode::JumpIfFalse as u8);

    self.emit_byte(OpCode::Pop as u8);
    self.parse_precedence(Precedence::And);

    self.patch_jump(end_jump);
  }

  /// Short-circuit `or`: keep the left operand when it is truthy.
  pub(crate) fn or_(&mut self, _can_assign: bool) {
    let else_jump = self.emit_jump(OpCode::JumpIfFalse as u8);
    let end_jump = self.emit_jump(OpCode::Jump as u8);

    self.patch_jump(else_jump);
    self.emit_byte(OpCode::Pop as u8);

    self.parse_precedence(Precedence::Or);
    self.patch_jump(end_jump);
  }
}
