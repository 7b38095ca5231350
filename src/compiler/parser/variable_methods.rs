use super::*;

impl Parser {
  /// Declare: bind a new variable.
  pub(crate) fn var_declaration(&mut self) {
    let global_index = self.parse_variable("Expect variable name.");

    if self.match_token(TokenType::Equal) {
      self.expression();
    } else {
      self.emit_byte(OpCode::Nil as u8);
    }

    self.consume_token(
      TokenType::Semicolon,
      "Expect ';' after variable declaration.",
    );

    self.define_variable(global_index);
  }

  fn parse_variable(&mut self, message: &str) -> u8 {
    self.consume_token(TokenType::Identifier, message);

    // record if it's a local variable (scope_depth > 0)
    self.declare_variable();

    // if in local scope, simply exit (with a fake index)
    if self.locals.scope_depth > 0 {
      return 0;
    }

    self.identifier_constant()
  }

  /// The most recent local is now safe to read.
  fn mark_initialized(&mut self) {
    if let Some(local) = self.locals.locals.last_mut() {
      local.depth = self.locals.scope_depth;
    }
  }

  fn define_variable(&mut self, global_index: u8) {
    if self.locals.scope_depth > 0 {
      self.mark_initialized();
    } else {
      self.emit_bytes(&[OpCode::DefineGlobal as u8, global_index]);
    }
  }

  /// Records the existence of variable (only for locals).
  fn declare_variable(&mut self) {
    if self.locals.scope_depth == 0 {
      return;
    }

    // Detect error => two variables with same name
    // in the same local scope.
    let mut duplicated = false;
    for local in self.locals.locals.iter().rev() {
      if local.depth != -1 && local.depth < self.locals.scope_depth {
        break;
      }
      if local.name.lexeme == self.previous.lexeme {
        duplicated = true;
        break;
      }
    }
    if duplicated {
      self.error("Already variable with this name in this scope.");
    }

    self.add_local();
  }

  fn add_local(&mut self) {
    if self.locals.locals.len() >= LOCALS_MAX {
      self.error("Too many local variables in function.");
      return;
    }
    let name = self.previous.clone();
    self.locals.locals.push(Local { name, depth: -1 });
  }

  /// Intern the previous token's lexeme and stash it in the pool.
  pub(crate) fn identifier_constant(&mut self) -> u8 {
    let handle = self.strings.intern(&self.previous.lexeme);
    self.string_constant(handle)
  }

  /// Try to find the local variable in the surrounding scopes,
  /// innermost first.
  ///
  /// If found, return the slot index of the local variable.
  pub(crate) fn resolve_local(&mut self) -> Option<usize> {
    let slot = self
      .locals
      .locals
      .iter()
      .rposition(|local| local.name.lexeme == self.previous.lexeme);
    if let Some(slot) = slot {
      if self.locals.locals[slot].depth == -1 {
        self.error("Can't read local variable in its own initializer.");
      }
    }
    slot
  }
}
