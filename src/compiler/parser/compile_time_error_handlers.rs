use super::*;

impl Parser {
  /// Report error at current token.
  pub(crate) fn error_at_current(&mut self, message: &str) {
    self.error_at(true, message);
  }

  /// Report error at previous token.
  pub(crate) fn error(&mut self, message: &str) {
    self.error_at(false, message);
  }

  /// Report error at selected token.
  ///
  /// While in panic mode every further report is swallowed until
  /// `synchronize` clears the flag.
  pub(crate) fn error_at(&mut self, at_current: bool, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;

    let token = if at_current {
      &self.current
    } else {
      &self.previous
    };
    let mut error_str = String::new();
    error_str += &format!("[line {}] Error", token.line);
    match token.token_type {
      TokenType::Eof => error_str += " at end",
      TokenType::Error => {}
      _ => error_str += &format!(" at '{}'", token.lexeme),
    }
    error_str += &format!(": {}", message);
    eprintln!("{}", error_str);

    self.had_error = true;
  }
}
