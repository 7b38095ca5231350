use super::*;

impl Parser {
  /// Emit a jump instruction with a two-byte placeholder operand;
  /// returns the offset of the placeholder for later patching.
  pub(crate) fn emit_jump(&mut self, instruction: u8) -> usize {
    self.emit_byte(instruction);
    self.emit_bytes(&[0xff, 0xff]);
    self.chunk.count() - 2
  }

  /// Back-fill a forward jump distance, big-endian.
  pub(crate) fn patch_jump(&mut self, offset: usize) {
    // -2 to adjust for the bytecode for the jump offset itself
    let jump = self.chunk.count() - offset - 2;

    if jump > u16::MAX as usize {
      self.error("Too much code to jump over.");
    }

    self.chunk.code[offset] = ((jump >> 8) & 0xff) as u8;
    self.chunk.code[offset + 1] = (jump & 0xff) as u8;
  }

  /// Emit a backwards jump to `loop_start`.
  pub(crate) fn emit_loop(&mut self, loop_start: usize) {
    self.emit_byte(OpCode::Loop as u8);

    // +2 to hop over the distance operand itself
    let offset = self.chunk.count() - loop_start + 2;
    if offset > u16::MAX as usize {
      self.error("Loop body too large.");
    }

    self.emit_byte(((offset >> 8) & 0xff) as u8);
    self.emit_byte((offset & 0xff) as u8);
  }

  /// Appending a sequence of bytes to the chunk (in order).
  pub(crate) fn emit_bytes(&mut self, bytes: &[u8]) {
    for &byte in bytes {
      self.emit_byte(byte);
    }
  }

  /// Appending a single byte to the chunk.
  pub(crate) fn emit_byte(&mut self, byte: u8) {
    self.chunk.write_chunk(byte, self.previous.line);
  }

  /// Specifically appending the return instruction to the chunk.
  pub(crate) fn emit_return(&mut self) {
    self.emit_byte(OpCode::Return as u8);
  }

  /// Wrapper for appending `constant` and `index` info to the chunk.
  pub(crate) fn emit_constant(&mut self, value: Value) {
    let constant_index = self.make_constant(value);
    self.emit_bytes(&[OpCode::Constant as u8, constant_index]);
  }

  /// Operations after end of compilation.
  pub(crate) fn end_compiler(&mut self) {
    self.emit_return();
    #[cfg(feature = "debug_print_code")]
    if !self.had_error {
      use crate::debug::Debug;
      self.chunk.disassemble("code");
    }
  }
}
