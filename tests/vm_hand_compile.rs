use loxvm::{
  chunk::{Chunk, OpCode},
  debug::Debug,
  value::Value,
  vm::{InterpretError, VM},
  Init,
};

#[test]
fn manual_demo() {
  let mut vm = VM::init();
  let mut chunk = Chunk::init();

  // 1.2
  let constant = chunk.add_constant(Value::Number(1.2));
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // 2.3
  let constant = chunk.add_constant(Value::Number(2.3));
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // +
  chunk.write_chunk(OpCode::Add as u8, 123);
  // 5.6
  let constant = chunk.add_constant(Value::Number(5.6));
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // /
  chunk.write_chunk(OpCode::Divide as u8, 123);
  // -
  chunk.write_chunk(OpCode::Negate as u8, 123);
  // return
  chunk.write_chunk(OpCode::Return as u8, 123);

  chunk.disassemble("test chunk");
  vm.interpret_chunk(chunk).unwrap();

  // RETURN halts without popping, so the result is still on top
  assert_eq!(vm.stack(), &[Value::Number(-((1.2 + 2.3) / 5.6))]);
  vm.free();
}

#[test]
fn stack_overflow_is_deterministic() {
  let mut vm = VM::init();
  let mut chunk = Chunk::init();

  let constant = chunk.add_constant(Value::Number(1.0));
  for _ in 0..300 {
    chunk.write_chunk(OpCode::Constant as u8, 1);
    chunk.write_chunk(constant as u8, 1);
  }
  chunk.write_chunk(OpCode::Return as u8, 1);

  match vm.interpret_chunk(chunk) {
    Err(InterpretError::RuntimeError(message)) => {
      assert!(message.contains("Stack overflow."));
    }
    other => panic!("expected a stack overflow, got {:?}", other),
  }
}

#[test]
fn popping_an_empty_stack_is_reported() {
  let mut vm = VM::init();
  let mut chunk = Chunk::init();
  chunk.write_chunk(OpCode::Pop as u8, 1);
  chunk.write_chunk(OpCode::Return as u8, 1);

  assert!(matches!(
    vm.interpret_chunk(chunk),
    Err(InterpretError::RuntimeError(_))
  ));
}
