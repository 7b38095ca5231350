use loxvm::{
  vm::{InterpretError, VM},
  Init,
};
use std::io::{BufRead, Write};
use std::process::exit;

/// Read-interpret loop on stdin; EOF ends it cleanly.
///
/// Errors are already reported on stderr, so the loop just keeps going.
fn repl(vm: &mut VM) {
  let stdin = std::io::stdin();
  let mut lines = stdin.lock().lines();
  loop {
    print!("% ");
    let _ = std::io::stdout().flush();
    match lines.next() {
      Some(Ok(source)) => {
        if !source.is_empty() {
          let _ = vm.interpret(&source);
        }
      }
      _ => {
        println!();
        return;
      }
    }
  }
}

/// Interpret a whole file, mapping the outcome to an exit code.
fn run_file(vm: &mut VM, path: &str) {
  let source = match std::fs::read_to_string(path) {
    Ok(source) => source,
    Err(error) => {
      eprintln!("Could not read \"{}\": {}", path, error);
      exit(74);
    }
  };
  match vm.interpret(&source) {
    Ok(()) => {}
    Err(InterpretError::CompileError(_)) => exit(65),
    Err(InterpretError::RuntimeError(_)) => exit(70),
  }
}

fn usage(me: &str) {
  eprintln!("Usage: {} [script]", me);
}

pub fn main() {
  let mut vm = VM::init();
  // everything past the executable path
  let args: Vec<String> = std::env::args().skip(1).collect();

  match args.as_slice() {
    [] => repl(&mut vm),
    [path] => run_file(&mut vm, path),
    _ => {
      usage("loxvm");
      exit(64);
    }
  }
}
