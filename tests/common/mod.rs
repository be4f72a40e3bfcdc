#![allow(dead_code)]
use rmbasic::lang::ErrorCode;
use rmbasic::mach::Runtime;
use rmbasic::term::BufferConsole;

pub fn runtime(lines: &[&str]) -> Runtime<BufferConsole> {
    let mut r = Runtime::default();
    for line in lines {
        r.enter(line);
    }
    r
}

/// Enter one line and return what it printed.
pub fn exec(r: &mut Runtime<BufferConsole>, line: &str) -> String {
    r.console_mut().clear_output();
    r.enter(line);
    r.console_mut().take_output()
}

pub fn error_code(r: &Runtime<BufferConsole>) -> Option<ErrorCode> {
    r.last_error().map(|e| e.code())
}
