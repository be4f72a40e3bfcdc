use super::*;
use crate::lang::ErrorCode;
use crate::term::BufferConsole;

mod flow_test;

fn runtime(lines: &[&str]) -> Runtime<BufferConsole> {
    let mut r = Runtime::default();
    for line in lines {
        r.enter(line);
    }
    r
}

fn run(r: &mut Runtime<BufferConsole>) -> String {
    r.console_mut().clear_output();
    r.enter("RUN");
    r.console_mut().take_output()
}

fn error_code(r: &Runtime<BufferConsole>) -> Option<ErrorCode> {
    r.last_error().map(|e| e.code())
}
