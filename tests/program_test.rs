mod common;
use common::*;
use rmbasic::lang::ErrorCode;
use rmbasic::mach::{Event, Val};

#[test]
fn test_assign_and_print() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "X := 2 + 3 * 4"), "");
    assert_eq!(r.var("X"), Some(Val::Number(14.0)));
    assert_eq!(exec(&mut r, "PRINT X"), "14\n");
}

#[test]
fn test_goto_loop() {
    let mut r = runtime(&["10 T := 0", "20 T := T + 1", "30 IF T < 3 THEN 20"]);
    r.enter("RUN");
    assert_eq!(r.var("T"), Some(Val::Number(3.0)));
}

#[test]
fn test_for_sum() {
    let mut r = runtime(&["10 S := 0", "20 FOR I := 1 TO 5", "30 S := S + I", "40 NEXT I"]);
    r.enter("RUN");
    assert_eq!(r.var("S"), Some(Val::Number(15.0)));
    assert_eq!(r.var("I"), Some(Val::Number(6.0)));
}

#[test]
fn test_repeat_count() {
    let mut r = runtime(&["10 N := 0", "20 REPEAT : N := N + 1 : UNTIL N = 3"]);
    r.enter("RUN");
    assert_eq!(r.var("N"), Some(Val::Number(3.0)));
}

#[test]
fn test_string_comparison() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT \"abc\" < \"abd\""), "-1\n");
    assert_eq!(exec(&mut r, "PRINT \"abc\" = \"ABC\""), "0\n");
    assert_eq!(exec(&mut r, "PRINT \"abc\" == \"ABC\""), "-1\n");
    assert_eq!(exec(&mut r, "PRINT \"a\" + \"b\""), "ab\n");
}

#[test]
fn test_invalid_expression_echo() {
    let mut r = runtime(&[]);
    let out = exec(&mut r, "X := 5 + * 3");
    let e = r.last_error().unwrap();
    assert_eq!(e.code(), ErrorCode::InvalidExpressionFound);
    assert_eq!(e.index(), Some(4));
    assert!(out.starts_with("Syntax error: Invalid expression found\n"));
    assert!(out.contains("--> *"));
    assert_eq!(r.var("X"), None);
}

#[test]
fn test_error_index_within_statement() {
    let mut r = runtime(&[]);
    let out = exec(&mut r, "A := 1 : X := 5 + * 3");
    let e = r.last_error().unwrap();
    assert_eq!(e.code(), ErrorCode::InvalidExpressionFound);
    assert_eq!(e.index(), Some(4));
    assert_eq!(e.line_index(), Some(8));
    assert!(out.contains("+ --> * 3"));
}

#[test]
fn test_error_in_program_line() {
    let mut r = runtime(&["10 PRINT 1", "20 PRINT Y"]);
    let out = exec(&mut r, "RUN");
    assert!(out.starts_with("1\nSyntax error in line 20: "));
    assert_eq!(error_code(&r), Some(ErrorCode::HasNotBeenDefined));
    assert_eq!(r.last_error().unwrap().line_number(), Some(20));
}

#[test]
fn test_warning_mode_defaults() {
    let mut r = runtime(&[]);
    r.set_warning_mode(true);
    let out = exec(&mut r, "PRINT Q");
    assert!(out.starts_with("Warning : "));
    assert!(out.ends_with("0\n"));
    assert_eq!(r.var("Q"), Some(Val::Number(0.0)));
}

#[test]
fn test_keyword_as_variable() {
    let mut r = runtime(&[]);
    exec(&mut r, "PRINT := 3");
    let e = r.last_error().unwrap();
    assert_eq!(e.code(), ErrorCode::IsAKeywordAndCannotBeUsedAsAVariableName);
    assert_eq!(
        e.message(),
        "PRINT is a keyword and cannot be used as a variable name"
    );
}

#[test]
fn test_not_implemented() {
    let mut r = runtime(&[]);
    exec(&mut r, "CHDIR \"x\"");
    let e = r.last_error().unwrap();
    assert_eq!(e.code(), ErrorCode::NotImplemented);
    assert_eq!(e.message(), "CHDIR is not implemented");
}

#[test]
fn test_print_separators() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT 1; 2"), "12\n");
    assert_eq!(exec(&mut r, "PRINT 1, 2"), "1              2\n");
    assert_eq!(exec(&mut r, "PRINT \"a\"! \"b\""), "a\nb\n");
    assert_eq!(exec(&mut r, "PRINT -2.5;"), "-2.5");
}

#[test]
fn test_bye() {
    let mut r = runtime(&["10 PRINT 1", "20 BYE", "30 PRINT 2"]);
    r.console_mut().clear_output();
    assert_eq!(r.enter("RUN"), Event::Bye);
    assert_eq!(r.console().output(), "1\n");
}

#[test]
fn test_repl_ends_with_input() {
    let mut r = runtime(&[]);
    r.console_mut().push_line("PRINT 7");
    assert_eq!(r.repl(), 0);
    assert_eq!(r.console().output(), ":7\n:");
}
