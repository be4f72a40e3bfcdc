use super::*;

#[test]
fn test_gosub_return() {
    let mut r = runtime(&[
        "10 GOSUB 100 : PRINT \"back\"",
        "20 END",
        "100 PRINT \"sub\"",
        "110 RETURN",
    ]);
    assert_eq!(run(&mut r), "sub\nback\n");
    r.enter("RETURN");
    assert_eq!(error_code(&r), Some(ErrorCode::ReturnWithoutAnyGosub));
}

#[test]
fn test_goto_missing_line() {
    let mut r = runtime(&["10 GOTO 99"]);
    let out = run(&mut r);
    assert_eq!(error_code(&r), Some(ErrorCode::SpecifiedLineNotFound));
    assert_eq!(
        out,
        "Syntax error in line 10: Specified line not found\n  10 GOTO --> 99\n"
    );
}

#[test]
fn test_repeat_until() {
    let mut r = runtime(&[
        "10 N := 0",
        "20 REPEAT",
        "30 N := N + 1",
        "40 UNTIL N = 3",
    ]);
    run(&mut r);
    assert_eq!(r.var("N"), Some(Val::Number(3.0)));
    r.enter("UNTIL TRUE");
    assert_eq!(error_code(&r), Some(ErrorCode::UntilWithoutAnyRepeat));
}

#[test]
fn test_until_needs_truth_value() {
    let mut r = runtime(&["10 REPEAT", "20 UNTIL 5"]);
    run(&mut r);
    assert_eq!(error_code(&r), Some(ErrorCode::TrueFalseValueNeeded));
}

#[test]
fn test_if_then_else() {
    let mut r = runtime(&["X := 1"]);
    r.enter("IF X = 1 THEN PRINT \"one\" ELSE PRINT \"other\"");
    r.enter("IF X = 2 THEN PRINT \"two\" ELSE PRINT \"other\"");
    r.enter("IF X = 2 THEN PRINT \"two\" : PRINT \"skipped\"");
    r.enter("IF X = 1 THEN PRINT \"a\"; : PRINT \"b\"");
    assert_eq!(r.console().output(), "one\nother\nab\n");
}

#[test]
fn test_if_line_numbers() {
    let mut r = runtime(&[
        "5 A := 0",
        "10 IF A = 0 THEN 40 ELSE 50",
        "40 PRINT \"forty\" : END",
        "50 PRINT \"fifty\"",
    ]);
    assert_eq!(run(&mut r), "forty\n");
    r.enter("5 A := 1");
    assert_eq!(run(&mut r), "fifty\n");
}

#[test]
fn test_if_errors() {
    let mut r = runtime(&["IF 1 = 1 PRINT 1"]);
    assert_eq!(error_code(&r), Some(ErrorCode::ThenExpected));
    r.enter("IF 3 THEN PRINT 1");
    assert_eq!(error_code(&r), Some(ErrorCode::TrueFalseValueNeeded));
    r.enter("THEN PRINT 1");
    assert_eq!(error_code(&r), Some(ErrorCode::ThenWithNoMatchingIf));
}

#[test]
fn test_read_data_restore() {
    let mut r = runtime(&[
        "10 DATA 1, \"two\", 3",
        "20 READ A, B$ : READ C",
        "30 RESTORE",
        "40 READ D",
        "50 READ E",
    ]);
    run(&mut r);
    assert_eq!(r.var("A"), Some(Val::Number(1.0)));
    assert_eq!(r.var("B$"), Some(Val::String("two".into())));
    assert_eq!(r.var("C"), Some(Val::Number(3.0)));
    assert_eq!(r.var("D"), Some(Val::Number(1.0)));
    assert_eq!(r.var("E"), None);
    assert_eq!(error_code(&r), Some(ErrorCode::NumericExpressionNeeded));
}

#[test]
fn test_read_past_end() {
    let mut r = runtime(&["10 DATA 1", "20 READ A, B"]);
    run(&mut r);
    assert_eq!(error_code(&r), Some(ErrorCode::NoMoreDataToBeRead));
    assert_eq!(r.var("A"), Some(Val::Number(1.0)));
}

#[test]
fn test_restore_line() {
    let mut r = runtime(&[
        "10 DATA 1",
        "20 DATA 2",
        "30 RESTORE 20",
        "40 READ A",
    ]);
    run(&mut r);
    assert_eq!(r.var("A"), Some(Val::Number(2.0)));
}

#[test]
fn test_stop_and_end() {
    let mut r = runtime(&["10 PRINT 1", "20 STOP", "30 PRINT 2"]);
    assert_eq!(run(&mut r), "1\nStopped in line 20\n");
    r.enter("20 END");
    assert_eq!(run(&mut r), "1\n");
    assert_eq!(error_code(&r), None);
}

#[test]
fn test_break_key() {
    let mut r = runtime(&["10 GOTO 10"]);
    r.console_mut().raise_break();
    run(&mut r);
    assert_eq!(error_code(&r), Some(ErrorCode::InterruptedByBreakKey));
    assert!(!r.console().break_raised());
}

#[test]
fn test_error_clears_stacks() {
    let mut r = runtime(&["10 GOSUB 100", "100 PRINT X"]);
    run(&mut r);
    assert_eq!(error_code(&r), Some(ErrorCode::HasNotBeenDefined));
    r.enter("RETURN");
    assert_eq!(error_code(&r), Some(ErrorCode::ReturnWithoutAnyGosub));
}

#[test]
fn test_input() {
    let mut r = Runtime::new(BufferConsole::new());
    r.console_mut().push_line("42, Fred");
    r.enter("INPUT \"Age, name\"; Age, Name$");
    assert_eq!(r.var("Age"), Some(Val::Number(42.0)));
    assert_eq!(r.var("Name$"), Some(Val::String("Fred".into())));
    assert_eq!(r.console().output(), "Age, name?");
}

#[test]
fn test_input_asks_again() {
    let mut r = Runtime::new(BufferConsole::new());
    r.console_mut().push_line("1");
    r.console_mut().push_line("2");
    r.enter("INPUT A, B");
    assert_eq!(r.var("A"), Some(Val::Number(1.0)));
    assert_eq!(r.var("B"), Some(Val::Number(2.0)));
    assert_eq!(r.console().output(), "???");
}

#[test]
fn test_input_line() {
    let mut r = Runtime::new(BufferConsole::new());
    r.console_mut().push_line("Hello, world");
    r.enter("INPUT LINE \"Say\", S$");
    assert_eq!(r.var("S$"), Some(Val::String("Hello, world".into())));
    assert_eq!(r.console().output(), "Say");
}

#[test]
fn test_input_bad_number() {
    let mut r = Runtime::new(BufferConsole::new());
    r.console_mut().push_line("abc");
    r.enter("INPUT A");
    let e = r.last_error().unwrap();
    assert_eq!(e.code(), ErrorCode::CouldNotInterpretAsANumber);
    assert_eq!(e.message(), "abc could not be interpreted as a number");
    r.enter("INPUT A");
    assert_eq!(error_code(&r), Some(ErrorCode::InterruptedByBreakKey));
}

#[test]
fn test_direct_frames_end_with_their_line() {
    let mut r = runtime(&["N := 0", "REPEAT"]);
    r.enter("N := N + 1 : UNTIL N = 3");
    assert_eq!(error_code(&r), Some(ErrorCode::UntilWithoutAnyRepeat));
    assert_eq!(r.var("N"), Some(Val::Number(1.0)));
    r.enter("FOR I := 1 TO 2");
    r.enter("A := 1 : B := 2 : NEXT I");
    assert_eq!(error_code(&r), Some(ErrorCode::NextWithoutMatchingFor));
    assert_eq!(r.var("B"), Some(Val::Number(2.0)));
}

#[test]
fn test_program_frames_outlive_direct_lines() {
    let mut r = runtime(&["10 FOR I := 1 TO 3", "20 STOP", "30 NEXT I"]);
    run(&mut r);
    r.enter("PRINT I");
    assert_eq!(error_code(&r), None);
    r.console_mut().clear_output();
    r.enter("GOTO 30");
    assert_eq!(r.console().output(), "Stopped in line 20\n");
    assert_eq!(r.var("I"), Some(Val::Number(2.0)));
}

#[test]
fn test_success_clears_last_error() {
    let mut r = runtime(&["PRINT X"]);
    assert_eq!(error_code(&r), Some(ErrorCode::HasNotBeenDefined));
    r.enter("PRINT 1");
    assert_eq!(error_code(&r), None);
}
