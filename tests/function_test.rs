mod common;
use common::*;
use rmbasic::lang::ErrorCode;

#[test]
fn test_string_functions() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT LEN(\"abc\"); LEFT$(\"hello\", 2)"), "3he\n");
    assert_eq!(exec(&mut r, "PRINT CHR$(65) + STR$(2)"), "A2\n");
    assert_eq!(exec(&mut r, "PRINT MID$(\"banana\", 2, 3)"), "ana\n");
}

#[test]
fn test_integer_division() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT INT(7 / 2)"), "3\n");
    assert_eq!(exec(&mut r, "PRINT 7 \\ 2; \" \"; 7 MOD 3; \" \"; -7 MOD 3"), "3 1 -1\n");
    exec(&mut r, "PRINT 1 \\ 0");
    assert_eq!(error_code(&r), Some(ErrorCode::TryingToDivideByZero));
}

#[test]
fn test_constants() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT TRUE; FALSE"), "-10\n");
    assert_eq!(exec(&mut r, "PRINT NOT TRUE"), "0\n");
}

#[test]
fn test_argument_count() {
    let mut r = runtime(&[]);
    exec(&mut r, "PRINT ABS(1, 2)");
    assert_eq!(error_code(&r), Some(ErrorCode::EndOfInstructionExpected));
    exec(&mut r, "PRINT LEFT$(\"a\")");
    assert_eq!(error_code(&r), Some(ErrorCode::NotEnoughParameters));
}

#[test]
fn test_get_string() {
    let mut r = runtime(&[]);
    r.console_mut().push_key('q');
    assert_eq!(exec(&mut r, "PRINT GET$"), "q\n");
}

#[test]
fn test_random_rejects_bad_range() {
    let mut r = runtime(&[]);
    exec(&mut r, "PRINT RND(10 ^ 400 - 10 ^ 400)");
    assert_eq!(error_code(&r), Some(ErrorCode::BadArgumentForFunction));
    exec(&mut r, "PRINT RND(-1)");
    assert_eq!(error_code(&r), Some(ErrorCode::BadArgumentForFunction));
}
