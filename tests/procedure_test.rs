mod common;
use common::*;
use rmbasic::lang::ErrorCode;
use rmbasic::mach::Val;

#[test]
fn test_procedure_call() {
    let mut r = runtime(&[
        "10 Greet \"World\"",
        "20 PRINT \"done\"",
        "30 END",
        "40 PROCEDURE Greet Who$",
        "50 PRINT \"Hello \"; Who$",
        "60 ENDPROC",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "Hello World\ndone\n");
    assert_eq!(exec(&mut r, "Greet \"again\""), "Hello again\n");
}

#[test]
fn test_procedure_receives_results() {
    let mut r = runtime(&[
        "10 Swap 1, 2 RECEIVE A, B",
        "20 PRINT A; B",
        "30 END",
        "40 PROCEDURE Swap X, Y RETURN P, Q",
        "50 P := Y : Q := X",
        "60 ENDPROC",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "21\n");
}

#[test]
fn test_procedure_variables_stay_local() {
    let mut r = runtime(&[
        "10 X := 1",
        "20 Bump",
        "30 PRINT X",
        "40 END",
        "50 PROCEDURE Bump",
        "60 X := 99 : LEAVE",
        "70 PRINT \"never\"",
        "80 ENDPROC",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "1\n");
    assert_eq!(r.var("X"), Some(Val::Number(1.0)));
}

#[test]
fn test_functions() {
    let mut r = runtime(&[
        "10 PRINT Square(4) + 1",
        "20 PRINT Greeting$(\"Bob\")",
        "30 END",
        "40 FUNCTION Square(N)",
        "50 RESULT N * N",
        "60 ENDFUN",
        "70 FUNCTION Greeting$(Name$)",
        "80 RESULT \"Hi \" + Name$",
        "90 ENDFUN",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "17\nHi Bob\n");
}

#[test]
fn test_recursive_function() {
    let mut r = runtime(&[
        "10 PRINT Fact(5)",
        "20 END",
        "30 FUNCTION Fact(N)",
        "40 IF N <= 1 THEN RESULT 1",
        "50 RESULT N * Fact(N - 1)",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "120\n");
}

#[test]
fn test_exit_errors() {
    let mut r = runtime(&[]);
    exec(&mut r, "ENDPROC");
    assert_eq!(error_code(&r), Some(ErrorCode::ProcedureExitWithoutCall));
    exec(&mut r, "LEAVE");
    assert_eq!(error_code(&r), Some(ErrorCode::ProcedureExitWithoutCall));
    exec(&mut r, "RESULT 1");
    assert_eq!(error_code(&r), Some(ErrorCode::FunctionExitWithoutCall));
    exec(&mut r, "Frobnicate 1");
    assert_eq!(error_code(&r), Some(ErrorCode::UnknownCommandProcedure));
}

#[test]
fn test_definition_errors() {
    let mut r = runtime(&["10 PROCEDURE Foo", "20 ENDPROC"]);
    exec(&mut r, "RUN");
    assert_eq!(error_code(&r), Some(ErrorCode::CannotExecuteDefinition));
    assert_eq!(r.last_error().and_then(|e| e.line_number()), Some(10));

    let mut r = runtime(&["10 PROCEDURE 5"]);
    exec(&mut r, "RUN");
    assert_eq!(error_code(&r), Some(ErrorCode::NameOfDefinitionRequired));

    let mut r = runtime(&["10 PRINT F(1)", "20 END", "30 FUNCTION F(X)", "40 ENDFUN"]);
    exec(&mut r, "RUN");
    assert_eq!(error_code(&r), Some(ErrorCode::NeedResultToExitFunction));
    assert_eq!(r.last_error().and_then(|e| e.line_number()), Some(40));
}

#[test]
fn test_argument_errors() {
    let mut r = runtime(&["10 Greet", "20 END", "30 PROCEDURE Greet A", "40 ENDPROC"]);
    exec(&mut r, "RUN");
    assert_eq!(error_code(&r), Some(ErrorCode::NotEnoughParameters));
    exec(&mut r, "Greet 1, 2");
    assert_eq!(error_code(&r), Some(ErrorCode::EndOfInstructionExpected));
    exec(&mut r, "Greet 1 RECEIVE");
    assert_eq!(error_code(&r), Some(ErrorCode::ReceiveVariablesNeeded));
}

#[test]
fn test_nesting_limit() {
    let mut r = runtime(&["10 Down", "20 END", "30 PROCEDURE Down", "40 Down"]);
    exec(&mut r, "RUN");
    assert_eq!(error_code(&r), Some(ErrorCode::FunctionNestingTooDeep));
}

#[test]
fn test_angle_mode() {
    let mut r = runtime(&[]);
    exec(&mut r, "SET DEG TRUE");
    assert_eq!(exec(&mut r, "PRINT SIN(90)"), "1\n");
    exec(&mut r, "SET RAD TRUE");
    assert_eq!(exec(&mut r, "PRINT SIN(0)"), "0\n");
    exec(&mut r, "SET DEG 5");
    assert_eq!(error_code(&r), Some(ErrorCode::TrueFalseValueNeeded));
}
