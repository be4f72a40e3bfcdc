mod common;
use common::*;
use rmbasic::lang::ErrorCode;
use rmbasic::mach::Val;

#[test]
fn test_console_calls() {
    let r = runtime(&[
        "SET MODE 40",
        "CLS",
        "SET PEN 3 : SET PAPER 1",
        "SET CURPOS 3, 4",
        "SET COLOUR 1 TO 4",
        "LINE 0, 0; 10, 10",
        "CIRCLE 5, 1, 2",
        "PLOT \"hi\", 1, 2",
    ]);
    assert!(r.last_error().is_none());
    assert_eq!(
        r.console().calls(),
        &[
            "MODE 40",
            "CLS",
            "PEN 3",
            "PAPER 1",
            "CURPOS 3,4",
            "COLOUR 1 4",
            "LINE 0,0;10,10",
            "CIRCLE 5 1,2",
            "PLOT hi 1,2",
        ]
    );
}

#[test]
fn test_graphics_errors() {
    let mut r = runtime(&[]);
    exec(&mut r, "SET MODE 60");
    assert_eq!(error_code(&r), Some(ErrorCode::NumberNotInAllowedRange));
    exec(&mut r, "SET PEN 16");
    assert_eq!(error_code(&r), Some(ErrorCode::NumberNotInAllowedRange));
    exec(&mut r, "CIRCLE -1, 0, 0");
    assert_eq!(error_code(&r), Some(ErrorCode::PositiveValueRequired));
    exec(&mut r, "LINE 1, 2");
    assert_eq!(error_code(&r), Some(ErrorCode::ACoordinatePairNeeded));
    exec(&mut r, "SET FOO 1");
    assert_eq!(error_code(&r), Some(ErrorCode::UnknownSetAskAttribute));
    assert!(r.console().calls().is_empty());
}

#[test]
fn test_ask_mouse() {
    let mut r = runtime(&[]);
    r.console_mut().set_mouse(10.0, 20.0, 1.0);
    r.enter("ASK MOUSE X, Y, B");
    assert_eq!(r.var("X"), Some(Val::Number(10.0)));
    assert_eq!(r.var("Y"), Some(Val::Number(20.0)));
    assert_eq!(r.var("B"), Some(Val::Number(1.0)));
}

#[test]
fn test_get_and_put() {
    let mut r = runtime(&[]);
    r.console_mut().push_key('A');
    r.console_mut().push_key('a');
    r.enter("GET K$");
    r.enter("GET K");
    assert_eq!(r.var("K$"), Some(Val::String("A".into())));
    assert_eq!(r.var("K"), Some(Val::Number(97.0)));
    assert_eq!(exec(&mut r, "PUT 72, 105, 13"), "Hi\n");
}

#[test]
fn test_print_selection_is_restored() {
    let mut r = runtime(&[]);
    assert_eq!(exec(&mut r, "PRINT ~3, \"boxed\""), "boxed\n");
    exec(&mut r, "PRINT 1");
    assert_eq!(
        r.console().calls(),
        &["SELECT Some(3) None", "SELECT None None"]
    );
}
