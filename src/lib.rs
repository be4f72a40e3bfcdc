//! # RM Basic
//!
//! The BASIC of the RM Nimbus as it was in the late 1980s.
//!
//! Lines typed at the `:` prompt run at once. Lines that begin with a
//! number are stored as the program and run with `RUN`.
//! ```text
//! :10 FOR I := 1 TO 3
//! :20 PRINT I; " squared is "; I * I
//! :30 NEXT I
//! :RUN
//! 1 squared is 1
//! 2 squared is 4
//! 3 squared is 9
//! ```
//!
//! Programs are saved and loaded with `SAVE "name"` and `LOAD "name"`;
//! a `.BAS` extension is added when missing.
//!
//! The interpreter can be embedded by giving a [`mach::Runtime`] any
//! [`mach::Console`]. [`term::BufferConsole`] keeps everything in memory.

pub mod lang;
pub mod mach;
pub mod term;
