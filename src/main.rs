//! # RM Basic
//!
//! The Nimbus dialect of BASIC as an interactive interpreter.
//!

use getopts::Options;
use rmbasic::term::{self, Config};
use std::env;
use std::process;

/// Prints usage information for program `name` with `opts`.
fn help(name: &str, opts: &Options) -> i32 {
    let brief = format!("Usage: {} [options] [program-file]", name);
    println!("{}", opts.usage(&brief));
    0
}

fn version() -> i32 {
    println!("RM Basic {}", env!("CARGO_PKG_VERSION"));
    println!("License Apache Version 2.0 or MIT");
    0
}

fn usage_error(name: &str, message: &str) -> i32 {
    eprintln!("Usage error: {}", message);
    eprintln!("Type {} --help for more information", name);
    2
}

fn safe_main(name: &str, args: Vec<String>) -> i32 {
    let mut opts = Options::new();
    opts.optflag("h", "help", "show command-line usage information and exit");
    opts.optflag("", "version", "show version information and exit");
    opts.optflag("w", "warn", "create undefined variables with a warning");
    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => return usage_error(name, &fail.to_string()),
    };

    if matches.opt_present("help") {
        return help(name, &opts);
    }

    if matches.opt_present("version") {
        return version();
    }

    let program = match matches.free.as_slice() {
        [] => None,
        [file] => Some(file.clone()),
        [_, ..] => return usage_error(name, "Too many arguments"),
    };
    term::main(Config {
        warn: matches.opt_present("warn"),
        program,
    })
}

fn main() {
    let mut args = env::args();
    let name = args.next().unwrap_or_else(|| "rmbasic".to_string());
    process::exit(safe_main(&name, args.collect()));
}
