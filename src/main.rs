//! lmj - command-line front-end for the lightmoji editor core

use std::process::ExitCode;

use lightmoji::cli;

fn main() -> ExitCode {
    cli::run()
}
