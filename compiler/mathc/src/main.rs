//! The executable compiling math-notation expression trees into functions.

use std::process::ExitCode;

use clap::Parser;
use mathc_driver::Arguments;

fn main() -> ExitCode {
    env_logger::init();

    mathc_driver::run(&Arguments::parse())
}
