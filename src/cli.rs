//! Command-line options for the `coralc` driver

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(version, about = "Tokenize and parse a Coral source file")]
pub struct Cli {
    #[clap(value_parser, help = "Path to a .crl source file")]
    pub input: PathBuf,

    #[clap(long, help = "Print the token sequence")]
    pub tokens: bool,

    #[clap(long, help = "Print the parsed type table, functions and globals")]
    pub types: bool,

    #[clap(long, help = "Open the interactive inspector instead of printing")]
    pub inspect: bool,
}

/// Exit status for an argument error: `--help` and `--version` succeed,
/// every usage error exits with 1.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}
