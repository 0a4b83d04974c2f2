pub mod commands;

pub use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
#[clap(propagate_version = true)]
#[clap(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// More output on stderr (-v info, -vv debug, -vvv trace)
    #[clap(short, long, global = true, parse(from_occurrences))]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Time a program and emit the elapsed time record
    Run {
        /// Write the record to this file instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// The program to run
        program: String,

        /// Arguments passed to the program
        #[clap(allow_hyphen_values = true, multiple_values = true)]
        args: Vec<String>,
    },

    /// Render a previously emitted record
    Show {
        /// Record file to read, stdin when omitted or `-`
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
