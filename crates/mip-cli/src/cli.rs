use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mip_exec::OutputEncoding;
use mip_observe::{LoggerFormat, LoggerLevel};

#[derive(Parser, Debug)]
#[command(
    name = "mip-label",
    version,
    about = "Read and apply sensitivity labels on Microsoft Office documents"
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "FILE", help = "JSON config file ({\"logger\": ..., \"shell\": ...})")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "MIP_INTERPRETER", help = "Interpreter executable used to run the AIP cmdlets")]
    pub interpreter: Option<PathBuf>,

    #[arg(
        long = "interpreter-arg",
        global = true,
        value_name = "ARG",
        allow_hyphen_values = true,
        help = "Argument passed to the interpreter before the command (repeatable)"
    )]
    pub interpreter_args: Vec<String>,

    #[arg(long, global = true, env = "MIP_ENCODING", help = "Encoding of the interpreter's output")]
    pub encoding: Option<OutputEncoding>,

    #[arg(long, global = true, env = "MIP_LOG", help = "Log filter (e.g. warn, mip_exec=trace)")]
    pub log_level: Option<LoggerLevel>,

    #[arg(long, global = true, help = "Log format: text, json or journald")]
    pub log_format: Option<LoggerFormat>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the label id of a document (sub-label preferred).
    Read {
        path: PathBuf,
        #[arg(long, help = "Print the full status reported by the tool")]
        full: bool,
    },
    /// Apply a label id to a document.
    Apply { path: PathBuf, label_id: String },
    /// Apply the label of one document to another.
    Copy { source: PathBuf, target: PathBuf },
    /// Print the effective configuration.
    Config,
}
