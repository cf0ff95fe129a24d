use crate::io::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "middleware-gen")]
#[command(about = "Generates logging middleware for a Go interface", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Interface to wrap, as path/to/package.Type
    #[arg(short = 'i', long = "interface")]
    pub interface: String,

    /// Wrapper name as pkg.Type, or Type to keep the interface's package
    #[arg(short = 'w', long = "wrapper")]
    pub wrapper: Option<String>,

    /// Name of the generated factory function [default: WithMiddleware]
    #[arg(short = 'f', long = "functionname")]
    pub function_name: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Name prefix for unnamed parameters [default: param]
    #[arg(
        short = 'p',
        long = "emptyFunctionParamNamePrefix",
        visible_alias = "param-prefix"
    )]
    pub param_prefix: Option<String>,

    /// Name prefix for unnamed results [default: ret]
    #[arg(
        short = 'r',
        long = "emptyFunctionReturnNamePrefix",
        visible_alias = "result-prefix"
    )]
    pub result_prefix: Option<String>,

    /// Output format [default: go]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory to start the go.mod and config file lookup from
    #[arg(short = 'C', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Extra root holding <import path> directories (repeatable)
    #[arg(long = "search-path")]
    pub search_paths: Vec<PathBuf>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
