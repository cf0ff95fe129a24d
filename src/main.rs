use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use middleware_gen::cli::Cli;
use middleware_gen::commands::generate;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    generate(cli.into())
}

/// `warn` by default, `-v` for info, `-vv` for debug. `RUST_LOG` wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
