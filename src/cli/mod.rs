pub mod args;
pub mod commands;

pub use args::ConvertArgs;

use crate::core::config::ConfigLoader;
use crate::logging;
use anyhow::Context;
use clap::Parser;
use std::env;
use std::io::{self, Write};
use tracing::debug;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n";

#[derive(Parser, Debug)]
#[command(name = "cwl2nxf")]
#[command(version = crate::VERSION)]
#[command(about = "Convert a CWL CommandLineTool descriptor into a Nextflow process")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "The generated process is written to stdout; diagnostics go to stderr.\n\nExample:\n    cwl2nxf --file bwa-mem.cwl > bwa_mem.nf"
)]
pub struct Args {
    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Load configuration, install logging, convert and print the script.
pub fn run(args: Args) -> crate::Result<()> {
    let cwd = env::current_dir().context("failed to resolve the working directory")?;
    let config = ConfigLoader::load_from_dir(&cwd)?;
    let guard = logging::init(&config.logging)?;
    debug!(console = %guard.console_output(), "logging initialized");

    let script = commands::convert(&args.convert, &config)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", script).context("failed to write the generated script")?;
    Ok(())
}
