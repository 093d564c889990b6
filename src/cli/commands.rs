use crate::{
    cli::args::ConvertArgs,
    core::{self, config::ConverterConfig},
    Result,
};
use tracing::info;

/// Convert the descriptor named on the command line into Nextflow text.
pub fn convert(args: &ConvertArgs, config: &ConverterConfig) -> Result<String> {
    info!(file = %args.file.display(), "converting descriptor");
    let script = core::convert_file(&args.file, &config.render)?;
    Ok(script)
}
