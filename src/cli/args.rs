use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// CWL CommandLineTool descriptor to convert
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}
