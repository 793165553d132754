use std::path::Path;

use hiddeneye_core::EmbedOptions;
use log::info;

use crate::CliResult;

pub fn run(file: &Path, message: &str, options: EmbedOptions) -> CliResult<()> {
    println!("Encoding message {message} in file {}", file.display());
    info!("embedding with {:?}", options.strategy);

    let written = hiddeneye_core::commands::encode(file, message, options)?;
    println!("Bytes written {written}");

    Ok(())
}
