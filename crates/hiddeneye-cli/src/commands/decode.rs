use std::path::Path;

use crate::CliResult;

pub fn run(file: &Path) -> CliResult<()> {
    println!("Decoding file {}", file.display());

    let message = hiddeneye_core::commands::decode(file, |marker| println!("{}", marker.kind))?;
    println!("The secret message is: {message}");

    Ok(())
}
