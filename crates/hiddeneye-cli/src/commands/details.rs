use std::path::Path;

use log::debug;

use crate::CliResult;

pub fn run(file: &Path) -> CliResult<()> {
    let markers = hiddeneye_core::commands::details(file)?;
    debug!("{} markers in {}", markers.len(), file.display());

    for marker in markers {
        println!("{}", marker.kind);
    }

    Ok(())
}
