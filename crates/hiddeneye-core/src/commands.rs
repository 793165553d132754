use std::fs::File;
use std::path::Path;

use crate::jpeg::Marker;
use crate::{editor, EmbedOptions, Result};

pub fn encode(file: &Path, message: &str, options: EmbedOptions) -> Result<usize> {
    crate::api::embed::prepare()
        .with_options(options)
        .with_message(message)
        .into_jpeg(file)
        .execute()
}

/// Extracts the hidden message, every marker passed on the way goes to `visit`.
/// Payload bytes that are no valid UTF-8 get replaced, the message is meant for a console.
pub fn decode(file: &Path, visit: impl FnMut(&Marker)) -> Result<String> {
    let payload = editor::extract_visiting(File::open(file)?, visit)?;

    Ok(String::from_utf8_lossy(&payload).into_owned())
}

pub fn details(file: &Path) -> Result<Vec<Marker>> {
    crate::api::describe::prepare().from_file(file).execute()
}
