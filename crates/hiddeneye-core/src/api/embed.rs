use std::path::{Path, PathBuf};

use crate::{editor, EmbedOptions, EmbedStrategy, HiddenEyeError, Result};

pub fn prepare() -> EmbedApi {
    EmbedApi::default()
}

#[derive(Default, Debug)]
pub struct EmbedApi {
    message: Option<Vec<u8>>,
    carrier: Option<PathBuf>,
    options: EmbedOptions,
}

impl EmbedApi {
    /// Use the given embed options
    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// Shortcut for setting only the embed strategy
    pub fn using_strategy(mut self, strategy: EmbedStrategy) -> Self {
        self.options.strategy = strategy;
        self
    }

    /// The text message that will be hidden
    pub fn with_message(mut self, message: impl AsRef<str>) -> Self {
        self.message = Some(message.as_ref().as_bytes().to_vec());
        self
    }

    /// Raw bytes that will be hidden, no text encoding assumed
    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.message = Some(bytes.into());
        self
    }

    /// The JPEG file that gets modified in place
    pub fn into_jpeg(mut self, carrier: impl AsRef<Path>) -> Self {
        self.carrier = Some(carrier.as_ref().to_path_buf());
        self
    }

    /// Execute the embedding, returns the number of bytes written
    pub fn execute(self) -> Result<usize> {
        let Some(message) = self.message else {
            return Err(HiddenEyeError::MissingMessage);
        };
        let Some(carrier) = self.carrier else {
            return Err(HiddenEyeError::CarrierNotSet);
        };

        editor::embed(carrier, &message, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_a_message() {
        let result = prepare().into_jpeg("whatever.jpg").execute();
        assert!(matches!(result, Err(HiddenEyeError::MissingMessage)));
    }

    #[test]
    fn should_require_a_carrier() {
        let result = prepare().with_message("Hello World").execute();
        assert!(matches!(result, Err(HiddenEyeError::CarrierNotSet)));
    }
}
