use std::path::{Path, PathBuf};

use crate::{editor, HiddenEyeError, Result};

pub fn prepare() -> ExtractApi {
    ExtractApi::default()
}

#[derive(Default, Debug)]
pub struct ExtractApi {
    secret_file: Option<PathBuf>,
}

impl ExtractApi {
    /// This is the JPEG file that contains the comment segment
    pub fn from_secret_file(mut self, secret_file: impl AsRef<Path>) -> Self {
        self.secret_file = Some(secret_file.as_ref().to_path_buf());
        self
    }

    /// Execute the extraction and return the raw message bytes
    pub fn execute(self) -> Result<Vec<u8>> {
        let Some(secret_file) = self.secret_file else {
            return Err(HiddenEyeError::CarrierNotSet);
        };

        editor::extract(secret_file)
    }

    /// Execute the extraction and decode the message as UTF-8 text
    pub fn execute_as_text(self) -> Result<String> {
        Ok(String::from_utf8(self.execute()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_a_secret_file() {
        assert!(matches!(
            prepare().execute(),
            Err(HiddenEyeError::CarrierNotSet)
        ));
    }
}
