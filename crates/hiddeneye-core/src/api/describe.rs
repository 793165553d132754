use std::path::{Path, PathBuf};

use crate::jpeg::Marker;
use crate::{editor, HiddenEyeError, Result};

pub fn prepare() -> DescribeApi {
    DescribeApi::default()
}

#[derive(Default, Debug)]
pub struct DescribeApi {
    file: Option<PathBuf>,
}

impl DescribeApi {
    /// The JPEG file to walk, used readonly
    pub fn from_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Execute the walk and return all markers in file order
    pub fn execute(self) -> Result<Vec<Marker>> {
        let Some(file) = self.file else {
            return Err(HiddenEyeError::CarrierNotSet);
        };

        editor::describe(file)
    }
}
