use crate::HiddenEyeError;

pub type Result<T> = std::result::Result<T, HiddenEyeError>;
