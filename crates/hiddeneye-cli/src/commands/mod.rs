pub mod decode;
pub mod details;
pub mod encode;
