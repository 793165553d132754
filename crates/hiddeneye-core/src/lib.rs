//! # HiddenEye Core API
//!
//! Hides a short text message inside a JPEG file by writing it into a comment
//! segment (marker `0xFFFE`) right behind the start-of-image marker, and reads
//! it back by scanning the marker stream for the first comment segment.
//!
//! Nothing is decoded, the image data stays untouched apart from the bytes
//! the comment segment occupies.
//!
//! # Usage Examples
//!
//! ## Hide a message inside a JPEG
//!
//! ```rust,no_run
//! hiddeneye_core::api::embed::prepare()
//!     .with_message("Hello, World!")
//!     .into_jpeg("carrier.jpg")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Unveil the message again
//!
//! ```rust,no_run
//! let message = hiddeneye_core::api::extract::prepare()
//!     .from_secret_file("carrier.jpg")
//!     .execute_as_text()
//!     .expect("Failed to unveil message from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod editor;
pub mod error;
pub mod jpeg;
pub mod options;
pub mod result;

pub use crate::editor::{
    comment_segment, describe, embed, extract, extract_text, COMMENT_OFFSET, MAX_MESSAGE_LEN,
};
pub use crate::error::HiddenEyeError;
pub use crate::jpeg::{classify, Marker, MarkerKind, MarkerScanner};
pub use crate::options::{EmbedOptions, EmbedStrategy};
pub use crate::result::Result;
