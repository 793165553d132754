use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HiddenEyeError {
    /// Represents any failure to open, read, write or seek the carrier file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Represents a write that accepted fewer bytes than the comment block holds.
    /// The write is not retried.
    #[error("Short write: only {written} of {expected} bytes were written")]
    ShortWrite { written: usize, expected: usize },

    /// Represents a scan that ran out of input before another marker showed up
    #[error("End of stream reached before a marker was found")]
    EndOfStream,

    /// Represents a scan that hit the end-of-image marker before any comment segment
    #[error("No comment segment found before the end of the image")]
    NoCommentFound,

    /// Represents a segment whose length field is inconsistent with the data,
    /// for example a length below 2 or a payload cut off by the end of the file
    #[error("Malformed segment at offset {offset}: {reason}")]
    MalformedSegment { offset: u64, reason: &'static str },

    /// Represents a message that does not fit into the 2 byte length field of a comment segment
    #[error("Message of {len} bytes is too large, a comment segment carries at most {max} bytes")]
    MessageTooLarge { len: usize, max: usize },

    /// Represents a carrier that does not begin with the start-of-image marker
    #[error("Carrier is not a JPEG file, the start-of-image marker is missing")]
    MissingStartOfImage,

    /// Represents the error of invalid UTF-8 text data found inside of a comment segment
    #[error("Invalid text data found inside the comment segment")]
    InvalidTextData(#[from] FromUtf8Error),

    #[error("No carrier file set")]
    CarrierNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
