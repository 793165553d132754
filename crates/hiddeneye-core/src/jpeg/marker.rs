//! JPEG marker classification.
//!
//! A marker is the two byte code `0xFF xx` that delimits a segment of a JPEG
//! byte stream. Only the kinds that matter for locating a comment segment are
//! told apart, everything else is [`MarkerKind::Unknown`] and gets skipped.

use std::fmt;

/// First byte of every marker.
pub const MARKER_PREFIX: u8 = 0xFF;

/// Type byte of the comment marker.
pub const COMMENT: u8 = 0xFE;

/// Type byte of the start-of-image marker.
pub const START_OF_IMAGE: u8 = 0xD8;

/// Type byte of the end-of-image marker.
pub const END_OF_IMAGE: u8 = 0xD9;

/// Type byte of the start-of-scan marker.
pub const START_OF_SCAN: u8 = 0xDA;

/// Type byte of the temporary marker used by arithmetic coding, it stands alone.
pub const TEMPORARY: u8 = 0x01;

/// The marker kinds a scan can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    StartOfImage,
    /// Baseline (0xC0) or progressive (0xC2) frame header.
    StartOfFrame,
    DefineHuffmanTable,
    DefineQuantizationTable,
    DefineRestartInterval,
    StartOfScan,
    /// Restart marker 0xD0 to 0xD7.
    Restart,
    /// APPn segment 0xE0 to 0xEF.
    ApplicationSpecific,
    Comment,
    EndOfImage,
    Unknown,
}

/// Maps a marker type byte to its kind.
///
/// Never fails, unrecognised codes are [`MarkerKind::Unknown`].
pub const fn classify(code: u8) -> MarkerKind {
    match code {
        START_OF_IMAGE => MarkerKind::StartOfImage,
        0xC0 | 0xC2 => MarkerKind::StartOfFrame,
        0xC4 => MarkerKind::DefineHuffmanTable,
        0xDB => MarkerKind::DefineQuantizationTable,
        0xDD => MarkerKind::DefineRestartInterval,
        START_OF_SCAN => MarkerKind::StartOfScan,
        0xD0..=0xD7 => MarkerKind::Restart,
        0xE0..=0xEF => MarkerKind::ApplicationSpecific,
        COMMENT => MarkerKind::Comment,
        END_OF_IMAGE => MarkerKind::EndOfImage,
        _ => MarkerKind::Unknown,
    }
}

impl MarkerKind {
    /// Human readable name, as printed when describing a file.
    pub const fn name(self) -> &'static str {
        match self {
            MarkerKind::StartOfImage => "Start of Image",
            MarkerKind::StartOfFrame => "Start of Frame",
            MarkerKind::DefineHuffmanTable => "Define Huffman Table",
            MarkerKind::DefineQuantizationTable => "Define Quantization Table",
            MarkerKind::DefineRestartInterval => "Define Restart Interval",
            MarkerKind::StartOfScan => "Start of Scan",
            MarkerKind::Restart => "Restart",
            MarkerKind::ApplicationSpecific => "Application Specific",
            MarkerKind::Comment => "Comment",
            MarkerKind::EndOfImage => "End of Image",
            MarkerKind::Unknown => "Unknown",
        }
    }

    /// Returns true if a 2 byte length field follows the marker.
    pub const fn has_length(self) -> bool {
        !matches!(
            self,
            MarkerKind::StartOfImage | MarkerKind::EndOfImage | MarkerKind::Restart
        )
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A marker found in a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    /// The type byte following the 0xFF prefix.
    pub code: u8,
    pub kind: MarkerKind,
    /// Absolute position of the 0xFF prefix byte.
    pub offset: u64,
}

impl Marker {
    pub fn new(code: u8, offset: u64) -> Self {
        Self {
            code,
            kind: classify(code),
            offset,
        }
    }

    /// Returns true if a 2 byte length field follows this marker.
    ///
    /// Same as [`MarkerKind::has_length`] except for the temporary marker,
    /// which classifies as unknown but carries no length either.
    pub fn has_length(self) -> bool {
        self.code != TEMPORARY && self.kind.has_length()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0xFF{:02X} {} @ {}", self.code, self.kind, self.offset)
    }
}
