//! JPEG container plumbing.
//!
//! Only the marker structure is looked at, nothing here decodes image data.

pub mod marker;
pub mod scanner;

pub use marker::{classify, Marker, MarkerKind};
pub use scanner::{MarkerScanner, Markers, SCAN_WINDOW};
