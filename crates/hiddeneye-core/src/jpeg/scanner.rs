//! Streaming marker scanner.
//!
//! Walks the segment structure of a JPEG byte stream without decoding any of
//! it. The input is pulled in small windows of [`SCAN_WINDOW`] bytes, so a
//! marker may well straddle two windows.

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use log::trace;

use super::marker::{Marker, MarkerKind, MARKER_PREFIX};
use crate::{HiddenEyeError, Result};

/// Number of bytes pulled from the inner reader at a time.
pub const SCAN_WINDOW: usize = 32;

/// Type byte that marks a stuffed 0xFF inside entropy-coded data.
const STUFFED: u8 = 0x00;

pub struct MarkerScanner<R> {
    inner: R,
    window: [u8; SCAN_WINDOW],
    pos: usize,
    filled: usize,
    consumed: u64,
    scan_data: bool,
}

impl<R: Read> MarkerScanner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            window: [0; SCAN_WINDOW],
            pos: 0,
            filled: 0,
            consumed: 0,
            scan_data: false,
        }
    }

    /// Absolute number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// True while the scanner walks entropy-coded data that follows a start-of-scan header.
    ///
    /// This only reports where the scan is. Stuffed bytes are skipped the same
    /// way on either side, since outside of scan data every segment payload is
    /// stepped over by its length and a 0xFF 0x00 pair cannot show up there.
    pub fn in_scan_data(&self) -> bool {
        self.scan_data
    }

    /// Scans forward to the next marker and leaves the stream right after its type byte.
    ///
    /// Fill bytes (0xFF 0xFF) collapse into the following marker and stuffed
    /// bytes (0xFF 0x00) are skipped as a pair. Fails with
    /// [`HiddenEyeError::EndOfStream`] when the input ends first.
    pub fn find_next_marker(&mut self) -> Result<Marker> {
        loop {
            let mut offset = loop {
                match self.next_byte()? {
                    None => return Err(HiddenEyeError::EndOfStream),
                    Some(MARKER_PREFIX) => break self.consumed - 1,
                    Some(_) => {}
                }
            };

            let code = loop {
                match self.next_byte()? {
                    None => return Err(HiddenEyeError::EndOfStream),
                    Some(MARKER_PREFIX) => offset = self.consumed - 1,
                    Some(code) => break code,
                }
            };

            if code == STUFFED {
                continue;
            }

            let marker = Marker::new(code, offset);
            if self.scan_data && marker.kind != MarkerKind::Restart {
                self.scan_data = false;
            }
            trace!("found {marker}");

            return Ok(marker);
        }
    }

    /// Advances past the payload of `marker`, which must be the marker just found.
    ///
    /// Markers without a length field are left as they are. After a
    /// start-of-scan header the scanner reports [`Self::in_scan_data`] until
    /// a marker other than a restart shows up.
    pub fn skip_segment(&mut self, marker: &Marker) -> Result<()> {
        if !marker.has_length() {
            return Ok(());
        }

        let len = self.read_length(marker)?;
        let skipped = io::copy(&mut self.by_ref().take(len as u64), &mut io::sink())?;
        if skipped < len as u64 {
            return Err(HiddenEyeError::MalformedSegment {
                offset: marker.offset,
                reason: "payload is cut off by the end of the file",
            });
        }
        trace!("skipped {len} payload bytes of {marker}");

        if marker.kind == MarkerKind::StartOfScan {
            self.scan_data = true;
        }

        Ok(())
    }

    /// Reads the length field and exactly that many payload bytes of `marker`.
    pub fn read_segment_payload(&mut self, marker: &Marker) -> Result<Vec<u8>> {
        let len = self.read_length(marker)?;
        let mut payload = vec![0; len];
        self.read_exact(&mut payload)
            .map_err(|e| cut_off(e, marker, "payload is cut off by the end of the file"))?;

        Ok(payload)
    }

    /// Iterates over all remaining markers, skipping each segment payload before
    /// looking for the next one. Ends quietly at the end of the stream.
    pub fn markers(&mut self) -> Markers<'_, R> {
        Markers {
            scanner: self,
            pending: None,
            done: false,
        }
    }

    /// Payload size of the segment, that is the length field minus its own 2 bytes.
    fn read_length(&mut self, marker: &Marker) -> Result<usize> {
        let len = self
            .read_u16::<BigEndian>()
            .map_err(|e| cut_off(e, marker, "length field is cut off by the end of the file"))?;

        if len < 2 {
            return Err(HiddenEyeError::MalformedSegment {
                offset: marker.offset,
                reason: "length field is smaller than 2",
            });
        }

        Ok(len as usize - 2)
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if !self.fill_window()? {
            return Ok(None);
        }
        let b = self.window[self.pos];
        self.pos += 1;
        self.consumed += 1;

        Ok(Some(b))
    }

    /// Makes sure there is at least one unread byte in the window, false at end of input.
    fn fill_window(&mut self) -> io::Result<bool> {
        if self.pos < self.filled {
            return Ok(true);
        }
        loop {
            match self.inner.read(&mut self.window) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Serves the buffered window first, then the inner reader.
impl<R: Read> Read for MarkerScanner<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || !self.fill_window()? {
            return Ok(0);
        }
        let n = (self.filled - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.window[self.pos..self.pos + n]);
        self.pos += n;
        self.consumed += n as u64;

        Ok(n)
    }
}

fn cut_off(e: io::Error, marker: &Marker, reason: &'static str) -> HiddenEyeError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        HiddenEyeError::MalformedSegment {
            offset: marker.offset,
            reason,
        }
    } else {
        e.into()
    }
}

/// Iterator returned by [`MarkerScanner::markers`].
pub struct Markers<'a, R> {
    scanner: &'a mut MarkerScanner<R>,
    pending: Option<Marker>,
    done: bool,
}

impl<R: Read> Iterator for Markers<'_, R> {
    type Item = Result<Marker>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(previous) = self.pending.take() {
            if let Err(e) = self.scanner.skip_segment(&previous) {
                self.done = true;
                return Some(Err(e));
            }
        }

        match self.scanner.find_next_marker() {
            Ok(marker) => {
                self.pending = Some(marker);
                Some(Ok(marker))
            }
            Err(HiddenEyeError::EndOfStream) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
