//! Reads and writes the comment segment that carries the hidden message.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;

use crate::jpeg::marker::{COMMENT, MARKER_PREFIX, START_OF_IMAGE};
use crate::jpeg::{Marker, MarkerKind, MarkerScanner};
use crate::{EmbedOptions, EmbedStrategy, HiddenEyeError, Result};

/// The comment segment is written right behind the start-of-image marker.
pub const COMMENT_OFFSET: u64 = 2;

/// Largest message that fits, the length field counts itself too.
pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize - 2;

/// Builds `0xFF 0xFE | length | message`, with the big-endian length counting
/// its own 2 bytes plus the message.
pub fn comment_segment(message: &[u8]) -> Result<Vec<u8>> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(HiddenEyeError::MessageTooLarge {
            len: message.len(),
            max: MAX_MESSAGE_LEN,
        });
    }

    let mut segment = Vec::with_capacity(message.len() + 4);
    segment.extend_from_slice(&[MARKER_PREFIX, COMMENT]);
    segment.write_u16::<BigEndian>((message.len() + 2) as u16)?;
    segment.extend_from_slice(message);

    Ok(segment)
}

/// Embeds `message` into the JPEG file at `path`, returns the number of bytes written.
pub fn embed(path: impl AsRef<Path>, message: &[u8], options: &EmbedOptions) -> Result<usize> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    embed_into(&mut file, message, options)
}

/// Embeds `message` into `carrier` with a single positioned write at [`COMMENT_OFFSET`].
pub fn embed_into<S>(carrier: &mut S, message: &[u8], options: &EmbedOptions) -> Result<usize>
where
    S: Read + Write + Seek,
{
    let mut block = comment_segment(message)?;

    if options.strategy == EmbedStrategy::Splice {
        carrier.seek(SeekFrom::Start(0))?;
        let mut soi = [0u8; 2];
        carrier.read_exact(&mut soi).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => HiddenEyeError::MissingStartOfImage,
            _ => e.into(),
        })?;
        if soi != [MARKER_PREFIX, START_OF_IMAGE] {
            return Err(HiddenEyeError::MissingStartOfImage);
        }
        carrier.read_to_end(&mut block)?;
    }

    carrier.seek(SeekFrom::Start(COMMENT_OFFSET))?;
    let written = carrier.write(&block)?;
    if written < block.len() {
        return Err(HiddenEyeError::ShortWrite {
            written,
            expected: block.len(),
        });
    }
    carrier.flush()?;
    debug!("Bytes written {written}");

    Ok(written)
}

/// Extracts the payload of the first comment segment of the JPEG file at `path`.
pub fn extract(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    extract_from(File::open(path)?)
}

/// Like [`extract`] but decodes the payload as UTF-8 text.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    Ok(String::from_utf8(extract(path)?)?)
}

pub fn extract_from<R: Read>(reader: R) -> Result<Vec<u8>> {
    extract_visiting(reader, |_| {})
}

/// Scans from the start of `reader` for the first comment segment and returns
/// its payload. Every marker passed on the way, the comment included, is
/// handed to `visit`.
pub fn extract_visiting<R, F>(reader: R, mut visit: F) -> Result<Vec<u8>>
where
    R: Read,
    F: FnMut(&Marker),
{
    let mut scanner = MarkerScanner::new(reader);

    loop {
        let marker = scanner.find_next_marker()?;
        visit(&marker);

        match marker.kind {
            MarkerKind::EndOfImage => return Err(HiddenEyeError::NoCommentFound),
            MarkerKind::Comment => {
                let payload = scanner.read_segment_payload(&marker)?;
                debug!("{} bytes of comment payload at {}", payload.len(), marker.offset);
                return Ok(payload);
            }
            _ => scanner.skip_segment(&marker)?,
        }
    }
}

/// Lists every marker of the JPEG file at `path` in file order.
pub fn describe(path: impl AsRef<Path>) -> Result<Vec<Marker>> {
    describe_from(File::open(path)?)
}

pub fn describe_from<R: Read>(reader: R) -> Result<Vec<Marker>> {
    MarkerScanner::new(reader).markers().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// SOI, one APP0 segment of length 16, EOI.
    fn minimal_jpeg() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }

    #[test]
    fn test_comment_segment_layout() {
        assert_eq!(
            comment_segment(b"hi").unwrap(),
            vec![0xFF, 0xFE, 0x00, 0x04, b'h', b'i']
        );
        assert_eq!(comment_segment(b"").unwrap(), vec![0xFF, 0xFE, 0x00, 0x02]);
    }

    #[test]
    fn test_comment_segment_size_limit() {
        let fits = vec![b'a'; MAX_MESSAGE_LEN];
        let segment = comment_segment(&fits).unwrap();
        assert_eq!(&segment[2..4], &[0xFF, 0xFF]);

        let too_large = vec![b'a'; MAX_MESSAGE_LEN + 1];
        assert!(matches!(
            comment_segment(&too_large),
            Err(HiddenEyeError::MessageTooLarge { len: 65534, max: 65533 })
        ));
    }

    #[test]
    fn test_embed_overwrites_at_fixed_offset() {
        let original = minimal_jpeg();
        let mut carrier = Cursor::new(original.clone());

        let written = embed_into(&mut carrier, b"hi", &EmbedOptions::default()).unwrap();
        let data = carrier.into_inner();

        assert_eq!(written, 6);
        assert_eq!(data.len(), original.len());
        assert_eq!(&data[..8], &[0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x04, b'h', b'i']);
        assert_eq!(&data[8..], &original[8..]);
    }

    #[test]
    fn test_embed_splice_keeps_original_segments() {
        let original = minimal_jpeg();
        let mut carrier = Cursor::new(original.clone());
        let options = EmbedOptions::default().with_strategy(EmbedStrategy::Splice);

        let written = embed_into(&mut carrier, b"hi", &options).unwrap();
        let data = carrier.into_inner();

        assert_eq!(written, 6 + original.len() - 2);
        assert_eq!(data.len(), original.len() + 6);
        assert_eq!(&data[..8], &[0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x04, b'h', b'i']);
        assert_eq!(&data[8..], &original[2..]);

        let kinds: Vec<MarkerKind> = describe_from(Cursor::new(data))
            .unwrap()
            .into_iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::StartOfImage,
                MarkerKind::Comment,
                MarkerKind::ApplicationSpecific,
                MarkerKind::EndOfImage,
            ]
        );
    }

    #[test]
    fn test_embed_splice_rejects_non_jpeg() {
        let options = EmbedOptions::default().with_strategy(EmbedStrategy::Splice);

        let mut carrier = Cursor::new(b"GIF89a".to_vec());
        assert!(matches!(
            embed_into(&mut carrier, b"hi", &options),
            Err(HiddenEyeError::MissingStartOfImage)
        ));

        let mut carrier = Cursor::new(vec![0xFF]);
        assert!(matches!(
            embed_into(&mut carrier, b"hi", &options),
            Err(HiddenEyeError::MissingStartOfImage)
        ));
    }

    /// Accepts only half of every write.
    struct HalfWriter(Cursor<Vec<u8>>);

    impl Read for HalfWriter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Write for HalfWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(&buf[..buf.len() / 2])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.flush()
        }
    }

    impl Seek for HalfWriter {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.0.seek(pos)
        }
    }

    #[test]
    fn test_embed_short_write_is_not_retried() {
        let mut carrier = HalfWriter(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xD9]));

        assert!(matches!(
            embed_into(&mut carrier, b"hi", &EmbedOptions::default()),
            Err(HiddenEyeError::ShortWrite {
                written: 3,
                expected: 6
            })
        ));
        assert_eq!(carrier.0.into_inner(), vec![0xFF, 0xD8, 0xFF, 0xFE, 0x00]);
    }

    #[test]
    fn test_extract_steps_over_temporary_marker() {
        let data = vec![
            0xFF, 0xD8, 0xFF, 0x01, 0xFF, 0xFE, 0x00, 0x04, b'h', b'i', 0xFF, 0xD9,
        ];

        assert_eq!(extract_from(Cursor::new(data)).unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_extract_roundtrip() {
        let mut carrier = Cursor::new(minimal_jpeg());
        embed_into(&mut carrier, b"hi", &EmbedOptions::default()).unwrap();
        carrier.set_position(0);

        assert_eq!(extract_from(carrier).unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_extract_without_comment() {
        assert!(matches!(
            extract_from(Cursor::new(minimal_jpeg())),
            Err(HiddenEyeError::NoCommentFound)
        ));
    }

    #[test]
    fn test_extract_without_end_of_image() {
        assert!(matches!(
            extract_from(Cursor::new(vec![0xFF, 0xD8, 0x00, 0x00])),
            Err(HiddenEyeError::EndOfStream)
        ));
    }

    #[test]
    fn test_extract_malformed_length() {
        let data = vec![0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x01, 0xFF, 0xD9];
        assert!(matches!(
            extract_from(Cursor::new(data)),
            Err(HiddenEyeError::MalformedSegment { offset: 2, .. })
        ));
    }

    #[test]
    fn test_extract_returns_first_comment() {
        let data = vec![
            0xFF, 0xD8, //
            0xFF, 0xFE, 0x00, 0x05, b'o', b'n', b'e', //
            0xFF, 0xFE, 0x00, 0x05, b't', b'w', b'o', //
            0xFF, 0xD9,
        ];
        let mut visited = Vec::new();
        let payload = extract_visiting(Cursor::new(data), |m| visited.push(m.kind)).unwrap();

        assert_eq!(payload, b"one".to_vec());
        assert_eq!(visited, vec![MarkerKind::StartOfImage, MarkerKind::Comment]);
    }
}
