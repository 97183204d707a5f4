use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};
use serde::de::DeserializeOwned;

use crate::error::{Location, OgzError, Result, Section};

/// Forward-only reader that tracks how many bytes the decoders consumed.
///
/// Every read helper takes the [`Section`] it belongs to so that failures
/// carry the byte offset where the failing element started.
pub struct OgzReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> OgzReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn locate(&self, section: Section) -> Location {
        Location::new(section, self.position)
    }

    pub fn read_exact_in(&mut self, buf: &mut [u8], location: Location) -> Result<()> {
        self.read_exact(buf).map_err(|err| read_error(location, err))
    }

    /// Reads exactly `len` bytes, growing the buffer only as data arrives.
    pub fn read_vec(&mut self, len: usize, location: Location) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len.min(64 * 1024));
        self.by_ref()
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(|err| read_error(location, err))?;
        if bytes.len() < len {
            return Err(OgzError::Truncated {
                location,
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("Could not read all {} byte(s)!", len),
                ),
            });
        }
        Ok(bytes)
    }

    pub fn read_u8_in(&mut self, location: Location) -> Result<u8> {
        self.read_u8().map_err(|err| read_error(location, err))
    }

    pub fn read_u16_in(&mut self, location: Location) -> Result<u16> {
        self.read_u16::<LittleEndian>()
            .map_err(|err| read_error(location, err))
    }

    pub fn read_i32_in(&mut self, location: Location) -> Result<i32> {
        self.read_i32::<LittleEndian>()
            .map_err(|err| read_error(location, err))
    }

    pub fn read_f32_in(&mut self, location: Location) -> Result<f32> {
        self.read_f32::<LittleEndian>()
            .map_err(|err| read_error(location, err))
    }

    /// Decodes a fixed-layout record with bincode's little-endian fixint encoding.
    pub fn deserialize_in<T: DeserializeOwned>(&mut self, location: Location) -> Result<T> {
        bincode::deserialize_from(&mut *self).map_err(|err| match *err {
            bincode::ErrorKind::Io(err) => read_error(location, err),
            other => OgzError::Io {
                location,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, other),
            },
        })
    }

    /// Consumes and drops exactly `len` bytes.
    pub fn skip(&mut self, len: u64, location: Location) -> Result<()> {
        let skipped = std::io::copy(&mut self.by_ref().take(len), &mut std::io::sink())
            .map_err(|err| read_error(location, err))?;
        if skipped < len {
            return Err(OgzError::Truncated {
                location,
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("Could only skip {} of {} byte(s)!", skipped, len),
                ),
            });
        }
        Ok(())
    }
}

impl<R: Read> Read for OgzReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

fn read_error(location: Location, err: std::io::Error) -> OgzError {
    if err.get_ref().is_some_and(|inner| inner.is::<CopyError>()) {
        return OgzError::Output {
            target: format!("copy of consumed input ({})", location),
            source: err,
        };
    }
    match err.kind() {
        std::io::ErrorKind::UnexpectedEof => OgzError::Truncated {
            location,
            source: err,
        },
        _ => OgzError::Io {
            location,
            source: err,
        },
    }
}

/// Failure writing to the copy side of a [`TeeReader`].
#[derive(Debug, thiserror::Error)]
#[error("copying consumed input: {0}")]
pub struct CopyError(#[source] pub std::io::Error);

/// Reader that duplicates every byte it hands out into a second writer.
///
/// Must sit above any read buffering: only bytes actually returned to the
/// caller are copied.
pub struct TeeReader<R, W> {
    reader: R,
    copy: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    pub fn new(reader: R, copy: W) -> Self {
        Self { reader, copy }
    }

    /// Flushes the copy and hands both halves back.
    pub fn finish(mut self) -> std::io::Result<(R, W)> {
        self.copy.flush()?;
        Ok((self.reader, self.copy))
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.copy
            .write_all(&buf[..n])
            .map_err(|err| std::io::Error::other(CopyError(err)))?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x00, 0x00, 0x80, 0x3f];
        let mut reader = OgzReader::new(&data[..]);
        let location = reader.locate(Section::Header);

        assert_eq!(reader.read_u8_in(location).unwrap(), 0x01);
        assert_eq!(reader.read_u16_in(location).unwrap(), 0x0302);
        assert_eq!(reader.read_i32_in(location).unwrap(), 0x07060504);
        assert_eq!(reader.read_f32_in(location).unwrap(), 1.0);
        assert_eq!(reader.position(), 11);
    }

    #[test]
    fn test_truncated_read() {
        let data = [0x01];
        let mut reader = OgzReader::new(&data[..]);
        let location = reader.locate(Section::MostRecentlyUsed);
        let err = reader.read_u16_in(location).unwrap_err();
        assert!(matches!(err, OgzError::Truncated { location, .. } if location.section == Section::MostRecentlyUsed));
    }

    #[test]
    fn test_skip() {
        let data = [0u8; 10];
        let mut reader = OgzReader::new(&data[..]);
        reader.skip(4, reader.locate(Section::Extras)).unwrap();
        assert_eq!(reader.position(), 4);

        let err = reader.skip(7, reader.locate(Section::Extras)).unwrap_err();
        assert!(matches!(err, OgzError::Truncated { .. }));
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_tee_copies_only_consumed_bytes() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let tee = TeeReader::new(&data[..], Vec::new());
        let mut reader = OgzReader::new(tee);
        let location = reader.locate(Section::Header);
        reader.read_u16_in(location).unwrap();
        reader.skip(1, location).unwrap();

        let (_, copy) = reader.into_inner().finish().unwrap();
        assert_eq!(copy, vec![1, 2, 3]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tee_write_failure_is_output_error() {
        let data = [1u8, 2, 3, 4];
        let mut reader = OgzReader::new(TeeReader::new(&data[..], FailingWriter));
        let location = reader.locate(Section::Header);
        let err = reader.read_i32_in(location).unwrap_err();
        assert!(matches!(err, OgzError::Output { .. }));
    }
}
