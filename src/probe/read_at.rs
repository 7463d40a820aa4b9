//! Positional reads.

use bytes::Bytes;
use std::fs::File;
use std::io;
use std::sync::Arc;

/// A byte source that supports reads at an absolute offset.
///
/// Implementations take `&self`, so one source can serve concurrent probes.
pub trait ReadAt {
    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read. `Ok(0)` means `offset` is at or past
    /// the end of the source.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.len() => start,
            _ => return Ok(0),
        };
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, offset)
    }
}

impl ReadAt for Bytes {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self[..].read_at(buf, offset)
    }
}

#[cfg(any(unix, windows))]
impl ReadAt for File {
    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

impl<R: ReadAt + ?Sized> ReadAt for &R {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

impl<R: ReadAt + ?Sized> ReadAt for Arc<R> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

impl<R: ReadAt + ?Sized> ReadAt for Box<R> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_slice_read_at() {
        let data: Vec<u8> = (0..10).collect();
        let mut buf = [0u8; 4];

        assert_eq!(data.read_at(&mut buf, 2).unwrap(), 4);
        assert_eq!(buf, [2, 3, 4, 5]);

        assert_eq!(data.read_at(&mut buf, 8).unwrap(), 2);
        assert_eq!(&buf[..2], &[8, 9]);

        assert_eq!(data.read_at(&mut buf, 10).unwrap(), 0);
        assert_eq!(data.read_at(&mut buf, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_bytes_read_at() {
        let data = Bytes::from_static(b"hello world");
        let mut buf = [0u8; 5];
        assert_eq!(data.read_at(&mut buf, 6).unwrap(), 5);
        assert_eq!(&buf, b"world");
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_file_read_at() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        file.flush().unwrap();

        let file = File::open(file.path()).unwrap();
        let mut buf = [0u8; 3];
        assert_eq!(file.read_at(&mut buf, 7).unwrap(), 3);
        assert_eq!(&buf, b"789");
        assert_eq!(file.read_at(&mut buf, 10).unwrap(), 0);
    }

    #[test]
    fn test_shared_read_at() {
        let data: Arc<[u8]> = Arc::from(&b"abcdef"[..]);
        let mut buf = [0u8; 2];
        assert_eq!(data.read_at(&mut buf, 1).unwrap(), 2);
        assert_eq!(&buf, b"bc");

        let boxed: Box<dyn ReadAt> = Box::new(vec![1u8, 2, 3]);
        assert_eq!(boxed.read_at(&mut buf, 1).unwrap(), 2);
        assert_eq!(buf, [2, 3]);
    }
}
