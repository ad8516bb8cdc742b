use std::{
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Seekable byte stream with its own little-endian primitives.
///
/// This is the abstraction the stream-backed capsule codec targets. It is deliberately separate
/// from `std::io`: implementors provide raw partial transfers, and the provided methods build the
/// full-length and LE32 operations on top. Use [`StreamIo`] to hand a stream to `std::io` consumers
/// such as the image encoder.
pub trait RwStream {
    /// Read up to `buf.len()` bytes, returning how many were read (`0` at end of stream).
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write up to `buf.len()` bytes, returning how many were accepted.
    fn write_some(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Move the stream position.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;

    /// Current position.
    fn tell(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::Current(0))
    }

    /// Total stream length; the position is left unchanged.
    fn size(&mut self) -> io::Result<u64> {
        let cur = self.tell()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(cur))?;
        Ok(end)
    }

    /// Read until `buf` is full, the stream ends, or an error occurs. Returns bytes read.
    fn read_full(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read_some(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        filled
    }

    /// Write until `buf` is consumed, the stream refuses more, or an error occurs. Returns bytes
    /// written.
    fn write_full(&mut self, buf: &[u8]) -> usize {
        let mut done = 0;
        while done < buf.len() {
            match self.write_some(&buf[done..]) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        done
    }

    /// Read a little-endian `u32`.
    fn read_le32(&mut self) -> io::Result<u32> {
        let mut b = [0u8; 4];
        let n = self.read_full(&mut b);
        if n != b.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read_le32: got {n} of 4 bytes"),
            ));
        }
        Ok(u32::from_le_bytes(b))
    }

    /// Write a little-endian `u32`.
    fn write_le32(&mut self, v: u32) -> io::Result<()> {
        let n = self.write_full(&v.to_le_bytes());
        if n != 4 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("write_le32: wrote {n} of 4 bytes"),
            ));
        }
        Ok(())
    }
}

/// Growable in-memory stream that owns its bytes.
#[derive(Debug, Default, Clone)]
pub struct MemStream {
    cursor: Cursor<Vec<u8>>,
}

impl MemStream {
    /// Empty stream positioned at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream over existing bytes, positioned at 0.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    /// Borrow all bytes regardless of position.
    pub fn as_slice(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    /// Consume the stream and return its bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl RwStream for MemStream {
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }

    fn write_some(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.cursor.write(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(&mut self.cursor, pos)
    }
}

/// Read-only stream over borrowed bytes. Writes fail.
#[derive(Debug, Clone)]
pub struct ConstMemStream<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ConstMemStream<'a> {
    /// Stream over `bytes`, positioned at 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }
}

impl RwStream for ConstMemStream<'_> {
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }

    fn write_some(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only memory stream",
        ))
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(&mut self.cursor, pos)
    }
}

/// File-backed stream.
#[derive(Debug)]
pub struct FileStream {
    file: File,
}

impl FileStream {
    /// Wrap an already opened file.
    pub fn new(file: File) -> Self {
        Self { file }
    }

    /// Open an existing file read-only.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }

    /// Create (or truncate) a file for reading and writing.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map(Self::new)
    }

    /// Release the underlying file.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl RwStream for FileStream {
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn write_some(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(&mut self.file, pos)
    }
}

/// `std::io` view over any [`RwStream`].
pub struct StreamIo<'a, S: ?Sized> {
    stream: &'a mut S,
}

impl<'a, S: RwStream + ?Sized> StreamIo<'a, S> {
    /// Borrow `stream` for `std::io` consumers.
    pub fn new(stream: &'a mut S) -> Self {
        Self { stream }
    }
}

impl<S: RwStream + ?Sized> Read for StreamIo<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read_some(buf)
    }
}

impl<S: RwStream + ?Sized> Write for StreamIo<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write_some(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: RwStream + ?Sized> Seek for StreamIo<'_, S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream.seek(pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/container/stream.rs"]
mod tests;
