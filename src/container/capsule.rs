use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use crate::{
    codec::byte_order::{LittleEndian, SoftReader, SoftWriter},
    container::{
        kind::AssetKind,
        stream::{ConstMemStream, RwStream},
    },
    foundation::{
        accumulator::ErrorAccumulator,
        error::{CapsuleError, CapsuleResult},
    },
};

/// Header length in bytes: `type` then `size`, both little-endian `u32`.
pub const HEADER_LEN: usize = 8;

/// Stream payloads are pulled in slices of this size.
const STREAM_CHUNK: usize = 64 * 1024;

/// Typed binary container: a type tag plus an exclusively owned payload.
///
/// `size` is derived from the payload, so a capsule never exposes a buffer whose length disagrees
/// with its header. `data == None` is the empty (never populated or cleared) state; a populated
/// capsule may still carry a zero-length payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capsule {
    type_tag: u32,
    data: Option<Vec<u8>>,
}

/// Serializable summary of a capsule header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CapsuleInfo {
    /// Raw header tag.
    pub type_tag: u32,
    /// Classified kind, if the tag is known.
    pub kind: Option<AssetKind>,
    /// Payload length in bytes.
    pub size: u32,
    /// Whether a payload is held.
    pub populated: bool,
}

impl Capsule {
    /// Empty capsule (tag 0, no payload).
    pub fn new() -> Self {
        Self::default()
    }

    /// Populated capsule with an explicit tag.
    pub fn with_payload(type_tag: u32, data: Vec<u8>) -> Self {
        Self {
            type_tag,
            data: Some(data),
        }
    }

    /// Populated capsule tagged with `kind`.
    pub fn of_kind(kind: AssetKind, data: Vec<u8>) -> Self {
        Self::with_payload(kind.tag(), data)
    }

    /// Raw header tag.
    pub fn type_tag(&self) -> u32 {
        self.type_tag
    }

    /// Override the header tag.
    pub fn set_type_tag(&mut self, tag: u32) {
        self.type_tag = tag;
    }

    /// Classified kind, `None` for tags the classifier does not know.
    pub fn kind(&self) -> Option<AssetKind> {
        AssetKind::from_tag(self.type_tag)
    }

    /// Payload length in bytes (0 when empty).
    pub fn size(&self) -> u32 {
        self.data
            .as_ref()
            .map_or(0, |d| u32::try_from(d.len()).unwrap_or(u32::MAX))
    }

    /// Borrow the payload, if populated.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// `true` when no payload is held.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Consume the capsule and return its payload.
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data
    }

    /// Header summary.
    pub fn info(&self) -> CapsuleInfo {
        CapsuleInfo {
            type_tag: self.type_tag,
            kind: self.kind(),
            size: self.size(),
            populated: self.data.is_some(),
        }
    }

    /// Read-only stream over the payload (empty when not populated), for decoders that consume
    /// the capsule as a virtual file.
    pub fn as_stream(&self) -> ConstMemStream<'_> {
        ConstMemStream::new(self.data.as_deref().unwrap_or(&[]))
    }

    /// Free the payload early and reset to the empty state. Safe to call repeatedly.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Release the capsule and its payload.
    pub fn destroy(self) {
        drop(self);
    }

    /// Load a whole file as a capsule, tagging it from the file name.
    ///
    /// Fails with [`CapsuleError::Io`] when the file cannot be opened (nothing is allocated) or
    /// when any read fails; the file is closed on every path.
    pub fn from_file(path: impl AsRef<Path>) -> CapsuleResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "unable to open capsule source");
            CapsuleError::io(format!("unable to open '{}': {e}", path.display()))
        })?;

        let len = file
            .metadata()
            .map_err(|e| CapsuleError::io(format!("stat '{}': {e}", path.display())))?
            .len();
        let size = u32::try_from(len).map_err(|_| {
            CapsuleError::argument(format!(
                "'{}' is {len} bytes, larger than a capsule can hold",
                path.display()
            ))
        })?;

        let mut caps = Self {
            type_tag: AssetKind::from_path(path).tag(),
            data: None,
        };
        let mut errors = ErrorAccumulator::new();
        caps.fill_payload(size, &mut errors, |buf, len| {
            (&mut file).take(len as u64).read_to_end(buf).map(drop)
        });
        errors.finish()?;
        Ok(caps)
    }

    /// Write header and payload to `dst` through the byte-order codec.
    ///
    /// Any short write is recorded in `errors`. An empty capsule or an oversized payload is
    /// recorded as an argument failure and nothing is written.
    pub fn type_write<W: Write + ?Sized>(&self, dst: &mut W, errors: &mut ErrorAccumulator) {
        let Some(data) = self.writable_payload(errors) else {
            return;
        };
        let mut w = SoftWriter::new(dst, errors);
        w.write_u32::<LittleEndian>(self.type_tag);
        w.write_u32::<LittleEndian>(data.len() as u32);
        w.write_bytes(data);
    }

    /// Read header and payload from `src` into this capsule, replacing any previous content.
    ///
    /// The payload is only read when both header fields were read cleanly. On any failure the
    /// capsule is left empty and the failure is recorded in `errors`.
    pub fn type_read<R: Read + ?Sized>(&mut self, src: &mut R, errors: &mut ErrorAccumulator) {
        self.clear();
        let cp = errors.checkpoint();
        let (type_tag, size) = {
            let mut r = SoftReader::new(&mut *src, &mut *errors);
            (r.read_u32::<LittleEndian>(), r.read_u32::<LittleEndian>())
        };
        if errors.failed_since(cp) {
            return;
        }
        self.type_tag = type_tag;
        self.fill_payload(size, errors, |buf, len| {
            (&mut *src).take(len as u64).read_to_end(buf).map(drop)
        });
    }

    /// Write header and payload to a [`RwStream`] using the stream's own LE32 primitives.
    pub fn type_write_stream<S: RwStream + ?Sized>(
        &self,
        dst: &mut S,
        errors: &mut ErrorAccumulator,
    ) {
        let Some(data) = self.writable_payload(errors) else {
            return;
        };
        if let Err(e) = dst.write_le32(self.type_tag) {
            errors.record("stream write type", e);
        }
        if let Err(e) = dst.write_le32(data.len() as u32) {
            errors.record("stream write size", e);
        }
        let n = dst.write_full(data);
        if n != data.len() {
            errors.record(
                "stream write payload",
                io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote {n} of {} payload bytes", data.len()),
                ),
            );
        }
    }

    /// Read header and payload from a [`RwStream`]; same contract as [`Capsule::type_read`].
    pub fn type_read_stream<S: RwStream + ?Sized>(
        &mut self,
        src: &mut S,
        errors: &mut ErrorAccumulator,
    ) {
        self.clear();
        let cp = errors.checkpoint();
        let type_tag = src
            .read_le32()
            .unwrap_or_else(|e| record_zero(errors, "stream read type", e));
        let size = src
            .read_le32()
            .unwrap_or_else(|e| record_zero(errors, "stream read size", e));
        if errors.failed_since(cp) {
            return;
        }
        self.type_tag = type_tag;
        self.fill_payload(size, errors, |buf, len| {
            while buf.len() < len {
                let start = buf.len();
                let chunk = (len - start).min(STREAM_CHUNK);
                buf.resize(start + chunk, 0);
                let n = src.read_full(&mut buf[start..]);
                buf.truncate(start + n);
                if n < chunk {
                    break;
                }
            }
            Ok(())
        });
    }

    /// Encode to `dst` with a single pass/fail result.
    pub fn write_to<W: Write + ?Sized>(&self, dst: &mut W) -> CapsuleResult<()> {
        self.check_writable()?;
        let mut errors = ErrorAccumulator::new();
        self.type_write(dst, &mut errors);
        errors.finish()
    }

    /// Decode one capsule from `src` with a single pass/fail result.
    pub fn read_from<R: Read + ?Sized>(src: &mut R) -> CapsuleResult<Self> {
        let mut errors = ErrorAccumulator::new();
        let mut caps = Self::new();
        caps.type_read(src, &mut errors);
        errors.finish()?;
        Ok(caps)
    }

    /// Encode to a stream with a single pass/fail result.
    pub fn write_to_stream<S: RwStream + ?Sized>(&self, dst: &mut S) -> CapsuleResult<()> {
        self.check_writable()?;
        let mut errors = ErrorAccumulator::new();
        self.type_write_stream(dst, &mut errors);
        errors.finish()
    }

    /// Decode one capsule from a stream with a single pass/fail result.
    pub fn read_from_stream<S: RwStream + ?Sized>(src: &mut S) -> CapsuleResult<Self> {
        let mut errors = ErrorAccumulator::new();
        let mut caps = Self::new();
        caps.type_read_stream(src, &mut errors);
        errors.finish()?;
        Ok(caps)
    }

    /// Serialized form: header followed by payload.
    pub fn to_bytes(&self) -> CapsuleResult<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.size() as usize);
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Decode a capsule from the start of `bytes`. Trailing bytes are ignored.
    pub fn from_bytes(mut bytes: &[u8]) -> CapsuleResult<Self> {
        Self::read_from(&mut bytes)
    }

    fn check_writable(&self) -> CapsuleResult<()> {
        match self.data.as_deref() {
            None => Err(CapsuleError::argument("capsule holds no payload")),
            Some(d) if u32::try_from(d.len()).is_err() => Err(CapsuleError::argument(format!(
                "payload of {} bytes exceeds u32 size field",
                d.len()
            ))),
            Some(_) => Ok(()),
        }
    }

    fn writable_payload(&self, errors: &mut ErrorAccumulator) -> Option<&[u8]> {
        let Some(data) = self.data.as_deref() else {
            errors.record(
                "capsule write",
                io::Error::new(io::ErrorKind::InvalidInput, "capsule holds no payload"),
            );
            return None;
        };
        if u32::try_from(data.len()).is_err() {
            errors.record(
                "capsule write",
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("payload of {} bytes exceeds u32 size field", data.len()),
                ),
            );
            return None;
        }
        Some(data)
    }

    /// Reserve exactly `size` bytes and let `read` append the payload into that reservation.
    ///
    /// Pages are only touched as bytes arrive, so a header announcing more than the source holds
    /// costs no more than what was actually read. Allocation failure leaves the payload absent; a
    /// short read clears the capsule so a partial buffer is never observable.
    fn fill_payload(
        &mut self,
        size: u32,
        errors: &mut ErrorAccumulator,
        read: impl FnOnce(&mut Vec<u8>, usize) -> io::Result<()>,
    ) {
        let len = size as usize;
        let mut buf = Vec::new();
        if let Err(e) = buf.try_reserve_exact(len) {
            tracing::warn!(size, error = %e, "unable to allocate capsule payload");
            errors.record(
                "capsule alloc",
                io::Error::new(io::ErrorKind::OutOfMemory, e.to_string()),
            );
            self.data = None;
            return;
        }

        let outcome = read(&mut buf, len).and_then(|()| {
            if buf.len() == len {
                Ok(())
            } else {
                Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("read {} of {len} payload bytes", buf.len()),
                ))
            }
        });

        match outcome {
            Ok(()) => self.data = Some(buf),
            Err(e) => {
                tracing::warn!(size, error = %e, "unable to read capsule payload");
                self.clear();
                errors.record("capsule payload", e);
            }
        }
    }
}

fn record_zero(errors: &mut ErrorAccumulator, op: &'static str, e: io::Error) -> u32 {
    errors.record(op, e);
    0
}

#[cfg(test)]
#[path = "../../tests/unit/container/capsule.rs"]
mod tests;
