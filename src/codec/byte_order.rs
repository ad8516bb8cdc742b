use std::io::{Read, Write};

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::foundation::accumulator::ErrorAccumulator;

pub use byteorder::{BigEndian, LittleEndian};

/// Fail-soft reader over any [`Read`] handle.
///
/// A short read records a failure and yields zero; callers inspect the accumulator, not the value.
pub struct SoftReader<'a, R: ?Sized> {
    inner: &'a mut R,
    errors: &'a mut ErrorAccumulator,
}

impl<'a, R: Read + ?Sized> SoftReader<'a, R> {
    /// Wrap `inner`, recording failures into `errors`.
    pub fn new(inner: &'a mut R, errors: &'a mut ErrorAccumulator) -> Self {
        Self { inner, errors }
    }

    fn soft<T: Default>(
        &mut self,
        op: &'static str,
        read: impl FnOnce(&mut R) -> std::io::Result<T>,
    ) -> T {
        match read(&mut *self.inner) {
            Ok(v) => v,
            Err(e) => {
                self.errors.record(op, e);
                T::default()
            }
        }
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> u8 {
        self.soft("read_u8", |r| r.read_u8())
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> i8 {
        self.soft("read_i8", |r| r.read_i8())
    }

    /// Read a `u16` in byte order `B`.
    pub fn read_u16<B: ByteOrder>(&mut self) -> u16 {
        self.soft("read_u16", |r| r.read_u16::<B>())
    }

    /// Read an `i16` in byte order `B`.
    pub fn read_i16<B: ByteOrder>(&mut self) -> i16 {
        self.soft("read_i16", |r| r.read_i16::<B>())
    }

    /// Read a `u32` in byte order `B`.
    pub fn read_u32<B: ByteOrder>(&mut self) -> u32 {
        self.soft("read_u32", |r| r.read_u32::<B>())
    }

    /// Read an `i32` in byte order `B`.
    pub fn read_i32<B: ByteOrder>(&mut self) -> i32 {
        self.soft("read_i32", |r| r.read_i32::<B>())
    }

    /// Read a `u64` in byte order `B`.
    pub fn read_u64<B: ByteOrder>(&mut self) -> u64 {
        self.soft("read_u64", |r| r.read_u64::<B>())
    }

    /// Read an `i64` in byte order `B`.
    pub fn read_i64<B: ByteOrder>(&mut self) -> i64 {
        self.soft("read_i64", |r| r.read_i64::<B>())
    }

    /// Read an IEEE-754 `f32` in byte order `B`.
    pub fn read_f32<B: ByteOrder>(&mut self) -> f32 {
        self.soft("read_f32", |r| r.read_f32::<B>())
    }

    /// Read an IEEE-754 `f64` in byte order `B`.
    pub fn read_f64<B: ByteOrder>(&mut self) -> f64 {
        self.soft("read_f64", |r| r.read_f64::<B>())
    }

    /// Fill `buf` completely; returns `false` (and records) on a short read.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> bool {
        match self.inner.read_exact(buf) {
            Ok(()) => true,
            Err(e) => {
                self.errors.record("read_bytes", e);
                false
            }
        }
    }
}

/// Fail-soft writer over any [`Write`] handle.
///
/// A short write records a failure; nothing else is reported.
pub struct SoftWriter<'a, W: ?Sized> {
    inner: &'a mut W,
    errors: &'a mut ErrorAccumulator,
}

impl<'a, W: Write + ?Sized> SoftWriter<'a, W> {
    /// Wrap `inner`, recording failures into `errors`.
    pub fn new(inner: &'a mut W, errors: &'a mut ErrorAccumulator) -> Self {
        Self { inner, errors }
    }

    fn soft(&mut self, op: &'static str, write: impl FnOnce(&mut W) -> std::io::Result<()>) {
        if let Err(e) = write(&mut *self.inner) {
            self.errors.record(op, e);
        }
    }

    /// Write one unsigned byte.
    pub fn write_u8(&mut self, v: u8) {
        self.soft("write_u8", |w| w.write_u8(v));
    }

    /// Write one signed byte.
    pub fn write_i8(&mut self, v: i8) {
        self.soft("write_i8", |w| w.write_i8(v));
    }

    /// Write a `u16` in byte order `B`.
    pub fn write_u16<B: ByteOrder>(&mut self, v: u16) {
        self.soft("write_u16", |w| w.write_u16::<B>(v));
    }

    /// Write an `i16` in byte order `B`.
    pub fn write_i16<B: ByteOrder>(&mut self, v: i16) {
        self.soft("write_i16", |w| w.write_i16::<B>(v));
    }

    /// Write a `u32` in byte order `B`.
    pub fn write_u32<B: ByteOrder>(&mut self, v: u32) {
        self.soft("write_u32", |w| w.write_u32::<B>(v));
    }

    /// Write an `i32` in byte order `B`.
    pub fn write_i32<B: ByteOrder>(&mut self, v: i32) {
        self.soft("write_i32", |w| w.write_i32::<B>(v));
    }

    /// Write a `u64` in byte order `B`.
    pub fn write_u64<B: ByteOrder>(&mut self, v: u64) {
        self.soft("write_u64", |w| w.write_u64::<B>(v));
    }

    /// Write an `i64` in byte order `B`.
    pub fn write_i64<B: ByteOrder>(&mut self, v: i64) {
        self.soft("write_i64", |w| w.write_i64::<B>(v));
    }

    /// Write an IEEE-754 `f32` in byte order `B`.
    pub fn write_f32<B: ByteOrder>(&mut self, v: f32) {
        self.soft("write_f32", |w| w.write_f32::<B>(v));
    }

    /// Write an IEEE-754 `f64` in byte order `B`.
    pub fn write_f64<B: ByteOrder>(&mut self, v: f64) {
        self.soft("write_f64", |w| w.write_f64::<B>(v));
    }

    /// Write all of `buf`; a short write is recorded.
    pub fn write_bytes(&mut self, buf: &[u8]) {
        self.soft("write_bytes", |w| w.write_all(buf));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/byte_order.rs"]
mod tests;
