//! Builders for synthetic EXR streams.

#![allow(dead_code)]

use std::io::{self, Read};
use transcode_exr::EXR_MAGIC;

/// Assembles an EXR byte stream field by field
#[derive(Default)]
pub struct ExrBuilder {
    data: Vec<u8>,
}

impl ExrBuilder {
    /// Start with the magic number and the given version word
    pub fn new(version: u32) -> Self {
        Self::with_magic(EXR_MAGIC, version)
    }

    pub fn with_magic(magic: u32, version: u32) -> Self {
        let mut data = Vec::new();
        data.extend_from_slice(&magic.to_le_bytes());
        data.extend_from_slice(&version.to_le_bytes());
        ExrBuilder { data }
    }

    pub fn attribute(mut self, name: &[u8], type_name: &str, value: &[u8]) -> Self {
        self.data.extend_from_slice(name);
        self.data.push(0);
        self.data.extend_from_slice(type_name.as_bytes());
        self.data.push(0);
        self.data.extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.data.extend_from_slice(value);
        self
    }

    pub fn data_window(self, x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        let value: Vec<u8> = [x_min, y_min, x_max, y_max]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        self.attribute(b"dataWindow", "box2i", &value)
    }

    pub fn int(self, name: &str, value: i32) -> Self {
        self.attribute(name.as_bytes(), "int", &value.to_le_bytes())
    }

    pub fn string(self, name: &str, value: &str) -> Self {
        self.attribute(name.as_bytes(), "string", value.as_bytes())
    }

    pub fn tiles(self, x_size: u32, y_size: u32, mode: u8) -> Self {
        let mut value = Vec::new();
        value.extend_from_slice(&x_size.to_le_bytes());
        value.extend_from_slice(&y_size.to_le_bytes());
        value.push(mode);
        self.attribute(b"tiles", "tiledesc", &value)
    }

    /// Empty name: end of the current header
    pub fn end_header(mut self) -> Self {
        self.data.push(0);
        self
    }

    pub fn offsets(mut self, offsets: &[i64]) -> Self {
        for offset in offsets {
            self.data.extend_from_slice(&offset.to_le_bytes());
        }
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// Reader that returns at most `step` bytes per call
pub struct SlowReader {
    data: Vec<u8>,
    pos: usize,
    step: usize,
    pub calls: usize,
}

impl SlowReader {
    pub fn new(data: Vec<u8>, step: usize) -> Self {
        SlowReader {
            data,
            pos: 0,
            step,
            calls: 0,
        }
    }
}

impl Read for SlowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.step).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that records how many bytes were pulled from it
pub struct CountingReader<R> {
    inner: R,
    pub consumed: usize,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        CountingReader { inner, consumed: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed += n;
        Ok(n)
    }
}
