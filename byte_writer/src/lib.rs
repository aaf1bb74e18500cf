//! Positioned little-endian byte sink.
//!
//! Writes land at the current offset. Writing before the end overwrites in place,
//! seeking past the end zero-fills the gap on the next write.

pub struct ByteWriter {
    pub data: Vec<u8>,
    offset: usize,
    limit: Option<usize>,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
            limit: None,
        }
    }

    /// Sink that refuses to grow past `limit` bytes.
    ///
    /// The writer itself never fails; callers check [`ByteWriter::can_write`] first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
            limit: Some(limit),
        }
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Bytes that can still be written at the current offset.
    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.offset))
    }

    pub fn can_write(&self, length: usize) -> bool {
        match self.remaining() {
            Some(remaining) => length <= remaining,
            None => true,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();

        if self.data.len() < end {
            self.data.resize(end, 0);
        }

        self.data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }

    pub fn append_u32(&mut self, i: u32) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_i32(&mut self, i: i32) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_u8(&mut self, i: u8) {
        self.put(&[i]);
    }

    pub fn append_i8(&mut self, i: i8) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_i16(&mut self, i: i16) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_u16(&mut self, i: u16) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_f32(&mut self, i: f32) {
        self.put(&i.to_le_bytes());
    }

    pub fn append_u8_slice(&mut self, i: &[u8]) {
        self.put(i);
    }

    pub fn append_zeros(&mut self, length: usize) {
        self.put(&vec![0u8; length]);
    }

    pub fn replace_with_u32(&mut self, start: usize, val: u32) {
        let current = self.offset;

        self.offset = start;
        self.append_u32(val);
        self.offset = current.max(self.offset);
    }
}
