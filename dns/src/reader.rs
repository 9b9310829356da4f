use byteorder::{ReadBytesExt, BE};
use std::io::{self, Cursor};

use crate::error::{DnsError, Result};
use crate::name;

/// Big-endian reader over a whole message.
///
/// Reads advance sequentially, but the underlying buffer stays reachable so
/// compression pointers can be resolved against absolute offsets.
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        let mut rdr = Self::new(bytes);
        rdr.set_position(offset);
        rdr
    }

    pub fn message(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn set_position(&mut self, position: usize) {
        self.cursor.set_position(position as u64);
    }

    pub fn remaining(&self) -> usize {
        self.message().len().saturating_sub(self.position())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(eof)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.cursor.read_u16::<BE>().map_err(eof)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor.read_u32::<BE>().map_err(eof)
    }

    /// Borrows the next `len` bytes and moves past them.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let start = self.position();
        let end = start.checked_add(len).ok_or(DnsError::TruncatedMessage)?;
        let bytes = self
            .message()
            .get(start..end)
            .ok_or(DnsError::TruncatedMessage)?;
        self.set_position(end);
        Ok(bytes)
    }

    /// Reads a possibly compressed domain name at the current position.
    pub fn read_name(&mut self) -> Result<String> {
        let (domain, next) = name::decode_name(self.message(), self.position())?;
        self.set_position(next);
        Ok(domain)
    }
}

fn eof(_: io::Error) -> DnsError {
    DnsError::TruncatedMessage
}
