// Byte-order selection and endian-dispatched integer reads/writes.
// The order marker is fixed at the envelope; every multi-byte integer in
// every block follows it.
use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, ReadBytesExt};

pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0xFF, 0xFE];
pub const BIG_ENDIAN_MARKER: [u8; 2] = [0xFE, 0xFF];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match marker {
            LITTLE_ENDIAN_MARKER => Some(ByteOrder::Little),
            BIG_ENDIAN_MARKER => Some(ByteOrder::Big),
            _ => None,
        }
    }

    pub fn marker(self) -> [u8; 2] {
        match self {
            ByteOrder::Little => LITTLE_ENDIAN_MARKER,
            ByteOrder::Big => BIG_ENDIAN_MARKER,
        }
    }

    pub fn read_u32<R: Read>(self, reader: &mut R) -> io::Result<u32> {
        match self {
            ByteOrder::Little => reader.read_u32::<LittleEndian>(),
            ByteOrder::Big => reader.read_u32::<BigEndian>(),
        }
    }

    pub fn read_u64<R: Read>(self, reader: &mut R) -> io::Result<u64> {
        match self {
            ByteOrder::Little => reader.read_u64::<LittleEndian>(),
            ByteOrder::Big => reader.read_u64::<BigEndian>(),
        }
    }

    pub fn put_u32(self, out: &mut Vec<u8>, value: u32) {
        let mut buf = [0u8; 4];
        match self {
            ByteOrder::Little => LittleEndian::write_u32(&mut buf, value),
            ByteOrder::Big => BigEndian::write_u32(&mut buf, value),
        }
        out.extend_from_slice(&buf);
    }

    pub fn put_u64(self, out: &mut Vec<u8>, value: u64) {
        let mut buf = [0u8; 8];
        match self {
            ByteOrder::Little => LittleEndian::write_u64(&mut buf, value),
            ByteOrder::Big => BigEndian::write_u64(&mut buf, value),
        }
        out.extend_from_slice(&buf);
    }
}
