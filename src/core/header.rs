// Container envelope: magic, byte-order marker, reserved bytes, and the
// three redundant summary counts used by post-decode validation.
use std::io::Read;

use crate::core::error::{Error, ErrorKind};
use crate::core::order::ByteOrder;
use crate::core::table::Table;

pub const CSB_MAGIC: [u8; 4] = *b"CSB ";
pub const HEADER_LEN: usize = 24;

// Meaning unknown; carried verbatim so output matches the canonical writer.
pub const RESERVED: [u8; 6] = [0x00, 0x01, 0xFF, 0xFF, 0x00, 0x00];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub order: ByteOrder,
    pub total_fields: u32,
    pub max_columns: u32,
    pub total_lines: u32,
}

impl Header {
    pub fn for_table(table: &Table, order: ByteOrder) -> Self {
        Self {
            order,
            total_fields: table.total_fields() as u32,
            max_columns: table.max_columns() as u32,
            total_lines: table.total_lines() as u32,
        }
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&CSB_MAGIC);
        buf[4..6].copy_from_slice(&self.order.marker());
        buf[6..12].copy_from_slice(&RESERVED);

        let mut counts = Vec::with_capacity(12);
        self.order.put_u32(&mut counts, self.total_fields);
        self.order.put_u32(&mut counts, self.max_columns);
        self.order.put_u32(&mut counts, self.total_lines);
        buf[12..24].copy_from_slice(&counts);

        buf
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let mut magic = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|_| invalid_magic())?;
        if magic != CSB_MAGIC {
            return Err(invalid_magic());
        }

        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker).map_err(|_| {
            Error::new(ErrorKind::InvalidByteOrder).with_message("missing byte-order marker")
        })?;
        let order = ByteOrder::from_marker(marker).ok_or_else(|| {
            Error::new(ErrorKind::InvalidByteOrder)
                .with_message("byte-order marker matches neither FF FE nor FE FF")
        })?;

        let mut reserved = [0u8; 6];
        reader
            .read_exact(&mut reserved)
            .map_err(|err| truncated("reserved header bytes", err))?;

        let total_fields = order
            .read_u32(reader)
            .map_err(|err| truncated("total_fields", err))?;
        let max_columns = order
            .read_u32(reader)
            .map_err(|err| truncated("max_columns", err))?;
        let total_lines = order
            .read_u32(reader)
            .map_err(|err| truncated("total_lines", err))?;

        Ok(Self {
            order,
            total_fields,
            max_columns,
            total_lines,
        })
    }
}

fn invalid_magic() -> Error {
    Error::new(ErrorKind::InvalidMagic)
        .with_message("stream does not start with the CSB magic")
        .with_hint("Are you sure this is a csb file?")
}

fn truncated(what: &str, err: std::io::Error) -> Error {
    Error::new(ErrorKind::Truncated)
        .with_message(format!("stream ended while reading {what}"))
        .with_source(err)
}
