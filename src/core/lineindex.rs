// Line index block: one record per row holding its field count and the
// pool addresses of its fields. Records are identified by the absolute
// offset of their field-count word.
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use crate::core::error::{Error, ErrorKind};
use crate::core::order::ByteOrder;
use crate::core::table::{Row, Table};

pub const LNP_MAGIC: [u8; 4] = *b"LNP ";

// Field count plus payload address precede each record's address array.
pub const RECORD_HEADER_LEN: u64 = 16;

/// Append the line index block to `out` and return each row's record
/// address, in row order, for the line order block to reference.
pub fn write(
    out: &mut Vec<u8>,
    order: ByteOrder,
    table: &Table,
    addresses: &HashMap<String, u64>,
) -> Vec<u64> {
    let base = out.len() as u64;
    out.extend_from_slice(&LNP_MAGIC);

    let mut records = Vec::with_capacity(table.rows().len());
    let mut block = Vec::new();
    order.put_u64(&mut block, table.rows().len() as u64);

    for row in table.rows() {
        let record = base + 8 + block.len() as u64;
        order.put_u64(&mut block, row.len() as u64);
        order.put_u64(&mut block, record + RECORD_HEADER_LEN);
        for field in row {
            order.put_u64(&mut block, addresses[field.as_str()]);
        }
        records.push(record);
    }

    order.put_u32(out, block.len() as u32 + 8);
    out.extend_from_slice(&block);

    records
}

/// Parse the line index block against the string pool, returning record
/// address -> row. Each record's stored payload address is honored with an
/// explicit seek; the canonical writer makes payloads contiguous, but the
/// reader must not assume that.
pub fn read<R: Read + Seek>(
    reader: &mut R,
    order: ByteOrder,
    strings: &HashMap<u64, String>,
) -> Result<HashMap<u64, Row>, Error> {
    let start = stream_position(reader)?;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|_| bad_magic())?;
    if magic != LNP_MAGIC {
        return Err(bad_magic());
    }

    let block_length = order
        .read_u32(reader)
        .map_err(|err| truncated("line index block length", err))?;
    let end = start + block_length as u64;

    let count = order
        .read_u64(reader)
        .map_err(|err| truncated("line index count", err))?;

    let mut records = HashMap::new();
    for _ in 0..count {
        let record = stream_position(reader)?;
        let field_count = order
            .read_u64(reader)
            .map_err(|err| truncated("line field count", err))?;
        let payload = order
            .read_u64(reader)
            .map_err(|err| truncated("line payload address", err))?;

        reader
            .seek(SeekFrom::Start(payload))
            .map_err(|err| Error::new(ErrorKind::Io).with_source(err))?;

        let mut row = Vec::new();
        for _ in 0..field_count {
            let address = order
                .read_u64(reader)
                .map_err(|err| truncated("field address", err))?;
            let value = strings.get(&address).ok_or_else(|| {
                Error::new(ErrorKind::DanglingAddress)
                    .with_message("field references an address outside the string pool")
                    .with_offset(address)
            })?;
            row.push(value.clone());
        }
        records.insert(record, row);
    }

    reader
        .seek(SeekFrom::Start(end))
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))?;

    Ok(records)
}

fn stream_position<R: Seek>(reader: &mut R) -> Result<u64, Error> {
    reader
        .stream_position()
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))
}

fn bad_magic() -> Error {
    Error::new(ErrorKind::InvalidLineIndexMagic).with_message("invalid LNP block magic")
}

fn truncated(what: &str, err: std::io::Error) -> Error {
    Error::new(ErrorKind::Truncated)
        .with_message(format!("stream ended while reading {what}"))
        .with_source(err)
}
