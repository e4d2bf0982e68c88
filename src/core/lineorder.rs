// Line order block: record addresses in original row order. This block is
// the only carrier of row ordering; the pool and index blocks carry none.
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use crate::core::error::{Error, ErrorKind};
use crate::core::order::ByteOrder;
use crate::core::table::Row;

pub const LNT_MAGIC: [u8; 4] = *b"LNT ";

/// Append the line order block to `out`. `records` holds the line index
/// record addresses in original row order.
pub fn write(out: &mut Vec<u8>, order: ByteOrder, records: &[u64]) {
    out.extend_from_slice(&LNT_MAGIC);

    let mut block = Vec::new();
    order.put_u64(&mut block, records.len() as u64);
    for record in records {
        order.put_u64(&mut block, *record);
    }

    order.put_u32(out, block.len() as u32 + 8);
    out.extend_from_slice(&block);
}

/// Resolve the ordered record addresses against the line index map and
/// return the rows in original order.
pub fn read<R: Read + Seek>(
    reader: &mut R,
    order: ByteOrder,
    records: &HashMap<u64, Row>,
) -> Result<Vec<Row>, Error> {
    let start = stream_position(reader)?;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|_| bad_magic())?;
    if magic != LNT_MAGIC {
        return Err(bad_magic());
    }

    let block_length = order
        .read_u32(reader)
        .map_err(|err| truncated("line order block length", err))?;
    let end = start + block_length as u64;

    let count = order
        .read_u64(reader)
        .map_err(|err| truncated("line order count", err))?;

    let mut rows = Vec::new();
    for _ in 0..count {
        let address = order
            .read_u64(reader)
            .map_err(|err| truncated("line record address", err))?;
        let row = records.get(&address).ok_or_else(|| {
            Error::new(ErrorKind::DanglingAddress)
                .with_message("line order references an unknown line index record")
                .with_offset(address)
        })?;
        rows.push(row.clone());
    }

    reader
        .seek(SeekFrom::Start(end))
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))?;

    Ok(rows)
}

fn stream_position<R: Seek>(reader: &mut R) -> Result<u64, Error> {
    reader
        .stream_position()
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))
}

fn bad_magic() -> Error {
    Error::new(ErrorKind::InvalidLineOrderMagic).with_message("invalid LNT block magic")
}

fn truncated(what: &str, err: std::io::Error) -> Error {
    Error::new(ErrorKind::Truncated)
        .with_message(format!("stream ended while reading {what}"))
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::{read, write};
    use crate::core::error::ErrorKind;
    use crate::core::order::ByteOrder;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn records() -> HashMap<u64, Vec<String>> {
        let mut map = HashMap::new();
        map.insert(100u64, vec!["first".to_string()]);
        map.insert(200u64, vec!["second".to_string()]);
        map
    }

    #[test]
    fn rows_come_back_in_written_order() {
        let mut out = Vec::new();
        write(&mut out, ByteOrder::Little, &[200, 100]);

        let rows = read(&mut Cursor::new(out), ByteOrder::Little, &records()).expect("read");
        assert_eq!(rows[0], vec!["second".to_string()]);
        assert_eq!(rows[1], vec!["first".to_string()]);
    }

    #[test]
    fn repeated_record_addresses_resolve_each_time() {
        let mut out = Vec::new();
        write(&mut out, ByteOrder::Big, &[100, 100]);

        let rows = read(&mut Cursor::new(out), ByteOrder::Big, &records()).expect("read");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn unknown_record_address_is_rejected() {
        let mut out = Vec::new();
        write(&mut out, ByteOrder::Little, &[300]);

        let err =
            read(&mut Cursor::new(out), ByteOrder::Little, &records()).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::DanglingAddress);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let err = read(
            &mut Cursor::new(b"LNTX\0\0\0\0".to_vec()),
            ByteOrder::Little,
            &records(),
        )
        .expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::InvalidLineOrderMagic);
    }
}
