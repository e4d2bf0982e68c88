// String pool block: every distinct field value stored once, NUL-terminated,
// addressed by the absolute offset of its first content byte.
use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek, SeekFrom};

use bstr::ByteSlice;

use crate::core::error::{Error, ErrorKind};
use crate::core::order::ByteOrder;
use crate::core::table::Table;

pub const STRP_MAGIC: [u8; 4] = *b"STRP";

/// Distinct field values in first-occurrence order, left-to-right then
/// top-to-bottom. The order is a format requirement: identical input must
/// produce identical output.
fn unique_strings(table: &Table) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut strings = Vec::new();
    for row in table.rows() {
        for field in row {
            if seen.insert(field.as_str()) {
                strings.push(field.as_str());
            }
        }
    }
    strings
}

/// Append the pool block to `out` and return each string's pool address.
/// `out` must already hold everything preceding the block; addresses are
/// absolute stream offsets and must not move afterward.
pub fn write(out: &mut Vec<u8>, order: ByteOrder, table: &Table) -> HashMap<String, u64> {
    let base = out.len() as u64;
    out.extend_from_slice(&STRP_MAGIC);

    let strings = unique_strings(table);
    let mut addresses = HashMap::with_capacity(strings.len());

    let mut block = Vec::new();
    order.put_u64(&mut block, strings.len() as u64);
    for value in strings {
        // magic + length field precede the block payload in the stream.
        let address = base + 8 + block.len() as u64;
        addresses.insert(value.to_string(), address);
        block.extend_from_slice(value.as_bytes());
        block.push(0);
    }

    order.put_u32(out, block.len() as u32 + 8);
    out.extend_from_slice(&block);

    addresses
}

/// Parse the pool block, returning pool address -> string. The reader is
/// left at the position implied by the declared block length, whatever the
/// strings actually consumed.
pub fn read<R: Read + Seek>(
    reader: &mut R,
    order: ByteOrder,
) -> Result<HashMap<u64, String>, Error> {
    let start = stream_position(reader)?;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|_| bad_magic())?;
    if magic != STRP_MAGIC {
        return Err(bad_magic());
    }

    let block_length = order
        .read_u32(reader)
        .map_err(|err| truncated("string pool block length", err))?;
    let end = start + block_length as u64;

    let count = order
        .read_u64(reader)
        .map_err(|err| truncated("string pool count", err))?;

    let mut strings = HashMap::new();
    for _ in 0..count {
        let address = stream_position(reader)?;
        let value = read_c_string(reader)?;
        strings.insert(address, value);
    }

    reader
        .seek(SeekFrom::Start(end))
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))?;

    Ok(strings)
}

/// Bytes up to the NUL terminator, decoded lossily. Malformed sequences are
/// replaced rather than failing the read.
fn read_c_string<R: Read>(reader: &mut R) -> Result<String, Error> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        reader
            .read_exact(&mut byte)
            .map_err(|err| truncated("pool string", err))?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    Ok(bytes.to_str_lossy().into_owned())
}

fn stream_position<R: Seek>(reader: &mut R) -> Result<u64, Error> {
    reader
        .stream_position()
        .map_err(|err| Error::new(ErrorKind::Io).with_source(err))
}

fn bad_magic() -> Error {
    Error::new(ErrorKind::InvalidStringPoolMagic).with_message("invalid STRP block magic")
}

fn truncated(what: &str, err: std::io::Error) -> Error {
    Error::new(ErrorKind::Truncated)
        .with_message(format!("stream ended while reading {what}"))
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::{read, write, STRP_MAGIC};
    use crate::core::error::ErrorKind;
    use crate::core::order::ByteOrder;
    use crate::core::table::Table;
    use std::io::Cursor;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|field| field.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn duplicates_collapse_to_one_entry() {
        let mut out = Vec::new();
        let addresses = write(
            &mut out,
            ByteOrder::Little,
            &table(&[&["x", "y"], &["x", "x"]]),
        );
        assert_eq!(addresses.len(), 2);

        let payload_copies = out.windows(2).filter(|window| *window == b"x\0").count();
        assert_eq!(payload_copies, 1);
    }

    #[test]
    fn pool_order_is_first_occurrence() {
        let mut out = Vec::new();
        write(&mut out, ByteOrder::Little, &table(&[&["b", "a"], &["c"]]));
        // magic(4) + length(4) + count(8), then the strings.
        assert_eq!(&out[16..], b"b\0a\0c\0");
    }

    #[test]
    fn addresses_point_at_string_content() {
        let mut out = Vec::new();
        let addresses = write(&mut out, ByteOrder::Little, &table(&[&["ab", "c"]]));
        assert_eq!(addresses["ab"], 16);
        assert_eq!(addresses["c"], 19);
        assert_eq!(&out[16..18], b"ab");
        assert_eq!(&out[19..20], b"c");
    }

    #[test]
    fn read_resolves_addresses_written() {
        let mut out = Vec::new();
        let addresses = write(&mut out, ByteOrder::Big, &table(&[&["one", "two"]]));

        let strings = read(&mut Cursor::new(out), ByteOrder::Big).expect("read");
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[&addresses["one"]], "one");
        assert_eq!(strings[&addresses["two"]], "two");
    }

    #[test]
    fn reader_skips_trailing_padding() {
        let mut out = Vec::new();
        out.extend_from_slice(&STRP_MAGIC);
        // Declared length covers four bytes of padding after the lone string.
        ByteOrder::Little.put_u32(&mut out, 8 + 8 + 2 + 4);
        ByteOrder::Little.put_u64(&mut out, 1);
        out.extend_from_slice(b"z\0");
        out.extend_from_slice(&[0xAA; 4]);

        let mut reader = Cursor::new(out);
        let strings = read(&mut reader, ByteOrder::Little).expect("read");
        assert_eq!(strings.len(), 1);
        assert_eq!(reader.position(), 22);
    }

    #[test]
    fn malformed_utf8_is_replaced_not_fatal() {
        let mut out = Vec::new();
        out.extend_from_slice(&STRP_MAGIC);
        ByteOrder::Little.put_u32(&mut out, 8 + 8 + 4);
        ByteOrder::Little.put_u64(&mut out, 1);
        out.extend_from_slice(&[b'a', 0xFF, b'b', 0]);

        let strings = read(&mut Cursor::new(out), ByteOrder::Little).expect("read");
        let value = strings.values().next().expect("one string");
        assert!(value.starts_with('a'));
        assert!(value.ends_with('b'));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let out = b"STRX\0\0\0\0".to_vec();
        let err = read(&mut Cursor::new(out), ByteOrder::Little).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::InvalidStringPoolMagic);
    }
}
