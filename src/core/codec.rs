// Whole-stream encode/decode orchestration. Blocks are written pool first,
// then line index, then line order, each feeding its address map to the
// next; reads mirror that sequence.
use std::io::{Read, Seek};

use crate::core::error::{Error, ErrorKind};
use crate::core::header::Header;
use crate::core::order::ByteOrder;
use crate::core::table::Table;
use crate::core::{lineindex, lineorder, strpool};

/// Serialize a table into a complete CSB stream. Encoding a well-formed
/// in-memory table cannot fail; all addresses are assigned while the blocks
/// are built and never move afterward.
pub fn encode(table: &Table, order: ByteOrder) -> Vec<u8> {
    let header = Header::for_table(table, order);

    let mut out = Vec::new();
    out.extend_from_slice(&header.encode());

    let addresses = strpool::write(&mut out, order, table);
    let records = lineindex::write(&mut out, order, table, &addresses);
    lineorder::write(&mut out, order, &records);

    out
}

/// Parse a CSB stream back into a table. With `validate` set, the header's
/// summary counts are recomputed from the decoded rows and any mismatch
/// rejects the result; the decoded table itself is never altered by the
/// check.
pub fn decode<R: Read + Seek>(reader: &mut R, validate: bool) -> Result<Table, Error> {
    let header = Header::read_from(reader)?;

    let strings = strpool::read(reader, header.order)?;
    let records = lineindex::read(reader, header.order, &strings)?;
    let rows = lineorder::read(reader, header.order, &records)?;

    let table = Table::from_rows(rows);
    if validate {
        validate_counts(&header, &table)?;
    }

    Ok(table)
}

fn validate_counts(header: &Header, table: &Table) -> Result<(), Error> {
    if table.total_lines() != header.total_lines as u64 {
        return Err(Error::new(ErrorKind::InconsistentTotalLines).with_message(format!(
            "header declares {} lines, stream holds {}",
            header.total_lines,
            table.total_lines()
        )));
    }
    if table.max_columns() != header.max_columns as u64 {
        return Err(Error::new(ErrorKind::InconsistentMaxColumns).with_message(format!(
            "header declares {} max columns, stream holds {}",
            header.max_columns,
            table.max_columns()
        )));
    }
    if table.total_fields() != header.total_fields as u64 {
        return Err(Error::new(ErrorKind::InconsistentTotalFields).with_message(format!(
            "header declares {} fields, stream holds {}",
            header.total_fields,
            table.total_fields()
        )));
    }
    Ok(())
}
