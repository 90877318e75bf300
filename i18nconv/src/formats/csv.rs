//! Support for the multi-language CSV table.
//!
//! Rows may have different lengths and blank lines are skipped. Input is decoded with BOM
//! sniffing, so UTF-8 (with or without BOM) and UTF-16 spreadsheet exports read the same.
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Table};

impl Parser for Table {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(reader);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(decoder);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Table::new(rows))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
