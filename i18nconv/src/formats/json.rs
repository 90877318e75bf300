//! Support for nested per-language JSON documents.
//!
//! Documents must have an object at the top level. Output is pretty printed with two-space
//! indentation, keeps non-ASCII characters as-is and has no trailing newline.
use std::io::{BufRead, Write};

use serde_json::Value;

use crate::{error::Error, traits::Parser, types::Node};

impl Parser for Node {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        if !value.is_object() {
            return Err(Error::DataMismatch(
                "expected a JSON object at the top level".to_string(),
            ));
        }
        Ok(Node::from_json(value))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
