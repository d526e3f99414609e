// src/output.rs
use csv::{Terminator, WriterBuilder};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::{debug, instrument};

use crate::error::{PipelineError, Result};
use crate::table::Table;

pub const OUTPUT_DELIMITER: u8 = b';';
pub const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Write `table` to `destination`: BOM, header row, then one record per row.
#[instrument(level = "debug", skip(table), fields(path = %destination.display(), rows = table.num_rows()))]
pub fn write(table: &Table, destination: &Path) -> Result<()> {
    let wrap = |source: io::Error| PipelineError::Write {
        path: destination.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(destination).map_err(wrap)?);
    out.write_all(UTF8_BOM).map_err(wrap)?;
    write_records(table, &mut out).map_err(wrap)?;
    out.flush().map_err(wrap)?;
    debug!("written");
    Ok(())
}

/// Serialize header and rows with the output dialect; absent values become empty fields.
pub fn write_records<W: Write>(table: &Table, writer: W) -> io::Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(OUTPUT_DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    wtr.flush()
}
