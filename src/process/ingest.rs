// src/process/ingest.rs
use anyhow::{anyhow, bail, Context};
use csv::ReaderBuilder;
use std::{collections::HashSet, fs, path::Path};
use tracing::{debug, instrument};

use super::Progress;
use crate::error::{PipelineError, Result};
use crate::settings::Dialect;
use crate::table::{Row, Table};

/// Read every file in order, emitting a `Reading` notification before each.
/// The first failure aborts the whole batch.
pub fn ingest_all<P: AsRef<Path>>(
    paths: &[P],
    dialects: &[Dialect],
    on_progress: &mut dyn FnMut(Progress),
) -> Result<Vec<Table>> {
    let total = paths.len();
    let mut tables = Vec::with_capacity(total);
    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        on_progress(Progress::Reading {
            index: i + 1,
            total,
            file: display_name(path),
        });
        tables.push(ingest(path, dialects)?);
    }
    Ok(tables)
}

/// Read one file into a table, trying `dialects` in order.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn ingest(path: &Path, dialects: &[Dialect]) -> Result<Table> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (table, dialect) = sniff(&bytes, dialects)
        .map_err(|e| PipelineError::parse(path, format!("{:#}", e)))?;
    debug!(
        %dialect,
        columns = table.num_columns(),
        rows = table.num_rows(),
        "parsed"
    );
    Ok(table)
}

/// Resolve the dialect of `bytes`. Every dialect but the last is accepted only when it
/// yields more than one column; the last one is taken as-is and its error is returned.
pub fn sniff(bytes: &[u8], dialects: &[Dialect]) -> anyhow::Result<(Table, Dialect)> {
    let (last, rest) = dialects
        .split_last()
        .ok_or_else(|| anyhow!("no dialects configured"))?;

    for &dialect in rest {
        match parse_with(bytes, dialect) {
            Ok(table) if table.num_columns() > 1 => return Ok((table, dialect)),
            Ok(_) => debug!(%dialect, "single column, trying next dialect"),
            Err(e) => debug!(%dialect, error = %e, "dialect rejected"),
        }
    }

    let table = parse_with(bytes, *last).with_context(|| format!("as {}", last))?;
    Ok((table, *last))
}

fn parse_with(bytes: &[u8], dialect: Dialect) -> anyhow::Result<Table> {
    let text = dialect
        .encoding
        .decode(bytes)
        .with_context(|| format!("decoding {}", dialect.encoding))?;

    // flexible: short records are padded below, long ones rejected explicitly
    let mut rdr = ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = rdr.records();

    let header = match records.next() {
        Some(r) => r.context("reading header")?,
        None => bail!("no columns to parse from file"),
    };
    let mut table = Table::new(normalize_headers(header.iter()));
    let width = table.num_columns();

    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line());
            bail!(
                "expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            );
        }
        let mut row: Row = record
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect();
        row.resize(width, None);
        table.rows.push(row);
    }

    Ok(table)
}

/// Empty names become `Unnamed: <pos>`; repeats get the first free `.N` suffix.
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (i, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
