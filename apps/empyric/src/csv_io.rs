//! CSV import and export of tables.
//!
//! The header row holds column names. A column whose every cell parses as
//! `i64` is imported as `Int64`, otherwise as `Float64` when every cell
//! parses as `f64`. Empty cells read as NaN and force `Float64`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use empyric_core::{Column, Table};

/// Reads a table from a CSV file.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    read_table_from(file)
}

/// Reads a table from any CSV source.
pub fn read_table_from<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        bail!("CSV input has no header row");
    }

    let records = reader
        .records()
        .collect::<Result<Vec<_>, csv::Error>>()
        .context("Malformed CSV record")?;

    let columns = headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cells: Vec<&str> = records.iter().map(|r| r.get(index).unwrap_or("")).collect();
            parse_column(name, &cells)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        columns = columns.len(),
        rows = records.len(),
        "csv imported"
    );
    Ok(Table::new(columns)?)
}

fn parse_column(name: &str, cells: &[&str]) -> Result<Column> {
    if let Ok(values) = cells.iter().map(|c| c.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
        return Ok(Column::int(name, values));
    }

    let mut values = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            values.push(f64::NAN);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) => values.push(v),
            Err(_) => bail!(
                "column '{}' is not numeric: {:?} in row {}",
                name,
                cell,
                row + 1
            ),
        }
    }
    Ok(Column::float(name, values))
}

/// Writes a table to a CSV file, replacing it.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    write_table_to(table, file)
}

/// Writes a table as CSV. Floats keep a fractional part so they read back
/// as floats.
pub fn write_table_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
