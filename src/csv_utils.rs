use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Which CSV column to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelector<'a> {
    /// Column with this header name
    Name(&'a str),
    /// Zero-based column index
    Index(usize),
}

/// Reads one numeric column from CSV data with a header row, skipping
/// missing or unparsable cells.
pub fn read_column<R: Read>(
    reader: R,
    column: ColumnSelector<'_>,
) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let col_index = match column {
        ColumnSelector::Index(index) => index,
        ColumnSelector::Name(name) => rdr
            .headers()?
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| format!("column '{}' not found in CSV header", name))?,
    };

    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(val) = record.get(col_index).and_then(|field| field.trim().parse::<f64>().ok()) {
            values.push(val);
        }
    }
    log::debug!("read {} values from CSV column {:?}", values.len(), column);
    Ok(values)
}

/// Reads a column of f64 values from a CSV file by column name.
pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    read_column(File::open(path)?, ColumnSelector::Name(column))
}

/// Reads a column of f64 values from a CSV file by column index.
pub fn read_csv_column_by_index<P: AsRef<Path>>(
    path: P,
    col_index: usize,
) -> Result<Vec<f64>, Box<dyn Error>> {
    read_column(File::open(path)?, ColumnSelector::Index(col_index))
}
