//! Appends a smoothed copy of one CSV column to the file.
//!
//! Usage: `append_smoothed <file.csv> <column> [window] [polynomial]`

use std::error::Error;

use savgol_gram::{read_csv_column, savitzky_golay, FilterOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data.csv".to_string());
    let column_name = args.next().unwrap_or_else(|| "A".to_string());
    let window_size = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(41);
    let polynomial = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(5);
    let smoothed_col_name = format!("{}_smoothed", column_name);

    // Read the whole CSV into memory
    let mut rdr = csv::Reader::from_path(&path)?;
    let headers = rdr.headers()?.clone();
    let mut records = rdr.records().collect::<Result<Vec<csv::StringRecord>, _>>()?;

    let data = read_csv_column(&path, &column_name)?;
    let smoothed = savitzky_golay(&data, 1.0, &FilterOptions::new(window_size, polynomial))?;

    for (i, record) in records.iter_mut().enumerate() {
        let value = smoothed.get(i).map(|v| v.to_string()).unwrap_or_default();
        record.push_field(&value);
    }

    let mut wtr = csv::Writer::from_path(&path)?;
    let mut new_headers = headers.clone();
    new_headers.push_field(&smoothed_col_name);
    wtr.write_record(&new_headers)?;
    for record in records {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    println!("Smoothed column appended to {}!", path);
    Ok(())
}
