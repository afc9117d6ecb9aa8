//! CSV downloads. Every page exports with the same convention: a header line,
//! one row per record, and fields quoted only when they hold a comma, a quote
//! or a line break (embedded quotes doubled).

mod records;

use chrono::NaiveDate;

use crate::error::AppError;

pub trait CsvRecord {
    /// File name stem, e.g. `transactions` for `transactions-2025-02-27.csv`.
    const FILE_PREFIX: &'static str;
    const HEADER: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
    pub rows: usize,
}

pub fn export<T: CsvRecord>(records: &[T], date: NaiveDate) -> Result<CsvExport, AppError> {
    Ok(CsvExport {
        filename: filename(T::FILE_PREFIX, date),
        body: to_csv(records)?,
        rows: records.len(),
    })
}

pub fn to_csv<T: CsvRecord>(records: &[T]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(T::HEADER)?;
    for record in records {
        writer.write_record(record.row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::Internal(format!("csv flush failed: {err}")))?;

    String::from_utf8(bytes)
        .map_err(|err| AppError::Internal(format!("csv is not valid utf8: {err}")))
}

pub fn filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}
