//! Feature table serialization.
//!
//! Each alpha writes one file named `x_train_alpha(<alpha>).<ext>` so that
//! all sweep outputs coexist in one directory.
//!
//! - **csv**: header row of column names, one row per user.
//! - **json**: `{"columns": [...], "index": [...user ids], "data": [[...], ...]}`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::table::FeatureTable;
use crate::error::{Error, Result};
use crate::types::UserId;

/// Column name used when user ids are written as a CSV column.
pub const USER_ID_COLUMN: &str = "UID";

/// On-disk table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format {other:?} (expected csv or json)")),
        }
    }
}

/// Decimal form of alpha used in file names (`0.005`, `0.01`, `1.0`).
pub fn format_alpha(alpha: f64) -> String {
    if alpha.fract() == 0.0 {
        format!("{alpha:.1}")
    } else {
        format!("{alpha}")
    }
}

/// `<dir>/x_train_alpha(<alpha>).<ext>`
pub fn output_path(dir: &Path, alpha: f64, format: OutputFormat) -> PathBuf {
    dir.join(format!(
        "x_train_alpha({}).{}",
        format_alpha(alpha),
        format.extension()
    ))
}

/// Write `table` to `path` in `format`.
pub fn write_table(
    table: &FeatureTable,
    path: &Path,
    format: OutputFormat,
    include_user_id: bool,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => write_csv(table, writer, include_user_id)
            .map_err(|e| Error::csv(path, e)),
        OutputFormat::Json => write_json(table, writer, path),
    }
}

fn write_csv<W: Write>(
    table: &FeatureTable,
    writer: W,
    include_user_id: bool,
) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(table.num_columns() + 1);
    if include_user_id {
        header.push(USER_ID_COLUMN);
    }
    header.extend(table.column_names());
    writer.write_record(&header)?;

    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for (row, user) in table.user_ids().iter().enumerate() {
        record.clear();
        if include_user_id {
            record.push(user.to_string());
        }
        record.extend(table.row(row).map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SplitTable<'a> {
    columns: Vec<&'a str>,
    index: &'a [UserId],
    data: Vec<Vec<f64>>,
}

fn write_json<W: Write>(table: &FeatureTable, mut writer: W, path: &Path) -> Result<()> {
    let split = SplitTable {
        columns: table.column_names(),
        index: table.user_ids(),
        data: (0..table.num_rows()).map(|r| table.row(r).collect()).collect(),
    };
    serde_json::to_writer(&mut writer, &split)?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::table::Column;

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new(vec![1, 2]);
        table.push_column(Column::new("age1", vec![1.0, 0.0])).unwrap();
        table.push_column(Column::new("PR", vec![0.5, 1.0])).unwrap();
        table
    }

    #[test]
    fn test_format_alpha() {
        assert_eq!(format_alpha(0.005), "0.005");
        assert_eq!(format_alpha(0.01), "0.01");
        assert_eq!(format_alpha(0.045), "0.045");
        assert_eq!(format_alpha(1.0), "1.0");
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("data100k"), 0.015, OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("data100k/x_train_alpha(0.015).csv"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("pkl".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample_table(), &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "age1,PR\n1,0.5\n0,1\n");
    }

    #[test]
    fn test_write_csv_with_user_id() {
        let mut buf = Vec::new();
        write_csv(&sample_table(), &mut buf, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("UID,age1,PR"));
        assert_eq!(text.lines().nth(2), Some("2,0,1"));
    }

    #[test]
    fn test_write_json_split_layout() {
        let mut buf = Vec::new();
        write_json(&sample_table(), &mut buf, Path::new("t.json")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["columns"], serde_json::json!(["age1", "PR"]));
        assert_eq!(value["index"], serde_json::json!([1, 2]));
        assert_eq!(value["data"][1], serde_json::json!([0.0, 1.0]));
    }
}
