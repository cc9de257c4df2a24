//! Headerless delimited-file loaders for the ratings and user tables.
//!
//! Both files have fixed, undeclared column layouts:
//! - ratings: `UID \t MID \t rate \t time`
//! - users:   `UID | age | gender | job | zip`

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{Rating, User};

const RATING_FIELDS: usize = 4;
const USER_FIELDS: usize = 5;

/// Load the ratings file (tab separated).
pub fn load_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_ratings(file, path)
}

/// Load the user attribute file (pipe separated).
pub fn load_users(path: &Path) -> Result<Vec<User>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_users(file, path)
}

/// Parse ratings from any reader; `path` is only used in error messages.
pub fn read_ratings<R: Read>(reader: R, path: &Path) -> Result<Vec<Rating>> {
    let mut reader = reader_builder(b'\t').from_reader(reader);
    let mut ratings = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| Error::csv(path, e))?;
        let line = line_of(&record);
        if is_blank(&record) {
            continue;
        }
        expect_fields(&record, RATING_FIELDS, path, line)?;

        ratings.push(Rating {
            user_id: parse_field(&record[0], "UID", path, line)?,
            item_id: parse_field(&record[1], "MID", path, line)?,
            rating: parse_field(&record[2], "rate", path, line)?,
            timestamp: parse_field(&record[3], "time", path, line)?,
        });
    }

    Ok(ratings)
}

/// Parse users from any reader; `path` is only used in error messages.
pub fn read_users<R: Read>(reader: R, path: &Path) -> Result<Vec<User>> {
    let mut reader = reader_builder(b'|').from_reader(reader);
    let mut users = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| Error::csv(path, e))?;
        let line = line_of(&record);
        if is_blank(&record) {
            continue;
        }
        expect_fields(&record, USER_FIELDS, path, line)?;

        let gender = non_empty(&record[2], "gender", path, line)?;
        let occupation = non_empty(&record[3], "job", path, line)?;

        users.push(User {
            user_id: parse_field(&record[0], "UID", path, line)?,
            age: parse_field(&record[1], "age", path, line)?,
            gender,
            occupation,
            zip: record[4].trim().to_string(),
        });
    }

    Ok(users)
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

fn expect_fields(record: &csv::StringRecord, expected: usize, path: &Path, line: u64) -> Result<()> {
    if record.len() != expected {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("expected {expected} fields, found {}", record.len()),
        });
    }
    Ok(())
}

fn parse_field<T: FromStr>(raw: &str, column: &str, path: &Path, line: u64) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("column {column}: cannot parse {raw:?}"),
    })
}

fn non_empty(raw: &str, column: &str, path: &Path, line: u64) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("column {column} is empty"),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ratings() {
        let data = "1\t1\t5\t874965758\n1\t2\t3\t876893171\n2\t1\t4\t888550871\n";
        let ratings = read_ratings(data.as_bytes(), Path::new("ua.base")).unwrap();

        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[0], Rating { user_id: 1, item_id: 1, rating: 5, timestamp: 874965758 });
        assert_eq!(ratings[2].user_id, 2);
        assert_eq!(ratings[2].rating, 4);
    }

    #[test]
    fn test_read_users() {
        let data = "1|24|M|technician|85711\n2|53|F|other|94043\n";
        let users = read_users(data.as_bytes(), Path::new("u.user")).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].age, 24);
        assert_eq!(users[0].gender, "M");
        assert_eq!(users[0].occupation, "technician");
        assert_eq!(users[1].zip, "94043");
    }

    #[test]
    fn test_alphanumeric_zip_is_kept() {
        let data = "7|57|M|administrator|T8H1N\n";
        let users = read_users(data.as_bytes(), Path::new("u.user")).unwrap();
        assert_eq!(users[0].zip, "T8H1N");
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let data = "1\t1\t5\t874965758\n1\t2\t3\n";
        let err = read_ratings(data.as_bytes(), Path::new("ua.base")).unwrap_err();
        match err {
            Error::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 4 fields"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_rating() {
        let data = "1\t1\tfive\t874965758\n";
        let err = read_ratings(data.as_bytes(), Path::new("ua.base")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_gender_rejected() {
        let data = "1|24||technician|85711\n";
        let err = read_users(data.as_bytes(), Path::new("u.user")).unwrap_err();
        assert!(err.to_string().contains("gender"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_ratings(Path::new("/nonexistent/ua.base")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
