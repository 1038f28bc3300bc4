//! CSV sink for flattened rows
//!
//! Persists the final ordered row sequence as delimited tabular output with a
//! fixed column order. A sink failure is reported to the caller and never
//! alters the already-computed rows.

use crate::error::Result;
use crate::types::FlatRecord;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the rows to a CSV file at `path`, creating or truncating it.
///
/// Columns are always, in order: userId, userName, postId, postTitle,
/// commentId, commentBody, commentEmail. The header row is written even when
/// there are no records.
///
/// # Errors
/// Returns [`Error::Csv`](crate::error::Error::Csv) or
/// [`Error::Io`](crate::error::Error::Io) on write failure.
pub fn write_csv(records: &[FlatRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_into(records, &mut writer)?;
    info!(rows = records.len(), path = %path.display(), "Wrote CSV output");
    Ok(())
}

/// Write the rows as CSV to any writer. Used by [`write_csv`] and by tests.
///
/// # Errors
/// Returns [`Error::Csv`](crate::error::Error::Csv) on serialization failure.
pub fn write_records<W: Write>(records: &[FlatRecord], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    write_into(records, &mut writer)
}

fn write_into<W: Write>(records: &[FlatRecord], writer: &mut csv::Writer<W>) -> Result<()> {
    if records.is_empty() {
        // serde-driven headers only appear with at least one record, so
        // write them explicitly for the empty case
        writer.write_record([
            "userId",
            "userName",
            "postId",
            "postTitle",
            "commentId",
            "commentBody",
            "commentEmail",
        ])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FlatRecord {
        FlatRecord {
            user_id: 2,
            user_name: "Ann".to_string(),
            post_id: 7,
            post_title: "hello".to_string(),
            comment_id: 31,
            comment_body: "nice".to_string(),
            comment_email: "a@b.c".to_string(),
        }
    }

    #[test]
    fn header_uses_fixed_column_order() {
        let mut buf = Vec::new();
        write_records(&[sample_record()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "userId,userName,postId,postTitle,commentId,commentBody,commentEmail"
        );
        assert_eq!(lines.next().unwrap(), "2,Ann,7,hello,31,nice,a@b.c");
    }

    #[test]
    fn empty_input_still_writes_the_header() {
        let mut buf = Vec::new();
        write_records(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text.trim_end(),
            "userId,userName,postId,postTitle,commentId,commentBody,commentEmail"
        );
    }

    #[test]
    fn bodies_with_commas_are_quoted() {
        let record = FlatRecord {
            comment_body: "well, actually".to_string(),
            ..sample_record()
        };
        let mut buf = Vec::new();
        write_records(&[record], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\"well, actually\""));
    }

    #[test]
    fn write_csv_creates_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");

        write_csv(&[sample_record()], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("userId,"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn unwritable_path_surfaces_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("rows.csv");

        assert!(write_csv(&[sample_record()], &path).is_err());
    }
}
