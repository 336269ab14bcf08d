use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::fields::{GoodreadsBook, GOODREADS_HEADERS};

/// Read every book from a Goodreads library export CSV
pub fn read_export(path: &Path) -> Result<Vec<GoodreadsBook>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open Goodreads export: {}", path.display()))?;

    let books = read_export_from(file)
        .with_context(|| format!("Failed to read Goodreads export: {}", path.display()))?;

    debug!(path = %path.display(), count = books.len(), "read goodreads export");
    Ok(books)
}

/// Read every book from CSV data with a header row
pub fn read_export_from<R: Read>(reader: R) -> Result<Vec<GoodreadsBook>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().context("Missing header row")?.clone();
    for expected in GOODREADS_HEADERS {
        if !headers.iter().any(|h| h.trim() == *expected) {
            warn!(column = expected, "goodreads export is missing a column");
        }
    }

    let mut books = Vec::new();
    for (index, row) in csv_reader.deserialize().enumerate() {
        // Row 1 is the header
        let book: GoodreadsBook = row.with_context(|| format!("Invalid row {}", index + 2))?;
        books.push(book);
    }

    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Book Id,Title,Author,Additional Authors,My Rating,Number of Pages,Original Publication Year,Date Read,Exclusive Shelf,Read Count
4671,\"The Great Gatsby: A Novel (Classics, #1)\",F. Scott Fitzgerald,,4,180,1925,2023/05/01,read,1
62291,\"A Feast for Crows (A Song of Ice and Fire #4)\",George R.R. Martin,,0,753,2005,,to-read,0
";

    #[test]
    fn test_read_export_from_csv() {
        let books = read_export_from(SAMPLE.as_bytes()).unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].book_id, "4671");
        assert_eq!(books[0].title, "The Great Gatsby: A Novel (Classics, #1)");
        assert_eq!(books[0].author, "F. Scott Fitzgerald");
        assert_eq!(books[0].date_read, "2023/05/01");
        assert_eq!(books[1].exclusive_shelf, "to-read");
        assert_eq!(books[1].my_rating, "0");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let books = read_export_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(books[0].isbn, "");
        assert_eq!(books[0].publisher, "");
        assert_eq!(books[0].private_notes, "");
    }

    #[test]
    fn test_read_export_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("goodreads_library_export.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let books = read_export(&path).unwrap();
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn test_read_nonexistent_export_returns_error() {
        let result = read_export(Path::new("/nonexistent/export.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_header_only_export_is_empty() {
        let books = read_export_from("Book Id,Title\n".as_bytes()).unwrap();
        assert!(books.is_empty());
    }
}
