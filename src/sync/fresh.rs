//! Frontmatter computed from a Goodreads export row

use chrono::NaiveDate;

use crate::frontmatter::{MetadataRecord, MetadataValue};
use crate::goodreads::{parse_title, GoodreadsBook};

const BOOK_URL_PREFIX: &str = "https://www.goodreads.com/book/show/";

/// Build the frontmatter a note should have according to the export
pub fn fresh_record(book: &GoodreadsBook) -> MetadataRecord {
    let parsed = parse_title(&book.title);
    let mut record = MetadataRecord::new();

    record.insert("aliases", MetadataValue::List(Vec::new()));
    record.insert("tags", vec!["books"]);
    record.insert("categories", vec!["[[Books]]"]);
    record.insert("url", format!("{}{}", BOOK_URL_PREFIX, book.book_id.trim()));
    record.insert("title", parsed.title);
    if let Some(subtitle) = parsed.subtitle {
        record.insert("subtitle", subtitle);
    }
    if let Some(series_name) = parsed.series_name {
        record.insert("series-name", series_name);
    }
    if let Some(series_number) = parsed.series_number {
        record.insert("series-number", series_number);
    }
    record.insert("author", authors(book));
    record.insert("shelf", book.exclusive_shelf.trim());
    insert_integer(&mut record, "rating", &book.my_rating);
    insert_integer(&mut record, "length", &book.number_of_pages);
    insert_integer(&mut record, "year", &book.original_publication_year);
    record.insert("read-last", read_date(&book.date_read));

    let read_count = if book.read_count.trim().is_empty() {
        "0"
    } else {
        book.read_count.as_str()
    };
    insert_integer(&mut record, "read-count", read_count);
    record.insert("topics", MetadataValue::List(Vec::new()));

    record
}

fn insert_integer(record: &mut MetadataRecord, key: &str, raw: &str) {
    if let Some(n) = MetadataValue::from(raw).coerce_integer() {
        record.insert(key, n);
    }
}

/// Primary author plus comma-separated additional authors, as wikilinks
fn authors(book: &GoodreadsBook) -> Vec<String> {
    std::iter::once(book.author.as_str())
        .chain(book.additional_authors.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!("[[{}]]", name))
        .collect()
}

/// Goodreads writes "2023/05/01"; notes use "2023-05-01"
fn read_date(raw: &str) -> String {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.replace('/', "-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gatsby() -> GoodreadsBook {
        GoodreadsBook {
            book_id: "4671".to_string(),
            title: "The Great Gatsby: A Novel (Classics, #1)".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            my_rating: "4".to_string(),
            number_of_pages: "180".to_string(),
            original_publication_year: "1925".to_string(),
            date_read: "2023/5/1".to_string(),
            exclusive_shelf: "read".to_string(),
            read_count: "2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_record_fields() {
        let record = fresh_record(&gatsby());

        assert_eq!(
            record.get("url"),
            Some(&MetadataValue::from("https://www.goodreads.com/book/show/4671"))
        );
        assert_eq!(record.get("title"), Some(&MetadataValue::from("The Great Gatsby")));
        assert_eq!(record.get("subtitle"), Some(&MetadataValue::from("A Novel")));
        assert_eq!(record.get("series-name"), Some(&MetadataValue::from("Classics")));
        assert_eq!(record.get("series-number"), Some(&MetadataValue::from("1")));
        assert_eq!(
            record.get("author"),
            Some(&MetadataValue::from(vec!["[[F. Scott Fitzgerald]]"]))
        );
        assert_eq!(record.get("shelf"), Some(&MetadataValue::from("read")));
        assert_eq!(record.get("rating"), Some(&MetadataValue::Integer(4)));
        assert_eq!(record.get("length"), Some(&MetadataValue::Integer(180)));
        assert_eq!(record.get("year"), Some(&MetadataValue::Integer(1925)));
        assert_eq!(record.get("read-last"), Some(&MetadataValue::from("2023-05-01")));
        assert_eq!(record.get("read-count"), Some(&MetadataValue::Integer(2)));
    }

    #[test]
    fn test_fresh_record_key_order() {
        let record = fresh_record(&gatsby());
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec![
                "aliases",
                "tags",
                "categories",
                "url",
                "title",
                "subtitle",
                "series-name",
                "series-number",
                "author",
                "shelf",
                "rating",
                "length",
                "year",
                "read-last",
                "read-count",
                "topics",
            ]
        );
    }

    #[test]
    fn test_absent_title_parts_are_omitted() {
        let book = GoodreadsBook {
            title: "Dune".to_string(),
            ..Default::default()
        };
        let record = fresh_record(&book);

        assert!(!record.contains_key("subtitle"));
        assert!(!record.contains_key("series-name"));
        assert!(!record.contains_key("series-number"));
    }

    #[test]
    fn test_blank_numbers() {
        let book = GoodreadsBook {
            title: "Dune".to_string(),
            ..Default::default()
        };
        let record = fresh_record(&book);

        assert!(!record.contains_key("rating"));
        assert!(!record.contains_key("year"));
        assert_eq!(record.get("read-count"), Some(&MetadataValue::Integer(0)));
        assert_eq!(record.get("read-last"), Some(&MetadataValue::from("")));
    }

    #[test]
    fn test_additional_authors() {
        let book = GoodreadsBook {
            author: "Terry Pratchett".to_string(),
            additional_authors: "Neil Gaiman, ".to_string(),
            ..Default::default()
        };

        assert_eq!(
            authors(&book),
            vec!["[[Terry Pratchett]]".to_string(), "[[Neil Gaiman]]".to_string()]
        );
    }

    #[test]
    fn test_read_date() {
        assert_eq!(read_date("2023/05/01"), "2023-05-01");
        assert_eq!(read_date("2023/5/1"), "2023-05-01");
        assert_eq!(read_date("2023/05"), "2023-05");
        assert_eq!(read_date(""), "");
    }
}
