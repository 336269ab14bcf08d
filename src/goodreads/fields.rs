use serde::{Deserialize, Serialize};

/// Column headers of a Goodreads library export, in export order
pub const GOODREADS_HEADERS: &[&str] = &[
    "Book Id",
    "Title",
    "Author",
    "Author l-f",
    "Additional Authors",
    "ISBN",
    "ISBN13",
    "My Rating",
    "Average Rating",
    "Publisher",
    "Binding",
    "Number of Pages",
    "Year Published",
    "Original Publication Year",
    "Date Read",
    "Date Added",
    "Bookshelves",
    "Bookshelves with positions",
    "Exclusive Shelf",
    "My Review",
    "Spoiler",
    "Private Notes",
    "Read Count",
    "Owned Copies",
];

/// One row of a Goodreads library export. Every column is kept as text.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GoodreadsBook {
    #[serde(rename = "Book Id")]
    pub book_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Author l-f")]
    pub author_last_first: String,
    #[serde(rename = "Additional Authors")]
    pub additional_authors: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "ISBN13")]
    pub isbn13: String,
    #[serde(rename = "My Rating")]
    pub my_rating: String,
    #[serde(rename = "Average Rating")]
    pub average_rating: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "Binding")]
    pub binding: String,
    #[serde(rename = "Number of Pages")]
    pub number_of_pages: String,
    #[serde(rename = "Year Published")]
    pub year_published: String,
    #[serde(rename = "Original Publication Year")]
    pub original_publication_year: String,
    #[serde(rename = "Date Read")]
    pub date_read: String,
    #[serde(rename = "Date Added")]
    pub date_added: String,
    #[serde(rename = "Bookshelves")]
    pub bookshelves: String,
    #[serde(rename = "Bookshelves with positions")]
    pub bookshelves_with_positions: String,
    #[serde(rename = "Exclusive Shelf")]
    pub exclusive_shelf: String,
    #[serde(rename = "My Review")]
    pub my_review: String,
    #[serde(rename = "Spoiler")]
    pub spoiler: String,
    #[serde(rename = "Private Notes")]
    pub private_notes: String,
    #[serde(rename = "Read Count")]
    pub read_count: String,
    #[serde(rename = "Owned Copies")]
    pub owned_copies: String,
}

impl GoodreadsBook {
    /// True when no shelf filter is given or the book's exclusive shelf matches it
    pub fn is_on_shelf(&self, shelf: Option<&str>) -> bool {
        shelf.map_or(true, |shelf| self.exclusive_shelf.trim() == shelf)
    }
}
