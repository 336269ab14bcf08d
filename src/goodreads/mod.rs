mod fields;
mod reader;
pub mod title;

pub use fields::GoodreadsBook;
pub use reader::read_export;
pub use title::{parse_title, ParsedTitle};
