//! Client-side narrowing of the book list.
//!
//! Three independent predicates are combined with AND: a case-insensitive
//! substring match on the genre, the same on the author, and an exact match
//! on the publication year. A predicate whose input is empty always passes.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::BookDto;

/// Year predicate, built from the raw text of the year input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    Any,
    Exact(i32),
    /// Non-empty input with no leading number. Matches nothing.
    Unparseable,
}

impl YearFilter {
    /// Reads the leading integer of `input`, ignoring anything after it,
    /// so `"1999"` and `"1999 or so"` both select 1999.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return YearFilter::Any;
        }

        let trimmed = input.trim_start();
        let (sign, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (-1, &trimmed[1..]),
            Some(b'+') => (1, &trimmed[1..]),
            _ => (1, trimmed),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());

        match digits[..end].parse::<i32>() {
            Ok(year) => YearFilter::Exact(sign * year),
            Err(_) => YearFilter::Unparseable,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, YearFilter::Any)
    }

    fn matches(&self, publication_date: &str) -> bool {
        match self {
            YearFilter::Any => true,
            YearFilter::Exact(year) => publication_year(publication_date) == Some(*year),
            YearFilter::Unparseable => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookFilter {
    pub genre: String,
    pub author: String,
    pub year: YearFilter,
}

impl BookFilter {
    pub fn new(genre: impl Into<String>, author: impl Into<String>, year_input: &str) -> Self {
        BookFilter {
            genre: genre.into(),
            author: author.into(),
            year: YearFilter::parse(year_input),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_empty() && self.author.is_empty() && self.year.is_any()
    }

    pub fn matches(&self, book: &BookDto) -> bool {
        contains_ignore_case(&book.genre, &self.genre)
            && contains_ignore_case(&book.author, &self.author)
            && self.year.matches(&book.publication_date)
    }
}

/// Keeps the books accepted by `filter`, in their original order.
pub fn filter_books<'a>(books: &'a [BookDto], filter: &BookFilter) -> Vec<&'a BookDto> {
    books.iter().filter(|book| filter.matches(book)).collect()
}

/// Year of an API publication date.
///
/// Accepts RFC 3339 date-times (the year is read in the offset they carry),
/// plain `YYYY-MM-DD` dates and offset-less date-times.
pub fn publication_year(date: &str) -> Option<i32> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.year());
    }
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.year())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
