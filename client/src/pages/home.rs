use common::filter::{filter_books, BookFilter};
use common::BookDto;

use crate::api::ApiClient;

/// The catalogue with its three filter inputs.
#[derive(Debug, Default)]
pub struct HomePage {
    pub books: Vec<BookDto>,
    pub loading: bool,
    pub error: Option<String>,
    filter: BookFilter,
    year_input: String,
}

impl HomePage {
    /// Marks the catalogue as in flight so the screen can say so before
    /// [`HomePage::load`] is awaited.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.begin_load();
        match api.list_books().await {
            Ok(books) => {
                tracing::debug!("Fetched {} books", books.len());
                self.books = books;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching books: {}", e);
                self.error = Some("Error fetching books".to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.filter.genre = genre.to_string();
    }

    pub fn set_author(&mut self, author: &str) {
        self.filter.author = author.to_string();
    }

    pub fn set_year_input(&mut self, year: &str) {
        self.year_input = year.to_string();
        self.filter.year = common::filter::YearFilter::parse(year);
    }

    pub fn genre(&self) -> &str {
        &self.filter.genre
    }

    pub fn author(&self) -> &str {
        &self.filter.author
    }

    pub fn year_input(&self) -> &str {
        &self.year_input
    }

    pub fn visible_books(&self) -> Vec<&BookDto> {
        filter_books(&self.books, &self.filter)
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.then_some("Loading books...")
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.loading {
            None
        } else if self.visible_books().is_empty() {
            Some("No books found")
        } else {
            None
        }
    }
}
