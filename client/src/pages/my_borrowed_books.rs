use common::BookDto;

use crate::api::ApiClient;

#[derive(Debug, Default)]
pub struct MyBorrowedBooksPage {
    pub books: Vec<BookDto>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MyBorrowedBooksPage {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.begin_load();
        match api.my_borrowed_books().await {
            Ok(books) => {
                self.books = books;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching borrowed books: {}", e);
                self.error = Some("Error fetching borrowed books".to_string());
            }
        }
        self.loading = false;
    }

    /// Returns a book and drops it from the list once the server accepts.
    pub async fn return_book(&mut self, api: &ApiClient, book_id: &str) -> bool {
        match api.return_book(book_id).await {
            Ok(()) => {
                self.books.retain(|book| book.id != book_id);
                true
            }
            Err(e) => {
                tracing::warn!("Error returning book {}: {}", book_id, e);
                self.error = Some("Error returning book".to_string());
                false
            }
        }
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.then_some("Loading borrowed books...")
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.books.is_empty())
            .then_some("You haven't borrowed any books yet.")
    }
}
